//! The `new` expression node.

use super::expr::{ArgumentList, CodeReference, Expr, NamedArgument};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Stable identity of a call site, used as the resolve-cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallSiteId(pub u32);

/// Ids handed out by [`CallSiteId::fresh`] start here, above hand-written
/// fixture ids. A workspace that still ends up with a repeated id is
/// rejected when it loads.
const FRESH_ID_BASE: u32 = 1 << 20;

static NEXT_ID: AtomicU32 = AtomicU32::new(FRESH_ID_BASE);

impl CallSiteId {
    pub fn fresh() -> Self {
        CallSiteId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for CallSiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// `new Base(args) { ... }`: the anonymous declaration owns the base
/// reference and the argument list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymousClass {
    pub base: CodeReference,
    #[serde(default)]
    pub arguments: Option<ArgumentList>,
}

/// `[n][m]` in `new T[n][m]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayDeclaration {
    pub dimensions: usize,
}

/// Children of a `new` expression in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewChild {
    Keyword,
    Whitespace(String),
    /// Unparseable fragment left by the editor.
    Error(String),
    /// Explicit constructor type arguments: `new <T>Foo()`.
    TypeArguments(Vec<CodeReference>),
    Reference(CodeReference),
    /// Builtin type element such as `int` in `new int[3]`.
    BuiltinType(String),
    Arguments(ArgumentList),
    Anonymous(AnonymousClass),
    ArrayDeclaration(ArrayDeclaration),
    ArrayInitializer(Vec<Expr>),
}

impl NewChild {
    fn is_trivia(&self) -> bool {
        matches!(self, NewChild::Whitespace(_) | NewChild::Error(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpr {
    #[serde(default = "CallSiteId::fresh")]
    pub id: CallSiteId,
    /// Explicit enclosing instance: `outer.new Inner()`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<Box<Expr>>,
    pub children: Vec<NewChild>,
}

impl NewExpr {
    /// An empty `new` node with only the keyword.
    pub fn new(id: CallSiteId) -> Self {
        Self {
            id,
            qualifier: None,
            children: vec![NewChild::Keyword],
        }
    }

    /// `new <reference>` with a fresh id and no argument list.
    pub fn of(reference: CodeReference) -> Self {
        Self::new(CallSiteId::fresh())
            .with_child(NewChild::Whitespace(" ".to_string()))
            .with_child(NewChild::Reference(reference))
    }

    pub fn with_id(mut self, id: CallSiteId) -> Self {
        self.id = id;
        self
    }

    pub fn with_child(mut self, child: NewChild) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_arguments(self, arguments: ArgumentList) -> Self {
        self.with_child(NewChild::Arguments(arguments))
    }

    pub fn with_qualifier(mut self, qualifier: Expr) -> Self {
        self.qualifier = Some(Box::new(qualifier));
        self
    }

    pub fn anonymous_class(&self) -> Option<&AnonymousClass> {
        self.children.iter().find_map(|child| match child {
            NewChild::Anonymous(anonymous) => Some(anonymous),
            _ => None,
        })
    }

    /// The constructed type; read from the anonymous declaration when present.
    pub fn reference_element(&self) -> Option<&CodeReference> {
        if let Some(anonymous) = self.anonymous_class() {
            return Some(&anonymous.base);
        }
        self.children.iter().find_map(|child| match child {
            NewChild::Reference(reference) => Some(reference),
            _ => None,
        })
    }

    /// The call arguments; read from the anonymous declaration when present.
    pub fn argument_list(&self) -> Option<&ArgumentList> {
        if let Some(anonymous) = self.anonymous_class() {
            return anonymous.arguments.as_ref();
        }
        self.children.iter().find_map(|child| match child {
            NewChild::Arguments(arguments) => Some(arguments),
            _ => None,
        })
    }

    pub fn named_arguments(&self) -> &[NamedArgument] {
        self.argument_list()
            .map(ArgumentList::named_arguments)
            .unwrap_or_default()
    }

    pub fn array_declaration(&self) -> Option<&ArrayDeclaration> {
        self.children.iter().find_map(|child| match child {
            NewChild::ArrayDeclaration(declaration) => Some(declaration),
            _ => None,
        })
    }

    pub fn array_count(&self) -> usize {
        self.array_declaration()
            .map_or(0, |declaration| declaration.dimensions)
    }

    pub fn array_initializer(&self) -> Option<&[Expr]> {
        self.children.iter().find_map(|child| match child {
            NewChild::ArrayInitializer(items) => Some(items.as_slice()),
            _ => None,
        })
    }

    pub fn constructor_type_arguments(&self) -> Option<&[CodeReference]> {
        self.children.iter().find_map(|child| match child {
            NewChild::TypeArguments(args) => Some(args.as_slice()),
            _ => None,
        })
    }

    pub fn type_element(&self) -> Option<&str> {
        self.children.iter().find_map(|child| match child {
            NewChild::BuiltinType(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Add a named argument, creating the argument list first if the call
    /// has none (`new Foo` → `new Foo(a: 1)`).
    pub fn add_named_argument(&mut self, argument: NamedArgument) -> &NamedArgument {
        self.ensure_argument_list().push_named(argument)
    }

    fn ensure_argument_list(&mut self) -> &mut ArgumentList {
        let index = match self.argument_slot() {
            Some(index) => index,
            None => {
                let at = self.argument_list_insertion_point();
                self.children
                    .insert(at, NewChild::Arguments(ArgumentList::default()));
                at
            }
        };

        match &mut self.children[index] {
            NewChild::Anonymous(anonymous) => {
                anonymous.arguments.get_or_insert_with(ArgumentList::default)
            }
            NewChild::Arguments(arguments) => arguments,
            _ => unreachable!("argument slot always points at arguments or an anonymous class"),
        }
    }

    /// Index of the child that owns the argument list.
    fn argument_slot(&self) -> Option<usize> {
        self.children
            .iter()
            .position(|child| matches!(child, NewChild::Anonymous(_)))
            .or_else(|| {
                self.children
                    .iter()
                    .position(|child| matches!(child, NewChild::Arguments(_)))
            })
    }

    /// Right after the last child that is neither whitespace nor an error fragment.
    fn argument_list_insertion_point(&self) -> usize {
        let trailing = self
            .children
            .iter()
            .rev()
            .take_while(|child| child.is_trivia())
            .count();
        self.children.len() - trailing
    }
}

impl fmt::Display for NewExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NEW expression")
    }
}
