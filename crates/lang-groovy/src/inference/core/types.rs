//! Data structures for the type inference system.
//!
//! These are pure data types with no behavior logic.

use grail_api::models::{JAVA_UTIL_LINKED_HASH_MAP, TypeRef};
use serde::{Deserialize, Serialize};

/// Helper trait for TypeRef operations
pub trait TypeRefExt {
    /// FQN of the class this type erases to, if any.
    fn as_fqn(&self) -> Option<String>;
}

impl TypeRefExt for TypeRef {
    fn as_fqn(&self) -> Option<String> {
        match self {
            TypeRef::Id(fqn) => Some(fqn.clone()),
            TypeRef::Generic { base, .. } => base.as_fqn(),
            TypeRef::Map { .. } => Some(JAVA_UTIL_LINKED_HASH_MAP.to_string()),
            _ => None,
        }
    }
}

/// Information about a type (class, interface, enum, etc.)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    /// Fully qualified name, e.g., "java.util.List"
    pub fqn: String,
    /// Kind of type
    pub kind: TypeKind,
    /// Modifiers like public, abstract, static
    pub modifiers: Vec<String>,
    /// Generic type parameters, e.g., `<K, V>`
    pub type_parameters: Vec<TypeParameter>,
    /// Declaring class for nested types
    #[serde(default)]
    pub outer: Option<String>,
}

impl TypeInfo {
    pub fn new(fqn: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            fqn: fqn.into(),
            kind,
            modifiers: Vec::new(),
            type_parameters: Vec::new(),
            outer: None,
        }
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }

    /// A non-static class nested in another class. Its instances carry a
    /// reference to an enclosing instance of `outer`.
    pub fn is_inner(&self) -> bool {
        self.outer.is_some() && self.kind == TypeKind::Class && !self.has_modifier("static")
    }
}

/// Kind of type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
    Trait,
    Enum,
    Annotation,
}

/// A generic type parameter declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameter {
    /// Parameter name, e.g., "T"
    pub name: String,
    /// Upper bounds, e.g., ["Comparable"] for `T extends Comparable<T>`
    pub bounds: Vec<String>,
}

/// Information about a member (constructor, method, field)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    /// Simple name; constructors use the class's simple name
    pub name: String,
    /// Fully qualified name, e.g., "com.example.Point#Point(int,int)"
    pub fqn: String,
    /// Kind of member
    pub kind: MemberKind,
    /// The type that declares this member
    pub declaring_type: String,
    /// Field type or method return type; the class type for constructors
    pub type_ref: TypeRef,
    /// Parameters (None for fields)
    pub parameters: Option<Vec<ParameterInfo>>,
    /// Modifiers like public, private, static
    pub modifiers: Vec<String>,
}

/// Kind of member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Field,
    Method,
    Constructor,
}

/// Information about a method or constructor parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    /// Parameter name (may be synthetic like "arg0")
    pub name: String,
    /// Parameter type; an array type when `is_varargs`
    pub type_ref: TypeRef,
    /// True when this parameter is declared with `...` varargs syntax.
    pub is_varargs: bool,
}

impl ParameterInfo {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            is_varargs: false,
        }
    }

    /// `T... name`; stored as `T[]`.
    pub fn varargs(name: impl Into<String>, element: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref: TypeRef::array_of(element),
            is_varargs: true,
        }
    }
}

/// Context for type name resolution
#[derive(Debug, Clone, Default)]
pub struct TypeResolutionContext {
    /// Current package, e.g., "com.example"
    pub package: Option<String>,
    /// Import statements in the file
    pub imports: Vec<String>,
    /// Class whose body contains the name; its member types are in scope
    pub enclosing_class: Option<String>,
    /// Type parameters in scope (for generic methods/classes)
    pub type_parameters: Vec<String>,
    /// Types defined in the current file (FQN list)
    pub known_fqns: Vec<String>,
}
