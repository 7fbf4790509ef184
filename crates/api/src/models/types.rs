use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const JAVA_LANG_OBJECT: &str = "java.lang.Object";
pub const JAVA_LANG_STRING: &str = "java.lang.String";
pub const JAVA_UTIL_MAP: &str = "java.util.Map";
pub const JAVA_UTIL_LINKED_HASH_MAP: &str = "java.util.LinkedHashMap";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, JsonSchema)]
#[serde(tag = "kind", content = "data")]
pub enum TypeRef {
    /// Unresolved or primitive type name (e.g., "int", "void")
    Raw(String),

    /// Resolved reference to a class declaration (FQN)
    Id(String),

    /// Generic instantiation (e.g., List<String>)
    Generic {
        base: Box<TypeRef>,
        args: Vec<TypeRef>,
    },

    /// Array type (e.g., String[])
    Array {
        element: Box<TypeRef>,
        dimensions: usize,
    },

    /// Wildcard type (e.g., ? extends Number)
    Wildcard {
        bound: Option<Box<TypeRef>>,
        is_upper_bound: bool, // true: extends, false: super
    },

    /// Map literal type built from `[key: value, ...]` or named call arguments.
    ///
    /// Behaves like a `java.util.LinkedHashMap<String, Object>` whose entry
    /// types are also known.
    Map { entries: Vec<(String, TypeRef)> },

    Unknown,
}

impl TypeRef {
    /// Helper to create a Raw type
    pub fn raw(s: impl Into<String>) -> Self {
        TypeRef::Raw(s.into())
    }

    /// Helper to create an Id type
    pub fn id(s: impl Into<String>) -> Self {
        TypeRef::Id(s.into())
    }

    pub fn generic(base: TypeRef, args: Vec<TypeRef>) -> Self {
        TypeRef::Generic {
            base: Box::new(base),
            args,
        }
    }

    /// One-dimensional array of `element`.
    pub fn array_of(element: TypeRef) -> Self {
        match element {
            TypeRef::Array {
                element,
                dimensions,
            } => TypeRef::Array {
                element,
                dimensions: dimensions + 1,
            },
            other => TypeRef::Array {
                element: Box::new(other),
                dimensions: 1,
            },
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, TypeRef::Unknown)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Raw(name) if is_primitive_name(name))
    }
}

impl Default for TypeRef {
    fn default() -> Self {
        TypeRef::Unknown
    }
}

pub fn is_primitive_name(name: &str) -> bool {
    matches!(
        name,
        "boolean" | "byte" | "short" | "char" | "int" | "long" | "float" | "double"
    )
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Raw(name) | TypeRef::Id(name) => f.write_str(name),
            TypeRef::Generic { base, args } => {
                write!(f, "{}<", base)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(">")
            }
            TypeRef::Array {
                element,
                dimensions,
            } => {
                write!(f, "{}", element)?;
                for _ in 0..*dimensions {
                    f.write_str("[]")?;
                }
                Ok(())
            }
            TypeRef::Wildcard {
                bound: None,
                is_upper_bound: _,
            } => f.write_str("?"),
            TypeRef::Wildcard {
                bound: Some(bound),
                is_upper_bound,
            } => {
                let keyword = if *is_upper_bound { "extends" } else { "super" };
                write!(f, "? {} {}", keyword, bound)
            }
            TypeRef::Map { entries } => {
                if entries.is_empty() {
                    return f.write_str("[:]");
                }
                f.write_str("[")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("]")
            }
            TypeRef::Unknown => f.write_str("?unknown"),
        }
    }
}
