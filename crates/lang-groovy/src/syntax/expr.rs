//! Expressions that can appear as constructor arguments.

use super::new_expr::NewExpr;
use grail_api::models::TypeRef;
use grail_api::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A type name as written at the use site, e.g. `java.util.ArrayList<String>`.
///
/// Serialized as its source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CodeReference {
    pub name: String,
    pub type_args: Vec<CodeReference>,
}

impl CodeReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_args: Vec::new(),
        }
    }

    pub fn with_type_args(mut self, args: Vec<CodeReference>) -> Self {
        self.type_args = args;
        self
    }

    /// Last segment of the name (`Inner` for `Outer.Inner`).
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn is_qualified(&self) -> bool {
        self.name.contains('.')
    }

    fn from_type_ref(ty: TypeRef) -> ApiResult<Self> {
        match ty {
            TypeRef::Id(name) | TypeRef::Raw(name) => Ok(Self::new(name)),
            TypeRef::Generic { base, args } => {
                let base = Self::from_type_ref(*base)?;
                let args = args
                    .into_iter()
                    .map(Self::from_type_ref)
                    .collect::<ApiResult<Vec<_>>>()?;
                Ok(base.with_type_args(args))
            }
            other => Err(ApiError::InvalidArgument(format!(
                "`{}` is not a class reference",
                other
            ))),
        }
    }
}

impl FromStr for CodeReference {
    type Err = ApiError;

    fn from_str(s: &str) -> ApiResult<Self> {
        Self::from_type_ref(s.parse()?)
    }
}

impl TryFrom<String> for CodeReference {
    type Error = ApiError;

    fn try_from(value: String) -> ApiResult<Self> {
        value.parse()
    }
}

impl From<CodeReference> for String {
    fn from(value: CodeReference) -> Self {
        value.to_string()
    }
}

impl fmt::Display for CodeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.type_args.is_empty() {
            return Ok(());
        }
        f.write_str("<")?;
        for (i, arg) in self.type_args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg)?;
        }
        f.write_str(">")
    }
}

/// Literal text is kept verbatim so suffixes (`10L`, `1.5f`, `2G`) stay visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    Integer(String),
    Decimal(String),
    Bool(bool),
    Char(char),
    Str(String),
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Literal(Literal),
    /// A bare name: local variable, parameter or property.
    Ident(String),
    This,
    New(Box<NewExpr>),
    /// `[a: 1, b: 2]`
    Map(Vec<NamedArgument>),
    /// `[1, 2, 3]`
    List(Vec<Expr>),
    /// `(T) expr` or `expr as T`
    Cast {
        target: CodeReference,
        expr: Box<Expr>,
    },
    /// Anything the model does not type, kept as source text.
    Opaque(String),
}

impl Expr {
    pub fn int(text: impl Into<String>) -> Self {
        Expr::Literal(Literal::Integer(text.into()))
    }

    pub fn string(text: impl Into<String>) -> Self {
        Expr::Literal(Literal::Str(text.into()))
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }
}

/// `label: value` inside an argument list or a map literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedArgument {
    pub label: String,
    pub value: Expr,
}

impl NamedArgument {
    pub fn new(label: impl Into<String>, value: Expr) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Arguments of a call. Groovy lets named and positional arguments
/// interleave; only their relative order within each group matters here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentList {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub named: Vec<NamedArgument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positional: Vec<Expr>,
}

impl ArgumentList {
    pub fn positional(args: Vec<Expr>) -> Self {
        Self {
            named: Vec::new(),
            positional: args,
        }
    }

    pub fn named(args: Vec<NamedArgument>) -> Self {
        Self {
            named: args,
            positional: Vec::new(),
        }
    }

    pub fn named_arguments(&self) -> &[NamedArgument] {
        &self.named
    }

    pub fn expression_arguments(&self) -> &[Expr] {
        &self.positional
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.positional.is_empty()
    }

    /// Append a named argument and return the stored copy.
    pub fn push_named(&mut self, argument: NamedArgument) -> &NamedArgument {
        self.named.push(argument);
        &self.named[self.named.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_reference_parse_and_display() {
        let reference: CodeReference = "java.util.HashMap<String, List<Integer>>".parse().unwrap();
        assert_eq!(reference.name, "java.util.HashMap");
        assert_eq!(reference.simple_name(), "HashMap");
        assert_eq!(reference.type_args.len(), 2);
        assert_eq!(reference.type_args[1].type_args[0].name, "Integer");
        assert_eq!(
            reference.to_string(),
            "java.util.HashMap<String, List<Integer>>"
        );
    }

    #[test]
    fn test_code_reference_rejects_arrays() {
        assert!("String[]".parse::<CodeReference>().is_err());
    }

    #[test]
    fn test_expr_json_shape() {
        let expr: Expr = serde_json::from_str(r#"{"literal": {"integer": "5"}}"#).unwrap();
        assert_eq!(expr, Expr::int("5"));

        let this: Expr = serde_json::from_str(r#""this""#).unwrap();
        assert_eq!(this, Expr::This);

        let cast: Expr =
            serde_json::from_str(r#"{"cast": {"target": "java.lang.Number", "expr": {"ident": "x"}}}"#)
                .unwrap();
        assert!(matches!(cast, Expr::Cast { ref target, .. } if target.name == "java.lang.Number"));
    }
}
