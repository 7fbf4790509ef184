//! Owned syntax model of Groovy `new` call sites.
//!
//! This is not a parser: trees are built programmatically or deserialized
//! from workspace fixtures.

mod expr;
mod file;
mod new_expr;

pub use expr::{ArgumentList, CodeReference, Expr, Literal, NamedArgument};
pub use file::{CallSite, ModificationTracker, SourceFile};
pub use new_expr::{AnonymousClass, ArrayDeclaration, CallSiteId, NewChild, NewExpr};
