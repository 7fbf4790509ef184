//! Inference strategies using combinator pattern.
//!
//! Each strategy implements [`InferStrategy`] for one expression kind and
//! strategies are chained with `or_else()`.

mod cast;
mod collection;
mod combinator;
mod literal;
mod local;
mod new_expr;
mod this;

pub use cast::CastInfer;
pub use collection::{ListLiteralInfer, MapLiteralInfer};
pub use combinator::OrElse;
pub use literal::LiteralInfer;
pub use local::LocalVarInfer;
pub use new_expr::NewExprInfer;
pub use this::ThisInfer;

use crate::inference::InferContext;
use crate::syntax::Expr;
use grail_api::models::TypeRef;
use once_cell::sync::Lazy;

/// A type inference strategy.
///
/// Strategies are composable using combinator methods.
/// Each strategy attempts to infer the type of an expression.
pub trait InferStrategy: Sync + Send {
    /// Attempt to infer the type of the given expression.
    ///
    /// Returns `None` if this strategy doesn't apply or can't determine the type.
    fn infer(&self, expr: &Expr, ctx: &InferContext) -> Option<TypeRef>;

    /// Combine with another strategy using "or" logic.
    ///
    /// If `self` returns `None`, try `other`.
    fn or_else<S: InferStrategy>(self, other: S) -> OrElse<Self, S>
    where
        Self: Sized,
    {
        OrElse::new(self, other)
    }
}

/// Build the default expression inferrer.
///
/// This combines all strategies in priority order.
pub fn build_expression_inferrer() -> impl InferStrategy {
    ThisInfer
        .or_else(LiteralInfer)
        .or_else(LocalVarInfer)
        .or_else(NewExprInfer)
        .or_else(MapLiteralInfer)
        .or_else(ListLiteralInfer)
        .or_else(CastInfer)
}

static INFERRER: Lazy<Box<dyn InferStrategy>> = Lazy::new(|| Box::new(build_expression_inferrer()));

/// Infer the type of an expression.
///
/// This is the main entry point for expression type inference.
pub fn infer_expression(expr: &Expr, ctx: &InferContext) -> Option<TypeRef> {
    INFERRER.infer(expr, ctx)
}

/// Like [`infer_expression`], with [`TypeRef::Unknown`] for anything untyped.
pub fn infer_or_unknown(expr: &Expr, ctx: &InferContext) -> TypeRef {
    infer_expression(expr, ctx).unwrap_or(TypeRef::Unknown)
}
