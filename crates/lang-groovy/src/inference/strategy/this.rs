//! `this` expression inference.

use super::InferStrategy;
use crate::inference::InferContext;
use crate::syntax::Expr;
use grail_api::models::TypeRef;

/// Infer type of `this` expression.
pub struct ThisInfer;

impl InferStrategy for ThisInfer {
    fn infer(&self, expr: &Expr, ctx: &InferContext) -> Option<TypeRef> {
        if !matches!(expr, Expr::This) || ctx.static_context {
            return None;
        }

        // Return the enclosing class type
        ctx.enclosing_class.as_ref().map(|c| TypeRef::Id(c.clone()))
    }
}
