//! Local variable type inference.

use super::InferStrategy;
use crate::inference::InferContext;
use crate::syntax::Expr;
use grail_api::models::TypeRef;

/// Infer type from the locals visible at the call site.
pub struct LocalVarInfer;

impl InferStrategy for LocalVarInfer {
    fn infer(&self, expr: &Expr, ctx: &InferContext) -> Option<TypeRef> {
        let Expr::Ident(name) = expr else {
            return None;
        };
        ctx.locals?.get(name).cloned()
    }
}
