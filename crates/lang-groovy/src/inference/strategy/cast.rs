use super::InferStrategy;
use crate::inference::InferContext;
use crate::inference::core::normalization::reference_type;
use crate::syntax::Expr;
use grail_api::models::TypeRef;

/// `(T) x` and `x as T` have type `T`.
pub struct CastInfer;

impl InferStrategy for CastInfer {
    fn infer(&self, expr: &Expr, ctx: &InferContext) -> Option<TypeRef> {
        let Expr::Cast { target, .. } = expr else {
            return None;
        };
        Some(reference_type(target, ctx))
    }
}
