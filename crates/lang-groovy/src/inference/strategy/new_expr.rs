//! `new` expression inference.

use super::InferStrategy;
use crate::inference::InferContext;
use crate::inference::core::normalization::reference_type;
use crate::syntax::Expr;
use grail_api::models::TypeRef;

/// Infer type of `new Type()` and `new Type[n]` expressions.
pub struct NewExprInfer;

impl InferStrategy for NewExprInfer {
    fn infer(&self, expr: &Expr, ctx: &InferContext) -> Option<TypeRef> {
        let Expr::New(new_expr) = expr else {
            return None;
        };

        let element = match (new_expr.reference_element(), new_expr.type_element()) {
            (Some(reference), _) => reference_type(reference, ctx),
            (None, Some(builtin)) => TypeRef::raw(builtin),
            (None, None) => return None,
        };

        match new_expr.array_count() {
            0 => Some(element),
            dimensions => Some(TypeRef::Array {
                element: Box::new(element),
                dimensions,
            }),
        }
    }
}
