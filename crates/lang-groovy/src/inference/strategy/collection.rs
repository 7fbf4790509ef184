//! Map and list literal inference.

use super::{InferStrategy, infer_or_unknown};
use crate::inference::InferContext;
use crate::syntax::Expr;
use grail_api::models::TypeRef;

/// `[a: 1]` gets a map-literal type that keeps its entry types.
pub struct MapLiteralInfer;

impl InferStrategy for MapLiteralInfer {
    fn infer(&self, expr: &Expr, ctx: &InferContext) -> Option<TypeRef> {
        let Expr::Map(entries) = expr else {
            return None;
        };
        Some(TypeRef::Map {
            entries: entries
                .iter()
                .map(|entry| (entry.label.clone(), infer_or_unknown(&entry.value, ctx)))
                .collect(),
        })
    }
}

/// `[1, 2]` is a `java.util.ArrayList`.
pub struct ListLiteralInfer;

impl InferStrategy for ListLiteralInfer {
    fn infer(&self, expr: &Expr, _ctx: &InferContext) -> Option<TypeRef> {
        matches!(expr, Expr::List(_)).then(|| TypeRef::id("java.util.ArrayList"))
    }
}
