//! Enclosing instances of non-static inner classes.

use super::model::ClassCandidate;
use crate::inference::{InferContext, TypeInfo, infer_or_unknown};
use crate::syntax::NewExpr;
use grail_api::models::TypeRef;

/// The type of the instance that would enclose a new `inner` created at
/// `ctx`: the innermost enclosing class (walking outwards through inner
/// classes) that is, or inherits from, `inner`'s declaring class.
///
/// `None` in static contexts, for classes that are not inner classes, and
/// when no enclosing class qualifies.
pub fn enclosing_instance_type(inner: &TypeInfo, ctx: &InferContext) -> Option<TypeRef> {
    let outer = inner.outer.as_deref().filter(|_| inner.is_inner())?;
    if ctx.static_context {
        return None;
    }

    let mut current = ctx.enclosing_class.clone();
    while let Some(class) = current {
        if ctx.ts.is_inheritor(&class, outer) {
            return Some(TypeRef::Id(class));
        }
        // Only an inner class carries an instance of its own outer class.
        current = ctx
            .ts
            .get_type_info(&class)
            .filter(TypeInfo::is_inner)
            .and_then(|info| info.outer);
    }
    None
}

/// The enclosing-instance argument type for constructing `class` at `expr`:
/// the explicit qualifier of `outer.new Inner()`, else the implicit one.
pub fn enclosing_argument_type(
    expr: &NewExpr,
    class: &ClassCandidate,
    ctx: &InferContext,
) -> Option<TypeRef> {
    if !class.info.is_inner() {
        return None;
    }
    match &expr.qualifier {
        Some(qualifier) => Some(infer_or_unknown(qualifier, ctx)),
        None => enclosing_instance_type(&class.info, ctx),
    }
}

/// Prepend the enclosing-instance type to `arg_types` when `class` needs one
/// and it is available.
pub fn add_enclosing_arg_if_needed(
    arg_types: Vec<TypeRef>,
    expr: &NewExpr,
    class: &ClassCandidate,
    ctx: &InferContext,
) -> Vec<TypeRef> {
    match enclosing_argument_type(expr, class, ctx) {
        Some(enclosing) => std::iter::once(enclosing).chain(arg_types).collect(),
        None => arg_types,
    }
}
