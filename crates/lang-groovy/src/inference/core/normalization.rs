//! Type normalization logic.
//!
//! Converts source-level types into structured, fully-qualified TypeRefs.

use crate::inference::InferContext;
use crate::inference::core::type_system::GroovyTypeSystem;
use crate::inference::core::types::TypeResolutionContext;
use crate::syntax::CodeReference;
use grail_api::models::{TypeRef, is_primitive_name};

/// Normalize a TypeRef against `context`.
///
/// This resolves simple names to FQNs and handles generics. Primitives stay
/// `Raw`; type variables in scope and names that do not resolve stay as
/// written.
pub fn normalize_type<T: GroovyTypeSystem + ?Sized>(
    ty: TypeRef,
    ts: &T,
    context: &TypeResolutionContext,
) -> TypeRef {
    match ty {
        TypeRef::Raw(name) | TypeRef::Id(name) => {
            if is_primitive_name(&name) || name == "void" {
                return TypeRef::Raw(name);
            }
            if context.type_parameters.contains(&name) {
                return TypeRef::Id(name);
            }
            TypeRef::Id(ts.resolve_type_name(&name, context).unwrap_or(name))
        }
        TypeRef::Generic { base, args } => {
            let base = Box::new(normalize_type(*base, ts, context));
            let args = args
                .into_iter()
                .map(|arg| normalize_type(arg, ts, context))
                .collect();
            TypeRef::Generic { base, args }
        }
        TypeRef::Array {
            element,
            dimensions,
        } => TypeRef::Array {
            element: Box::new(normalize_type(*element, ts, context)),
            dimensions,
        },
        TypeRef::Wildcard {
            bound,
            is_upper_bound,
        } => TypeRef::Wildcard {
            bound: bound.map(|b| Box::new(normalize_type(*b, ts, context))),
            is_upper_bound,
        },
        TypeRef::Map { entries } => TypeRef::Map {
            entries: entries
                .into_iter()
                .map(|(label, ty)| (label, normalize_type(ty, ts, context)))
                .collect(),
        },
        TypeRef::Unknown => TypeRef::Unknown,
    }
}

/// The type a code reference denotes at the use site, type arguments included.
pub fn reference_type(reference: &CodeReference, ctx: &InferContext) -> TypeRef {
    let base = normalize_type(
        TypeRef::Id(reference.name.clone()),
        ctx.ts,
        &ctx.to_resolution_context(),
    );
    if reference.type_args.is_empty() {
        return base;
    }
    let args = reference
        .type_args
        .iter()
        .map(|arg| reference_type(arg, ctx))
        .collect();
    TypeRef::generic(base, args)
}
