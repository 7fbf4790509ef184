//! Type reference resolution.

use super::model::{ClassCandidate, ReferenceResult};
use crate::inference::InferContext;
use crate::inference::core::normalization::reference_type;
use crate::inference::Substitution;
use crate::syntax::CodeReference;
use tracing::trace;

/// Resolves a code reference to every class (or package) it may denote.
pub trait TypeReferenceResolver: Send + Sync {
    fn resolve_all(&self, reference: &CodeReference, ctx: &InferContext) -> Vec<ReferenceResult>;
}

/// Resolution through the context's type system.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeSystemReferenceResolver;

impl TypeReferenceResolver for TypeSystemReferenceResolver {
    fn resolve_all(&self, reference: &CodeReference, ctx: &InferContext) -> Vec<ReferenceResult> {
        let resolution = ctx.to_resolution_context();
        let type_args: Vec<_> = reference
            .type_args
            .iter()
            .map(|arg| reference_type(arg, ctx))
            .collect();

        let results: Vec<_> = ctx
            .ts
            .resolve_type_candidates(&reference.name, &resolution)
            .into_iter()
            .filter_map(|fqn| ctx.ts.get_type_info(&fqn))
            .map(|info| {
                let substitutor = Substitution::for_type_parameters(&info.type_parameters, &type_args);
                ReferenceResult::Class(ClassCandidate::new(info, substitutor))
            })
            .collect();

        if results.is_empty() && ctx.ts.is_package(&reference.name) {
            trace!(reference = %reference, "reference denotes a package");
            return vec![ReferenceResult::Package {
                name: reference.name.clone(),
            }];
        }
        results
    }
}
