//! Constructor candidates of a class.

use super::model::{Applicability, ClassCandidate, ConstructorCandidate, ResolveResult};
use crate::inference::{InferContext, Substitution, select_applicable};
use grail_api::models::{JAVA_LANG_OBJECT, TypeRef};

/// Lists a class's constructors, optionally filtered by argument types.
pub trait ConstructorProvider: Send + Sync {
    /// With `arg_types == None` every constructor is returned with
    /// [`Applicability::Unknown`]. Otherwise only the applicable ones,
    /// marked [`Applicability::Applicable`].
    ///
    /// Argument types of a non-static inner class start with the
    /// enclosing-instance type.
    fn constructors_of(
        &self,
        class: &ClassCandidate,
        arg_types: Option<&[TypeRef]>,
        ctx: &InferContext,
    ) -> Vec<ResolveResult>;
}

/// Constructors from the context's type system.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeSystemConstructors;

impl ConstructorProvider for TypeSystemConstructors {
    fn constructors_of(
        &self,
        class: &ClassCandidate,
        arg_types: Option<&[TypeRef]>,
        ctx: &InferContext,
    ) -> Vec<ResolveResult> {
        let enclosing = class
            .info
            .outer
            .as_ref()
            .filter(|_| class.info.is_inner())
            .map(|outer| TypeRef::Id(outer.clone()));

        let members = ctx.ts.get_constructors(class.fqn());
        if members.is_empty() {
            return implicit_default_constructor(class, enclosing, arg_types, ctx);
        }

        let substitutor = erased_substitution(class);
        let candidates: Vec<ConstructorCandidate> = members
            .into_iter()
            .map(|member| ConstructorCandidate::new(member, &substitutor, enclosing.clone()))
            .collect();

        let (selected, applicability) = match arg_types {
            None => (candidates, Applicability::Unknown),
            Some(args) => (
                select_applicable(ctx.ts, &candidates, args, |c| c.effective_parameters()),
                Applicability::Applicable,
            ),
        };

        selected
            .into_iter()
            .map(|constructor| ResolveResult {
                class_fqn: class.fqn().to_string(),
                constructor: Some(constructor),
                applicability,
                substitutor: class.substitutor.clone(),
            })
            .collect()
    }
}

/// The class's substitutor with unbound type parameters (raw use,
/// `new Box(1)`) erased to their first bound.
fn erased_substitution(class: &ClassCandidate) -> Substitution {
    let mut substitutor = class.substitutor.clone();
    for param in &class.info.type_parameters {
        if substitutor.get(&param.name).is_none() {
            let bound = param
                .bounds
                .first()
                .map_or(JAVA_LANG_OBJECT, String::as_str);
            substitutor.insert(param.name.clone(), TypeRef::id(bound));
        }
    }
    substitutor
}

/// A class without declared constructors yields one class-only result,
/// applicable to no arguments besides the enclosing instance.
fn implicit_default_constructor(
    class: &ClassCandidate,
    enclosing: Option<TypeRef>,
    arg_types: Option<&[TypeRef]>,
    ctx: &InferContext,
) -> Vec<ResolveResult> {
    let applicability = match arg_types {
        None => Applicability::Unknown,
        Some(args) => {
            let expected: Vec<TypeRef> = enclosing.into_iter().collect();
            let matches = args.len() == expected.len()
                && args
                    .iter()
                    .zip(&expected)
                    .all(|(arg, param)| ctx.ts.is_assignable(arg, param));
            if !matches {
                return vec![];
            }
            Applicability::Applicable
        }
    };

    vec![ResolveResult {
        class_fqn: class.fqn().to_string(),
        constructor: None,
        applicability,
        substitutor: class.substitutor.clone(),
    }]
}
