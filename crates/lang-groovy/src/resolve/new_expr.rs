//! Constructor resolution for `new` expressions.

use super::constructors::{ConstructorProvider, TypeSystemConstructors};
use super::inner::add_enclosing_arg_if_needed;
use super::model::{ClassCandidate, ReferenceResult, ResolveResult};
use super::policy::ClassPickPolicy;
use super::reference::{TypeReferenceResolver, TypeSystemReferenceResolver};
use crate::inference::{GroovyTypeSystem, InferContext, TypeRefExt, infer_or_unknown};
use crate::syntax::{NamedArgument, NewExpr};
use grail_api::models::{JAVA_UTIL_MAP, TypeRef};
use std::sync::Arc;
use tracing::debug;

/// Resolves a `new` expression to the constructors it may invoke.
///
/// Stateless apart from its collaborators; see [`crate::resolve::NewCall`]
/// for the cached entry point.
#[derive(Clone)]
pub struct ConstructorResolver {
    references: Arc<dyn TypeReferenceResolver>,
    constructors: Arc<dyn ConstructorProvider>,
    policy: ClassPickPolicy,
}

impl Default for ConstructorResolver {
    fn default() -> Self {
        Self {
            references: Arc::new(TypeSystemReferenceResolver),
            constructors: Arc::new(TypeSystemConstructors),
            policy: ClassPickPolicy::default(),
        }
    }
}

impl ConstructorResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reference_resolver(mut self, references: Arc<dyn TypeReferenceResolver>) -> Self {
        self.references = references;
        self
    }

    pub fn with_constructor_provider(mut self, constructors: Arc<dyn ConstructorProvider>) -> Self {
        self.constructors = constructors;
        self
    }

    pub fn with_policy(mut self, policy: ClassPickPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ClassPickPolicy {
        self.policy
    }

    /// Every result the call's type reference resolves to.
    pub fn multi_resolve_class(&self, expr: &NewExpr, ctx: &InferContext) -> Vec<ReferenceResult> {
        expr.reference_element()
            .map(|reference| self.references.resolve_all(reference, ctx))
            .unwrap_or_default()
    }

    /// Every constructor of every class candidate, unfiltered.
    pub fn call_variants(&self, expr: &NewExpr, ctx: &InferContext) -> Vec<ResolveResult> {
        self.multi_resolve_class(expr, ctx)
            .iter()
            .filter_map(ReferenceResult::as_class)
            .flat_map(|class| self.constructors.constructors_of(class, None, ctx))
            .collect()
    }

    pub fn resolve_uncached(&self, expr: &NewExpr, incomplete: bool, ctx: &InferContext) -> Vec<ResolveResult> {
        let results = self.multi_resolve_class(expr, ctx);
        if results.is_empty() {
            debug!(call_site = %expr.id, "type reference does not resolve");
            return vec![];
        }

        let Some(class) = self.policy.pick(&results) else {
            debug!(
                call_site = %expr.id,
                candidates = results.len(),
                policy = ?self.policy,
                "no class picked from reference results"
            );
            return vec![];
        };

        if incomplete {
            return self.constructors.constructors_of(class, None, ctx);
        }

        let Some(arguments) = expr.argument_list() else {
            return vec![];
        };

        let named = arguments.named_arguments();
        if !named.is_empty() && arguments.expression_arguments().is_empty() {
            return self.resolve_named_only(expr, class, named, ctx);
        }

        let arg_types = self.argument_types(expr, class, ctx);
        self.constructors.constructors_of(class, Some(&arg_types), ctx)
    }

    /// `new Foo(a: 1, b: 2)`: a constructor taking a single map wins,
    /// then the no-arg constructor (Groovy sets the properties afterwards).
    /// Failing both, the map is matched like any other argument, so
    /// `Foo(Object)` still applies.
    fn resolve_named_only(
        &self,
        expr: &NewExpr,
        class: &ClassCandidate,
        named: &[NamedArgument],
        ctx: &InferContext,
    ) -> Vec<ResolveResult> {
        let map_type = named_arguments_type(named, ctx);
        let map_args = add_enclosing_arg_if_needed(vec![map_type], expr, class, ctx);
        let with_map = self.constructors.constructors_of(class, Some(&map_args), ctx);
        if with_map.iter().any(|result| takes_single_map(result, ctx.ts)) {
            debug!(call_site = %expr.id, class = class.fqn(), "named arguments bound to map constructor");
            return with_map;
        }

        let no_args = add_enclosing_arg_if_needed(Vec::new(), expr, class, ctx);
        let without_args = self.constructors.constructors_of(class, Some(&no_args), ctx);
        if !without_args.is_empty() {
            debug!(call_site = %expr.id, class = class.fqn(), "named arguments set as properties");
            return without_args;
        }

        debug!(
            call_site = %expr.id,
            class = class.fqn(),
            "no map or no-arg constructor; map matched as a plain argument"
        );
        with_map
    }

    /// Argument types the call passes to a constructor of `class`, in order:
    /// the enclosing instance of an inner class, the named-argument map when
    /// named and positional arguments are mixed, then the positional arguments.
    pub fn argument_types(&self, expr: &NewExpr, class: &ClassCandidate, ctx: &InferContext) -> Vec<TypeRef> {
        let Some(arguments) = expr.argument_list() else {
            return add_enclosing_arg_if_needed(Vec::new(), expr, class, ctx);
        };

        let named = arguments.named_arguments();
        let map = (!named.is_empty()).then(|| named_arguments_type(named, ctx));
        let positional = arguments
            .expression_arguments()
            .iter()
            .map(|arg| infer_or_unknown(arg, ctx));

        add_enclosing_arg_if_needed(map.into_iter().chain(positional).collect(), expr, class, ctx)
    }
}

/// The map-literal type Groovy builds from `label: value` arguments.
pub fn named_arguments_type(named: &[NamedArgument], ctx: &InferContext) -> TypeRef {
    TypeRef::Map {
        entries: named
            .iter()
            .map(|arg| (arg.label.clone(), infer_or_unknown(&arg.value, ctx)))
            .collect(),
    }
}

fn takes_single_map(result: &ResolveResult, ts: &dyn GroovyTypeSystem) -> bool {
    let Some(constructor) = &result.constructor else {
        return false;
    };
    match constructor.declared_parameters() {
        [param] => param
            .type_ref
            .as_fqn()
            .is_some_and(|fqn| ts.is_inheritor(&fqn, JAVA_UTIL_MAP)),
        _ => false,
    }
}
