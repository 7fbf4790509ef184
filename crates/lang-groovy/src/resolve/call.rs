//! The `new` call site as seen by reference consumers.

use super::cache::ResolveCache;
use super::model::{ConstructorCandidate, ReferenceResult, ResolveResult};
use super::new_expr::ConstructorResolver;
use crate::error::{ResolveError, Result};
use crate::inference::{InferContext, MemberInfo};
use crate::syntax::{
    AnonymousClass, ArgumentList, ArrayDeclaration, CodeReference, Expr, NewExpr,
};
use grail_api::models::symbol::TextRange;
use std::fmt;
use std::sync::Arc;

pub type ResultSet = Arc<[ResolveResult]>;

const ELEMENT: &str = "new expression";

/// A `new` expression bound to its inference context and resolver.
///
/// The call site is its own reference to the constructor it invokes. That
/// reference has no text of its own, so it cannot be renamed or rebound.
pub struct NewCall<'a> {
    expr: &'a NewExpr,
    ctx: InferContext<'a>,
    resolver: &'a ConstructorResolver,
    cache: Option<&'a ResolveCache<ResultSet>>,
}

impl<'a> NewCall<'a> {
    pub fn new(expr: &'a NewExpr, ctx: InferContext<'a>, resolver: &'a ConstructorResolver) -> Self {
        Self {
            expr,
            ctx,
            resolver,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: &'a ResolveCache<ResultSet>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn element(&self) -> &'a NewExpr {
        self.expr
    }

    pub fn context(&self) -> &InferContext<'a> {
        &self.ctx
    }

    /// Constructors this call may invoke. Empty for array creation and
    /// for calls without a type reference.
    pub fn multi_resolve(&self, incomplete: bool) -> ResultSet {
        if self.expr.array_count() > 0 || self.expr.reference_element().is_none() {
            return Arc::from(Vec::new());
        }
        let compute = || -> ResultSet {
            Arc::from(self.resolver.resolve_uncached(self.expr, incomplete, &self.ctx))
        };
        match self.cache {
            Some(cache) => cache.get_or_compute((self.expr.id, incomplete), compute),
            None => compute(),
        }
    }

    /// The single result of a complete resolve, if there is exactly one.
    pub fn resolve(&self) -> Option<ResolveResult> {
        match &*self.multi_resolve(false) {
            [only] => Some(only.clone()),
            _ => None,
        }
    }

    /// The invoked constructor when the call resolves unambiguously to a
    /// declared one.
    pub fn resolve_method(&self) -> Option<ConstructorCandidate> {
        self.resolve().and_then(|result| result.constructor)
    }

    pub fn multi_resolve_class(&self) -> Vec<ReferenceResult> {
        self.resolver.multi_resolve_class(self.expr, &self.ctx)
    }

    pub fn call_variants(&self) -> Vec<ResolveResult> {
        self.resolver.call_variants(self.expr, &self.ctx)
    }

    pub fn is_reference_to(&self, target: &MemberInfo) -> bool {
        self.resolve_method()
            .is_some_and(|constructor| constructor.member == *target)
    }

    pub fn canonical_text(&self) -> &'static str {
        ELEMENT
    }

    pub fn range_in_element(&self) -> TextRange {
        TextRange::EMPTY
    }

    /// Completion variants; constructor calls offer none.
    pub fn variants(&self) -> Vec<ResolveResult> {
        Vec::new()
    }

    pub fn is_soft(&self) -> bool {
        false
    }

    pub fn handle_element_rename(&self, _new_name: &str) -> Result<()> {
        Err(ResolveError::UnsupportedOperation {
            operation: "rename",
            element: ELEMENT,
        })
    }

    pub fn bind_to_element(&self, _target: &MemberInfo) -> Result<()> {
        Err(ResolveError::UnsupportedOperation {
            operation: "bind",
            element: ELEMENT,
        })
    }

    pub fn reference_element(&self) -> Option<&'a CodeReference> {
        self.expr.reference_element()
    }

    pub fn argument_list(&self) -> Option<&'a ArgumentList> {
        self.expr.argument_list()
    }

    pub fn anonymous_class(&self) -> Option<&'a AnonymousClass> {
        self.expr.anonymous_class()
    }

    pub fn array_declaration(&self) -> Option<&'a ArrayDeclaration> {
        self.expr.array_declaration()
    }

    pub fn array_count(&self) -> usize {
        self.expr.array_count()
    }

    pub fn array_initializer(&self) -> Option<&'a [Expr]> {
        self.expr.array_initializer()
    }

    pub fn constructor_type_arguments(&self) -> Option<&'a [CodeReference]> {
        self.expr.constructor_type_arguments()
    }

    pub fn type_element(&self) -> Option<&'a str> {
        self.expr.type_element()
    }
}

impl fmt::Display for NewCall<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.expr, f)
    }
}
