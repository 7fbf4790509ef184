//! A type system, a resolver and a shared cache bundled for a workspace.

use super::cache::ResolveCache;
use super::call::{NewCall, ResultSet};
use super::new_expr::ConstructorResolver;
use crate::error::{ResolveError, Result};
use crate::inference::{GroovyTypeSystem, InferContext};
use crate::syntax::{CallSite, CallSiteId, ModificationTracker, SourceFile};
use std::sync::Arc;

pub struct ResolveSession {
    ts: Arc<dyn GroovyTypeSystem>,
    resolver: ConstructorResolver,
    cache: Option<ResolveCache<ResultSet>>,
}

impl ResolveSession {
    /// A cached session. Files whose edits should invalidate it must share
    /// `tracker` (see [`SourceFile::attach_tracker`]). Results are keyed by
    /// call-site id, so ids must be unique across those files.
    pub fn new(ts: Arc<dyn GroovyTypeSystem>, tracker: Arc<ModificationTracker>) -> Self {
        Self {
            ts,
            resolver: ConstructorResolver::default(),
            cache: Some(ResolveCache::new(tracker)),
        }
    }

    /// A session that recomputes every resolve.
    pub fn uncached(ts: Arc<dyn GroovyTypeSystem>) -> Self {
        Self {
            ts,
            resolver: ConstructorResolver::default(),
            cache: None,
        }
    }

    pub fn with_resolver(mut self, resolver: ConstructorResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn type_system(&self) -> &dyn GroovyTypeSystem {
        self.ts.as_ref()
    }

    pub fn resolver(&self) -> &ConstructorResolver {
        &self.resolver
    }

    pub fn cache(&self) -> Option<&ResolveCache<ResultSet>> {
        self.cache.as_ref()
    }

    /// View `site` of `file` as a resolvable call.
    pub fn call<'s>(&'s self, file: &'s SourceFile, site: &'s CallSite) -> NewCall<'s> {
        let ctx = InferContext::for_call_site(self.ts.as_ref(), file, site);
        let call = NewCall::new(&site.expr, ctx, &self.resolver);
        match &self.cache {
            Some(cache) => call.with_cache(cache),
            None => call,
        }
    }

    pub fn call_by_id<'s>(&'s self, file: &'s SourceFile, id: CallSiteId) -> Result<NewCall<'s>> {
        let site = file
            .call_site(id)
            .ok_or(ResolveError::UnknownCallSite(id))?;
        Ok(self.call(file, site))
    }
}
