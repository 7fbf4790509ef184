//! Source files, call-site context and the modification stamp.

use super::expr::NamedArgument;
use super::new_expr::{CallSiteId, NewExpr};
use crate::inference::scope::SymbolTable;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global modification counter. Every edit bumps it; cached resolve results
/// computed under an older stamp are stale.
#[derive(Debug, Default)]
pub struct ModificationTracker {
    stamp: AtomicU64,
}

impl ModificationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stamp(&self) -> u64 {
        self.stamp.load(Ordering::Acquire)
    }

    /// Record a modification and return the new stamp.
    pub fn bump(&self) -> u64 {
        self.stamp.fetch_add(1, Ordering::AcqRel) + 1
    }
}

/// A `new` expression together with the scope it appears in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallSite {
    pub expr: NewExpr,
    /// FQN of the class whose body contains the call.
    #[serde(default)]
    pub enclosing_class: Option<String>,
    /// True inside static methods and initializers (no `this` available).
    #[serde(default)]
    pub static_context: bool,
    #[serde(default)]
    pub locals: SymbolTable,
    /// Type variables of the enclosing class and method, e.g. `T`.
    #[serde(default)]
    pub type_parameters: Vec<String>,
}

impl CallSite {
    pub fn new(expr: NewExpr) -> Self {
        Self {
            expr,
            enclosing_class: None,
            static_context: false,
            locals: SymbolTable::new(),
            type_parameters: Vec::new(),
        }
    }

    pub fn in_class(mut self, fqn: impl Into<String>) -> Self {
        self.enclosing_class = Some(fqn.into());
        self
    }

    pub fn in_static_context(mut self) -> Self {
        self.static_context = true;
        self
    }

    pub fn with_locals(mut self, locals: SymbolTable) -> Self {
        self.locals = locals;
        self
    }

    pub fn with_type_parameters(mut self, names: Vec<String>) -> Self {
        self.type_parameters = names;
        self
    }

    pub fn id(&self) -> CallSiteId {
        self.expr.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceFile {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub imports: Vec<String>,
    /// FQNs of the classes declared in this file. Their simple names
    /// shadow imports.
    #[serde(default)]
    pub declared_types: Vec<String>,
    #[serde(default)]
    pub call_sites: Vec<CallSite>,
    #[serde(skip)]
    tracker: Arc<ModificationTracker>,
}

impl SourceFile {
    pub fn new(package: Option<String>, imports: Vec<String>) -> Self {
        Self {
            package,
            imports,
            ..Self::default()
        }
    }

    pub fn with_declared_type(mut self, fqn: impl Into<String>) -> Self {
        self.declared_types.push(fqn.into());
        self
    }

    pub fn with_call_site(mut self, site: CallSite) -> Self {
        self.call_sites.push(site);
        self
    }

    /// Share `tracker` with this file so its edits invalidate caches keyed on it.
    pub fn attach_tracker(&mut self, tracker: Arc<ModificationTracker>) {
        self.tracker = tracker;
    }

    pub fn tracker(&self) -> &Arc<ModificationTracker> {
        &self.tracker
    }

    pub fn call_site(&self, id: CallSiteId) -> Option<&CallSite> {
        self.call_sites.iter().find(|site| site.id() == id)
    }

    /// Mutate one call site's expression. Bumps the modification stamp.
    pub fn edit<R>(&mut self, id: CallSiteId, f: impl FnOnce(&mut NewExpr) -> R) -> Option<R> {
        let site = self.call_sites.iter_mut().find(|site| site.expr.id == id)?;
        self.tracker.bump();
        Some(f(&mut site.expr))
    }

    pub fn add_named_argument(
        &mut self,
        id: CallSiteId,
        argument: NamedArgument,
    ) -> Option<&NamedArgument> {
        let site = self.call_sites.iter_mut().find(|site| site.expr.id == id)?;
        self.tracker.bump();
        Some(site.expr.add_named_argument(argument))
    }
}
