//! Context for type inference.
//!
//! Holds the state passed through the inference strategy chain.

use crate::inference::core::type_system::GroovyTypeSystem;
use crate::inference::core::types::TypeResolutionContext;
use crate::inference::scope::SymbolTable;
use crate::syntax::{CallSite, SourceFile};

/// Context for type inference
///
/// This is passed through the inference chain. It is immutable;
/// updates create new contexts.
#[derive(Clone)]
pub struct InferContext<'a> {
    /// Type system for lookups
    pub ts: &'a dyn GroovyTypeSystem,
    /// Current package
    pub package: Option<String>,
    /// Imports in the current file
    pub imports: Vec<String>,
    /// Enclosing class FQN (for `this` resolution)
    pub enclosing_class: Option<String>,
    /// Inside a static method or initializer
    pub static_context: bool,
    /// Type parameters in scope
    pub type_parameters: Vec<String>,
    /// Locals visible at the expression
    pub locals: Option<&'a SymbolTable>,
    /// Types defined in the current file
    pub known_fqns: Vec<String>,
}

impl<'a> InferContext<'a> {
    /// Create a new inference context
    pub fn new(ts: &'a dyn GroovyTypeSystem) -> Self {
        Self {
            ts,
            package: None,
            imports: Vec::new(),
            enclosing_class: None,
            static_context: false,
            type_parameters: Vec::new(),
            locals: None,
            known_fqns: Vec::new(),
        }
    }

    /// Context for one call site of `file`.
    pub fn for_call_site(ts: &'a dyn GroovyTypeSystem, file: &SourceFile, site: &'a CallSite) -> Self {
        let mut ctx = Self::new(ts)
            .with_package(file.package.clone())
            .with_imports(file.imports.clone())
            .with_locals(&site.locals)
            .with_static_context(site.static_context)
            .with_type_parameters(site.type_parameters.clone())
            .with_known_fqns(file.declared_types.clone());
        if let Some(class) = &site.enclosing_class {
            ctx = ctx.with_enclosing_class(class.clone());
        }
        ctx
    }

    /// Set the enclosing class
    pub fn with_enclosing_class(mut self, class: String) -> Self {
        self.enclosing_class = Some(class);
        self
    }

    /// Set imports
    pub fn with_imports(mut self, imports: Vec<String>) -> Self {
        self.imports = imports;
        self
    }

    /// Set package
    pub fn with_package(mut self, package: Option<String>) -> Self {
        self.package = package;
        self
    }

    pub fn with_static_context(mut self, static_context: bool) -> Self {
        self.static_context = static_context;
        self
    }

    pub fn with_locals(mut self, locals: &'a SymbolTable) -> Self {
        self.locals = Some(locals);
        self
    }

    /// Set type variables in scope
    pub fn with_type_parameters(mut self, names: Vec<String>) -> Self {
        self.type_parameters = names;
        self
    }

    /// Set known FQNs
    pub fn with_known_fqns(mut self, fqns: Vec<String>) -> Self {
        self.known_fqns = fqns;
        self
    }

    /// Convert to TypeResolutionContext
    pub fn to_resolution_context(&self) -> TypeResolutionContext {
        TypeResolutionContext {
            package: self.package.clone(),
            imports: self.imports.clone(),
            enclosing_class: self.enclosing_class.clone(),
            type_parameters: self.type_parameters.clone(),
            known_fqns: self.known_fqns.clone(),
        }
    }
}
