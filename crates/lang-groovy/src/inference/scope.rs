//! Symbol table for the locals visible at a call site.

use grail_api::models::TypeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A symbol table mapping variable names to their declared types.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolTable {
    symbols: HashMap<String, TypeRef>,
}

impl SymbolTable {
    /// Create a new empty symbol table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the symbol table.
    pub fn insert(&mut self, name: impl Into<String>, ty: TypeRef) {
        self.symbols.insert(name.into(), ty);
    }

    pub fn with(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.insert(name, ty);
        self
    }

    /// Look up a variable in this scope.
    pub fn get(&self, name: &str) -> Option<&TypeRef> {
        self.symbols.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
