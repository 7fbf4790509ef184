//! Groovy expression type inference.
//!
//! # Architecture
//!
//! ```text
//! InferStrategy (trait)     →  combines via or_else()
//!       │
//!       ▼
//! InferContext (immutable)  →  passed through inference chain
//!       │
//!       ▼
//! GroovyTypeSystem (trait)  →  provides type/member lookup
//! ```
//!
//! # Key Traits
//!
//! - [`TypeProvider`] - Resolves names to type information
//! - [`InheritanceProvider`] - Walks supertype hierarchy
//! - [`MemberProvider`] - Finds constructors in types
//! - [`GroovyTypeSystem`] - Combines all three
//!
//! # Usage
//!
//! ```ignore
//! use grail_groovy::inference::{InferContext, infer_expression};
//!
//! let ctx = InferContext::new(&type_system);
//! let ty = infer_expression(&expr, &ctx);
//! ```

pub mod adapters;
pub mod builtins;
pub mod context;
pub mod core;
pub mod scope;
pub mod strategy;

// Re-export public API
pub use self::core::type_system::{
    GroovyTypeSystem, InheritanceProvider, MemberProvider, TypeProvider, select_applicable,
};

pub use self::core::types::{
    MemberInfo, MemberKind, ParameterInfo, TypeInfo, TypeKind, TypeParameter, TypeRefExt,
    TypeResolutionContext,
};

pub use self::core::substitution::Substitution;
pub use context::InferContext;
pub use scope::SymbolTable;
pub use strategy::{InferStrategy, infer_expression, infer_or_unknown};
