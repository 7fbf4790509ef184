//! Adapters that implement GroovyTypeSystem for various data sources.

mod index;
mod noop;

pub use index::{ClassDecl, ConstructorDecl, IndexTypeSystem, ParameterDecl};
pub use noop::NoOpTypeSystem;
