pub mod error;
pub mod inference;
pub mod resolve;
pub mod syntax;

pub use error::{ResolveError, Result};
