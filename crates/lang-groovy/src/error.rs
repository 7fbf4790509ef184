use crate::syntax::CallSiteId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    /// The synthetic `new` reference is derived from the type reference and
    /// the argument list; it cannot be renamed or rebound on its own.
    #[error("Unsupported operation: {operation} on {element}")]
    UnsupportedOperation {
        operation: &'static str,
        element: &'static str,
    },
    #[error("Unknown call site: {0}")]
    UnknownCallSite(CallSiteId),
    #[error(transparent)]
    Api(#[from] grail_api::ApiError),
}

pub type Result<T> = std::result::Result<T, ResolveError>;
