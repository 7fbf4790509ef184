use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Api(#[from] grail_api::ApiError),
    #[error(transparent)]
    Resolve(#[from] grail_groovy::ResolveError),
    #[error("Duplicate call site {id} in {path}")]
    DuplicateCallSite {
        id: grail_groovy::syntax::CallSiteId,
        path: String,
    },
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
