//! Bootstrapping for the `grail` tools: configuration, logging and
//! workspace fixtures wired into a [`ResolveSession`](grail_groovy::resolve::ResolveSession).

pub mod config;
pub mod error;
pub mod logging;
pub mod workspace;

pub use config::{GrailConfig, LogConfig, ResolveConfig};
pub use error::{Result, RuntimeError};
pub use logging::init_logging;
pub use workspace::{Diagnosis, LoadedWorkspace, Workspace};

use std::path::PathBuf;

/// `~/.grail`, or `./.grail` when no home directory is known.
pub fn grail_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".grail")
}
