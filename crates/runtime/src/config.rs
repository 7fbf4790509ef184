//! User configuration, read from `~/.grail/config.json` or an explicit path.

use crate::error::{Result, RuntimeError};
use grail_groovy::resolve::ClassPickPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrailConfig {
    pub resolve: ResolveConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Which class wins when a type name is ambiguous.
    pub class_pick: ClassPickPolicy,
    /// Memoize results per call site until the next edit.
    pub cache: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            class_pick: ClassPickPolicy::First,
            cache: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub level: String,
    pub to_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            to_stderr: false,
        }
    }
}

impl GrailConfig {
    pub fn default_path() -> PathBuf {
        crate::grail_home().join("config.json")
    }

    /// Load `explicit` if given (it must exist), otherwise the default
    /// config file when present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(RuntimeError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(path)
            }
            None => {
                let path = Self::default_path();
                if path.is_file() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GrailConfig::default();
        assert_eq!(config.resolve.class_pick, ClassPickPolicy::First);
        assert!(config.resolve.cache);
        assert_eq!(config.log.level, "info");
        assert!(!config.log.to_stderr);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = GrailConfig::from_json(r#"{"resolve": {"class_pick": "unique"}}"#).unwrap();
        assert_eq!(config.resolve.class_pick, ClassPickPolicy::Unique);
        assert!(config.resolve.cache);
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"log": {{"level": "debug", "to_stderr": true}}, "resolve": {{"cache": false}}}}"#)
            .unwrap();

        let config = GrailConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.log.level, "debug");
        assert!(config.log.to_stderr);
        assert!(!config.resolve.cache);
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            GrailConfig::load(Some(&missing)),
            Err(RuntimeError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_file_is_a_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            GrailConfig::load(Some(file.path())),
            Err(RuntimeError::Json(_))
        ));
    }
}
