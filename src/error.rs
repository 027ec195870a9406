//! Configuration error types.
//!
//! The simulation core itself never fails: gating, absent deletes and
//! degenerate collisions are silent no-ops. Only loading a [`crate::SimConfig`]
//! from disk can go wrong.

use std::fmt;
use std::path::PathBuf;

/// Error raised while loading or validating a [`crate::SimConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config text is not valid JSON for `SimConfig`.
    Parse(serde_json::Error),

    /// A value is outside the range the engine can work with.
    Invalid {
        /// Field name, as spelled in the JSON file.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Human-readable description of the accepted range.
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config '{}': {}", path.display(), source)
            }
            ConfigError::Parse(err) => write!(f, "invalid config JSON: {}", err),
            ConfigError::Invalid {
                name,
                value,
                reason,
            } => write!(f, "config value '{}' = {} is invalid: {}", name, value, reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}
