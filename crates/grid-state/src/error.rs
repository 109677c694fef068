//! Error types for the grid state crate.
//!
//! State handling itself never fails; only configuration loading does.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a [`GridConfig`](crate::GridConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
