use std::path::PathBuf;
use thiserror::Error;

use super::source::{SerializedOrigin, SourceKind};

/// Failure while gathering sources (reading a host injection file).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("required host config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read host config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse host config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Something resolution noticed on its way to an outcome.
///
/// These are never raised; they are recorded on the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigIssue {
    #[error("serialized config from {origin} is malformed: {message}")]
    Parse {
        origin: SerializedOrigin,
        message: String,
    },

    #[error("{tier} is missing required fields {missing:?}")]
    Incomplete {
        tier: SourceKind,
        missing: Vec<&'static str>,
    },

    #[error("no usable configuration source, falling back to placeholder")]
    NoConfigAvailable,
}
