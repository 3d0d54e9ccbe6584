use std::path::PathBuf;

use crate::config::{ConfigError, Provenance};
use crate::progress::BackendError;
use thiserror::Error;

/// Top-level error type for the chapter-track library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("session requires gathered config sources")]
    MissingSources,

    #[error("backend is not configured (resolved from {provenance})")]
    NotConfigured { provenance: Provenance },

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("could not load chapter content from '{path}': {source}")]
    ChapterContent {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to export catalog: {0}")]
    Export(#[from] serde_json::Error),
}
