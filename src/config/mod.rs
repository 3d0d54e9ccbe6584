//! Backend configuration gathering and resolution.

mod builder;
mod candidate;
mod env;
mod error;
mod file;
mod resolve;
mod source;

pub use builder::Sources;
pub use candidate::{ConfigCandidate, PARSE_ERROR_MARKER};
pub use env::EnvSource;
pub use error::{ConfigError, ConfigIssue};
pub use file::FileSource;
pub use resolve::{resolve, ResolutionOutcome};
pub use source::{OrderedSources, Provenance, SerializedOrigin, SourceKind, SourceProvider};
