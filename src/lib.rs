pub mod catalog;
pub mod config;
pub mod context;
mod error;
pub mod progress;

pub use catalog::{slugify, Catalog, ContentRoot};
pub use config::{
    resolve, ConfigCandidate, ConfigError, OrderedSources, Provenance, ResolutionOutcome,
    SourceKind, Sources,
};
pub use context::{Session, SessionBuilder};
pub use error::Error;
pub use progress::{ChapterProgress, IdentityProvider, ProgressStore, ReadProgress, UserId};
