use std::fmt;

use super::candidate::ConfigCandidate;
use super::resolve::{resolve, ResolutionOutcome};
use super::ConfigError;

/// Where a resolved configuration came from, ordered by precedence (highest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceKind {
    /// A structured value supplied directly by the hosting environment.
    InjectedStructured,
    /// A serialized value supplied by the hosting environment.
    InjectedSerialized,
    /// Individual named values read from the environment.
    DiscreteVariables,
    /// The fixed fallback baked into the program.
    Placeholder,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::InjectedStructured => write!(f, "injected structured config"),
            SourceKind::InjectedSerialized => write!(f, "injected serialized config"),
            SourceKind::DiscreteVariables => write!(f, "discrete environment variables"),
            SourceKind::Placeholder => write!(f, "placeholder config"),
        }
    }
}

/// Classification of a resolution: a source tier, or a hard parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    Source(SourceKind),
    ParseError,
}

impl Provenance {
    /// Returns `true` for the tiers that carry a real backend configuration.
    pub fn is_real_source(&self) -> bool {
        matches!(
            self,
            Provenance::Source(
                SourceKind::InjectedStructured
                    | SourceKind::InjectedSerialized
                    | SourceKind::DiscreteVariables
            )
        )
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Source(kind) => write!(f, "{kind}"),
            Provenance::ParseError => write!(f, "unparseable serialized config"),
        }
    }
}

/// Which slot a serialized config string was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SerializedOrigin {
    Host,
    Environment,
}

impl fmt::Display for SerializedOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializedOrigin::Host => write!(f, "host injection"),
            SerializedOrigin::Environment => write!(f, "environment"),
        }
    }
}

/// The explicit bundle of raw inputs that [`resolve`] consumes.
///
/// Every slot is independently optional. `app_id` and `initial_auth_token`
/// are session hints carried alongside; they take no part in resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedSources {
    pub structured: Option<ConfigCandidate>,
    pub injected_serialized: Option<String>,
    pub env_serialized: Option<String>,
    pub discrete: ConfigCandidate,
    pub placeholder: ConfigCandidate,
    pub app_id: Option<String>,
    pub initial_auth_token: Option<String>,
}

impl Default for OrderedSources {
    fn default() -> Self {
        Self {
            structured: None,
            injected_serialized: None,
            env_serialized: None,
            discrete: ConfigCandidate::default(),
            placeholder: ConfigCandidate::placeholder(),
            app_id: None,
            initial_auth_token: None,
        }
    }
}

impl OrderedSources {
    /// Picks the serialized value to parse: host injection first, then environment.
    ///
    /// Empty strings count as absent.
    pub fn serialized(&self) -> Option<(SerializedOrigin, &str)> {
        let present: for<'a> fn(&'a Option<String>) -> Option<&'a str> =
            |v| v.as_deref().filter(|s| !s.is_empty());

        present(&self.injected_serialized)
            .map(|s| (SerializedOrigin::Host, s))
            .or_else(|| present(&self.env_serialized).map(|s| (SerializedOrigin::Environment, s)))
    }

    /// Resolves these sources. See [`resolve`].
    pub fn resolve(&self) -> ResolutionOutcome {
        resolve(self)
    }
}

/// Something that can fill slots of an [`OrderedSources`] bundle.
///
/// Providers only overwrite slots they actually supply.
pub trait SourceProvider: Send + Sync + fmt::Debug {
    fn contribute(&self, sources: &mut OrderedSources) -> Result<(), ConfigError>;
}
