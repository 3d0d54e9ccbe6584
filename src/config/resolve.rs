//! Resolution of the backend configuration from prioritized sources.
//!
//! Tiers are tried in strict precedence. A tier that yields an incomplete
//! candidate falls through to the next one; a present but malformed
//! serialized config stops resolution outright.

use serde_json::Value;
use tracing::{error, warn};

use super::candidate::ConfigCandidate;
use super::error::ConfigIssue;
use super::source::{OrderedSources, Provenance, SerializedOrigin, SourceKind};

/// The final configuration, where it came from, and whether the backend may be used.
///
/// Built once by [`resolve`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOutcome {
    config: ConfigCandidate,
    provenance: Provenance,
    usable: bool,
    issues: Vec<ConfigIssue>,
}

impl ResolutionOutcome {
    pub fn config(&self) -> &ConfigCandidate {
        &self.config
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Whether it is safe to initialize the identity and persistence backends.
    ///
    /// True only for a real source tier with non-empty `apiKey` and `projectId`.
    pub fn is_usable(&self) -> bool {
        self.usable
    }

    /// Findings collected while falling through tiers, in the order they occurred.
    pub fn issues(&self) -> &[ConfigIssue] {
        &self.issues
    }
}

/// Resolves the configuration from `sources`.
///
/// Never fails: parse errors and missing configuration are encoded in the
/// returned [`Provenance`] with `usable == false`. Emits one `warn` event when
/// the placeholder is used and one `error` event on a parse error.
pub fn resolve(sources: &OrderedSources) -> ResolutionOutcome {
    let mut issues = Vec::new();

    let injected = if let Some(structured) = &sources.structured {
        Some((SourceKind::InjectedStructured, structured.clone()))
    } else if let Some((origin, text)) = sources.serialized() {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => {
                let kind = match origin {
                    SerializedOrigin::Host => SourceKind::InjectedSerialized,
                    SerializedOrigin::Environment => SourceKind::InjectedStructured,
                };
                Some((kind, ConfigCandidate::from_json_value(&value)))
            }
            Err(e) => {
                issues.push(ConfigIssue::Parse {
                    origin,
                    message: e.to_string(),
                });
                return finish(
                    ConfigCandidate::parse_error_sentinel(),
                    Provenance::ParseError,
                    issues,
                );
            }
        }
    } else {
        None
    };

    if let Some((kind, candidate)) = injected {
        if candidate.is_complete() {
            return finish(candidate, Provenance::Source(kind), issues);
        }
        issues.push(ConfigIssue::Incomplete {
            tier: kind,
            missing: candidate.missing_required(),
        });
    }

    // Discrete variables are only accepted as a complete unit.
    if !sources.discrete.is_empty() {
        if sources.discrete.is_complete() {
            return finish(
                sources.discrete.clone(),
                Provenance::Source(SourceKind::DiscreteVariables),
                issues,
            );
        }
        issues.push(ConfigIssue::Incomplete {
            tier: SourceKind::DiscreteVariables,
            missing: sources.discrete.missing_required(),
        });
    }

    issues.push(ConfigIssue::NoConfigAvailable);
    finish(
        sources.placeholder.clone(),
        Provenance::Source(SourceKind::Placeholder),
        issues,
    )
}

fn finish(
    config: ConfigCandidate,
    provenance: Provenance,
    issues: Vec<ConfigIssue>,
) -> ResolutionOutcome {
    let usable = provenance.is_real_source() && config.is_complete();

    match provenance {
        Provenance::Source(SourceKind::Placeholder) => warn!(
            issues = ?issues,
            "using placeholder backend configuration; sign-in and progress storage are disabled"
        ),
        Provenance::ParseError => error!(
            issues = ?issues,
            "serialized backend configuration could not be parsed; backend will not be initialized"
        ),
        Provenance::Source(_) => {}
    }

    ResolutionOutcome {
        config,
        provenance,
        usable,
        issues,
    }
}
