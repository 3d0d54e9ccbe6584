use tracing::debug;

use super::candidate::ConfigCandidate;
use super::source::{OrderedSources, SourceProvider};
use super::ConfigError;

/// Variable suffix of the serialized bundle.
const BUNDLE_VAR: &str = "CONFIG";

/// Reads discrete config values and the serialized bundle from environment variables.
///
/// Names are `<prefix><separator><FIELD>`, e.g. with prefix `NEXT_PUBLIC_FIREBASE`
/// and separator `_`: `NEXT_PUBLIC_FIREBASE_API_KEY`, `NEXT_PUBLIC_FIREBASE_CONFIG`.
/// With an empty prefix the bare field names are used. Empty values count as unset.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    separator: String,
    app_id_var: Option<String>,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            separator: separator.into(),
            app_id_var: None,
        }
    }

    /// Names the variable carrying the session app id (not the backend `appId` field).
    pub fn with_app_id_var(mut self, name: impl Into<String>) -> Self {
        self.app_id_var = Some(name.into());
        self
    }

    fn var_name(&self, field: &str) -> String {
        if self.prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}{}{}", self.prefix, self.separator, field)
        }
    }

    /// Applies this source using `lookup` in place of the process environment.
    pub fn read_with<F>(&self, sources: &mut OrderedSources, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let field = |field: &str| get(&self.var_name(field));

        let discrete = ConfigCandidate {
            api_key: field("API_KEY"),
            auth_domain: field("AUTH_DOMAIN"),
            project_id: field("PROJECT_ID"),
            storage_bucket: field("STORAGE_BUCKET"),
            messaging_sender_id: field("MESSAGING_SENDER_ID"),
            app_id: field("APP_ID"),
            measurement_id: field("MEASUREMENT_ID"),
        };
        if !discrete.is_empty() {
            debug!(prefix = %self.prefix, "discrete config variables present");
        }
        sources.discrete.overlay(discrete);

        if let Some(bundle) = field(BUNDLE_VAR) {
            debug!(var = %self.var_name(BUNDLE_VAR), "serialized config variable present");
            sources.env_serialized = Some(bundle);
        }

        if let Some(app_id) = self.app_id_var.as_deref().and_then(|name| get(name)) {
            sources.app_id = Some(app_id);
        }
    }
}

impl SourceProvider for EnvSource {
    fn contribute(&self, sources: &mut OrderedSources) -> Result<(), ConfigError> {
        self.read_with(sources, |name| std::env::var(name).ok());
        Ok(())
    }
}
