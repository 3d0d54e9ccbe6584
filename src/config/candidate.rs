//! The configuration record handed to the identity and storage backends.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Marker written into `apiKey` and `projectId` when a serialized config fails to parse.
pub const PARSE_ERROR_MARKER: &str = "ERROR_PARSING_CONFIG";

/// One candidate backend configuration, not yet validated.
///
/// Every field is optional. A candidate is only complete when both
/// [`api_key`](Self::api_key) and [`project_id`](Self::project_id) are
/// present and non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigCandidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messaging_sender_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_id: Option<String>,
}

impl ConfigCandidate {
    /// The fixed, non-functional fallback used when no real source is available.
    pub fn placeholder() -> Self {
        Self {
            api_key: Some("placeholder-api-key".into()),
            auth_domain: Some("placeholder-project.firebaseapp.com".into()),
            project_id: Some("placeholder-project".into()),
            storage_bucket: Some("placeholder-project.firebasestorage.app".into()),
            messaging_sender_id: Some("000000000000".into()),
            app_id: Some("1:000000000000:web:placeholder".into()),
            measurement_id: None,
        }
    }

    /// The sentinel produced when a present serialized config is malformed.
    pub fn parse_error_sentinel() -> Self {
        Self {
            api_key: Some(PARSE_ERROR_MARKER.into()),
            project_id: Some(PARSE_ERROR_MARKER.into()),
            ..Self::default()
        }
    }

    /// Builds a candidate from an already-parsed JSON value.
    ///
    /// Only string-valued fields are taken. Anything that is not an object
    /// yields an empty candidate, which then fails validation and falls through.
    pub fn from_json_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };
        let field = |name: &str| object.get(name).and_then(Value::as_str).map(str::to_owned);

        Self {
            api_key: field("apiKey"),
            auth_domain: field("authDomain"),
            project_id: field("projectId"),
            storage_bucket: field("storageBucket"),
            messaging_sender_id: field("messagingSenderId"),
            app_id: field("appId"),
            measurement_id: field("measurementId"),
        }
    }

    /// Returns `true` when both `apiKey` and `projectId` are non-empty.
    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// Names of the required fields that are absent or empty.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !non_empty(&self.api_key) {
            missing.push("apiKey");
        }
        if !non_empty(&self.project_id) {
            missing.push("projectId");
        }
        missing
    }

    /// Returns `true` when no field at all is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrites fields with those that `other` actually supplies.
    pub(crate) fn overlay(&mut self, other: ConfigCandidate) {
        let ConfigCandidate {
            api_key,
            auth_domain,
            project_id,
            storage_bucket,
            messaging_sender_id,
            app_id,
            measurement_id,
        } = other;

        overlay_field(&mut self.api_key, api_key);
        overlay_field(&mut self.auth_domain, auth_domain);
        overlay_field(&mut self.project_id, project_id);
        overlay_field(&mut self.storage_bucket, storage_bucket);
        overlay_field(&mut self.messaging_sender_id, messaging_sender_id);
        overlay_field(&mut self.app_id, app_id);
        overlay_field(&mut self.measurement_id, measurement_id);
    }
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

fn overlay_field(slot: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *slot = value;
    }
}
