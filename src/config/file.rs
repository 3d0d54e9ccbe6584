//! Host injection file source.
//!
//! The hosting environment may drop a TOML file next to the process to inject
//! configuration:
//!
//! ```toml
//! app_id = "study-tracker"
//! initial_auth_token = "..."
//! config = '{"apiKey": "...", "projectId": "..."}'
//!
//! [structured]
//! apiKey = "..."
//! projectId = "..."
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::candidate::ConfigCandidate;
use super::source::{OrderedSources, SourceProvider};
use super::ConfigError;

/// Contents of a host injection file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HostInjection {
    structured: Option<ConfigCandidate>,
    config: Option<String>,
    app_id: Option<String>,
    initial_auth_token: Option<String>,
}

/// A source that loads host-injected values from a TOML file.
///
/// Files can be marked as required or optional. Required files that don't exist
/// cause an error; optional files that don't exist are silently skipped.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    required: bool,
}

impl FileSource {
    /// Creates a new file source.
    ///
    /// If `required` is true, gathering fails if the file doesn't exist.
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }
}

impl SourceProvider for FileSource {
    fn contribute(&self, sources: &mut OrderedSources) -> Result<(), ConfigError> {
        let Some(host) = load_host_file(&self.path, self.required)? else {
            return Ok(());
        };
        debug!(path = %self.path.display(), "loaded host injection file");

        if host.structured.is_some() {
            sources.structured = host.structured;
        }
        if host.config.is_some() {
            sources.injected_serialized = host.config;
        }
        if host.app_id.is_some() {
            sources.app_id = host.app_id;
        }
        if host.initial_auth_token.is_some() {
            sources.initial_auth_token = host.initial_auth_token;
        }
        Ok(())
    }
}

/// Reads the host injection file at `path`.
///
/// An absent file is only an error when the host declared it `required`;
/// otherwise the host simply injected nothing and `Ok(None)` is returned.
fn load_host_file(path: &Path, required: bool) -> Result<Option<HostInjection>, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => return Ok(None),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()))
        }
        Err(source) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    toml::from_str(&contents)
        .map(Some)
        .map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_source_fills_host_slots() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            app_id = "tracker"
            initial_auth_token = "tok"
            config = '{{"apiKey": "k", "projectId": "p"}}'

            [structured]
            apiKey = "k1"
            projectId = "p1"
            "#
        )
        .unwrap();

        let mut sources = OrderedSources::default();
        FileSource::new(file.path(), true)
            .contribute(&mut sources)
            .unwrap();

        let structured = sources.structured.unwrap();
        assert_eq!(structured.api_key.as_deref(), Some("k1"));
        assert_eq!(structured.project_id.as_deref(), Some("p1"));
        assert_eq!(
            sources.injected_serialized.as_deref(),
            Some(r#"{"apiKey": "k", "projectId": "p"}"#)
        );
        assert_eq!(sources.app_id.as_deref(), Some("tracker"));
        assert_eq!(sources.initial_auth_token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_file_source_leaves_unset_slots_alone() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "app_id = \"tracker\"").unwrap();

        let mut sources = OrderedSources {
            injected_serialized: Some("{}".into()),
            ..Default::default()
        };
        FileSource::new(file.path(), true)
            .contribute(&mut sources)
            .unwrap();

        assert_eq!(sources.injected_serialized.as_deref(), Some("{}"));
        assert_eq!(sources.structured, None);
    }

    #[test]
    fn test_file_source_required_missing() {
        let mut sources = OrderedSources::default();
        let result = FileSource::new("/nonexistent/path/host.toml", true).contribute(&mut sources);

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_file_source_optional_missing() {
        let mut sources = OrderedSources::default();
        FileSource::new("/nonexistent/path/host.toml", false)
            .contribute(&mut sources)
            .unwrap();

        assert_eq!(sources, OrderedSources::default());
    }

    #[test]
    fn test_file_source_malformed_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "app_id = ").unwrap();

        let mut sources = OrderedSources::default();
        let result = FileSource::new(file.path(), false).contribute(&mut sources);

        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_file_source_unreadable_path() {
        let dir = tempfile::tempdir().unwrap();

        let mut sources = OrderedSources::default();
        let result = FileSource::new(dir.path(), false).contribute(&mut sources);

        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
