use std::path::Path;

use super::candidate::ConfigCandidate;
use super::env::EnvSource;
use super::file::FileSource;
use super::source::{OrderedSources, SourceProvider};
use super::ConfigError;

/// Builder for gathering [`OrderedSources`] from host files and the environment.
///
/// Providers are applied in registration order, with later providers
/// overriding earlier ones for the slots they actually supply. Gathering only
/// collects raw inputs; call [`OrderedSources::resolve`] on the result.
///
/// ## Example
///
/// ```no_run
/// use chapter_track::Sources;
///
/// let sources = Sources::builder()
///     .with_file("host-config.toml", false)
///     .with_env("NEXT_PUBLIC_FIREBASE", "_")
///     .gather()?;
///
/// let outcome = sources.resolve();
/// if !outcome.is_usable() {
///     eprintln!("running without sign-in or progress storage");
/// }
/// # Ok::<(), chapter_track::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .gather() is called"]
pub struct Sources {
    providers: Vec<Box<dyn SourceProvider>>,
    structured: Option<ConfigCandidate>,
    placeholder: Option<ConfigCandidate>,
}

impl Sources {
    /// Creates a new sources builder.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Adds a TOML host injection file.
    ///
    /// If `required` is `true`, gathering fails if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_provider(FileSource::new(path, required))
    }

    /// Reads config variables with the given prefix and separator.
    ///
    /// See [`EnvSource`] for the variable names.
    pub fn with_env(self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.with_provider(EnvSource::new(prefix, separator))
    }

    /// Adds an arbitrary provider.
    pub fn with_provider(mut self, provider: impl SourceProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Supplies a structured config handed over directly by the host.
    ///
    /// Applied after all providers.
    pub fn with_structured(mut self, config: ConfigCandidate) -> Self {
        self.structured = Some(config);
        self
    }

    /// Replaces the built-in placeholder.
    pub fn with_placeholder(mut self, placeholder: ConfigCandidate) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Runs every provider and returns the gathered bundle.
    pub fn gather(self) -> Result<OrderedSources, ConfigError> {
        let mut sources = OrderedSources::default();

        for provider in &self.providers {
            provider.contribute(&mut sources)?;
        }

        if self.structured.is_some() {
            sources.structured = self.structured;
        }
        if let Some(placeholder) = self.placeholder {
            sources.placeholder = placeholder;
        }

        Ok(sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[derive(Debug)]
    struct Fixed(OrderedSources);

    impl SourceProvider for Fixed {
        fn contribute(&self, sources: &mut OrderedSources) -> Result<(), ConfigError> {
            if self.0.injected_serialized.is_some() {
                sources.injected_serialized = self.0.injected_serialized.clone();
            }
            sources.discrete.overlay(self.0.discrete.clone());
            Ok(())
        }
    }

    #[test]
    fn test_later_providers_override() {
        let first = Fixed(OrderedSources {
            injected_serialized: Some("first".into()),
            discrete: ConfigCandidate {
                api_key: Some("k-first".into()),
                project_id: Some("p-first".into()),
                ..Default::default()
            },
            ..Default::default()
        });
        let second = Fixed(OrderedSources {
            injected_serialized: Some("second".into()),
            discrete: ConfigCandidate {
                api_key: Some("k-second".into()),
                ..Default::default()
            },
            ..Default::default()
        });

        let sources = Sources::builder()
            .with_provider(first)
            .with_provider(second)
            .gather()
            .unwrap();

        assert_eq!(sources.injected_serialized.as_deref(), Some("second"));
        assert_eq!(sources.discrete.api_key.as_deref(), Some("k-second"));
        assert_eq!(sources.discrete.project_id.as_deref(), Some("p-first"));
    }

    #[test]
    fn test_structured_and_placeholder_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[structured]\napiKey = \"from-file\"").unwrap();

        let custom = ConfigCandidate {
            api_key: Some("fallback".into()),
            ..Default::default()
        };
        let sources = Sources::builder()
            .with_file(file.path(), true)
            .with_structured(ConfigCandidate {
                api_key: Some("direct".into()),
                project_id: Some("p".into()),
                ..Default::default()
            })
            .with_placeholder(custom.clone())
            .gather()
            .unwrap();

        assert_eq!(
            sources.structured.and_then(|s| s.api_key).as_deref(),
            Some("direct")
        );
        assert_eq!(sources.placeholder, custom);
    }

    #[test]
    fn test_empty_builder_yields_defaults() {
        let sources = Sources::builder().gather().unwrap();
        assert_eq!(sources, OrderedSources::default());
    }

    #[test]
    fn test_missing_required_file_fails() {
        let result = Sources::builder()
            .with_file("/nonexistent/host.toml", true)
            .gather();
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
