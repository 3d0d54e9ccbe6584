//! Session context holding the resolved backend configuration.

use tracing::{debug, error};

use crate::catalog::{Subject, Textbook};
use crate::config::{ConfigCandidate, OrderedSources, ResolutionOutcome};
use crate::progress::{
    ChapterProgress, DocumentPath, IdentityProvider, ProgressStore, ReadProgress, UserId,
};
use crate::Error;

/// App id used for document paths when neither a hint nor the config supplies one.
pub const DEFAULT_APP_ID: &str = "default-app-id";

/// Shown in place of sign-in and progress features when the backend is unusable.
pub const DEGRADED_NOTICE: &str = "The backend is not configured correctly. Sign-in and \
     progress storage are unavailable. Check the host configuration and environment variables.";

/// Process-wide session state built from one resolution.
///
/// Every backend operation goes through the session and is refused with
/// [`Error::NotConfigured`] unless the outcome is usable, so collaborators are
/// never constructed or called against a placeholder or broken config.
///
/// ## Example
///
/// ```no_run
/// use chapter_track::{Session, Sources};
///
/// let session = Session::builder()
///     .with_sources(
///         Sources::builder()
///             .with_file("host-config.toml", false)
///             .with_env("NEXT_PUBLIC_FIREBASE", "_")
///             .gather()?,
///     )
///     .build()?;
///
/// if let Some(notice) = session.degraded_notice() {
///     eprintln!("{notice}");
/// }
/// # Ok::<(), chapter_track::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    outcome: ResolutionOutcome,
    app_id: String,
    initial_auth_token: Option<String>,
}

impl Session {
    /// Creates a new builder for constructing a `Session`.
    pub fn builder() -> SessionBuilder {
        SessionBuilder { sources: None }
    }

    /// Resolves `sources` once and captures the session hints.
    pub fn resolve(sources: &OrderedSources) -> Self {
        let outcome = sources.resolve();
        let app_id = sources
            .app_id
            .clone()
            .filter(|id| !id.is_empty())
            .or_else(|| outcome.config().app_id.clone().filter(|id| !id.is_empty()))
            .unwrap_or_else(|| DEFAULT_APP_ID.to_string());

        debug!(
            provenance = %outcome.provenance(),
            usable = outcome.is_usable(),
            app_id = %app_id,
            "session configured"
        );

        Self {
            outcome,
            app_id,
            initial_auth_token: sources.initial_auth_token.clone(),
        }
    }

    pub fn outcome(&self) -> &ResolutionOutcome {
        &self.outcome
    }

    pub fn is_usable(&self) -> bool {
        self.outcome.is_usable()
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn initial_auth_token(&self) -> Option<&str> {
        self.initial_auth_token.as_deref()
    }

    /// The message to surface instead of backend features, if they are unavailable.
    pub fn degraded_notice(&self) -> Option<&'static str> {
        (!self.is_usable()).then_some(DEGRADED_NOTICE)
    }

    /// The configuration to initialize collaborators with.
    pub fn backend_config(&self) -> Result<&ConfigCandidate, Error> {
        if self.is_usable() {
            Ok(self.outcome.config())
        } else {
            Err(Error::NotConfigured {
                provenance: self.outcome.provenance(),
            })
        }
    }

    /// Constructs a collaborator from the config; `init` is not called when unusable.
    pub fn connect<T, F>(&self, init: F) -> Result<T, Error>
    where
        F: FnOnce(&ConfigCandidate) -> T,
    {
        self.backend_config().map(init)
    }

    /// Signs in with the host-supplied token if there is one, anonymously otherwise.
    pub fn sign_in<I: IdentityProvider>(&self, identity: &I) -> Result<UserId, Error> {
        self.backend_config()?;

        let result = match self.initial_auth_token() {
            Some(token) => identity.sign_in_with_custom_token(token),
            None => identity.sign_in_anonymously(),
        };
        result.map_err(|e| {
            error!(error = %e, "sign-in failed");
            Error::Backend(e)
        })
    }

    pub fn progress_path(&self, user: &UserId) -> DocumentPath {
        DocumentPath::for_user(&self.app_id, user)
    }

    /// Loads the user's progress; a missing document is empty progress.
    pub fn load_progress<S: ProgressStore>(
        &self,
        store: &S,
        user: &UserId,
    ) -> Result<ChapterProgress, Error> {
        self.backend_config()?;

        let path = self.progress_path(user);
        match store.load(&path) {
            Ok(progress) => Ok(progress.unwrap_or_default()),
            Err(e) => {
                error!(path = %path, error = %e, "failed to load progress");
                Err(Error::Backend(e))
            }
        }
    }

    /// Writes `progress` into the user's document with merge semantics.
    pub fn save_progress<S: ProgressStore>(
        &self,
        store: &S,
        user: &UserId,
        progress: &ChapterProgress,
    ) -> Result<(), Error> {
        self.backend_config()?;

        let path = self.progress_path(user);
        store.merge(&path, progress).map_err(|e| {
            error!(path = %path, error = %e, "failed to save progress");
            Error::Backend(e)
        })
    }

    /// Read progress through `book`; nothing counts as read while degraded.
    pub fn book_progress(&self, progress: &ChapterProgress, book: &Textbook) -> ReadProgress {
        if self.is_usable() {
            progress.book_progress(book)
        } else {
            ReadProgress::unread(book.chapters.len())
        }
    }

    /// Read progress across a subject; nothing counts as read while degraded.
    pub fn subject_progress(&self, progress: &ChapterProgress, subject: &Subject) -> ReadProgress {
        if self.is_usable() {
            progress.subject_progress(subject)
        } else {
            let total = subject
                .recommended_textbooks
                .iter()
                .map(|book| book.chapters.len())
                .sum();
            ReadProgress::unread(total)
        }
    }
}

/// Builder for constructing a [`Session`].
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct SessionBuilder {
    sources: Option<OrderedSources>,
}

impl SessionBuilder {
    /// Attaches the gathered sources to resolve.
    ///
    /// The sources should be the result of [`Sources::gather`](crate::Sources::gather).
    pub fn with_sources(mut self, sources: OrderedSources) -> Self {
        self.sources = Some(sources);
        self
    }

    /// Builds the `Session`, resolving the sources exactly once.
    ///
    /// Returns an error if no sources were provided.
    pub fn build(self) -> Result<Session, Error> {
        let sources = self.sources.ok_or(Error::MissingSources)?;
        Ok(Session::resolve(&sources))
    }
}
