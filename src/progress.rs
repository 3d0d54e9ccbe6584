//! Per-user chapter progress and the backend collaborators that store it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Subject, Textbook};

/// Collection holding each user's progress document.
pub const PROGRESS_COLLECTION: &str = "upsc_progress";
/// Name of the progress document inside [`PROGRESS_COLLECTION`].
pub const PROGRESS_DOCUMENT: &str = "userProgress";

/// Read checkmarks keyed by book slug, then chapter slug.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterProgress(BTreeMap<String, BTreeMap<String, bool>>);

impl ChapterProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_read(&self, book_slug: &str, chapter_slug: &str) -> bool {
        self.0
            .get(book_slug)
            .and_then(|chapters| chapters.get(chapter_slug))
            .copied()
            .unwrap_or(false)
    }

    pub fn set_read(&mut self, book_slug: &str, chapter_slug: &str, read: bool) {
        self.0
            .entry(book_slug.to_string())
            .or_default()
            .insert(chapter_slug.to_string(), read);
    }

    /// Flips the checkmark and returns the new state.
    pub fn toggle(&mut self, book_slug: &str, chapter_slug: &str) -> bool {
        let read = !self.is_read(book_slug, chapter_slug);
        self.set_read(book_slug, chapter_slug, read);
        read
    }

    /// Applies `update` the way the document store merges a partial write:
    /// entries in `update` win, everything else is kept.
    pub fn merge(&mut self, update: &ChapterProgress) {
        for (book, chapters) in &update.0 {
            let entry = self.0.entry(book.clone()).or_default();
            for (chapter, read) in chapters {
                entry.insert(chapter.clone(), *read);
            }
        }
    }

    /// Counts read chapters of `book`. Slugs not in the catalog are ignored.
    pub fn book_progress(&self, book: &Textbook) -> ReadProgress {
        let read = book
            .chapters
            .iter()
            .filter(|chapter| self.is_read(book.slug, chapter.slug))
            .count();
        ReadProgress {
            read,
            total: book.chapters.len(),
        }
    }

    /// Totals read chapters across every textbook of `subject`.
    pub fn subject_progress(&self, subject: &Subject) -> ReadProgress {
        subject
            .recommended_textbooks
            .iter()
            .map(|book| self.book_progress(book))
            .fold(ReadProgress::default(), |acc, book| ReadProgress {
                read: acc.read + book.read,
                total: acc.total + book.total,
            })
    }
}

/// How far a user has got through a book or a whole subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadProgress {
    pub read: usize,
    pub total: usize,
}

impl ReadProgress {
    /// No chapters read out of `total`.
    pub fn unread(total: usize) -> Self {
        Self { read: 0, total }
    }

    /// Percentage rounded half up, 0 when there are no chapters.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.read * 200 + self.total) / (2 * self.total)) as u8
    }
}

/// Identifier issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Location of a user's progress document in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath(String);

impl DocumentPath {
    pub fn for_user(app_id: &str, user: &UserId) -> Self {
        Self(format!(
            "artifacts/{app_id}/users/{user}/{PROGRESS_COLLECTION}/{PROGRESS_DOCUMENT}"
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failure reported by an external backend collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// External identity provider.
pub trait IdentityProvider {
    fn sign_in_with_custom_token(&self, token: &str) -> Result<UserId, BackendError>;

    fn sign_in_anonymously(&self) -> Result<UserId, BackendError>;
}

/// External document store holding progress documents.
pub trait ProgressStore {
    /// Reads a document; `Ok(None)` when it does not exist yet.
    fn load(&self, path: &DocumentPath) -> Result<Option<ChapterProgress>, BackendError>;

    /// Writes with merge semantics, see [`ChapterProgress::merge`].
    fn merge(&self, path: &DocumentPath, progress: &ChapterProgress) -> Result<(), BackendError>;
}
