//! The fixed study catalog: subjects, recommended textbooks, and their chapters.

mod data;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub chapter_title: &'static str,
    pub slug: &'static str,
    /// Site-absolute path of the chapter's markdown, e.g. `/markdown/x.md`.
    pub file_path: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Textbook {
    pub book_name: &'static str,
    pub slug: &'static str,
    pub chapters: &'static [Chapter],
}

impl Textbook {
    pub fn chapter(&self, slug: &str) -> Option<&'static Chapter> {
        self.chapters.iter().find(|chapter| chapter.slug == slug)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub subject_name: &'static str,
    pub recommended_textbooks: &'static [Textbook],
}

/// The catalog as exported: `{ "UPSC Subjects": [...] }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Catalog {
    #[serde(rename = "UPSC Subjects")]
    subjects: &'static [Subject],
}

impl Catalog {
    /// The hand-authored catalog shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            subjects: data::SUBJECTS,
        }
    }

    pub fn subjects(&self) -> &'static [Subject] {
        self.subjects
    }

    pub fn books(&self) -> impl Iterator<Item = &'static Textbook> {
        self.subjects
            .iter()
            .flat_map(|subject| subject.recommended_textbooks.iter())
    }

    pub fn find_book(&self, slug: &str) -> Option<&'static Textbook> {
        self.books().find(|book| book.slug == slug)
    }

    pub fn find_chapter(&self, book_slug: &str, chapter_slug: &str) -> Option<&'static Chapter> {
        self.find_book(book_slug)?.chapter(chapter_slug)
    }

    pub fn chapter_count(&self) -> usize {
        self.books().map(|book| book.chapters.len()).sum()
    }

    /// Pretty-printed JSON export of the whole catalog.
    pub fn to_json_pretty(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Turns text into a URL-friendly slug.
///
/// Lowercases and trims, turns whitespace into `-`, drops everything except
/// ASCII letters, digits, `_` and `-`, and collapses repeated `-`.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());

    for ch in lowered.trim().chars() {
        let out = if ch.is_whitespace() || ch == '-' {
            '-'
        } else if ch.is_ascii_alphanumeric() || ch == '_' {
            ch
        } else {
            continue;
        };
        if out == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(out);
    }

    slug
}

/// Directory the chapter markdown files are served from.
#[derive(Debug, Clone)]
pub struct ContentRoot {
    dir: PathBuf,
}

impl ContentRoot {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Resolves a chapter's site-absolute `file_path` under this root.
    pub fn path_for(&self, chapter: &Chapter) -> PathBuf {
        self.dir.join(chapter.file_path.trim_start_matches('/'))
    }

    /// Reads the raw markdown of `chapter`.
    pub fn read_chapter(&self, chapter: &Chapter) -> Result<String, Error> {
        let path = self.path_for(chapter);
        std::fs::read_to_string(&path).map_err(|source| Error::ChapterContent { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Indian Polity"), "indian-polity");
        assert_eq!(
            slugify("  India's Struggle for Independence  "),
            "indias-struggle-for-independence"
        );
        assert_eq!(slugify("Mughal Empire: Zenith and Decline"), "mughal-empire-zenith-and-decline");
        assert_eq!(slugify("A -- B"), "a-b");
        assert_eq!(slugify("snake_case ok"), "snake_case-ok");
        assert_eq!(slugify("a ' b"), "a-b");
    }

    #[test]
    fn test_builtin_slugs_are_unique() {
        let catalog = Catalog::builtin();
        let mut slugs: Vec<_> = catalog.books().map(|book| book.slug).collect();
        let total = slugs.len();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), total);
    }

    #[test]
    fn test_find_chapter() {
        let catalog = Catalog::builtin();
        let chapter = catalog
            .find_chapter("indias-struggle-for-independence-by-bipan-chandra", "revolt-1857")
            .unwrap();
        assert_eq!(chapter.chapter_title, "Revolt of 1857");
        assert!(catalog.find_chapter("indian-polity-by-m-laxmikanth", "revolt-1857").is_none());
        assert!(catalog.find_book("missing").is_none());
    }

    #[test]
    fn test_chapter_count() {
        assert_eq!(Catalog::builtin().chapter_count(), 10);
    }

    #[test]
    fn test_export_uses_camel_case_keys() {
        let json = Catalog::builtin().to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let first = &value["UPSC Subjects"][0];
        assert_eq!(
            first["subjectName"],
            "Indian History (Ancient, Medieval, Modern)"
        );
        assert_eq!(
            first["recommendedTextbooks"][0]["chapters"][0]["filePath"],
            "/markdown/history-medieval-ch1.md"
        );
    }

    #[test]
    fn test_read_chapter() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("markdown")).unwrap();
        std::fs::write(dir.path().join("markdown/indian-polity-ch3.md"), "# Preamble\n").unwrap();

        let root = ContentRoot::new(dir.path());
        let chapter = Catalog::builtin()
            .find_chapter("indian-polity-by-m-laxmikanth", "polity-preamble")
            .unwrap();

        assert_eq!(root.read_chapter(chapter).unwrap(), "# Preamble\n");
    }

    #[test]
    fn test_read_missing_chapter() {
        let dir = tempfile::tempdir().unwrap();
        let chapter = Catalog::builtin()
            .find_chapter("indian-polity-by-m-laxmikanth", "polity-preamble")
            .unwrap();

        let err = ContentRoot::new(dir.path()).read_chapter(chapter).unwrap_err();
        assert!(matches!(err, Error::ChapterContent { .. }));
    }
}
