//! Domain types for stalewatch.
//!
//! - **Entities**: `Annotation` (one per marker comment found in a scan)
//! - **Results**: `ScanReport` (everything one run produced)
//!
//! ## Design Decisions
//!
//! | Decision | Choice | Rationale |
//! |----------|--------|-----------|
//! | Language | Enum not String | Type-safe; adding language requires trait impl |
//! | expire_date | Always resolved | Classification never has to know the default offset |
//! | declaration | Plain string | Recomputed per scan, `<unknown>` when nothing matches |

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ScanError;
use crate::languages::get_language_support;
use crate::marker::MarkerKind;

/// Supported programming languages.
///
/// Adding a new language requires implementing the `LanguageSupport` trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// Go source files (`.go`)
    Go,
    /// Rust source files (`.rs`)
    Rust,
}

impl Language {
    /// File extensions handled by this language.
    #[must_use]
    pub fn extensions(&self) -> &'static [&'static str] {
        get_language_support(*self).extensions()
    }

    /// Detect language from file extension.
    ///
    /// # Returns
    ///
    /// `None` if the extension is not recognized.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        [Self::Go, Self::Rust]
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext.as_str()))
    }

    /// Lower-case language name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Rust => "rust",
        }
    }
}

/// A marker comment located in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    /// File the marker was found in
    pub file: PathBuf,
    /// Line of the comment (1-indexed)
    pub line: u32,
    /// Attributed declaration name, or `<unknown>`
    pub declaration: String,
    /// Marker keyword
    pub kind: MarkerKind,
    /// Optional parenthesized tag
    pub tag: Option<String>,
    /// Date from which the marker is stale
    pub warn_date: NaiveDate,
    /// Date after which the marker is expired (explicit or defaulted)
    pub expire_date: NaiveDate,
    /// Free-text message, empty when absent
    pub message: String,
}

/// Everything produced by one scan of a root path.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Files handed to the scanner, in scan order
    pub files_scanned: usize,
    /// Annotations from every successfully parsed file, in file order
    pub annotations: Vec<Annotation>,
    /// Files that were skipped, with the reason
    pub errors: Vec<ScanError>,
    /// Directories that could not be read (path, error message)
    pub directories_skipped: Vec<(PathBuf, String)>,
}
