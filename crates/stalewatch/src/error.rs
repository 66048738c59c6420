//! Error types for stalewatch runs.
//!
//! Errors fall into three layers, from most to least severe:
//!
//! - **`Error`**: run-level failures that halt the scan (bad configuration,
//!   unreadable scan root)
//! - **`ScanError`**: file-level failures that are collected while the run
//!   continues with the remaining files
//! - **`FormatError`**: a single marker whose date does not match the
//!   configured pattern; the marker is dropped and the file is still scanned
//!
//! ## Error Categorization
//!
//! `ScanErrorKind` uses a 4xx/5xx style categorization:
//! - Input problems (user's fault): parse errors, unsupported languages, encoding
//! - Internal problems (our fault): I/O errors

use std::path::PathBuf;
use thiserror::Error;

/// Result type for stalewatch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for stalewatch operations.
///
/// These errors represent failures that prevent the run from completing.
#[derive(Debug, Error)]
pub enum Error {
    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tree-sitter parsing infrastructure failed
    #[error("parser error: {0}")]
    Parser(String),

    /// Invalid configuration, date pattern or reference date
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build a configuration error from a date that failed the run's pattern.
    #[must_use]
    pub fn invalid_reference_date(err: &FormatError) -> Self {
        Self::Config(format!(
            "invalid reference date '{}' (expected format {}); use --date-format to change it",
            err.input, err.expected
        ))
    }
}

/// A date that does not match the configured pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{input}' does not match date format '{expected}'")]
pub struct FormatError {
    /// The offending text
    pub input: String,
    /// The pattern the text was expected to match
    pub expected: String,
}

impl FormatError {
    /// Create a new format error.
    #[must_use]
    pub fn new(input: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            expected: expected.into(),
        }
    }
}

/// Error encountered while scanning a specific file.
///
/// These errors are collected during a run but don't halt it. The scanner
/// continues with remaining files and reports all errors at the end.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ScanError {
    /// Path to the file that failed
    pub path: PathBuf,
    /// Category of the error
    pub kind: ScanErrorKind,
    /// Human-readable error message
    pub message: String,
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            self.path.display(),
            self.message,
            self.kind
        )
    }
}

impl std::error::Error for ScanError {}

/// Categorization of scan errors.
///
/// Uses a 4xx/5xx style pattern:
/// - Input problems are issues with the source files (user can fix)
/// - Internal problems are issues with reading them
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanErrorKind {
    // === Input Problems (analogous to HTTP 4xx) ===
    /// Source file has syntax errors that prevent parsing
    ParseFailed,

    /// File type is not supported (unknown extension)
    UnsupportedLanguage,

    /// File content is not valid UTF-8
    EncodingError,

    // === Internal Problems (analogous to HTTP 5xx) ===
    /// Could not read the file from disk
    IoError,
}

impl std::fmt::Display for ScanErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParseFailed => write!(f, "parse failed"),
            Self::UnsupportedLanguage => write!(f, "unsupported language"),
            Self::EncodingError => write!(f, "encoding error"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl ScanErrorKind {
    /// Returns `true` if this is an input problem (4xx-style).
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::ParseFailed | Self::UnsupportedLanguage | Self::EncodingError
        )
    }
}

impl ScanError {
    /// Create a new scan error.
    #[must_use]
    pub fn new(path: PathBuf, kind: ScanErrorKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
        }
    }

    /// Create a parse error for a file.
    #[must_use]
    pub fn parse_failed(path: PathBuf, message: impl Into<String>) -> Self {
        Self::new(path, ScanErrorKind::ParseFailed, message)
    }

    /// Create an unsupported language error.
    #[must_use]
    pub fn unsupported_language(path: PathBuf) -> Self {
        let ext = path
            .extension()
            .map_or_else(|| "none".to_string(), |e| e.to_string_lossy().to_string());
        Self::new(
            path,
            ScanErrorKind::UnsupportedLanguage,
            format!("unsupported extension: {ext}"),
        )
    }

    /// Create an encoding error for a file.
    #[must_use]
    pub fn encoding_error(path: PathBuf) -> Self {
        Self::new(path, ScanErrorKind::EncodingError, "file is not valid UTF-8")
    }

    /// Create an I/O error for a file.
    #[must_use]
    pub fn io_error(path: PathBuf, error: &std::io::Error) -> Self {
        Self::new(path, ScanErrorKind::IoError, error.to_string())
    }
}
