//! # Stalewatch: expiring TODO/FIXME markers
//!
//! Stalewatch finds marker comments that carry a date contract and reports
//! the ones whose date has passed:
//!
//! ```text
//! // TODO(alice): stale:01-01-2025 expires:01-04-2025 remove the v1 fallback
//! ```
//!
//! From the warn (`stale:`) date on, a marker is **stale**. Once the expire
//! date has passed it is **expired**. Without an `expires:` clause the expire
//! date defaults to the warn date plus a configured number of days.
//!
//! ## Design Philosophy
//!
//! - **Syntax-aware** - comments and declarations come from tree-sitter, so
//!   markers inside string literals are never reported
//! - **Best effort** - a malformed file or marker is skipped with a warning,
//!   never fatal
//! - **Stateless** - each run is a pure function of the sources, the
//!   configuration and the reference date
//!
//! ## Quick Start
//!
//! ```no_run
//! use stalewatch::{Config, Stalewatch, classify};
//! use std::path::Path;
//!
//! let scanner = Stalewatch::new(Config::default());
//! let report = scanner.scan(Path::new("."))?;
//!
//! let today = chrono::Local::now().date_naive();
//! let classification = classify(&report.annotations, today);
//! for finding in classification.findings(&report.annotations) {
//!     println!("{}: {}:{} [{}]", finding.status, finding.file.display(), finding.line, finding.declaration);
//! }
//! # Ok::<(), stalewatch::Error>(())
//! ```

mod attribution;
mod classify;
mod config;
mod date;
mod discovery;
mod error;
mod languages;
mod marker;
mod parser;
mod scan;
mod types;

pub use attribution::{Declaration, UNKNOWN_DECLARATION, attribute};
pub use classify::{Classification, Finding, Status, classify};
pub use config::{
    CONFIG_FILE_NAME, Config, ConfigLayer, DEFAULT_EXPIRY_DAYS, parse_excludes,
    resolve_reference_date,
};
pub use date::{CANONICAL_FORMAT, DEFAULT_FORMAT, DatePattern, format_canonical};
pub use discovery::{Discovery, discover_files, scan_root};
pub use error::{Error, FormatError, Result, ScanError, ScanErrorKind};
pub use marker::{Marker, MarkerKind, parse_marker};
pub use parser::{Comment, ParsedSource, SourceParser};
pub use scan::scan_source;
pub use types::{Annotation, Language, ScanReport};

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Marker scanner for one run configuration.
///
/// `Stalewatch` ties discovery, parsing and annotation assembly together.
/// Classification is separate (see [`classify`]) so one scan can be judged
/// against any reference date.
#[derive(Debug, Clone)]
pub struct Stalewatch {
    config: Config,
}

impl Stalewatch {
    /// Create a scanner with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Discover and scan every supported file under `root`.
    ///
    /// Files that fail to read or parse are skipped and listed in
    /// [`ScanReport::errors`].
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if `root` does not exist.
    pub fn scan(&self, root: &Path) -> Result<ScanReport> {
        let discovery = discover_files(root, &self.config.excludes)?;
        debug!(count = discovery.files.len(), "Source files collected");

        let mut report = self.scan_files(&discovery.files);
        report.directories_skipped = discovery.directories_skipped;
        Ok(report)
    }

    /// Scan an explicit list of files.
    ///
    /// Files are parsed in parallel; annotations keep file order and, within
    /// a file, comment order.
    #[must_use]
    pub fn scan_files(&self, files: &[PathBuf]) -> ScanReport {
        let results: Vec<std::result::Result<Vec<Annotation>, ScanError>> = files
            .par_iter()
            .map_init(SourceParser::new, |parser, path| self.scan_file(parser, path))
            .collect();

        let mut report = ScanReport {
            files_scanned: files.len(),
            ..ScanReport::default()
        };

        for result in results {
            match result {
                Ok(annotations) => report.annotations.extend(annotations),
                Err(e) => {
                    warn!(
                        file = %e.path.display(),
                        error = %e.message,
                        kind = %e.kind,
                        "Skipping file"
                    );
                    report.errors.push(e);
                }
            }
        }

        info!(
            files = report.files_scanned,
            annotations = report.annotations.len(),
            skipped = report.errors.len(),
            "Scan complete"
        );
        report
    }

    /// Classify a report's annotations against the run's reference date.
    #[must_use]
    pub fn classify(&self, report: &ScanReport, reference: NaiveDate) -> Classification {
        classify(&report.annotations, reference)
    }

    /// Read, parse and scan a single file.
    ///
    /// # Errors
    ///
    /// Returns a `ScanError` when the file cannot be read, is not UTF-8, has
    /// an unsupported extension, or does not parse.
    pub fn scan_file(
        &self,
        parser: &mut SourceParser,
        path: &Path,
    ) -> std::result::Result<Vec<Annotation>, ScanError> {
        debug!(file = %path.display(), "Scanning file");

        let language = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Language::from_extension)
            .ok_or_else(|| ScanError::unsupported_language(path.to_path_buf()))?;

        let content =
            std::fs::read(path).map_err(|e| ScanError::io_error(path.to_path_buf(), &e))?;
        let content = String::from_utf8(content)
            .map_err(|_| ScanError::encoding_error(path.to_path_buf()))?;

        let source = parser
            .parse(language, &content)
            .map_err(|e| ScanError::parse_failed(path.to_path_buf(), e.to_string()))?
            .map_err(|message| ScanError::parse_failed(path.to_path_buf(), message))?;

        Ok(scan_source(path, &source, &self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_workspace() -> TempDir {
        tempfile::tempdir().expect("failed to create temp dir")
    }

    #[test]
    fn scan_of_empty_directory_is_empty() {
        let workspace = temp_workspace();

        let report = Stalewatch::new(Config::default())
            .scan(workspace.path())
            .expect("scan succeeds");

        assert_eq!(report.files_scanned, 0);
        assert!(report.annotations.is_empty());
        assert!(report.errors.is_empty());
    }

    #[test]
    fn scan_fails_for_nonexistent_root() {
        let result = Stalewatch::new(Config::default())
            .scan(Path::new("/nonexistent/path/that/does/not/exist"));

        assert!(result.is_err());
    }

    #[test]
    fn scan_file_rejects_unsupported_extension() {
        let workspace = temp_workspace();
        let path = workspace.path().join("notes.txt");
        std::fs::write(&path, "TODO: stale:01-01-2020").expect("write file");

        let err = Stalewatch::new(Config::default())
            .scan_file(&mut SourceParser::new(), &path)
            .expect_err("unsupported");

        assert_eq!(err.kind, ScanErrorKind::UnsupportedLanguage);
    }
}
