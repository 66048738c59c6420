//! Source file discovery.
//!
//! The scan root may be a single file, a directory, or a directory followed
//! by a Go-style `/...` suffix (which means the same as the directory, since
//! directories are always walked recursively).
//!
//! Skipped directories:
//! - hidden (`.git`) and underscore-prefixed (`_build`) directories
//! - `target`, `vendor`, `node_modules` and `testdata`
//! - any directory whose path contains one of the configured excludes

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::Language;

/// Files found under a scan root.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Supported source files, sorted
    pub files: Vec<PathBuf>,
    /// Directories that could not be read (path, error message)
    pub directories_skipped: Vec<(PathBuf, String)>,
}

/// Strip a trailing `...` pattern from a scan root.
///
/// `./...` becomes `.`, `pkg/...` becomes `pkg`.
#[must_use]
pub fn scan_root(pattern: &str) -> PathBuf {
    let Some(base) = pattern.strip_suffix("...") else {
        return PathBuf::from(pattern);
    };
    let base = base.trim_end_matches(['/', '\\']);
    if base.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(base)
    }
}

/// Collect the source files to scan under `root`.
///
/// A root that is a file is returned as-is when its language is supported.
///
/// # Errors
///
/// Returns `Error::Io` if `root` does not exist.
pub fn discover_files(root: &Path, excludes: &[String]) -> Result<Discovery> {
    let metadata = std::fs::metadata(root).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("scan root not found: {}", root.display()),
        ))
    })?;

    let mut discovery = Discovery::default();

    if metadata.is_file() {
        if is_supported(root) {
            discovery.files.push(root.to_path_buf());
        } else {
            debug!(file = %root.display(), "Scan root is not a supported source file");
        }
        return Ok(discovery);
    }

    walk_dir(root, excludes, &mut discovery);
    discovery.files.sort();
    Ok(discovery)
}

/// Recursively walk a directory, collecting source files.
///
/// Directories that cannot be read (e.g., due to permissions) are tracked
/// in `directories_skipped` for reporting.
fn walk_dir(dir: &Path, excludes: &[String], discovery: &mut Discovery) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            warn!(
                directory = %dir.display(),
                error = %e,
                "Cannot read directory, skipping"
            );
            discovery
                .directories_skipped
                .push((dir.to_path_buf(), e.to_string()));
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(
                    directory = %dir.display(),
                    error = %e,
                    "Failed to read directory entry, skipping"
                );
                continue;
            }
        };

        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read file type, skipping"
                );
                continue;
            }
        };

        // Symlinked directories are not followed; a link to an ancestor
        // would otherwise be walked until the OS rejects the path.
        if file_type.is_symlink() && path.is_dir() {
            debug!(directory = %path.display(), "Skipping symlinked directory");
            continue;
        }

        if file_type.is_dir() {
            if is_excluded_dir(&path, excludes) {
                debug!(directory = %path.display(), "Excluding directory");
                continue;
            }
            walk_dir(&path, excludes, discovery);
        } else if path.is_file() && is_supported(&path) {
            discovery.files.push(path);
        }
    }
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(Language::from_extension)
        .is_some()
}

/// Check if a directory should be excluded from scanning.
fn is_excluded_dir(path: &Path, excludes: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    if name.starts_with('.') || name.starts_with('_') {
        return true;
    }
    if matches!(name, "target" | "vendor" | "node_modules" | "testdata") {
        return true;
    }

    let display = path.to_string_lossy();
    excludes.iter().any(|e| display.contains(e.as_str()))
}
