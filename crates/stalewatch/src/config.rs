//! Run configuration.
//!
//! Settings are layered, lowest priority first:
//!
//! 1. built-in defaults
//! 2. `.stalewatch.yaml` at the scan root (or an explicit `--config` file)
//! 3. command-line flags
//!
//! Each layer is a `ConfigLayer` of optional values; `Config::from_layers`
//! folds them and validates the result. The reference date is resolved
//! separately because it is the only fatal input of a run.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::date::DatePattern;
use crate::error::{Error, Result};

/// Name of the configuration file looked up at the scan root.
pub const CONFIG_FILE_NAME: &str = ".stalewatch.yaml";

/// Expiry offset used when a marker has no `expires:` clause.
pub const DEFAULT_EXPIRY_DAYS: u32 = 90;

/// Validated configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Pattern for marker dates and the reference date
    pub date_pattern: DatePattern,
    /// Days added to the warn date when `expires:` is absent
    pub default_expiry_days: u32,
    /// Path substrings; matching directories are not scanned
    pub excludes: Vec<String>,
    /// Whether expired markers should fail the run
    pub fail_on_expired: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            date_pattern: DatePattern::default(),
            default_expiry_days: DEFAULT_EXPIRY_DAYS,
            excludes: Vec::new(),
            fail_on_expired: false,
        }
    }
}

impl Config {
    /// Fold layers (lowest priority first) over the defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the resulting date format is invalid.
    pub fn from_layers(layers: impl IntoIterator<Item = ConfigLayer>) -> Result<Self> {
        let merged = layers
            .into_iter()
            .fold(ConfigLayer::default(), ConfigLayer::merge);

        let date_pattern = match merged.date_format.as_deref() {
            Some(format) => DatePattern::new(format)?,
            None => DatePattern::default(),
        };

        Ok(Self {
            date_pattern,
            default_expiry_days: merged.default_expiry_days.unwrap_or(DEFAULT_EXPIRY_DAYS),
            excludes: merged.exclude.unwrap_or_default(),
            fail_on_expired: merged.fail_on_expired.unwrap_or(false),
        })
    }
}

/// One source of configuration values. Unset fields defer to lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigLayer {
    /// chrono `strftime` pattern for dates
    pub date_format: Option<String>,
    /// Default expiry offset in days
    pub default_expiry_days: Option<u32>,
    /// Excluded path substrings
    pub exclude: Option<Vec<String>>,
    /// Fail the run when an expired marker is found
    pub fail_on_expired: Option<bool>,
}

impl ConfigLayer {
    /// Load a layer from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::Config` if
    /// it is not valid configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Load `.stalewatch.yaml` from `dir` if it exists.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigLayer::load`] for a file that exists but is invalid.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let path: PathBuf = dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(None);
        }
        debug!(path = %path.display(), "Loading configuration file");
        Self::load(&path).map(Some)
    }

    /// Overlay `higher` on top of `self`.
    ///
    /// Scalars from `higher` win; exclude lists are concatenated.
    #[must_use]
    pub fn merge(self, higher: Self) -> Self {
        let exclude = match (self.exclude, higher.exclude) {
            (Some(mut low), Some(high)) => {
                low.extend(high);
                Some(low)
            }
            (low, high) => high.or(low),
        };

        Self {
            date_format: higher.date_format.or(self.date_format),
            default_expiry_days: higher.default_expiry_days.or(self.default_expiry_days),
            exclude,
            fail_on_expired: higher.fail_on_expired.or(self.fail_on_expired),
        }
    }
}

/// Split a comma-separated exclude list, dropping blank entries.
#[must_use]
pub fn parse_excludes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(String::from)
        .collect()
}

/// Resolve the run's reference date.
///
/// `input` is the explicit override (`--today` or `STALEWATCH_DATE`); an
/// empty or absent value means "today" in local time.
///
/// # Errors
///
/// Returns `Error::Config` if the override does not match `pattern`.
pub fn resolve_reference_date(input: Option<&str>, pattern: &DatePattern) -> Result<NaiveDate> {
    match input.map(str::trim).filter(|s| !s.is_empty()) {
        Some(text) => {
            let date = pattern
                .parse(text)
                .map_err(|e| Error::invalid_reference_date(&e))?;
            debug!(date = %date, "Reference date override used");
            Ok(date)
        }
        None => {
            let today = chrono::Local::now().date_naive();
            debug!(date = %today, "Using current date");
            Ok(today)
        }
    }
}
