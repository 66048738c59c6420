//! Calendar date grammar.
//!
//! Marker dates and the reference date are parsed with one run-wide pattern
//! (a chrono `strftime` string). Dates are always printed with
//! [`CANONICAL_FORMAT`], whatever the input pattern is.

use std::fmt::Write;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};

use crate::error::{Error, FormatError};

/// Pattern used when none is configured (`DD-MM-YYYY`).
pub const DEFAULT_FORMAT: &str = "%d-%m-%Y";

/// Pattern used for every date printed in reports.
pub const CANONICAL_FORMAT: &str = "%d-%m-%Y";

/// A validated date pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern(String);

impl DatePattern {
    /// Validate a chrono `strftime` pattern.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the pattern contains an unknown specifier,
    /// no date specifier at all, or cannot format a date and parse it back
    /// (time-only patterns, patterns missing the day or the year).
    pub fn new(pattern: &str) -> Result<Self, Error> {
        let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();

        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(Error::Config(format!(
                "invalid date format '{pattern}': unknown specifier"
            )));
        }
        if !items
            .iter()
            .any(|item| matches!(item, Item::Numeric(..) | Item::Fixed(_)))
        {
            return Err(Error::Config(format!(
                "invalid date format '{pattern}': no date fields"
            )));
        }

        let sample = sample_date();
        let mut formatted = String::new();
        write!(formatted, "{}", sample.format(pattern)).map_err(|_| {
            Error::Config(format!(
                "invalid date format '{pattern}': cannot format a calendar date"
            ))
        })?;
        if NaiveDate::parse_from_str(&formatted, pattern).ok() != Some(sample) {
            return Err(Error::Config(format!(
                "invalid date format '{pattern}': must identify a day, month and year"
            )));
        }

        Ok(Self(pattern.to_string()))
    }

    /// The raw pattern string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse `text` as a date. The whole text must match the pattern.
    ///
    /// # Errors
    ///
    /// Returns `FormatError` carrying the text and the expected pattern.
    pub fn parse(&self, text: &str) -> Result<NaiveDate, FormatError> {
        NaiveDate::parse_from_str(text, &self.0).map_err(|e| {
            tracing::trace!(input = text, pattern = %self.0, error = %e, "Date parse failed");
            FormatError::new(text, self.0.clone())
        })
    }

    /// Format `date` with this pattern.
    #[must_use]
    pub fn format(&self, date: NaiveDate) -> String {
        date.format(&self.0).to_string()
    }
}

impl Default for DatePattern {
    fn default() -> Self {
        Self(DEFAULT_FORMAT.to_string())
    }
}

impl std::fmt::Display for DatePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Date used to check that a pattern formats and parses back a whole date.
fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2031, 11, 25).unwrap_or_default()
}

/// Format a date with [`CANONICAL_FORMAT`].
#[must_use]
pub fn format_canonical(date: NaiveDate) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}
