//! Marker comment grammar.
//!
//! A marker is a `TODO`/`FIXME` comment carrying a staleness contract:
//!
//! ```text
//! // TODO(alice): stale:01-01-2025 expires:01-04-2025 drop the legacy path
//! //  ^kind ^tag        ^warn date        ^expire date   ^message
//! ```
//!
//! Keywords match case-insensitively. The tag, the `expires:` clause and the
//! message are optional. Date tokens are whitespace-free and are parsed with
//! the run's [`DatePattern`].

use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use regex::Regex;
use serde::Serialize;

use crate::date::DatePattern;
use crate::error::FormatError;

/// Groups: 1=kind, 2=tag, 3=warn date, 4=expire date, 5=message
static MARKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(todo|fixme)(?:\(([^)]*)\))?\s*:\s*stale:\s*(\S+)(?:\s+expires:\s*(\S+))?(?:\s+(.*))?",
    )
    .expect("marker pattern is valid")
});

/// Marker keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarkerKind {
    /// `TODO`
    Todo,
    /// `FIXME`
    Fixme,
}

impl MarkerKind {
    fn from_keyword(keyword: &str) -> Self {
        if keyword.eq_ignore_ascii_case("fixme") {
            Self::Fixme
        } else {
            Self::Todo
        }
    }

    /// Canonical upper-case spelling.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::Fixme => "FIXME",
        }
    }
}

impl std::fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed marker comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Keyword that introduced the marker
    pub kind: MarkerKind,
    /// Parenthesized tag, usually an author
    pub tag: Option<String>,
    /// Date from which the marker is reported as stale
    pub warn_date: NaiveDate,
    /// Explicit `expires:` date, if the comment has one
    pub expire_date: Option<NaiveDate>,
    /// Trailing free text, trimmed; empty when absent
    pub message: String,
}

impl Marker {
    /// The expiry date, falling back to `warn_date + default_expiry_days`.
    ///
    /// Uses calendar-day arithmetic and saturates at [`NaiveDate::MAX`].
    #[must_use]
    pub fn resolve_expiry(&self, default_expiry_days: u32) -> NaiveDate {
        self.expire_date.unwrap_or_else(|| {
            self.warn_date
                .checked_add_days(Days::new(u64::from(default_expiry_days)))
                .unwrap_or(NaiveDate::MAX)
        })
    }
}

/// Parse one raw comment.
///
/// Returns `Ok(None)` when the comment is not a marker at all, and
/// `Err(FormatError)` when it has the marker shape but one of its dates does
/// not match `pattern`.
///
/// # Errors
///
/// Returns `FormatError` for a malformed `stale:` or `expires:` date.
pub fn parse_marker(raw: &str, pattern: &DatePattern) -> Result<Option<Marker>, FormatError> {
    let text = strip_block_terminator(raw);

    let Some(caps) = MARKER_PATTERN.captures(text) else {
        return Ok(None);
    };

    let kind = MarkerKind::from_keyword(&caps[1]);
    let tag = caps
        .get(2)
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty())
        .map(String::from);
    let warn_date = pattern.parse(&caps[3])?;
    let expire_date = caps
        .get(4)
        .map(|m| pattern.parse(m.as_str()))
        .transpose()?;
    let message = caps
        .get(5)
        .map_or(String::new(), |m| m.as_str().trim().to_string());

    Ok(Some(Marker {
        kind,
        tag,
        warn_date,
        expire_date,
        message,
    }))
}

fn strip_block_terminator(raw: &str) -> &str {
    let trimmed = raw.trim_end();
    trimmed.strip_suffix("*/").unwrap_or(trimmed)
}
