//! Declaration attribution for marker comments.
//!
//! A marker is attributed to a declaration with a two-pass linear scan over
//! the file's declarations in traversal order:
//!
//! 1. the first declaration whose byte range contains the marker
//! 2. otherwise the first declaration that starts after the marker (the
//!    comment documents what follows it)
//!
//! This is a nearest-declaration heuristic, not scope analysis. Nested or
//! overlapping candidates resolve to whichever comes first in the list.

use std::ops::Range;

/// Name reported when no declaration can be associated with a marker.
pub const UNKNOWN_DECLARATION: &str = "<unknown>";

/// A named declaration and the byte range it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Declared name (function, type, or first bound value)
    pub name: String,
    /// Byte offset of the first byte of the declaration
    pub start: usize,
    /// Byte offset one past the last byte of the declaration
    pub end: usize,
}

impl Declaration {
    /// Create a declaration covering `range`.
    #[must_use]
    pub fn new(name: impl Into<String>, range: Range<usize>) -> Self {
        Self {
            name: name.into(),
            start: range.start,
            end: range.end,
        }
    }

    /// Whether `position` falls inside this declaration.
    #[must_use]
    pub fn contains(&self, position: usize) -> bool {
        self.start <= position && position < self.end
    }
}

/// Name of the declaration associated with the byte `position`.
///
/// Returns [`UNKNOWN_DECLARATION`] when neither pass finds a candidate.
#[must_use]
pub fn attribute(position: usize, declarations: &[Declaration]) -> &str {
    declarations
        .iter()
        .find(|decl| decl.contains(position))
        .or_else(|| declarations.iter().find(|decl| decl.start > position))
        .map_or(UNKNOWN_DECLARATION, |decl| decl.name.as_str())
}
