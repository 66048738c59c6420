//! Annotation assembly.
//!
//! Runs the marker grammar over every comment of a parsed file and, for each
//! marker, attributes it to a declaration and resolves its expiry date.

use std::path::Path;

use tracing::{debug, warn};

use crate::attribution::attribute;
use crate::config::Config;
use crate::marker::parse_marker;
use crate::parser::ParsedSource;
use crate::types::Annotation;

/// Build the annotations for one parsed file, in comment order.
///
/// Markers with malformed dates are logged and skipped; they never fail the
/// file. A file without markers yields an empty vector.
#[must_use]
pub fn scan_source(path: &Path, source: &ParsedSource, config: &Config) -> Vec<Annotation> {
    let mut annotations = Vec::new();

    for comment in &source.comments {
        let marker = match parse_marker(&comment.text, &config.date_pattern) {
            Ok(Some(marker)) => marker,
            Ok(None) => continue,
            Err(e) => {
                warn!(
                    file = %path.display(),
                    line = comment.line,
                    input = %e.input,
                    expected = %e.expected,
                    "Invalid marker date, skipping marker"
                );
                continue;
            }
        };

        let declaration = attribute(comment.start, &source.declarations).to_string();
        debug!(
            file = %path.display(),
            line = comment.line,
            decl = %declaration,
            "Annotation found"
        );

        annotations.push(Annotation {
            file: path.to_path_buf(),
            line: comment.line,
            declaration,
            kind: marker.kind,
            expire_date: marker.resolve_expiry(config.default_expiry_days),
            warn_date: marker.warn_date,
            tag: marker.tag,
            message: marker.message,
        });
    }

    annotations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribution::{Declaration, UNKNOWN_DECLARATION};
    use crate::marker::MarkerKind;
    use crate::parser::{Comment, SourceParser};
    use crate::types::Language;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn comment(start: usize, line: u32, text: &str) -> Comment {
        Comment {
            start,
            line,
            text: text.to_string(),
        }
    }

    fn parse_go(code: &str) -> ParsedSource {
        SourceParser::new()
            .parse(Language::Go, code)
            .expect("grammar loads")
            .expect("valid source")
    }

    #[test]
    fn assembles_annotation_fields() {
        let source = ParsedSource {
            declarations: vec![Declaration::new("handler", 100..200)],
            comments: vec![comment(
                150,
                7,
                "// FIXME(bob): stale:01-01-2020 expires:01-01-2021 cleanup this",
            )],
        };

        let annotations = scan_source(Path::new("a.go"), &source, &Config::default());

        assert_eq!(annotations.len(), 1);
        let a = &annotations[0];
        assert_eq!(a.file, Path::new("a.go"));
        assert_eq!(a.line, 7);
        assert_eq!(a.declaration, "handler");
        assert_eq!(a.kind, MarkerKind::Fixme);
        assert_eq!(a.tag.as_deref(), Some("bob"));
        assert_eq!(a.warn_date, ymd(2020, 1, 1));
        assert_eq!(a.expire_date, ymd(2021, 1, 1));
        assert_eq!(a.message, "cleanup this");
    }

    #[test]
    fn missing_expiry_uses_configured_default() {
        let source = ParsedSource {
            declarations: vec![],
            comments: vec![comment(0, 1, "// TODO: stale:25-12-2024")],
        };
        let config = Config {
            default_expiry_days: 10,
            ..Config::default()
        };

        let annotations = scan_source(Path::new("a.go"), &source, &config);

        assert_eq!(annotations[0].expire_date, ymd(2025, 1, 4));
        assert_eq!(annotations[0].declaration, UNKNOWN_DECLARATION);
    }

    #[test]
    fn plain_comments_produce_no_annotations() {
        let source = ParsedSource {
            declarations: vec![],
            comments: vec![comment(0, 1, "// nothing to see"), comment(20, 2, "// TODO: later")],
        };

        assert!(scan_source(Path::new("a.go"), &source, &Config::default()).is_empty());
    }

    #[test]
    fn malformed_marker_is_dropped_but_others_survive() {
        let code = r"package main

// TODO: stale:99-99-9999 broken date
func A() {}

// TODO: stale:01-01-2020 fine
func B() {}
";
        let annotations = scan_source(Path::new("m.go"), &parse_go(code), &Config::default());

        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].declaration, "B");
        assert_eq!(annotations[0].line, 6);
    }

    #[test]
    fn marker_inside_body_and_above_declaration_attribute_to_function() {
        let code = r"package main

// TODO: stale:01-01-2020 above
func Process() {
	// TODO: stale:01-01-2020 inside
	return
}
";
        let annotations = scan_source(Path::new("p.go"), &parse_go(code), &Config::default());

        let decls: Vec<&str> = annotations.iter().map(|a| a.declaration.as_str()).collect();
        assert_eq!(decls, vec!["Process", "Process"]);
        assert_eq!(annotations[0].message, "above");
        assert_eq!(annotations[1].message, "inside");
    }

    #[test]
    fn rust_method_markers_attribute_to_method() {
        let code = r"
struct Cache;

impl Cache {
    // TODO: stale:01-01-2020 before method
    fn evict(&self) {
        // FIXME: stale:01-01-2020 in method
    }

    fn clear(&self) {}
}
";
        let source = SourceParser::new()
            .parse(Language::Rust, code)
            .expect("grammar loads")
            .expect("valid source");

        let annotations = scan_source(Path::new("c.rs"), &source, &Config::default());

        let decls: Vec<&str> = annotations.iter().map(|a| a.declaration.as_str()).collect();
        assert_eq!(decls, vec!["evict", "evict"]);
    }
}
