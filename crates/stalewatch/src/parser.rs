//! Tree-sitter parsing coordination.
//!
//! This module manages tree-sitter parsers for supported languages and turns
//! source text into a `ParsedSource`: the file's declarations plus its
//! comments, both in source order.
//!
//! ## Design
//!
//! Tree-sitter parsers are stateful and not `Sync`, so a `SourceParser` is
//! owned by one thread and holds one lazily created parser per language.

// Tree-sitter returns usize for rows, but we store u32 for compactness.
#![allow(clippy::cast_possible_truncation)]

use std::collections::HashMap;

use crate::attribution::Declaration;
use crate::error::{Error, Result};
use crate::languages::get_language_support;
use crate::languages::tree_sitter_utils::collect_comments;
use crate::types::Language;

/// A comment node and where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Byte offset of the comment's first byte
    pub start: usize,
    /// Line of the comment (1-indexed)
    pub line: u32,
    /// Raw comment text, delimiters included
    pub text: String,
}

/// Declarations and comments extracted from one source file.
#[derive(Debug, Clone, Default)]
pub struct ParsedSource {
    /// Named declarations in traversal order
    pub declarations: Vec<Declaration>,
    /// Comments in source order
    pub comments: Vec<Comment>,
}

/// Holds one tree-sitter parser per language.
#[derive(Default)]
pub struct SourceParser {
    parsers: HashMap<Language, tree_sitter::Parser>,
}

impl SourceParser {
    /// Create a parser with no languages loaded yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `content` as `language`.
    ///
    /// Trees containing syntax errors are rejected; the returned message
    /// names the line of the first error.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parser` if the grammar cannot be loaded or tree-sitter
    /// produces no tree, and `Ok(Err(message))` for source with syntax errors.
    pub fn parse(
        &mut self,
        language: Language,
        content: &str,
    ) -> Result<std::result::Result<ParsedSource, String>> {
        let support = get_language_support(language);
        let parser = self.parser_for(language)?;

        let tree = parser
            .parse(content, None)
            .ok_or_else(|| Error::Parser(format!("failed to parse {} source", language.as_str())))?;

        let root = tree.root_node();
        if root.has_error() {
            let line = first_error_line(&root).unwrap_or(1);
            return Ok(Err(format!("syntax error near line {line}")));
        }

        let bytes = content.as_bytes();
        Ok(Ok(ParsedSource {
            declarations: support.extract_declarations(&tree, bytes),
            comments: collect_comments(&tree, bytes, support.comment_kinds()),
        }))
    }

    fn parser_for(&mut self, language: Language) -> Result<&mut tree_sitter::Parser> {
        if !self.parsers.contains_key(&language) {
            let mut parser = tree_sitter::Parser::new();
            parser
                .set_language(&get_language_support(language).tree_sitter_language())
                .map_err(|e| Error::Parser(e.to_string()))?;
            self.parsers.insert(language, parser);
        }

        self.parsers
            .get_mut(&language)
            .ok_or_else(|| Error::Parser(format!("no parser for {}", language.as_str())))
    }
}

/// Line of the first `ERROR` or missing node under `node`, depth first.
fn first_error_line(node: &tree_sitter::Node) -> Option<u32> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row as u32 + 1);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(line) = first_error_line(&child) {
            return Some(line);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_go_source_into_declarations_and_comments() {
        let code = "package main\n\n// TODO: stale:01-01-2020\nfunc Run() {\n\t/* inner */\n}\n";
        let mut parser = SourceParser::new();

        let parsed = parser
            .parse(Language::Go, code)
            .expect("grammar loads")
            .expect("valid source");

        assert_eq!(parsed.declarations.len(), 1);
        assert_eq!(parsed.declarations[0].name, "Run");
        assert_eq!(parsed.comments.len(), 2);
        assert_eq!(parsed.comments[0].line, 3);
        assert_eq!(parsed.comments[0].text, "// TODO: stale:01-01-2020");
        assert_eq!(parsed.comments[1].line, 5);
        assert_eq!(parsed.comments[1].text, "/* inner */");
    }

    #[test]
    fn parses_rust_line_and_block_comments() {
        let code = "/// doc\nfn main() {\n    // line\n    /* block */\n}\n";
        let mut parser = SourceParser::new();

        let parsed = parser
            .parse(Language::Rust, code)
            .expect("grammar loads")
            .expect("valid source");

        let lines: Vec<u32> = parsed.comments.iter().map(|c| c.line).collect();
        assert_eq!(lines, vec![1, 3, 4]);
        assert!(parsed.comments[0].text.starts_with("/// doc"));
    }

    #[test]
    fn comment_start_offsets_match_source() {
        let code = "package main\n\nvar x = 1 // trailing\n";
        let mut parser = SourceParser::new();

        let parsed = parser
            .parse(Language::Go, code)
            .expect("grammar loads")
            .expect("valid source");

        assert_eq!(parsed.comments[0].start, code.find("// trailing").unwrap());
    }

    #[test]
    fn syntax_errors_are_rejected_with_line() {
        let code = "package main\n\nfunc broken( {\n";
        let mut parser = SourceParser::new();

        let message = parser
            .parse(Language::Go, code)
            .expect("grammar loads")
            .expect_err("syntax error expected");

        assert!(message.starts_with("syntax error near line"));
    }

    #[test]
    fn one_parser_handles_both_languages() {
        let mut parser = SourceParser::new();

        assert!(parser.parse(Language::Go, "package a\n").unwrap().is_ok());
        assert!(parser.parse(Language::Rust, "fn a() {}\n").unwrap().is_ok());
        assert!(parser.parse(Language::Go, "package b\n").unwrap().is_ok());
    }
}
