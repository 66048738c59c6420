//! Shared tree-sitter utilities for language support modules.
//!
//! Provides common functions for extracting text, lines and comments from
//! tree-sitter nodes. Used by all language-specific implementations.

// Tree-sitter returns usize for rows, but we store u32 for compactness.
// This is safe for practical source files (no file has 4 billion lines).
#![allow(clippy::cast_possible_truncation)]

use crate::parser::Comment;

/// Get text content of a tree-sitter node.
///
/// Returns `None` if the node's byte range contains invalid UTF-8.
pub fn node_text(node: &tree_sitter::Node, content: &[u8]) -> Option<String> {
    match std::str::from_utf8(&content[node.byte_range()]) {
        Ok(s) => Some(s.to_string()),
        Err(e) => {
            tracing::trace!(
                byte_range = ?node.byte_range(),
                error = %e,
                node_kind = %node.kind(),
                "Failed to decode node text as UTF-8"
            );
            None
        }
    }
}

/// Text of the node's `name` field, if it has one.
pub fn name_field(node: &tree_sitter::Node, content: &[u8]) -> Option<String> {
    let name_node = node.child_by_field_name("name")?;
    node_text(&name_node, content)
}

/// Line on which the node starts.
///
/// Tree-sitter rows are 0-indexed; lines are 1-indexed.
pub fn node_line(node: &tree_sitter::Node) -> u32 {
    node.start_position().row as u32 + 1
}

/// Collect every node whose kind is in `kinds`, in source order.
///
/// Comments are "extra" nodes and may appear at any depth, so the whole tree
/// is walked. Matching nodes are not descended into.
pub fn collect_comments(tree: &tree_sitter::Tree, content: &[u8], kinds: &[&str]) -> Vec<Comment> {
    let mut comments = Vec::new();
    let mut cursor = tree.walk();

    loop {
        let node = cursor.node();
        let is_comment = kinds.contains(&node.kind());

        if is_comment {
            if let Some(text) = node_text(&node, content) {
                comments.push(Comment {
                    start: node.start_byte(),
                    line: node_line(&node),
                    text,
                });
            }
        }

        if !is_comment && cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return comments;
            }
        }
    }
}
