//! Language-specific declaration and comment extraction.
//!
//! Each supported language implements the `LanguageSupport` trait, which
//! defines how declarations and comments are pulled out of tree-sitter
//! syntax trees.
//!
//! ## Adding a New Language
//!
//! 1. Add the variant to `Language` enum in `types.rs`
//! 2. Create a new module (e.g., `python.rs`)
//! 3. Implement `LanguageSupport` trait
//! 4. Register in `get_language_support()`

pub mod go;
pub mod rust;
pub(crate) mod tree_sitter_utils;

use crate::attribution::Declaration;
use crate::types::Language;

/// Get the language support implementation for a language.
#[must_use]
pub fn get_language_support(lang: Language) -> &'static dyn LanguageSupport {
    match lang {
        Language::Go => &go::GoLanguage,
        Language::Rust => &rust::RustLanguage,
    }
}

/// Trait for language-specific extraction.
pub trait LanguageSupport: Send + Sync {
    /// File extensions this language handles.
    fn extensions(&self) -> &[&str];

    /// Get the tree-sitter language for parsing.
    fn tree_sitter_language(&self) -> tree_sitter::Language;

    /// Node kinds that represent comments in this grammar.
    fn comment_kinds(&self) -> &[&str];

    /// Named declarations in traversal order, for marker attribution.
    fn extract_declarations(&self, tree: &tree_sitter::Tree, content: &[u8]) -> Vec<Declaration>;
}
