//! Rust language support.
//!
//! Item-level declarations are extracted from tree-sitter-rust trees.
//! Container items (`impl`, `trait`, `mod`) contribute their members rather
//! than themselves, so a marker above or inside a method is attributed to
//! that method. A container with no named members stands for itself.

use super::LanguageSupport;
use super::tree_sitter_utils::{name_field, node_text};
use crate::attribution::Declaration;

/// Tree-sitter node kind constants for Rust grammar.
///
/// These match the node types defined in tree-sitter-rust. Using constants
/// prevents typos and makes supported node types explicit.
mod node_kinds {
    // Item declarations
    pub const FUNCTION_ITEM: &str = "function_item";
    pub const FUNCTION_SIGNATURE_ITEM: &str = "function_signature_item";
    pub const STRUCT_ITEM: &str = "struct_item";
    pub const ENUM_ITEM: &str = "enum_item";
    pub const UNION_ITEM: &str = "union_item";
    pub const TRAIT_ITEM: &str = "trait_item";
    pub const IMPL_ITEM: &str = "impl_item";
    pub const CONST_ITEM: &str = "const_item";
    pub const STATIC_ITEM: &str = "static_item";
    pub const TYPE_ITEM: &str = "type_item";
    pub const ASSOCIATED_TYPE: &str = "associated_type";
    pub const MACRO_DEFINITION: &str = "macro_definition";
    pub const MOD_ITEM: &str = "mod_item";

    // Structure nodes
    pub const DECLARATION_LIST: &str = "declaration_list";
    pub const TYPE_IDENTIFIER: &str = "type_identifier";
    pub const GENERIC_TYPE: &str = "generic_type";

    // Comments
    pub const LINE_COMMENT: &str = "line_comment";
    pub const BLOCK_COMMENT: &str = "block_comment";
}

/// Rust language support implementation.
pub struct RustLanguage;

impl LanguageSupport for RustLanguage {
    fn extensions(&self) -> &[&str] {
        &["rs"]
    }

    fn tree_sitter_language(&self) -> tree_sitter::Language {
        tree_sitter_rust::LANGUAGE.into()
    }

    fn comment_kinds(&self) -> &[&str] {
        &[node_kinds::LINE_COMMENT, node_kinds::BLOCK_COMMENT]
    }

    fn extract_declarations(&self, tree: &tree_sitter::Tree, content: &[u8]) -> Vec<Declaration> {
        extract_declarations(tree, content)
    }
}

/// Extract named declarations from a Rust syntax tree.
pub fn extract_declarations(tree: &tree_sitter::Tree, content: &[u8]) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    let root = tree.root_node();

    collect_items(&root, content, &mut declarations);

    declarations
}

fn collect_items(node: &tree_sitter::Node, content: &[u8], declarations: &mut Vec<Declaration>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_item(&child, content, declarations);
    }
}

fn collect_item(node: &tree_sitter::Node, content: &[u8], declarations: &mut Vec<Declaration>) {
    use node_kinds::{
        ASSOCIATED_TYPE, CONST_ITEM, ENUM_ITEM, FUNCTION_ITEM, FUNCTION_SIGNATURE_ITEM, IMPL_ITEM,
        MACRO_DEFINITION, MOD_ITEM, STATIC_ITEM, STRUCT_ITEM, TRAIT_ITEM, TYPE_ITEM, UNION_ITEM,
    };

    let name = match node.kind() {
        FUNCTION_ITEM | FUNCTION_SIGNATURE_ITEM | STRUCT_ITEM | ENUM_ITEM | UNION_ITEM
        | CONST_ITEM | STATIC_ITEM | TYPE_ITEM | ASSOCIATED_TYPE | MACRO_DEFINITION => {
            name_field(node, content)
        }
        TRAIT_ITEM | MOD_ITEM => {
            if collect_body(node, content, declarations) > 0 {
                return;
            }
            name_field(node, content)
        }
        IMPL_ITEM => {
            if collect_body(node, content, declarations) > 0 {
                return;
            }
            find_impl_type(node, content)
        }
        _ => None,
    };

    if let Some(name) = name {
        declarations.push(Declaration::new(name, node.byte_range()));
    }
}

/// Collect the items inside a container's `declaration_list`.
///
/// Returns how many declarations were added.
fn collect_body(
    node: &tree_sitter::Node,
    content: &[u8],
    declarations: &mut Vec<Declaration>,
) -> usize {
    let before = declarations.len();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == node_kinds::DECLARATION_LIST {
            collect_items(&child, content, declarations);
        }
    }
    declarations.len() - before
}

/// Find the type name being implemented in an impl block.
fn find_impl_type(node: &tree_sitter::Node, content: &[u8]) -> Option<String> {
    use node_kinds::{GENERIC_TYPE, TYPE_IDENTIFIER};

    let type_node = node.child_by_field_name("type")?;
    match type_node.kind() {
        TYPE_IDENTIFIER => node_text(&type_node, content),
        // Handle generic types like `impl<T> Foo<T>`
        GENERIC_TYPE => {
            let inner = type_node.child_by_field_name("type")?;
            node_text(&inner, content)
        }
        _ => node_text(&type_node, content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_rust(code: &str) -> tree_sitter::Tree {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_rust::LANGUAGE.into())
            .expect("tree-sitter-rust language should be valid");
        parser
            .parse(code, None)
            .expect("parsing test code should succeed")
    }

    fn names(code: &str) -> Vec<String> {
        let tree = parse_rust(code);
        extract_declarations(&tree, code.as_bytes())
            .into_iter()
            .map(|d| d.name)
            .collect()
    }

    #[test]
    fn rust_language_extensions() {
        assert_eq!(RustLanguage.extensions(), &["rs"]);
    }

    #[test]
    fn extracts_top_level_items() {
        let code = r#"
pub fn foo() {}
struct Bar;
enum Baz { A }
const LIMIT: u32 = 3;
static NAME: &str = "x";
type Alias = u8;
"#;
        assert_eq!(
            names(code),
            vec!["foo", "Bar", "Baz", "LIMIT", "NAME", "Alias"]
        );
    }

    #[test]
    fn impl_blocks_contribute_their_methods() {
        let code = r"
struct User;

impl User {
    pub fn new() -> Self { User }
    fn greet(&self) {}
}
";
        assert_eq!(names(code), vec!["User", "new", "greet"]);
    }

    #[test]
    fn empty_impl_stands_for_its_type() {
        let code = "impl<T> Wrapper<T> {}\nimpl Marker for Unit {}";

        assert_eq!(names(code), vec!["Wrapper", "Unit"]);
    }

    #[test]
    fn trait_and_mod_bodies_are_collected() {
        let code = r"
trait Shape {
    fn area(&self) -> f64;
}

mod inner {
    pub fn helper() {}
}
";
        assert_eq!(names(code), vec!["area", "helper"]);
    }

    #[test]
    fn bodiless_module_is_named() {
        assert_eq!(names("mod config;\ntrait Empty {}\n"), vec!["config", "Empty"]);
    }

    #[test]
    fn use_declarations_are_skipped() {
        let code = "use std::fmt;\nfn main() {}\n";

        assert_eq!(names(code), vec!["main"]);
    }
}
