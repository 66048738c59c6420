//! Go language support.
//!
//! Only top-level declarations are candidates, matching how Go tooling
//! reports a file's declarations:
//!
//! - functions and methods contribute their own name
//! - `type`, `const` and `var` declarations (single or grouped) contribute
//!   the name of their first spec
//! - imports and the package clause have no name and are skipped

use super::LanguageSupport;
use super::tree_sitter_utils::name_field;
use crate::attribution::Declaration;

/// Tree-sitter node kind constants for the Go grammar.
mod node_kinds {
    pub const FUNCTION_DECLARATION: &str = "function_declaration";
    pub const METHOD_DECLARATION: &str = "method_declaration";
    pub const TYPE_DECLARATION: &str = "type_declaration";
    pub const CONST_DECLARATION: &str = "const_declaration";
    pub const VAR_DECLARATION: &str = "var_declaration";

    pub const TYPE_SPEC: &str = "type_spec";
    pub const TYPE_ALIAS: &str = "type_alias";
    pub const CONST_SPEC: &str = "const_spec";
    pub const VAR_SPEC: &str = "var_spec";

    pub const COMMENT: &str = "comment";
}

/// Go language support implementation.
pub struct GoLanguage;

impl LanguageSupport for GoLanguage {
    fn extensions(&self) -> &[&str] {
        &["go"]
    }

    fn tree_sitter_language(&self) -> tree_sitter::Language {
        tree_sitter_go::LANGUAGE.into()
    }

    fn comment_kinds(&self) -> &[&str] {
        &[node_kinds::COMMENT]
    }

    fn extract_declarations(&self, tree: &tree_sitter::Tree, content: &[u8]) -> Vec<Declaration> {
        extract_declarations(tree, content)
    }
}

/// Extract top-level named declarations from a Go syntax tree.
pub fn extract_declarations(tree: &tree_sitter::Tree, content: &[u8]) -> Vec<Declaration> {
    use node_kinds::{
        CONST_DECLARATION, FUNCTION_DECLARATION, METHOD_DECLARATION, TYPE_DECLARATION,
        VAR_DECLARATION,
    };

    let root = tree.root_node();
    let mut cursor = root.walk();
    let mut declarations = Vec::new();

    for node in root.named_children(&mut cursor) {
        let name = match node.kind() {
            FUNCTION_DECLARATION | METHOD_DECLARATION => name_field(&node, content),
            TYPE_DECLARATION | CONST_DECLARATION | VAR_DECLARATION => {
                first_spec_name(&node, content)
            }
            _ => None,
        };

        if let Some(name) = name {
            declarations.push(Declaration::new(name, node.byte_range()));
        }
    }

    declarations
}

/// Name of the first spec in a (possibly grouped) general declaration.
///
/// Grouped `var (...)` blocks may wrap their specs in a list node depending
/// on the grammar version, so non-spec children are searched recursively.
fn first_spec_name(node: &tree_sitter::Node, content: &[u8]) -> Option<String> {
    use node_kinds::{CONST_SPEC, TYPE_ALIAS, TYPE_SPEC, VAR_SPEC};

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            TYPE_SPEC | TYPE_ALIAS | CONST_SPEC | VAR_SPEC => {
                if let Some(name) = name_field(&child, content) {
                    return Some(name);
                }
            }
            _ => {
                if let Some(name) = first_spec_name(&child, content) {
                    return Some(name);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_go(code: &str) -> tree_sitter::Tree {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .expect("tree-sitter-go language should be valid");
        parser
            .parse(code, None)
            .expect("parsing test code should succeed")
    }

    fn names(code: &str) -> Vec<String> {
        let tree = parse_go(code);
        extract_declarations(&tree, code.as_bytes())
            .into_iter()
            .map(|d| d.name)
            .collect()
    }

    #[test]
    fn go_language_extensions() {
        assert_eq!(GoLanguage.extensions(), &["go"]);
    }

    #[test]
    fn extracts_functions_and_methods() {
        let code = r"package main

func Run() {}

func (s *Server) Serve() error { return nil }
";
        assert_eq!(names(code), vec!["Run", "Serve"]);
    }

    #[test]
    fn grouped_declarations_use_first_member() {
        let code = r"package main

type (
	Alpha struct{}
	Beta  int
)

const (
	First = 1
	Second = 2
)

var (
	x, y = 1, 2
	z    = 3
)
";
        assert_eq!(names(code), vec!["Alpha", "First", "x"]);
    }

    #[test]
    fn single_specs_and_aliases_are_named() {
        let code = r"package main

type Alias = string

var Answer = 42
";
        assert_eq!(names(code), vec!["Alias", "Answer"]);
    }

    #[test]
    fn imports_and_package_clause_are_skipped() {
        let code = r#"package main

import "fmt"

func main() { fmt.Println() }
"#;
        assert_eq!(names(code), vec!["main"]);
    }

    #[test]
    fn declaration_ranges_cover_bodies() {
        let code = "package main\n\nfunc Run() {\n\t// inside\n}\n";
        let tree = parse_go(code);
        let decls = extract_declarations(&tree, code.as_bytes());

        let inside = code.find("// inside").expect("comment present");
        assert_eq!(decls.len(), 1);
        assert!(decls[0].contains(inside));
    }
}
