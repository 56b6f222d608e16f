//! tree-sitter backed highlighting.
//!
//! Walks the concrete syntax tree and tags comments, literals, keywords,
//! types and definition names with short CSS classes (`c`, `s`, `m`, `k`,
//! `kc`, `kt`, `nf`, `nd`). Files without a bundled grammar are refused with
//! [`HighlightError::Unsupported`] so the caller can fall back.

use std::path::Path;

use tree_sitter::{Language, Node, Parser};

use super::lines::{render_lines, Span};
use super::{HighlightError, Highlighter};

pub fn supported_tree_sitter_languages() -> &'static [&'static str] {
    &["python", "rust", "javascript", "typescript", "tsx", "go"]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grammar {
    Python,
    Rust,
    JavaScript,
    TypeScript,
    Tsx,
    Go,
}

impl Grammar {
    fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "py" | "pyi" => Some(Self::Python),
            "rs" => Some(Self::Rust),
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            "go" => Some(Self::Go),
            _ => None,
        }
    }

    /// Guess from a `#!` interpreter line.
    fn from_shebang(content: &str) -> Option<Self> {
        let first = content.lines().next()?;
        let interpreter = first.strip_prefix("#!")?;
        if interpreter.contains("python") {
            Some(Self::Python)
        } else if interpreter.contains("node") || interpreter.contains("deno") {
            Some(Self::JavaScript)
        } else {
            None
        }
    }

    fn language(self) -> Language {
        match self {
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Self::Go => tree_sitter_go::LANGUAGE.into(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TreeSitterHighlighter;

impl TreeSitterHighlighter {
    pub fn new() -> Self {
        Self
    }
}

impl Highlighter for TreeSitterHighlighter {
    fn name(&self) -> &'static str {
        "tree-sitter"
    }

    fn highlight(
        &self,
        content: &str,
        filename_hint: &str,
        anchor_prefix: &str,
    ) -> Result<String, HighlightError> {
        let grammar = Grammar::from_filename(filename_hint)
            .or_else(|| Grammar::from_shebang(content))
            .ok_or_else(|| HighlightError::Unsupported(filename_hint.to_string()))?;

        // Parsers are not Sync; one per call keeps the backend shareable.
        let mut parser = Parser::new();
        parser.set_language(&grammar.language()).map_err(|err| HighlightError::Parse {
            file: filename_hint.to_string(),
            message: err.to_string(),
        })?;
        let tree = parser.parse(content, None).ok_or_else(|| HighlightError::Parse {
            file: filename_hint.to_string(),
            message: "parser returned no tree".to_string(),
        })?;

        let spans = collect_spans(tree.root_node());
        Ok(render_lines(content, &spans, anchor_prefix))
    }
}

/// Pre-order walk; a classified node is emitted whole and not descended into,
/// which keeps spans sorted and non-overlapping.
fn collect_spans(root: Node<'_>) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = root.walk();

    'walk: loop {
        let node = cursor.node();
        let class = classify(node);
        if let Some(class) = class {
            if node.end_byte() > node.start_byte() {
                spans.push(Span { start: node.start_byte(), end: node.end_byte(), class });
            }
        } else if cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                continue 'walk;
            }
            if !cursor.goto_parent() {
                break 'walk;
            }
        }
    }

    spans
}

fn classify(node: Node<'_>) -> Option<&'static str> {
    let kind = node.kind();
    if kind.ends_with("comment") {
        return Some("c");
    }
    let class = match kind {
        "string"
        | "concatenated_string"
        | "string_literal"
        | "raw_string_literal"
        | "char_literal"
        | "interpreted_string_literal"
        | "rune_literal"
        | "template_string"
        | "regex" => "s",
        "integer" | "float" | "number" | "integer_literal" | "float_literal" | "int_literal"
        | "imaginary_literal" => "m",
        "true" | "false" | "none" | "null" | "undefined" | "nil" | "boolean_literal" | "iota" => {
            "kc"
        }
        "type_identifier" | "primitive_type" | "predefined_type" => "kt",
        "decorator" | "attribute_item" | "inner_attribute_item" => "nd",
        "identifier" | "field_identifier" | "property_identifier" if is_definition_name(node) => "nf",
        _ if is_keyword(node) => "k",
        _ => return None,
    };
    Some(class)
}

fn is_keyword(node: Node<'_>) -> bool {
    let kind = node.kind();
    !node.is_named()
        && node.child_count() == 0
        && kind.len() > 1
        && kind.chars().all(|c| c.is_ascii_lowercase() || c == '_')
}

fn is_definition_name(node: Node<'_>) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    matches!(
        parent.kind(),
        "function_item"
            | "function_signature_item"
            | "function_definition"
            | "function_declaration"
            | "generator_function_declaration"
            | "method_declaration"
            | "method_definition"
    ) && parent.child_by_field_name("name") == Some(node)
}
