//! Syntax highlighting behind a small trait.
//!
//! The core only ever talks to [`Highlighter`]. A production backend built on
//! tree-sitter is compiled in with the `syntax` feature; [`PlainHighlighter`]
//! escapes text without coloring and is always available.

pub mod lines;
#[cfg(feature = "syntax")]
pub mod syntax;

pub use lines::{line_count, render_lines, Span};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("no grammar available for '{0}'")]
    Unsupported(String),

    #[error("failed to parse '{file}': {message}")]
    Parse { file: String, message: String },
}

/// Turns source text into line-addressable HTML.
pub trait Highlighter: Send + Sync {
    /// Short backend name for logs and the run summary.
    fn name(&self) -> &'static str;

    /// Render `content`, labelling line `n` with `{anchor_prefix}-{n}`.
    fn highlight(
        &self,
        content: &str,
        filename_hint: &str,
        anchor_prefix: &str,
    ) -> Result<String, HighlightError>;
}

/// Escape-and-wrap rendering with no coloring.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn highlight(
        &self,
        content: &str,
        _filename_hint: &str,
        anchor_prefix: &str,
    ) -> Result<String, HighlightError> {
        Ok(render_lines(content, &[], anchor_prefix))
    }
}

/// Highlight with `highlighter`, falling back to plain escaped output when
/// the backend cannot handle the file. Never fails.
pub fn highlight_or_fallback(
    highlighter: &dyn Highlighter,
    content: &str,
    filename_hint: &str,
    anchor_prefix: &str,
) -> String {
    match highlighter.highlight(content, filename_hint, anchor_prefix) {
        Ok(markup) => markup,
        Err(err) => {
            tracing::debug!("{} highlighter fell back for {}: {}", highlighter.name(), filename_hint, err);
            render_lines(content, &[], anchor_prefix)
        }
    }
}

/// Pick the highlighter for this run.
///
/// `plain` forces the fallback; otherwise the tree-sitter backend is used when
/// it was compiled in.
pub fn select_highlighter(plain: bool) -> Box<dyn Highlighter> {
    if plain {
        return Box::new(PlainHighlighter);
    }
    #[cfg(feature = "syntax")]
    {
        tracing::debug!(
            "tree-sitter grammars: {}",
            syntax::supported_tree_sitter_languages().join(", ")
        );
        Box::new(syntax::TreeSitterHighlighter::new())
    }
    #[cfg(not(feature = "syntax"))]
    {
        tracing::debug!("built without the `syntax` feature; using plain rendering");
        Box::new(PlainHighlighter)
    }
}
