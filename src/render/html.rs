//! HTML serialization of a bundle.
//!
//! Output is one self-contained page: inline CSS, no scripts, no external
//! assets. Print styles put each file on its own A4 page.

use crate::domain::{BundleDocument, BundleMode};
use crate::utils::escape_html;

const BASE_CSS: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body {
    font-family: 'Menlo', 'Monaco', 'Consolas', 'Liberation Mono', monospace;
    font-size: 13px;
    line-height: 1.4;
    background: #fff;
    color: #000;
    padding-left: 16px;
}
.toc { padding: 16px; background: #f8f8f8; border-bottom: 1px solid #ddd; margin-bottom: 16px; }
.toc h2 { font-size: 14px; margin-bottom: 8px; color: #333; }
.toc ul { list-style: none; }
.toc li { margin-bottom: 4px; }
.toc a { color: #0066cc; text-decoration: none; font-size: 12px; }
.toc a:hover { text-decoration: underline; }
.file-section { margin-bottom: 24px; }
.file-header {
    font-size: 14px;
    font-weight: bold;
    color: #000;
    padding: 8px 12px;
    border-bottom: 1px solid #ccc;
    background: #e0e0e0;
    -webkit-print-color-adjust: exact;
    print-color-adjust: exact;
}
.highlight { background: #fff; }
.highlight pre { margin: 0; white-space: pre; }
.highlighttable { border-collapse: collapse; width: 100%; }
.highlighttable td { padding: 0; vertical-align: top; }
.highlighttable td.linenos {
    background: #f8f8f8;
    color: #999;
    text-align: right;
    padding: 0 5px 0 4px;
    user-select: none;
    border-right: 1px solid #eee;
}
.linenos a { color: inherit; text-decoration: none; }
.highlighttable td.code { padding-left: 10px; }
@media print {
    body { font-size: 10px; padding-left: 0; }
    .toc { page-break-after: always; }
    .file-section { page-break-before: always; }
    .file-section:first-of-type { page-break-before: avoid; }
    .file-header { font-size: 12px; padding: 6px 8px; background: #d0d0d0; border-bottom: 2px solid #999; }
    .linenos { padding: 0 4px 0 2px; }
    .code { padding-left: 4px; }
}
@page {
    size: A4;
    margin: 0.7cm 0.7cm 1.5cm 0.7cm;
    @bottom-center { content: counter(page); }
}
"#;

/// Light, print-friendly token colors keyed by the highlighter's classes.
const TOKEN_CSS: &str = r#"
.highlight .c { color: #6a737d; }
.highlight .k { color: #d73a49; }
.highlight .kc { color: #005cc5; }
.highlight .kt { color: #d73a49; }
.highlight .m { color: #005cc5; }
.highlight .s { color: #032f62; }
.highlight .nf { color: #6f42c1; }
.highlight .nd { color: #6f42c1; }
"#;

/// Serialize `doc` to a complete HTML page.
///
/// Deterministic: the same document always yields the same bytes.
pub fn render_document(doc: &BundleDocument) -> String {
    let mut out = String::with_capacity(
        doc.sections.iter().map(|s| s.markup.len() + 128).sum::<usize>() + 4096,
    );

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"UTF-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(&doc.title)));
    out.push_str("<style>");
    out.push_str(BASE_CSS);
    out.push_str(TOKEN_CSS);
    out.push_str("</style>\n</head>\n<body>\n");

    match doc.mode {
        BundleMode::Single => {
            for section in &doc.sections {
                out.push_str(&format!(
                    "<div class=\"file-header\">{}</div>\n",
                    escape_html(&section.display_name)
                ));
                out.push_str(&section.markup);
            }
        }
        BundleMode::Directory => {
            out.push_str("<div class=\"toc\">\n<h2>Table of Contents</h2>\n<ul>\n");
            for entry in &doc.toc {
                out.push_str(&format!(
                    "<li><a href=\"#{}\">{}</a></li>\n",
                    entry.anchor_id,
                    escape_html(&entry.display_name)
                ));
            }
            out.push_str("</ul>\n</div>\n");

            for section in &doc.sections {
                out.push_str(&format!(
                    "<div class=\"file-section\" id=\"{}\">\n<div class=\"file-header\">{}</div>\n",
                    section.section_id(),
                    escape_html(&section.display_name)
                ));
                out.push_str(&section.markup);
                out.push_str("</div>\n");
            }
        }
    }

    out.push_str("</body>\n</html>\n");
    out
}
