//! Line-addressable markup shared by every highlighter.
//!
//! Both the tree-sitter backend and the escaped fallback funnel through
//! [`render_lines`], so the per-line anchors are identical whether or not a
//! file could be classified.

use crate::utils::push_escaped;

/// A classified byte range of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub class: &'static str,
}

/// Number of lines the renderer will emit for `content`.
///
/// A trailing newline does not start a new line; empty content has none.
pub fn line_count(content: &str) -> usize {
    content.split_inclusive('\n').count()
}

/// Render `content` as a line-numbered table.
///
/// Line `n` (1-based) gets the anchor `{anchor_prefix}-{n}` and a gutter link
/// pointing at it. `spans` must be sorted and non-overlapping; a span that
/// crosses a line break is closed and reopened on the next line.
pub fn render_lines(content: &str, spans: &[Span], anchor_prefix: &str) -> String {
    let mut gutter = String::new();
    let mut code = String::with_capacity(content.len() * 2);
    let mut next_span = 0usize;
    let mut line_start = 0usize;

    for (idx, line) in content.split_inclusive('\n').enumerate() {
        let number = idx + 1;
        let body = line.strip_suffix('\n').unwrap_or(line);
        let body = body.strip_suffix('\r').unwrap_or(body);
        let line_end = line_start + body.len();

        gutter.push_str(&format!("<a href=\"#{anchor_prefix}-{number}\">{number}</a>\n"));
        code.push_str(&format!("<a id=\"{anchor_prefix}-{number}\"></a>"));

        while next_span < spans.len() && spans[next_span].end <= line_start {
            next_span += 1;
        }

        let mut pos = line_start;
        let mut cursor = next_span;
        while cursor < spans.len() && spans[cursor].start < line_end {
            let span = spans[cursor];
            let from = span.start.max(pos);
            let to = span.end.min(line_end);
            if from > pos {
                push_escaped(&mut code, slice(content, pos, from));
            }
            if to > from {
                code.push_str("<span class=\"");
                code.push_str(span.class);
                code.push_str("\">");
                push_escaped(&mut code, slice(content, from, to));
                code.push_str("</span>");
            }
            pos = to.max(pos);
            if span.end > line_end {
                break;
            }
            cursor += 1;
        }
        if pos < line_end {
            push_escaped(&mut code, slice(content, pos, line_end));
        }
        code.push('\n');

        line_start += line.len();
    }

    format!(
        "<div class=\"highlight\"><table class=\"highlighttable\"><tr>\
         <td class=\"linenos\"><div class=\"linenodiv\"><pre>{gutter}</pre></div></td>\
         <td class=\"code\"><div><pre><code>{code}</code></pre></div></td>\
         </tr></table></div>\n"
    )
}

fn slice(content: &str, start: usize, end: usize) -> &str {
    content.get(start..end).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{line_count, render_lines, Span};

    #[test]
    fn every_line_gets_an_anchor_and_gutter_link() {
        let html = render_lines("a\nb\nc\n", &[], "file2-line");
        for n in 1..=3 {
            assert!(html.contains(&format!("<a id=\"file2-line-{n}\"></a>")));
            assert!(html.contains(&format!("<a href=\"#file2-line-{n}\">{n}</a>")));
        }
        assert!(!html.contains("file2-line-4"));
    }

    #[test]
    fn last_line_without_newline_counts() {
        assert_eq!(line_count("a\nb"), 2);
        assert_eq!(line_count("a\nb\n"), 2);
        assert_eq!(line_count(""), 0);
        assert!(render_lines("a\nb", &[], "line").contains("id=\"line-2\""));
    }

    #[test]
    fn content_is_escaped() {
        let html = render_lines("if a < b && c > d {}\n", &[], "line");
        assert!(html.contains("if a &lt; b &amp;&amp; c &gt; d {}"));
    }

    #[test]
    fn crlf_is_trimmed() {
        let html = render_lines("x\r\ny\r\n", &[], "line");
        assert!(html.contains("<a id=\"line-1\"></a>x\n"));
        assert!(!html.contains('\r'));
    }

    #[test]
    fn spans_wrap_text_and_split_across_lines() {
        let content = "let s = /* a\nb */ 1;\n";
        let spans = [
            Span { start: 0, end: 3, class: "k" },
            Span { start: 8, end: 17, class: "c" },
            Span { start: 18, end: 19, class: "m" },
        ];
        let html = render_lines(content, &spans, "line");
        assert!(html.contains(
            "<a id=\"line-1\"></a><span class=\"k\">let</span> s = <span class=\"c\">/* a</span>\n"
        ));
        assert!(html.contains(
            "<a id=\"line-2\"></a><span class=\"c\">b */</span> <span class=\"m\">1</span>;\n"
        ));
    }
}
