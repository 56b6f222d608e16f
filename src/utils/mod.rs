//! Utility functions

pub mod encoding;

pub use encoding::{is_binary_content, read_file_safe, ReadError};

/// Escape text for inclusion in HTML element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    push_escaped(&mut out, text);
    out
}

/// Append `text` to `out`, escaping HTML special characters.
pub fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
}

/// Pluralize a noun for summary lines ("1 file", "3 files").
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::{escape_html, plural};

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"if a < b && c > "d" || 'e'"#),
            "if a &lt; b &amp;&amp; c &gt; &quot;d&quot; || &#x27;e&#x27;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn plural_handles_one_and_many() {
        assert_eq!(plural(1, "file"), "1 file");
        assert_eq!(plural(0, "file"), "0 files");
        assert_eq!(plural(12, "file"), "12 files");
    }
}
