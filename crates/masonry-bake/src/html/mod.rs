//! Minimal span-preserving HTML document model.

pub mod document;
pub mod edit;
pub mod tokenizer;

pub use document::{Document, ElementData, NodeId};
pub use edit::{Edit, apply_edits};

/// Escape text for HTML content: `&`, `<` and `>`.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape text for a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_text("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    }

    #[test]
    fn attr_escapes_quotes() {
        assert_eq!(escape_attr("x\"y"), "x&quot;y");
    }
}
