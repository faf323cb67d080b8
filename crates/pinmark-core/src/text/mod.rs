//! Text editing for labels: pure text helpers and the editing bridge.

mod bridge;
mod field;

pub use bridge::{EditableTextBridge, KeyOutcome, PlainTextSurface, Propagation, TextSurface};
pub use field::{Selection, TextField};

/// Indent unit inserted by Tab.
pub const INDENT: &str = "  ";

/// Collapse every line-break variant (`\r\n`, `\r`) to `\n`.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    out
}

/// Normalized text for a DOM text node: empty lines become a single space
/// so they keep their height.
pub fn normalize_text_for_dom(text: &str) -> String {
    normalize_text(text)
        .split('\n')
        .map(|line| if line.is_empty() { " " } else { line })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace literal tab characters with `indent`.
pub fn replace_tabs(text: &str, indent: &str) -> String {
    text.replace('\t', indent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_line_breaks() {
        assert_eq!(normalize_text("a\r\nb\rc\nd"), "a\nb\nc\nd");
        assert_eq!(normalize_text("\r\r\n"), "\n\n");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["", "plain", "a\r\n\r\nb", "\r\n\r", "x\n\ry"] {
            let once = normalize_text(input);
            assert_eq!(normalize_text(&once), once);
        }
    }

    #[test]
    fn test_normalize_for_dom_pads_empty_lines() {
        assert_eq!(normalize_text_for_dom("a\r\n\r\nb"), "a\n \nb");
        assert_eq!(normalize_text_for_dom(""), " ");
    }

    #[test]
    fn test_replace_tabs() {
        assert_eq!(replace_tabs("a\tb", INDENT), "a  b");
    }
}
