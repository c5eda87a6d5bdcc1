//! Utility functions for heading text extraction.
//!
//! Shared helpers used when turning classified heading lines into display
//! text and when splicing labels back into source lines.

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// Strip inline markdown formatting (bold, italic, code, strikethrough) from text.
///
/// Handles: `**bold**`, `__bold__`, `*italic*`, `_italic_` (with snake_case protection),
/// `` `code` ``, and `~~strikethrough~~`.
///
/// # Examples
///
/// ```
/// # use heading_decorator::parser::utils::strip_markdown_inline;
/// assert_eq!(strip_markdown_inline("**bold** text"), "bold text");
/// assert_eq!(strip_markdown_inline("`code` here"), "code here");
/// assert_eq!(strip_markdown_inline("snake_case_var"), "snake_case_var");
/// ```
pub fn strip_markdown_inline(text: &str) -> String {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        vec![
            (Regex::new(r"~~(.+?)~~").unwrap(), "$1"),
            (Regex::new(r"\*\*(.+?)\*\*").unwrap(), "$1"),
            (Regex::new(r"__(.+?)__").unwrap(), "$1"),
            (Regex::new(r"`([^`]+)`").unwrap(), "$1"),
            (Regex::new(r"\*(.+?)\*").unwrap(), "$1"),
            (
                Regex::new(r"(^|[^a-zA-Z0-9])_([^_]+)_([^a-zA-Z0-9]|$)").unwrap(),
                "$1$2$3",
            ),
        ]
    });

    let mut result = text.to_string();
    for (pattern, replacement) in patterns {
        result = pattern.replace_all(&result, *replacement).to_string();
    }
    result
}

/// Byte range of the text of an ATX heading line.
///
/// The range starts after the `#` run and the spaces following it, and ends
/// before any closing `#` sequence and trailing whitespace. Returns `None`
/// when `line` is not an ATX heading.
///
/// # Examples
///
/// ```
/// # use heading_decorator::parser::utils::atx_text_span;
/// assert_eq!(atx_text_span("##  Title ##"), Some(4..9));
/// assert_eq!(atx_text_span("#"), Some(1..1));
/// ```
pub fn atx_text_span(line: &str) -> Option<Range<usize>> {
    static ATX: OnceLock<Regex> = OnceLock::new();
    static CLOSING: OnceLock<Regex> = OnceLock::new();
    let atx = ATX.get_or_init(|| Regex::new(r"^ {0,3}#{1,6}(?: +|$)").unwrap());
    let closing = CLOSING.get_or_init(|| Regex::new(r"(?:^| +)#+ *$").unwrap());

    let start = atx.find(line)?.end();
    let rest = &line[start..];
    let text = match closing.find(rest) {
        Some(m) => &rest[..m.start()],
        None => rest,
    };
    Some(start..start + text.trim_end().len())
}

/// Split an ATX heading line into its marker prefix and its text.
///
/// The prefix covers indentation, the `#` run and the separating space. The
/// text has any closing `#` sequence removed.
///
/// # Examples
///
/// ```
/// # use heading_decorator::parser::utils::split_atx;
/// assert_eq!(split_atx("## Section ##"), Some(("## ", "Section")));
/// assert_eq!(split_atx("plain"), None);
/// ```
pub fn split_atx(line: &str) -> Option<(&str, &str)> {
    let span = atx_text_span(line)?;
    Some((&line[..span.start], &line[span]))
}

/// Display text for a heading line: ATX markers removed when present,
/// surrounding whitespace trimmed and inline formatting stripped.
///
/// # Examples
///
/// ```
/// # use heading_decorator::parser::utils::heading_text;
/// assert_eq!(heading_text("# **Intro**"), "Intro");
/// assert_eq!(heading_text("Setext title"), "Setext title");
/// ```
pub fn heading_text(line: &str) -> String {
    let raw = split_atx(line).map_or(line, |(_, text)| text);
    strip_markdown_inline(raw.trim())
}
