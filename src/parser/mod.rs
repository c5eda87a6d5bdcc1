//! Markdown scanning and heading structure extraction.
//!
//! This module turns raw markdown into a [`Document`]: the source text plus
//! the headings found in it. Detection is line based and driven by the
//! [`heading::LineClassifier`], which knows just enough markdown to skip
//! front-matter, fenced code and display math.

mod document;
pub mod heading;
pub mod utils;

pub use document::{Document, Heading};
pub use heading::{BlockState, LineClassifier, scan_levels};

use document::line_offsets;
use std::path::Path;

/// Parse a markdown file and extract its headings.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn parse_file(path: &Path) -> std::io::Result<Document> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_markdown(&content))
}

/// Parse markdown content and extract headings with line numbers and byte offsets.
///
/// # Examples
///
/// ```
/// use heading_decorator::parse_markdown;
///
/// let doc = parse_markdown("# Intro\n\n## Background\n");
/// assert_eq!(doc.headings.len(), 2);
/// assert_eq!(doc.headings[1].text, "Background");
/// ```
pub fn parse_markdown(content: &str) -> Document {
    let lines: Vec<&str> = content.lines().collect();
    let offsets = line_offsets(content);
    let mut classifier = LineClassifier::new();

    let headings = lines
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| {
            let next = lines.get(idx + 1).copied();
            let level = classifier.classify(idx + 1, line, next)?;
            Some(Heading {
                level,
                text: utils::heading_text(line),
                line: idx + 1,
                offset: offsets[idx],
            })
        })
        .collect();

    Document::new(content.to_string(), headings)
}
