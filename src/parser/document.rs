use serde::{Deserialize, Serialize};

use super::utils::heading_text;

/// A heading discovered in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (1-6)
    pub level: usize,
    /// Heading text with markers and inline formatting removed
    pub text: String,
    /// Line number in the source (1-indexed)
    pub line: usize,
    /// Byte offset of the heading line from the start of the source
    pub offset: usize,
}

/// Source text together with the headings found in it.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub content: String,
    pub headings: Vec<Heading>,
}

impl Document {
    pub fn new(content: String, headings: Vec<Heading>) -> Self {
        Self { content, headings }
    }

    /// Build a document from a pre-parsed `(level, offset)` list, as kept by
    /// an editor's structure cache, without rescanning the source.
    ///
    /// Entries whose offset lies beyond the content are dropped. Levels are
    /// kept as given; out-of-range levels are rejected later by the counter.
    pub fn from_cache(content: String, entries: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let offsets = line_offsets(&content);
        let lines: Vec<&str> = content.lines().collect();

        let headings = entries
            .into_iter()
            .filter_map(|(level, offset)| {
                if offset >= content.len() {
                    return None;
                }
                let idx = match offsets.binary_search(&offset) {
                    Ok(idx) => idx,
                    Err(idx) => idx.checked_sub(1)?,
                };
                let line = lines.get(idx).copied().unwrap_or_default();
                Some(Heading {
                    level,
                    text: heading_text(line),
                    line: idx + 1,
                    offset: offsets.get(idx).copied().unwrap_or(offset),
                })
            })
            .collect();

        Self::new(content, headings)
    }

    /// The heading levels in document order.
    pub fn levels(&self) -> impl Iterator<Item = usize> + '_ {
        self.headings.iter().map(|h| h.level)
    }
}

/// Byte offset of the start of every line yielded by `str::lines`.
pub(crate) fn line_offsets(content: &str) -> Vec<usize> {
    let mut offset = 0;
    content
        .split_inclusive('\n')
        .map(|chunk| {
            let start = offset;
            offset += chunk.len();
            start
        })
        .collect()
}
