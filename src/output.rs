//! JSON output types for decorated documents

use serde::{Deserialize, Serialize};

use crate::config::Surface;

/// Root document structure with metadata and decorated headings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentOutput {
    pub document: DocumentRoot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRoot {
    pub metadata: DocumentMetadata,
    pub headings: Vec<DecoratedHeading>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub source: Option<String>,
    pub surface: Surface,
    #[serde(rename = "headingCount")]
    pub heading_count: usize,
    #[serde(rename = "maxDepth")]
    pub max_depth: usize,
    /// Leading levels left out of the labels
    #[serde(rename = "suppressedLevels")]
    pub suppressed_levels: usize,
}

/// A heading together with the label computed for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoratedHeading {
    /// Heading level (1-6)
    pub level: usize,
    /// Heading text
    pub text: String,
    /// Label without positional padding, empty when not decorated
    pub label: String,
    /// Position in document
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Line number in source file (1-indexed)
    pub line: usize,
    /// Byte offset from start (0-indexed)
    pub offset: usize,
}

impl DocumentOutput {
    pub fn new(
        source: Option<String>,
        surface: Surface,
        suppressed_levels: usize,
        headings: Vec<DecoratedHeading>,
    ) -> Self {
        let max_depth = headings.iter().map(|h| h.level).max().unwrap_or(0);
        Self {
            document: DocumentRoot {
                metadata: DocumentMetadata {
                    source,
                    surface,
                    heading_count: headings.len(),
                    max_depth,
                    suppressed_levels,
                },
                headings,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_json_names() {
        let output = DocumentOutput::new(
            Some("notes.md".to_string()),
            Surface::Outline,
            1,
            vec![DecoratedHeading {
                level: 2,
                text: "Intro".to_string(),
                label: "1".to_string(),
                position: Position { line: 3, offset: 10 },
            }],
        );

        let json = serde_json::to_value(&output).unwrap();
        let metadata = &json["document"]["metadata"];
        assert_eq!(metadata["surface"], "outline");
        assert_eq!(metadata["headingCount"], 1);
        assert_eq!(metadata["maxDepth"], 2);
        assert_eq!(metadata["suppressedLevels"], 1);
        assert_eq!(json["document"]["headings"][0]["label"], "1");
        assert_eq!(json["document"]["headings"][0]["position"]["line"], 3);
    }
}
