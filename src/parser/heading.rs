//! Line-by-line heading classification.
//!
//! The [`LineClassifier`] is a small state machine fed one source line at a
//! time. It reports the heading level found on that line while stepping over
//! the constructs that can contain `#`-prefixed lines without them being
//! headings: YAML front-matter, fenced code blocks and display math.

use regex::Regex;
use std::sync::OnceLock;

/// Border line that opens and closes a front-matter block.
pub const FRONT_MATTER_MARKER: &str = "---";

/// Marker that opens and closes a display math block.
pub const MATH_BLOCK_MARKER: &str = "$$";

/// Block context the classifier is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockState {
    #[default]
    Normal,
    FrontMatter,
    /// Inside a fenced code block opened by `fence_len` backticks.
    FencedCode {
        fence_len: usize,
    },
    DisplayMath,
}

struct Patterns {
    fence_open: Regex,
    fence_close: Regex,
    math_open: Regex,
    atx: Regex,
    setext_h1: Regex,
    setext_h2: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        fence_open: Regex::new(r"^ {0,3}(`{3,})[^`]*$").unwrap(),
        fence_close: Regex::new(r"^ {0,3}(`{3,})\s*$").unwrap(),
        math_open: Regex::new(r"^ {0,3}\$\$(.*)$").unwrap(),
        atx: Regex::new(r"^ {0,3}(#{1,6})(?: |$)").unwrap(),
        setext_h1: Regex::new(r"^ {0,3}=+\s*$").unwrap(),
        setext_h2: Regex::new(r"^ {0,3}-+\s*$").unwrap(),
    })
}

/// Stateful heading detector for a single document scan.
///
/// Lines must be supplied with strictly increasing 1-based line numbers.
/// A call that repeats or goes back on a line number is ignored and returns
/// `None`, so the classifier can be driven by callers that may revisit lines.
///
/// # Examples
///
/// ```
/// # use heading_decorator::parser::heading::LineClassifier;
/// let lines = ["```", "# not a heading", "```", "# Title"];
/// let mut classifier = LineClassifier::new();
/// let levels: Vec<_> = lines
///     .iter()
///     .enumerate()
///     .map(|(i, line)| classifier.classify(i + 1, line, None))
///     .collect();
/// assert_eq!(levels, vec![None, None, None, Some(1)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LineClassifier {
    state: BlockState,
    last_line: usize,
}

impl LineClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current block context.
    pub fn state(&self) -> BlockState {
        self.state
    }

    /// Classify `line` at `line_number`.
    ///
    /// `next_line` is the following source line, if known. It is only used to
    /// recognise Setext headings; when it turns out to be an underline it is
    /// treated as consumed and a later call for that line number returns
    /// `None`.
    pub fn classify(
        &mut self,
        line_number: usize,
        line: &str,
        next_line: Option<&str>,
    ) -> Option<usize> {
        if line_number <= self.last_line {
            tracing::trace!(line_number, last = self.last_line, "line already processed");
            return None;
        }
        self.last_line = line_number;

        match self.state {
            BlockState::FrontMatter => {
                if line == FRONT_MATTER_MARKER {
                    self.state = BlockState::Normal;
                }
                None
            }
            BlockState::FencedCode { fence_len } => {
                if closes_fence(line, fence_len) {
                    self.state = BlockState::Normal;
                }
                None
            }
            BlockState::DisplayMath => {
                if line.trim().ends_with(MATH_BLOCK_MARKER) {
                    self.state = BlockState::Normal;
                }
                None
            }
            BlockState::Normal => {
                if line_number == 1 && line == FRONT_MATTER_MARKER {
                    self.state = BlockState::FrontMatter;
                    return None;
                }
                self.classify_normal(line_number, line, next_line)
            }
        }
    }

    fn classify_normal(
        &mut self,
        line_number: usize,
        line: &str,
        next_line: Option<&str>,
    ) -> Option<usize> {
        let patterns = patterns();

        if let Some(caps) = patterns.fence_open.captures(line) {
            self.state = BlockState::FencedCode {
                fence_len: caps[1].len(),
            };
            return None;
        }

        if let Some(caps) = patterns.math_open.captures(line) {
            // `$$ x $$` on a single line is inline display math, not a block
            if !caps[1].trim_end().ends_with(MATH_BLOCK_MARKER) {
                self.state = BlockState::DisplayMath;
                return None;
            }
        }

        if let Some(caps) = patterns.atx.captures(line) {
            return Some(caps[1].len());
        }

        if line.trim().is_empty() {
            return None;
        }
        let next = next_line.filter(|next| !next.trim().is_empty())?;
        let level = if patterns.setext_h1.is_match(next) {
            1
        } else if patterns.setext_h2.is_match(next) {
            2
        } else {
            return None;
        };
        self.last_line = line_number + 1;
        Some(level)
    }
}

fn closes_fence(line: &str, fence_len: usize) -> bool {
    patterns()
        .fence_close
        .captures(line)
        .is_some_and(|caps| caps[1].len() >= fence_len)
}

/// Classify every line of `content`, returning `(line_number, level)` pairs
/// for the headings found. Line numbers are 1-based.
///
/// # Examples
///
/// ```
/// # use heading_decorator::parser::heading::scan_levels;
/// let found = scan_levels("Title\n=====\n\n## Section");
/// assert_eq!(found, vec![(1, 1), (4, 2)]);
/// ```
pub fn scan_levels(content: &str) -> Vec<(usize, usize)> {
    let lines: Vec<&str> = content.lines().collect();
    let mut classifier = LineClassifier::new();

    lines
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| {
            let next = lines.get(idx + 1).copied();
            classifier
                .classify(idx + 1, line, next)
                .map(|level| (idx + 1, level))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_all(lines: &[&str]) -> Vec<Option<usize>> {
        let mut classifier = LineClassifier::new();
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| classifier.classify(i + 1, line, lines.get(i + 1).copied()))
            .collect()
    }

    #[test]
    fn test_atx_levels() {
        let lines = [
            "# One",
            "## Two",
            "### Three",
            "#### Four",
            "##### Five",
            "###### Six",
            "####### Seven",
        ];
        assert_eq!(
            classify_all(&lines),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5), Some(6), None]
        );
    }

    #[test]
    fn test_atx_requires_space_or_eol() {
        assert_eq!(classify_all(&["#NoSpace"]), vec![None]);
        assert_eq!(classify_all(&["##"]), vec![Some(2)]);
        assert_eq!(classify_all(&["   ### indented"]), vec![Some(3)]);
        assert_eq!(classify_all(&["    # code indent"]), vec![None]);
    }

    #[test]
    fn test_front_matter_skipped() {
        let lines = ["---", "title: x", "---", "# H1"];
        assert_eq!(classify_all(&lines), vec![None, None, None, Some(1)]);
    }

    #[test]
    fn test_front_matter_only_on_first_line() {
        let mut classifier = LineClassifier::new();
        assert_eq!(classifier.classify(1, "text", None), None);
        assert_eq!(classifier.classify(2, "---", None), None);
        assert_eq!(classifier.state(), BlockState::Normal);
        assert_eq!(classifier.classify(3, "# H1", None), Some(1));
    }

    #[test]
    fn test_headings_inside_front_matter_ignored() {
        let lines = ["---", "# comment", "---", "## Real"];
        assert_eq!(classify_all(&lines), vec![None, None, None, Some(2)]);
    }

    #[test]
    fn test_fenced_code_skipped() {
        let lines = ["```", "# not a heading", "```", "# H1"];
        assert_eq!(classify_all(&lines), vec![None, None, None, Some(1)]);
    }

    #[test]
    fn test_fence_with_info_string() {
        let lines = ["```rust", "# attribute", "```", "## After"];
        assert_eq!(classify_all(&lines), vec![None, None, None, Some(2)]);
    }

    #[test]
    fn test_shorter_fence_does_not_close() {
        let lines = ["`````", "```", "# still code", "`````", "# H1"];
        assert_eq!(
            classify_all(&lines),
            vec![None, None, None, None, Some(1)]
        );
    }

    #[test]
    fn test_closing_fence_with_trailing_text_does_not_close() {
        let mut classifier = LineClassifier::new();
        classifier.classify(1, "```", None);
        classifier.classify(2, "``` not closed", None);
        assert_eq!(classifier.state(), BlockState::FencedCode { fence_len: 3 });
        assert_eq!(classifier.classify(3, "# code", None), None);
        assert_eq!(classifier.classify(4, "```   ", None), None);
        assert_eq!(classifier.state(), BlockState::Normal);
        assert_eq!(classifier.classify(5, "# H1", None), Some(1));
    }

    #[test]
    fn test_inline_backticks_do_not_open_fence() {
        let lines = ["```code``` inline", "# H1"];
        assert_eq!(classify_all(&lines), vec![None, Some(1)]);
    }

    #[test]
    fn test_display_math_skipped() {
        let lines = ["$$", "# x", "y $$", "# H1"];
        assert_eq!(classify_all(&lines), vec![None, None, None, Some(1)]);
    }

    #[test]
    fn test_single_line_math_is_not_a_block() {
        let mut classifier = LineClassifier::new();
        assert_eq!(classifier.classify(1, "$$ a + b $$", None), None);
        assert_eq!(classifier.state(), BlockState::Normal);
        assert_eq!(classifier.classify(2, "# H1", None), Some(1));
    }

    #[test]
    fn test_setext_headings() {
        let lines = ["Title", "=====", "", "Section", "---", "# After"];
        assert_eq!(
            classify_all(&lines),
            vec![Some(1), None, None, Some(2), None, Some(1)]
        );
    }

    #[test]
    fn test_setext_consumes_underline() {
        let mut classifier = LineClassifier::new();
        assert_eq!(classifier.classify(1, "Title", Some("===")), Some(1));
        // The underline line was consumed by the lookahead
        assert_eq!(classifier.classify(2, "===", None), None);
        assert_eq!(classifier.classify(3, "# Next", None), Some(1));
    }

    #[test]
    fn test_setext_requires_non_blank_lines() {
        let mut classifier = LineClassifier::new();
        assert_eq!(classifier.classify(1, "   ", Some("===")), None);
        assert_eq!(classifier.classify(2, "Text", Some("  ")), None);
        assert_eq!(classifier.classify(3, "Text", None), None);
    }

    #[test]
    fn test_out_of_order_lines_rejected() {
        let mut classifier = LineClassifier::new();
        assert_eq!(classifier.classify(2, "# Two", None), Some(1));
        assert_eq!(classifier.classify(2, "# Two", None), None);
        assert_eq!(classifier.classify(1, "# One", None), None);
        assert_eq!(classifier.classify(3, "## Three", None), Some(2));
    }

    #[test]
    fn test_rejected_line_keeps_state() {
        let mut classifier = LineClassifier::new();
        classifier.classify(1, "```", None);
        assert_eq!(classifier.classify(1, "```", None), None);
        assert_eq!(classifier.state(), BlockState::FencedCode { fence_len: 3 });
    }

    #[test]
    fn test_scan_levels() {
        let content = "---\ntitle: x\n---\n# A\n```\n# no\n```\n## B\nC\n-\n";
        assert_eq!(scan_levels(content), vec![(4, 1), (8, 2), (9, 2)]);
    }
}
