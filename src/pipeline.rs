//! Rendering passes for a surface.
//!
//! A pass is a pure function of a surface configuration and a heading
//! stream. Every pass builds its own [`Querier`] and [`Counter`], so passes
//! for different surfaces over the same document never share state.

use crate::config::SurfaceConfig;
use crate::decorator::{Counter, DecoratorOptions, Position, Querier};
use crate::output::{self, DecoratedHeading};
use crate::parser::{Document, parse_markdown, utils::atx_text_span};

/// How much of the document the heading stream covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Coverage {
    /// Every heading of the document is in the stream
    #[default]
    Complete,
    /// Only a prefix is known, e.g. the part of a document scrolled into view
    Partial,
}

/// Label every level in `levels` with a fresh counter.
///
/// # Examples
///
/// ```
/// # use heading_decorator::decorator::DecoratorOptions;
/// # use heading_decorator::pipeline::decorate_levels;
/// let labels = decorate_levels(&DecoratorOptions::default(), [1, 2, 2], None);
/// assert_eq!(labels, vec!["1", "1.1", "1.2"]);
/// ```
pub fn decorate_levels(
    options: &DecoratorOptions,
    levels: impl IntoIterator<Item = usize>,
    position: Option<Position>,
) -> Vec<String> {
    let mut counter = Counter::new(options);
    levels
        .into_iter()
        .map(|level| counter.decorate(level, position))
        .collect()
}

/// Leading levels to suppress for `surface`, from a pre-pass over `levels`.
///
/// Zero unless `ignore_single` is set. A partial stream cannot rule out a
/// second top-level heading further down, so it keeps suppressing up to
/// `ignore_maximum` until one shows up.
pub fn suppression_depth(
    surface: &SurfaceConfig,
    levels: impl IntoIterator<Item = usize>,
    coverage: Coverage,
) -> usize {
    if !surface.ignore_single || !surface.ordered {
        return 0;
    }

    let options = surface.decorator_options(0);
    let mut querier = Querier::new(options.allow_zero_level, options.max_rec_level);
    for level in levels {
        querier.observe(level);
    }

    let maximum = surface.effective_ignore_maximum();
    let depth = match coverage {
        Coverage::Complete => querier.query_default(),
        Coverage::Partial => querier.query(true, maximum),
    };
    depth.min(maximum)
}

/// The options a pass over `levels` renders with, suppression included.
pub fn pass_options(
    surface: &SurfaceConfig,
    levels: impl IntoIterator<Item = usize>,
    coverage: Coverage,
) -> DecoratorOptions {
    surface.decorator_options(suppression_depth(surface, levels, coverage))
}

/// Decorate every heading of `doc` for `surface`.
///
/// Labels are returned without positional padding. A disabled surface
/// yields the headings with empty labels.
pub fn decorate_document(
    surface: &SurfaceConfig,
    doc: &Document,
    coverage: Coverage,
) -> (DecoratorOptions, Vec<DecoratedHeading>) {
    let options = pass_options(surface, doc.levels(), coverage);
    let labels = if surface.enabled {
        decorate_levels(&options, doc.levels(), None)
    } else {
        vec![String::new(); doc.headings.len()]
    };

    tracing::debug!(
        headings = doc.headings.len(),
        suppressed = options.ignore_top_level,
        "decorated document"
    );

    let headings = doc
        .headings
        .iter()
        .zip(labels)
        .map(|(heading, label)| DecoratedHeading {
            level: heading.level,
            text: heading.text.clone(),
            label,
            position: output::Position {
                line: heading.line,
                offset: heading.offset,
            },
        })
        .collect();

    (options, headings)
}

/// Rewrite `content` with labels spliced into its heading lines.
///
/// ATX headings keep their `#` markers with the label placed next to the
/// heading text; Setext headings get the label on the text line. Labels go
/// before the text for `before`/`before-inside` and after it otherwise.
///
/// # Examples
///
/// ```
/// # use heading_decorator::config::SurfaceConfig;
/// # use heading_decorator::pipeline::render_markdown;
/// let out = render_markdown(&SurfaceConfig::default(), "# A\n\n## B\n");
/// assert_eq!(out, "# 1 A\n\n## 1.1 B\n");
/// ```
pub fn render_markdown(surface: &SurfaceConfig, content: &str) -> String {
    let doc = parse_markdown(content);
    let (_, headings) = decorate_document(surface, &doc, Coverage::Complete);
    let before = surface.position.is_before();

    let mut labels = headings.into_iter().peekable();
    let mut out = String::with_capacity(content.len());

    for (idx, chunk) in content.split_inclusive('\n').enumerate() {
        let line_number = idx + 1;
        let next = labels.next_if(|h| h.position.line == line_number);
        match next {
            Some(heading) if !heading.label.is_empty() => {
                let (line, ending) = split_line_ending(chunk);
                out.push_str(&splice_label(line, &heading.label, before));
                out.push_str(ending);
            }
            _ => out.push_str(chunk),
        }
    }
    out
}

fn split_line_ending(chunk: &str) -> (&str, &str) {
    let body = chunk
        .strip_suffix("\r\n")
        .or_else(|| chunk.strip_suffix('\n'))
        .unwrap_or(chunk);
    chunk.split_at(body.len())
}

/// Insert `label` into `line` next to its heading text, leaving every other
/// byte of the line untouched.
fn splice_label(line: &str, label: &str, before: bool) -> String {
    let span = atx_text_span(line).unwrap_or_else(|| {
        let start = line.len() - line.trim_start().len();
        start..line.trim_end().len().max(start)
    });
    let (head, tail) = if span.is_empty() || before {
        line.split_at(span.start)
    } else {
        line.split_at(span.end)
    };

    if span.is_empty() {
        let lead = if head.is_empty() || head.ends_with(' ') { "" } else { " " };
        let trail = if tail.is_empty() || tail.starts_with(' ') { "" } else { " " };
        return format!("{head}{lead}{label}{trail}{tail}");
    }

    let position = if before { Position::Before } else { Position::After };
    let padded = Position::pad(Some(position), label.to_string());
    format!("{head}{padded}{tail}")
}
