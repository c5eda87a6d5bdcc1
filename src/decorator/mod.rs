//! Heading label generation.
//!
//! [`Counter`] turns a stream of heading levels into the labels shown next to
//! each heading, using an immutable [`DecoratorOptions`] snapshot.
//! [`Querier`] tracks the same hierarchy without rendering and is used for
//! the pre-pass that decides how many top levels to suppress.

pub mod counter;
pub mod numbering;
pub mod querier;

pub use counter::Counter;
pub use numbering::StyleType;
pub use querier::Querier;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Number of heading levels.
pub const MAX_LEVEL: usize = 6;

/// Fallback text for the `string` style when the configured literal is blank.
pub const DEFAULT_SPECIFIED_STRING: &str = "#";

/// Delimiter placed between label entries when none is configured.
pub const DEFAULT_DELIMITER: &str = ".";

/// Whether `level` is a heading level the engine accepts.
pub fn is_valid_level(level: usize) -> bool {
    (1..=MAX_LEVEL).contains(&level)
}

/// Where a label is placed relative to the heading text.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Position {
    #[default]
    Before,
    After,
    BeforeInside,
    AfterInside,
}

impl Position {
    /// Apply the spacing used for inline insertion: `Before` gets a trailing
    /// space, `After` a leading one. Empty labels stay empty.
    pub fn pad(position: Option<Position>, label: String) -> String {
        if label.is_empty() {
            return label;
        }
        match position {
            Some(Position::Before) => format!("{label} "),
            Some(Position::After) => format!(" {label}"),
            _ => label,
        }
    }

    /// Whether the label goes in front of the heading text.
    pub fn is_before(self) -> bool {
        matches!(self, Position::Before | Position::BeforeInside)
    }
}

/// Immutable configuration for one rendering pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratorOptions {
    /// Counter based labels when true, fixed per-level labels otherwise
    pub ordered: bool,
    pub style_type: StyleType,
    pub delimiter: String,
    pub trailing_delimiter: bool,
    /// Replaces `delimiter` at the end when non-empty
    pub custom_trailing_delimiter: String,
    pub leading_delimiter: bool,
    /// Replaces `delimiter` at the start when non-empty
    pub custom_leading_delimiter: String,
    /// Labels for the `custom-ident` style, by position
    pub custom_idents: Vec<String>,
    /// Literal for the `string` style
    pub specified_string: String,
    /// Leading levels left out of every label
    pub ignore_top_level: usize,
    /// Deepest level that is decorated at all
    pub max_rec_level: usize,
    pub allow_zero_level: bool,
    /// Labels for unordered mode, indexed by level - 1
    pub level_headings: [String; MAX_LEVEL],
}

impl Default for DecoratorOptions {
    fn default() -> Self {
        Self {
            ordered: true,
            style_type: StyleType::Decimal,
            delimiter: DEFAULT_DELIMITER.to_string(),
            trailing_delimiter: false,
            custom_trailing_delimiter: String::new(),
            leading_delimiter: false,
            custom_leading_delimiter: String::new(),
            custom_idents: Vec::new(),
            specified_string: DEFAULT_SPECIFIED_STRING.to_string(),
            ignore_top_level: 0,
            max_rec_level: MAX_LEVEL,
            allow_zero_level: false,
            level_headings: default_level_headings(),
        }
    }
}

impl DecoratorOptions {
    /// Ordered options with the given style and defaults elsewhere.
    pub fn ordered(style_type: StyleType) -> Self {
        Self {
            style_type,
            ..Self::default()
        }
    }

    /// Unordered options using `level_headings` as the per-level labels.
    pub fn unordered(level_headings: [String; MAX_LEVEL]) -> Self {
        Self {
            ordered: false,
            level_headings,
            ..Self::default()
        }
    }

    /// Render a single counter value according to the style.
    pub fn render_entry(&self, value: u32) -> String {
        match self.style_type {
            StyleType::CustomIdent => value
                .checked_sub(1)
                .and_then(|idx| self.custom_idents.get(idx as usize))
                .cloned()
                .unwrap_or_else(|| value.to_string()),
            StyleType::Specified => self.effective_specified_string().to_string(),
            style => numbering::format_value(style, value),
        }
    }

    /// The `string` style literal, trimmed, or `#` when blank.
    pub fn effective_specified_string(&self) -> &str {
        let trimmed = self.specified_string.trim();
        if trimmed.is_empty() {
            DEFAULT_SPECIFIED_STRING
        } else {
            trimmed
        }
    }

    /// Text prepended when `leading_delimiter` is set.
    pub fn leading_marker(&self) -> &str {
        if self.custom_leading_delimiter.is_empty() {
            &self.delimiter
        } else {
            &self.custom_leading_delimiter
        }
    }

    /// Text appended when `trailing_delimiter` is set.
    pub fn trailing_marker(&self) -> &str {
        if self.custom_trailing_delimiter.is_empty() {
            &self.delimiter
        } else {
            &self.custom_trailing_delimiter
        }
    }
}

/// `H1` .. `H6`, the unordered labels used when none are configured.
pub fn default_level_headings() -> [String; MAX_LEVEL] {
    std::array::from_fn(|idx| format!("H{}", idx + 1))
}

/// Split a whitespace separated list of custom labels.
///
/// # Examples
///
/// ```
/// # use heading_decorator::decorator::parse_custom_idents;
/// assert_eq!(parse_custom_idents(" Ⓐ Ⓑ  Ⓒ "), vec!["Ⓐ", "Ⓑ", "Ⓒ"]);
/// ```
pub fn parse_custom_idents(idents: &str) -> Vec<String> {
    idents.split_whitespace().map(str::to_string).collect()
}
