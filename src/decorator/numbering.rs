//! Numbering systems used to render counter values.
//!
//! The algorithms follow the CSS counter-style systems: `numeric` (positional,
//! 0 renders as the first symbol), `alphabetic` (bijective, no zero) and
//! `additive` (roman numerals). A value outside the range a system can express
//! falls back to plain decimal.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// How each entry of an ordered label is rendered.
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
pub enum StyleType {
    #[default]
    Decimal,
    DecimalLeadingZero,
    LowerAlpha,
    UpperAlpha,
    LowerRoman,
    UpperRoman,
    LowerGreek,
    CjkDecimal,
    CjkHeavenlyStem,
    CjkEarthlyBranch,
    ArabicIndic,
    Devanagari,
    /// Positional list of user supplied labels.
    CustomIdent,
    /// One literal repeated at every position.
    #[serde(rename = "string")]
    #[strum(serialize = "string")]
    Specified,
}

const DECIMAL: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
const CJK_DECIMAL: &[char] = &['〇', '一', '二', '三', '四', '五', '六', '七', '八', '九'];
const ARABIC_INDIC: &[char] = &['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];
const DEVANAGARI: &[char] = &['०', '१', '२', '३', '४', '५', '६', '७', '८', '९'];

const LOWER_GREEK: &[char] = &[
    'α', 'β', 'γ', 'δ', 'ε', 'ζ', 'η', 'θ', 'ι', 'κ', 'λ', 'μ', 'ν', 'ξ', 'ο', 'π', 'ρ', 'σ', 'τ',
    'υ', 'φ', 'χ', 'ψ', 'ω',
];
const HEAVENLY_STEM: &[char] = &['甲', '乙', '丙', '丁', '戊', '己', '庚', '辛', '壬', '癸'];
const EARTHLY_BRANCH: &[char] = &[
    '子', '丑', '寅', '卯', '辰', '巳', '午', '未', '申', '酉', '戌', '亥',
];

const ROMAN: &[(u32, &str)] = &[
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];
const ROMAN_MAX: u32 = 3999;

/// Render `value` in the numbering system selected by `style`.
///
/// `CustomIdent` and `Specified` carry no numbering system of their own and
/// render as decimal here; the counter resolves their text before calling
/// this.
///
/// # Examples
///
/// ```
/// # use heading_decorator::decorator::numbering::{StyleType, format_value};
/// assert_eq!(format_value(StyleType::UpperAlpha, 28), "AB");
/// assert_eq!(format_value(StyleType::LowerRoman, 14), "xiv");
/// assert_eq!(format_value(StyleType::DecimalLeadingZero, 3), "03");
/// ```
pub fn format_value(style: StyleType, value: u32) -> String {
    match style {
        StyleType::Decimal | StyleType::CustomIdent | StyleType::Specified => value.to_string(),
        StyleType::DecimalLeadingZero => format!("{value:02}"),
        StyleType::LowerAlpha => alphabetic(&lower_latin(), value),
        StyleType::UpperAlpha => alphabetic(&upper_latin(), value),
        StyleType::LowerRoman => roman(value).to_lowercase(),
        StyleType::UpperRoman => roman(value),
        StyleType::LowerGreek => alphabetic(LOWER_GREEK, value),
        StyleType::CjkDecimal => numeric(CJK_DECIMAL, value),
        StyleType::CjkHeavenlyStem => alphabetic(HEAVENLY_STEM, value),
        StyleType::CjkEarthlyBranch => alphabetic(EARTHLY_BRANCH, value),
        StyleType::ArabicIndic => numeric(ARABIC_INDIC, value),
        StyleType::Devanagari => numeric(DEVANAGARI, value),
    }
}

fn lower_latin() -> Vec<char> {
    ('a'..='z').collect()
}

fn upper_latin() -> Vec<char> {
    ('A'..='Z').collect()
}

/// Positional notation; zero is the first symbol.
fn numeric(symbols: &[char], mut value: u32) -> String {
    let base = symbols.len() as u32;
    if value == 0 {
        return symbols[0].to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(symbols[(value % base) as usize]);
        value /= base;
    }
    digits.iter().rev().collect()
}

/// Bijective notation: `a..z`, then `aa`, `ab`, ... Zero is not representable.
fn alphabetic(symbols: &[char], mut value: u32) -> String {
    if value == 0 {
        return numeric(DECIMAL, value);
    }
    let base = symbols.len() as u32;
    let mut digits = Vec::new();
    while value > 0 {
        value -= 1;
        digits.push(symbols[(value % base) as usize]);
        value /= base;
    }
    digits.iter().rev().collect()
}

fn roman(mut value: u32) -> String {
    if value == 0 || value > ROMAN_MAX {
        return value.to_string();
    }
    let mut out = String::new();
    for &(weight, symbol) in ROMAN {
        while value >= weight {
            out.push_str(symbol);
            value -= weight;
        }
    }
    out
}
