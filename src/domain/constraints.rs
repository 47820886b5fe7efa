//! Turns the free-form constraint text of catalog entries into numbers.
//!
//! Every parser here is total: text it cannot read becomes "no constraint".

use std::sync::OnceLock;

use regex::Regex;

use super::entities::SideSumLimit;
use super::measurement::{leading_float, parse_number};

/// Marker for prose like "längste + kürzeste Seite max. 90 cm", which is not a size triple.
const LONGEST_SIDE_PROSE: &str = "längste";

/// Reads `"60 x 30 x 15 cm"` style text into three sides, longest first.
///
/// Extra numbers beyond three keep the three largest. Missing sides are `0`.
/// Prose describing a longest+shortest rule reads as `[0, 0, 0]` because that rule lives in the `_longestandshortestside` field instead.
pub fn parse_size_string(text: Option<&str>) -> [f64; 3] {
    let Some(text) = text else {
        return [0.0; 3];
    };
    if is_longest_side_prose(text) {
        return [0.0; 3];
    }

    let cleaned = text
        .to_lowercase()
        .replace('×', " ")
        .replace('x', " ")
        .replace("cm", "")
        .replace(',', ".");

    let mut parts: Vec<f64> = cleaned
        .split_whitespace()
        .filter_map(leading_float)
        .filter(|value| value.is_finite())
        .collect();
    parts.sort_by(|a, b| b.total_cmp(a));
    parts.resize(3, 0.0);

    [parts[0], parts[1], parts[2]]
}

pub fn is_longest_side_prose(text: &str) -> bool {
    text.contains(LONGEST_SIDE_PROSE)
}

/// How an option's `_longestandshortestside` field applies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SideSumRule {
    /// Field absent or falsy: the regular max-size triple applies.
    NotApplicable,
    /// Longest + shortest side must not exceed this many cm.
    Limit(f64),
    /// Field is set but carries no usable number. The max-size triple is still skipped.
    Unbounded,
}

impl SideSumRule {
    pub fn from_field(value: Option<&SideSumLimit>) -> Self {
        match value {
            None | Some(SideSumLimit::Flag(false)) => SideSumRule::NotApplicable,
            Some(SideSumLimit::Flag(true)) => SideSumRule::Unbounded,
            Some(SideSumLimit::Number(number)) => {
                if *number == 0.0 || number.is_nan() {
                    SideSumRule::NotApplicable
                } else {
                    Self::from_bound(*number)
                }
            }
            Some(SideSumLimit::Text(text)) => {
                if text.is_empty() {
                    SideSumRule::NotApplicable
                } else {
                    Self::from_bound(parse_number(text))
                }
            }
        }
    }

    fn from_bound(bound: f64) -> Self {
        if bound > 0.0 && bound.is_finite() {
            SideSumRule::Limit(bound)
        } else {
            SideSumRule::Unbounded
        }
    }

    pub fn applies(&self) -> bool {
        !matches!(self, SideSumRule::NotApplicable)
    }

    pub fn limit(&self) -> Option<f64> {
        match self {
            SideSumRule::Limit(limit) => Some(*limit),
            _ => None,
        }
    }
}

/// The longest+shortest bound in cm, if the field carries a usable one.
pub fn parse_longest_and_shortest(value: Option<&SideSumLimit>) -> Option<f64> {
    SideSumRule::from_field(value).limit()
}

fn girth_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)gurtmaß\s*(\d+)").ok())
        .as_ref()
}

/// Extracts a girth limit embedded in condition text, e.g. `"Gurtmaß 300 cm"`.
pub fn parse_girth_limit(conditions: Option<&str>) -> Option<f64> {
    let captures = girth_pattern()?.captures(conditions?)?;
    captures.get(1)?.as_str().parse::<u32>().ok().map(f64::from)
}

/// Reads a price or insurance amount. Comma or dot decimals.
pub fn parse_decimal(text: Option<&str>) -> Option<f64> {
    let cleaned = text?.trim().replacen(',', ".", 1);
    leading_float(&cleaned).filter(|value| value.is_finite())
}
