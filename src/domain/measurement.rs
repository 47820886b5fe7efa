//! Normalizes raw package input into centimeters and grams.
//!
//! User-input parsing treats anything unreadable as `0` ("nothing entered"), while
//! [`parse_weight_to_grams`] reads catalog limits and treats absence as "no limit".

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Unit the weight field was entered in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightUnit {
    #[default]
    Grams,
    Kilograms,
}

impl WeightUnit {
    pub fn multiplier(self) -> f64 {
        match self {
            WeightUnit::Grams => 1.0,
            WeightUnit::Kilograms => 1000.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeightUnit::Grams => "g",
            WeightUnit::Kilograms => "kg",
        }
    }

    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("kg") {
            WeightUnit::Kilograms
        } else {
            WeightUnit::Grams
        }
    }
}

/// The package as the user entered it. Sides in cm, weight already in grams.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInput {
    #[serde(default)]
    pub side1: f64,
    #[serde(default)]
    pub side2: f64,
    #[serde(default)]
    pub side3: f64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub weight_unit: WeightUnit,
}

impl UserInput {
    /// Builds input from the raw text of the form fields.
    pub fn from_fields(
        side1: &str,
        side2: &str,
        side3: &str,
        weight: &str,
        unit: WeightUnit,
    ) -> Self {
        Self {
            side1: parse_number(side1),
            side2: parse_number(side2),
            side3: parse_number(side3),
            weight: parse_number(weight) * unit.multiplier(),
            weight_unit: unit,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.side1 == 0.0 && self.side2 == 0.0 && self.side3 == 0.0 && self.weight == 0.0
    }

    /// Weight expressed in the unit the user picked, for refilling the input field.
    pub fn weight_in_unit(&self) -> f64 {
        self.weight / self.weight_unit.multiplier()
    }

    pub fn normalize(&self) -> NormalizedMeasurement {
        NormalizedMeasurement::from_input(self)
    }
}

/// Canonical view of the package used by every eligibility rule.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NormalizedMeasurement {
    /// Longest, middle, shortest.
    pub sides: [f64; 3],
    pub weight_grams: f64,
    pub volume: f64,
    pub girth: f64,
}

impl NormalizedMeasurement {
    pub fn from_input(input: &UserInput) -> Self {
        let raw = [input.side1, input.side2, input.side3];
        let sides = sort_sides(raw[0], raw[1], raw[2]);
        Self {
            sides,
            weight_grams: input.weight,
            volume: calculate_volume(raw),
            girth: calculate_girth(sides),
        }
    }

    /// False while the user has not typed any dimension.
    pub fn has_dimensions(&self) -> bool {
        self.sides.iter().any(|side| *side != 0.0)
    }

    pub fn longest(&self) -> f64 {
        self.sides[0]
    }

    pub fn middle(&self) -> f64 {
        self.sides[1]
    }

    pub fn shortest(&self) -> f64 {
        self.sides[2]
    }
}

/// Parses user-entered numbers. Comma or dot decimals; junk, absence and negatives give `0`.
pub fn parse_number(raw: &str) -> f64 {
    let cleaned = raw.trim().replacen(',', ".", 1);
    leading_float(&cleaned)
        .filter(|value| value.is_finite())
        .map(|value| value.max(0.0))
        .unwrap_or(0.0)
}

pub fn sort_sides(a: f64, b: f64, c: f64) -> [f64; 3] {
    let mut sides = [a, b, c];
    sides.sort_by(|x, y| y.partial_cmp(x).unwrap_or(Ordering::Equal));
    sides
}

/// Longest + 2 × middle + 2 × shortest. Expects sides from [`sort_sides`].
pub fn calculate_girth(sorted_sides: [f64; 3]) -> f64 {
    sorted_sides[0] + 2.0 * sorted_sides[1] + 2.0 * sorted_sides[2]
}

pub fn calculate_volume(sides: [f64; 3]) -> f64 {
    sides[0] * sides[1] * sides[2]
}

/// Reads a catalog weight limit in grams.
///
/// `"31,5 kg"` gives `31500`, `"500"` gives `500`. Absent, empty or unreadable
/// limits give `f64::INFINITY`, i.e. no limit.
pub fn parse_weight_to_grams(text: Option<&str>) -> f64 {
    let Some(text) = text else {
        return f64::INFINITY;
    };

    let cleaned: String = text
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect::<String>()
        .replacen(',', ".", 1)
        .to_lowercase();
    if cleaned.is_empty() {
        return f64::INFINITY;
    }

    let Some(value) = leading_float(&cleaned).filter(|value| !value.is_nan()) else {
        return f64::INFINITY;
    };

    if cleaned.contains("kg") {
        value * 1000.0
    } else {
        value
    }
}

/// Parses the longest numeric prefix of `text`, the way lenient form parsing does:
/// `"12.5cm"` gives `12.5`, `"cm"` gives `None`.
pub(crate) fn leading_float(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
        }
        mantissa_digits += fraction_end - fraction_start;
        if mantissa_digits > 0 {
            end = fraction_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+') | Some(b'-')) {
            exponent_end += 1;
        }
        let exponent_digits_start = exponent_end;
        while exponent_end < bytes.len() && bytes[exponent_end].is_ascii_digit() {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits_start {
            end = exponent_end;
        }
    }

    text[..end].parse::<f64>().ok()
}
