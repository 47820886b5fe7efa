//! German display formatting for prices, weights and package metrics.

use std::time::SystemTime;

use time::{format_description, OffsetDateTime};

use crate::domain::constraints::{parse_decimal, parse_longest_and_shortest};
use crate::domain::measurement::parse_weight_to_grams;
use crate::domain::ShippingOption;

/// Volumes at or above this many cm³ are shown in dm³.
const DM3_THRESHOLD: f64 = 1_000_000.0;

/// `1234.5` with 2 decimals gives `"1.234,50"`.
pub fn format_decimal(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) => format!("{sign}{grouped},{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Like [`format_decimal`] but drops trailing zeros: `31.5` gives `"31,5"`, `2.0` gives `"2"`.
pub fn format_compact(value: f64, max_decimals: usize) -> String {
    let full = format_decimal(value, max_decimals);
    if !full.contains(',') {
        return full;
    }
    full.trim_end_matches('0').trim_end_matches(',').to_string()
}

/// `"9.99"` or `"9,99"` gives `"9,99 €"`. Unreadable prices are shown as written.
pub fn format_price_text(price: &str) -> String {
    match parse_decimal(Some(price)) {
        Some(value) => format_price(value),
        None => price.to_string(),
    }
}

pub fn format_price(value: f64) -> String {
    format!("{} €", format_decimal(value, 2))
}

/// Grams as `"31,5 kg"` from one kilogram up, `"500 g"` below.
pub fn format_weight(grams: f64) -> String {
    if !grams.is_finite() {
        return "-".to_string();
    }
    if grams >= 1000.0 {
        format!("{} kg", format_compact(grams / 1000.0, 2))
    } else {
        format!("{} g", format_compact(grams, 0))
    }
}

pub fn format_max_weight(option: &ShippingOption) -> String {
    format_weight(parse_weight_to_grams(option.maximalweight.as_deref()))
}

pub fn format_volume(cm3: f64) -> String {
    if cm3 >= DM3_THRESHOLD {
        format!("{} dm³", format_decimal(cm3 / 1000.0, 2))
    } else {
        format!("{} cm³", format_compact(cm3, 0))
    }
}

pub fn format_girth(cm: f64) -> String {
    format!("{} cm", format_compact(cm, 1))
}

/// Max-size column text: the longest+shortest rule when it applies, the raw triple otherwise.
pub fn format_max_sizes(option: &ShippingOption) -> String {
    match parse_longest_and_shortest(option.longest_and_shortest_side.as_ref()) {
        Some(limit) => format!("L+K ≤ {}cm", format_compact(limit, 1)),
        None => option
            .maximalsizes
            .clone()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| "-".to_string()),
    }
}

/// Insurance amount, `-` when none or zero.
pub fn format_insurance(option: &ShippingOption) -> String {
    match parse_decimal(option.insurance.as_deref()) {
        Some(value) if value > 0.0 => format!("{} €", format_compact(value, 2)),
        _ => "-".to_string(),
    }
}

/// UTC timestamp like `"16.10.2026 14:05"`.
pub fn format_timestamp(at: SystemTime) -> String {
    let Ok(format) = format_description::parse_borrowed::<2>("[day].[month].[year] [hour]:[minute]") else {
        return String::new();
    };
    OffsetDateTime::from(at).format(&format).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SideSumLimit;
    use pretty_assertions::assert_eq;

    #[test]
    fn decimals_use_german_separators() {
        assert_eq!(format_decimal(9.99, 2), "9,99");
        assert_eq!(format_decimal(1234.5, 2), "1.234,50");
        assert_eq!(format_decimal(1234567.0, 0), "1.234.567");
        assert_eq!(format_decimal(-0.001, 2), "0,00");
    }

    #[test]
    fn prices() {
        assert_eq!(format_price_text("9.99"), "9,99 €");
        assert_eq!(format_price_text("5,5"), "5,50 €");
        assert_eq!(format_price_text("auf Anfrage"), "auf Anfrage");
    }

    #[test]
    fn weights_switch_to_kilograms() {
        assert_eq!(format_weight(500.0), "500 g");
        assert_eq!(format_weight(1000.0), "1 kg");
        assert_eq!(format_weight(31500.0), "31,5 kg");
        assert_eq!(format_weight(f64::INFINITY), "-");
    }

    #[test]
    fn volume_switches_to_cubic_decimeters() {
        assert_eq!(format_volume(8000.0), "8.000 cm³");
        assert_eq!(format_volume(999_999.0), "999.999 cm³");
        assert_eq!(format_volume(1_200_000.0), "1.200,00 dm³");
        assert_eq!(format_girth(280.0), "280 cm");
    }

    #[test]
    fn max_sizes_prefer_side_sum_rule() {
        let mut option = ShippingOption::new("x", "DHL", "1");
        option.maximalsizes = Some("120 x 60 x 60 cm".into());
        assert_eq!(format_max_sizes(&option), "120 x 60 x 60 cm");

        option.longest_and_shortest_side = Some(SideSumLimit::Text("150".into()));
        assert_eq!(format_max_sizes(&option), "L+K ≤ 150cm");

        option.longest_and_shortest_side = Some(SideSumLimit::Flag(true));
        assert_eq!(format_max_sizes(&option), "120 x 60 x 60 cm");
    }

    #[test]
    fn insurance_dash_when_absent() {
        let mut option = ShippingOption::new("x", "DHL", "1");
        assert_eq!(format_insurance(&option), "-");
        option.insurance = Some("500".into());
        assert_eq!(format_insurance(&option), "500 €");
        option.insurance = Some("0".into());
        assert_eq!(format_insurance(&option), "-");
    }

    #[test]
    fn timestamps() {
        let at = std::time::UNIX_EPOCH + std::time::Duration::from_secs(1_700_000_000);
        assert_eq!(format_timestamp(at), "14.11.2023 22:13");
        assert_eq!(format_timestamp(std::time::UNIX_EPOCH), "01.01.1970 00:00");
    }
}
