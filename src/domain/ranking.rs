//! Ordering of eligible options and price-leader selection.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::constraints::parse_decimal;
use super::entities::ShippingOption;
use super::measurement::parse_weight_to_grams;

/// Column the result table is sorted by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    #[default]
    Price,
    MaxWeight,
    Insurance,
    Company,
    Title,
}

impl SortField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Price => "Preis",
            Self::MaxWeight => "Max. Gewicht",
            Self::Insurance => "Versicherung",
            Self::Company => "Anbieter",
            Self::Title => "Produkt",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    /// Clicking the active column flips direction; another column starts ascending.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.toggled();
        } else {
            self.field = field;
            self.direction = SortDirection::Asc;
        }
    }

    /// Header icon for `field`: direction arrow when active, neutral otherwise.
    pub fn icon_for(&self, field: SortField) -> &'static str {
        if self.field == field {
            self.direction.icon()
        } else {
            "⇅"
        }
    }
}

pub fn price_value(option: &ShippingOption) -> f64 {
    parse_decimal(Some(&option.price)).unwrap_or(0.0)
}

pub fn insurance_value(option: &ShippingOption) -> f64 {
    parse_decimal(option.insurance.as_deref()).unwrap_or(0.0)
}

pub fn max_weight_value(option: &ShippingOption) -> f64 {
    parse_weight_to_grams(option.maximalweight.as_deref())
}

/// Returns the options in display order. Stable: equal keys keep catalog order.
pub fn sort_options<'a, I>(options: I, sort: SortState) -> Vec<&'a ShippingOption>
where
    I: IntoIterator<Item = &'a ShippingOption>,
{
    let mut sorted: Vec<&ShippingOption> = options.into_iter().collect();
    sorted.sort_by(|a, b| {
        let ord = match sort.field {
            SortField::Price => compare_f64(price_value(a), price_value(b)),
            SortField::MaxWeight => compare_f64(max_weight_value(a), max_weight_value(b)),
            SortField::Insurance => compare_f64(insurance_value(a), insurance_value(b)),
            SortField::Company => compare_german(&a.company, &b.company),
            SortField::Title => compare_german(&a.title, &b.title),
        };
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    sorted
}

/// Lowest price, independent of any display order. Ties keep the first entry.
pub fn cheapest<'a, I>(options: I) -> Option<&'a ShippingOption>
where
    I: IntoIterator<Item = &'a ShippingOption>,
{
    options.into_iter().fold(None, |best, candidate| match best {
        Some(current) if price_value(current) <= price_value(candidate) => Some(current),
        _ => Some(candidate),
    })
}

fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Approximate German dictionary order: letters first, ignoring umlauts
/// and case, then unaccented before accented, then lowercase before uppercase.
///
/// Only umlauts, `ß` and the common French accents on a/e/o/u are folded.
/// Any other non-ASCII letter compares by code point, so it sorts after `z`.
pub fn compare_german(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| case_key(a).cmp(&case_key(b)))
}

fn primary_key(text: &str) -> String {
    let mut key = String::with_capacity(text.len());
    for ch in text.chars().flat_map(char::to_lowercase) {
        match ch {
            'ä' | 'à' | 'á' | 'â' => key.push('a'),
            'ö' | 'ò' | 'ó' | 'ô' => key.push('o'),
            'ü' | 'ù' | 'ú' | 'û' => key.push('u'),
            'é' | 'è' | 'ê' | 'ë' => key.push('e'),
            'ß' => key.push_str("ss"),
            other => key.push(other),
        }
    }
    key
}

fn case_key(text: &str) -> Vec<bool> {
    text.chars().map(char::is_uppercase).collect()
}
