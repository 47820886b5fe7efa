//! Decides whether a catalog option can carry the user's package.
//!
//! General rules run first (size bounds, weight, carrier girth), then the small
//! table of product-specific overrides. Size and girth rules only apply once the
//! user has entered at least one dimension.

use std::fmt;

use tracing::trace;

use super::constraints::{is_longest_side_prose, parse_girth_limit, parse_size_string, SideSumRule};
use super::entities::ShippingOption;
use super::measurement::{parse_weight_to_grams, NormalizedMeasurement};

/// Why an option was filtered out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    BelowMinimumSize,
    SideSumExceeded,
    AboveMaximumSize,
    TooHeavy,
    GirthExceeded,
    ProductRule(&'static str),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::BelowMinimumSize => write!(f, "below minimum size"),
            Rejection::SideSumExceeded => write!(f, "longest + shortest side too long"),
            Rejection::AboveMaximumSize => write!(f, "above maximum size"),
            Rejection::TooHeavy => write!(f, "too heavy"),
            Rejection::GirthExceeded => write!(f, "girth too large"),
            Rejection::ProductRule(name) => write!(f, "violates {name} rule"),
        }
    }
}

/// Extra check bound to one catalog product.
struct ProductOverride {
    internal_name: &'static str,
    rejection: Rejection,
    allows: fn(&NormalizedMeasurement) -> bool,
}

/// Carrier quirks the general size/weight model cannot express.
/// New quirks go here, not into the general rules.
static PRODUCT_OVERRIDES: &[ProductOverride] = &[
    ProductOverride {
        internal_name: "gls_pack_xl",
        rejection: Rejection::GirthExceeded,
        allows: |m| {
            m.girth <= 300.0 && m.longest() <= 200.0 && m.middle() <= 80.0 && m.shortest() <= 60.0
        },
    },
    ProductOverride {
        internal_name: "deutschepost_brief_maxi_doppelt_lbh",
        rejection: Rejection::ProductRule("deutschepost_brief_maxi_doppelt_lbh"),
        allows: |m| m.sides.iter().sum::<f64>() <= 90.0,
    },
    ProductOverride {
        internal_name: "hermes_paket_xxl_haustuer",
        rejection: Rejection::ProductRule("hermes_paket_xxl_haustuer"),
        allows: |m| m.middle() <= 50.0,
    },
];

/// Carriers whose condition text may carry a "Gurtmaß <N>" limit.
const GIRTH_FROM_CONDITIONS: &[&str] = &["DHL"];

/// True when `option` can carry the package. Rejections are traced with their reason.
pub fn is_eligible(option: &ShippingOption, measurement: &NormalizedMeasurement) -> bool {
    match check_eligibility(option, measurement) {
        Ok(()) => true,
        Err(reason) => {
            trace!(option = %option.internal_name, %reason, "option rejected");
            false
        }
    }
}

/// Like [`is_eligible`], but reports the first rule that rejected the option.
pub fn check_eligibility(
    option: &ShippingOption,
    measurement: &NormalizedMeasurement,
) -> Result<(), Rejection> {
    check_size(option, measurement)?;
    check_weight(option, measurement)?;
    check_carrier_girth(option, measurement)?;
    check_product_overrides(option, measurement)
}

fn check_size(option: &ShippingOption, m: &NormalizedMeasurement) -> Result<(), Rejection> {
    if !m.has_dimensions() {
        return Ok(());
    }
    let user = m.sides;

    if option.minimalsizes.is_some() {
        // The catalog stores minimum triples so that the user's longest side is held
        // against the minimum's last slot and vice versa.
        let min = parse_size_string(option.minimalsizes.as_deref());
        if (min[0] > 0.0 && user[0] < min[2])
            || (min[1] > 0.0 && user[1] < min[1])
            || (min[2] > 0.0 && user[2] < min[0])
        {
            return Err(Rejection::BelowMinimumSize);
        }
    }

    let side_sum = SideSumRule::from_field(option.longest_and_shortest_side.as_ref());
    if side_sum.applies() {
        return match side_sum.limit() {
            Some(limit) if user[0] + user[2] > limit => Err(Rejection::SideSumExceeded),
            _ => Ok(()),
        };
    }

    if let Some(maximal) = option.maximalsizes.as_deref() {
        if !is_longest_side_prose(maximal) {
            let max = parse_size_string(Some(maximal));
            let exceeded = max
                .iter()
                .zip(user.iter())
                .any(|(limit, side)| *limit > 0.0 && side > limit);
            if exceeded {
                return Err(Rejection::AboveMaximumSize);
            }
        }
    }

    Ok(())
}

fn check_weight(option: &ShippingOption, m: &NormalizedMeasurement) -> Result<(), Rejection> {
    if m.weight_grams == 0.0 {
        return Ok(());
    }
    if m.weight_grams <= parse_weight_to_grams(option.maximalweight.as_deref()) {
        Ok(())
    } else {
        Err(Rejection::TooHeavy)
    }
}

fn check_carrier_girth(option: &ShippingOption, m: &NormalizedMeasurement) -> Result<(), Rejection> {
    if !m.has_dimensions() || !GIRTH_FROM_CONDITIONS.contains(&option.company.as_str()) {
        return Ok(());
    }
    match parse_girth_limit(option.conditions.as_deref()) {
        Some(limit) if m.girth > limit => Err(Rejection::GirthExceeded),
        _ => Ok(()),
    }
}

fn check_product_overrides(
    option: &ShippingOption,
    m: &NormalizedMeasurement,
) -> Result<(), Rejection> {
    if !m.has_dimensions() {
        return Ok(());
    }
    PRODUCT_OVERRIDES
        .iter()
        .filter(|rule| rule.internal_name == option.internal_name)
        .try_for_each(|rule| if (rule.allows)(m) { Ok(()) } else { Err(rule.rejection) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SideSumLimit;
    use crate::domain::measurement::{UserInput, WeightUnit};
    use pretty_assertions::assert_eq;

    fn package(side1: f64, side2: f64, side3: f64, weight: f64) -> NormalizedMeasurement {
        UserInput {
            side1,
            side2,
            side3,
            weight,
            weight_unit: WeightUnit::Grams,
        }
        .normalize()
    }

    fn option(internal_name: &str) -> ShippingOption {
        ShippingOption::new(internal_name, "Test", "1,00")
    }

    #[test]
    fn everything_passes_without_input() {
        let mut strict = option("gls_pack_xl");
        strict.maximalweight = Some("1".into());
        strict.minimalsizes = Some("100 x 100 x 100 cm".into());
        strict.maximalsizes = Some("1 x 1 x 1 cm".into());
        strict.longest_and_shortest_side = Some(SideSumLimit::Text("1".into()));

        assert!(is_eligible(&strict, &package(0.0, 0.0, 0.0, 0.0)));
    }

    #[test]
    fn weight_limit_is_inclusive() {
        let mut five_kg = option("five_kg");
        five_kg.maximalweight = Some("5kg".into());

        assert!(is_eligible(&five_kg, &package(0.0, 0.0, 0.0, 5000.0)));
        assert_eq!(
            check_eligibility(&five_kg, &package(0.0, 0.0, 0.0, 5001.0)),
            Err(Rejection::TooHeavy)
        );
    }

    #[test]
    fn missing_weight_limit_accepts_any_weight() {
        assert!(is_eligible(&option("open"), &package(0.0, 0.0, 0.0, 1e9)));
    }

    #[test]
    fn side_sum_rule_replaces_max_triple() {
        let mut rule = option("side_sum");
        rule.longest_and_shortest_side = Some(SideSumLimit::Text("150".into()));
        rule.maximalsizes = Some("60 x 30 x 15 cm".into());

        assert!(is_eligible(&rule, &package(100.0, 50.0, 40.0, 0.0)));
        assert_eq!(
            check_eligibility(&rule, &package(120.0, 50.0, 40.0, 0.0)),
            Err(Rejection::SideSumExceeded)
        );
    }

    #[test]
    fn unusable_side_sum_still_skips_max_triple() {
        let mut rule = option("side_sum_text");
        rule.longest_and_shortest_side = Some(SideSumLimit::Flag(true));
        rule.maximalsizes = Some("10 x 10 x 10 cm".into());

        assert!(is_eligible(&rule, &package(50.0, 50.0, 50.0, 0.0)));
    }

    #[test]
    fn max_sizes_compare_same_positions() {
        let mut parcel = option("parcel");
        parcel.maximalsizes = Some("120 x 60 x 60 cm".into());

        assert!(is_eligible(&parcel, &package(60.0, 120.0, 60.0, 0.0)));
        assert_eq!(
            check_eligibility(&parcel, &package(121.0, 10.0, 10.0, 0.0)),
            Err(Rejection::AboveMaximumSize)
        );
        assert_eq!(
            check_eligibility(&parcel, &package(100.0, 61.0, 10.0, 0.0)),
            Err(Rejection::AboveMaximumSize)
        );
    }

    #[test]
    fn four_number_max_sizes_use_the_three_largest() {
        let mut parcel = option("parcel");
        parcel.maximalsizes = Some("10 x 20 x 30 x 40 cm".into());

        assert!(is_eligible(&parcel, &package(35.0, 25.0, 15.0, 0.0)));
        assert_eq!(
            check_eligibility(&parcel, &package(41.0, 25.0, 15.0, 0.0)),
            Err(Rejection::AboveMaximumSize)
        );
    }

    #[test]
    fn max_size_prose_is_ignored() {
        let mut letter = option("letter");
        letter.maximalsizes = Some("längste + kürzeste Seite max. 90 cm".into());
        assert!(is_eligible(&letter, &package(200.0, 200.0, 200.0, 0.0)));
    }

    #[test]
    fn minimum_sizes_use_crossed_slots() {
        // Catalog convention: user longest against the minimum's last slot,
        // user shortest against the minimum's first slot.
        let mut letter = option("letter");
        letter.minimalsizes = Some("14 x 9 x 1 cm".into());

        assert!(is_eligible(&letter, &package(20.0, 15.0, 14.0, 0.0)));
        // Same-position slots would accept this one; the shortest side 10 is held against 14.
        assert_eq!(
            check_eligibility(&letter, &package(20.0, 15.0, 10.0, 0.0)),
            Err(Rejection::BelowMinimumSize)
        );
        assert_eq!(
            check_eligibility(&letter, &package(20.0, 8.0, 14.0, 0.0)),
            Err(Rejection::BelowMinimumSize)
        );
    }

    #[test]
    fn gls_pack_xl_caps_girth_and_axes() {
        let xl = option("gls_pack_xl");

        assert!(is_eligible(&xl, &package(150.0, 40.0, 30.0, 0.0)));
        assert_eq!(
            check_eligibility(&xl, &package(200.0, 60.0, 50.0, 0.0)),
            Err(Rejection::GirthExceeded)
        );
        assert_eq!(
            check_eligibility(&xl, &package(201.0, 10.0, 10.0, 0.0)),
            Err(Rejection::GirthExceeded)
        );
        assert_eq!(
            check_eligibility(&xl, &package(100.0, 81.0, 10.0, 0.0)),
            Err(Rejection::GirthExceeded)
        );
    }

    #[test]
    fn dhl_girth_comes_from_conditions() {
        let mut dhl = ShippingOption::new("dhl_paket", "DHL", "6,99");
        dhl.conditions = Some("Gurtmaß 300 cm, versichert".into());

        // girth 100 + 2*50 + 2*40 = 280
        assert!(is_eligible(&dhl, &package(100.0, 50.0, 40.0, 0.0)));
        // girth 120 + 2*50 + 2*45 = 310
        assert_eq!(
            check_eligibility(&dhl, &package(120.0, 50.0, 45.0, 0.0)),
            Err(Rejection::GirthExceeded)
        );

        let mut other = dhl.clone();
        other.company = "Hermes".into();
        assert!(is_eligible(&other, &package(120.0, 50.0, 45.0, 0.0)));
    }

    #[test]
    fn maxibrief_limits_sum_of_sides() {
        let maxi = option("deutschepost_brief_maxi_doppelt_lbh");
        assert!(is_eligible(&maxi, &package(50.0, 30.0, 10.0, 0.0)));
        assert_eq!(
            check_eligibility(&maxi, &package(50.0, 30.0, 11.0, 0.0)),
            Err(Rejection::ProductRule("deutschepost_brief_maxi_doppelt_lbh"))
        );
    }

    #[test]
    fn hermes_xxl_limits_middle_side() {
        let xxl = option("hermes_paket_xxl_haustuer");
        assert!(is_eligible(&xxl, &package(150.0, 50.0, 40.0, 0.0)));
        assert!(!is_eligible(&xxl, &package(150.0, 51.0, 40.0, 0.0)));
    }

    #[test]
    fn overrides_only_apply_to_their_product() {
        let plain = option("hermes_paket_l");
        assert!(is_eligible(&plain, &package(150.0, 90.0, 80.0, 0.0)));
    }
}
