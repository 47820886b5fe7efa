//! Company filter, free-text search and eligibility composed into the result view.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::eligibility::is_eligible;
use super::entities::ShippingOption;
use super::measurement::{NormalizedMeasurement, UserInput};
use super::ranking::{cheapest, price_value, sort_options, SortState};

const ALL_COMPANIES: &str = "all";

/// Company chip selection. Stored as the plain company name, `"all"` for no filter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CompanyFilter {
    #[default]
    All,
    Company(String),
}

impl CompanyFilter {
    pub fn from_key(key: &str) -> Self {
        if key.is_empty() || key == ALL_COMPANIES {
            CompanyFilter::All
        } else {
            CompanyFilter::Company(key.to_string())
        }
    }

    pub fn key(&self) -> &str {
        match self {
            CompanyFilter::All => ALL_COMPANIES,
            CompanyFilter::Company(name) => name,
        }
    }

    pub fn matches(&self, option: &ShippingOption) -> bool {
        match self {
            CompanyFilter::All => true,
            CompanyFilter::Company(name) => option.company == *name,
        }
    }
}

impl Serialize for CompanyFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for CompanyFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(CompanyFilter::from_key(&key))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub company: CompanyFilter,
    pub search: String,
}

/// Case-insensitive substring match over title, company, conditions and options.
pub fn matches_search(option: &ShippingOption, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    option
        .search_text()
        .to_lowercase()
        .contains(&query.to_lowercase())
}

/// Options that pass the company filter, the search and every eligibility rule,
/// in catalog order.
pub fn filter_catalog<'a>(
    catalog: &'a [ShippingOption],
    criteria: &FilterCriteria,
    measurement: &NormalizedMeasurement,
) -> Vec<&'a ShippingOption> {
    catalog
        .iter()
        .filter(|option| criteria.company.matches(option))
        .filter(|option| matches_search(option, &criteria.search))
        .filter(|option| is_eligible(option, measurement))
        .collect()
}

/// One row of the result table.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedOption<'a> {
    /// 1-based position in the current display order.
    pub rank: usize,
    pub option: &'a ShippingOption,
    /// Shares the lowest price among the eligible options.
    pub is_price_leader: bool,
}

/// Everything the finder page renders for the current input.
#[derive(Clone, Debug, PartialEq)]
pub struct FinderView<'a> {
    pub rows: Vec<RankedOption<'a>>,
    pub cheapest: Option<&'a ShippingOption>,
    pub measurement: NormalizedMeasurement,
}

impl FinderView<'_> {
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn cheapest_price(&self) -> Option<f64> {
        self.cheapest.map(price_value)
    }
}

/// Normalize, filter, rank. Re-run on every committed change.
pub fn run_pipeline<'a>(
    catalog: &'a [ShippingOption],
    input: &UserInput,
    criteria: &FilterCriteria,
    sort: SortState,
) -> FinderView<'a> {
    let measurement = input.normalize();
    let eligible = filter_catalog(catalog, criteria, &measurement);
    let cheapest = cheapest(eligible.iter().copied());
    let leader_price = cheapest.map(price_value);

    let rows = sort_options(eligible, sort)
        .into_iter()
        .enumerate()
        .map(|(index, option)| RankedOption {
            rank: index + 1,
            option,
            is_price_leader: leader_price == Some(price_value(option)),
        })
        .collect();

    FinderView {
        rows,
        cheapest,
        measurement,
    }
}

/// Distinct company names in catalog order, for the filter chips.
pub fn companies(catalog: &[ShippingOption]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for option in catalog {
        if !option.company.is_empty() && !seen.contains(&option.company) {
            seen.push(option.company.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::measurement::WeightUnit;
    use crate::domain::ranking::{SortDirection, SortField};
    use pretty_assertions::assert_eq;

    fn option(name: &str, company: &str, price: &str, max_weight: &str) -> ShippingOption {
        let mut option = ShippingOption::new(name, company, price);
        option.title = format!("{company} {name}");
        option.maximalweight = Some(max_weight.to_string());
        option
    }

    fn names(view: &FinderView<'_>) -> Vec<String> {
        view.rows
            .iter()
            .map(|row| row.option.internal_name.clone())
            .collect()
    }

    #[test]
    fn weight_filters_and_ranks_end_to_end() {
        let catalog = vec![
            option("a", "X", "9,99", "2kg"),
            option("b", "X", "5,50", "1kg"),
        ];
        let input = UserInput {
            weight: 1500.0,
            ..UserInput::default()
        };

        let view = run_pipeline(
            &catalog,
            &input,
            &FilterCriteria::default(),
            SortState::default(),
        );

        assert_eq!(names(&view), vec!["a"]);
        assert_eq!(view.cheapest.map(|o| o.internal_name.as_str()), Some("a"));
        assert_eq!(view.cheapest_price(), Some(9.99));
        assert_eq!(view.count(), 1);
        assert!(view.rows[0].is_price_leader);
    }

    #[test]
    fn empty_input_keeps_whole_catalog() {
        let catalog = vec![
            option("a", "DHL", "6,99", "5kg"),
            option("b", "Hermes", "4,50", "2kg"),
            option("c", "GLS", "4,50", "1kg"),
        ];

        let view = run_pipeline(
            &catalog,
            &UserInput::default(),
            &FilterCriteria::default(),
            SortState::default(),
        );

        assert_eq!(names(&view), vec!["b", "c", "a"]);
        let ranks: Vec<usize> = view.rows.iter().map(|row| row.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        let leaders: Vec<bool> = view.rows.iter().map(|row| row.is_price_leader).collect();
        assert_eq!(leaders, vec![true, true, false]);
        assert_eq!(view.cheapest.map(|o| o.internal_name.as_str()), Some("b"));
    }

    #[test]
    fn price_leader_survives_other_sort_orders() {
        let catalog = vec![
            option("a", "DHL", "6,99", "5kg"),
            option("b", "Hermes", "4,50", "2kg"),
        ];
        let sort = SortState {
            field: SortField::Price,
            direction: SortDirection::Desc,
        };

        let view = run_pipeline(&catalog, &UserInput::default(), &FilterCriteria::default(), sort);

        assert_eq!(names(&view), vec!["a", "b"]);
        assert!(!view.rows[0].is_price_leader);
        assert!(view.rows[1].is_price_leader);
        assert_eq!(view.cheapest.map(|o| o.internal_name.as_str()), Some("b"));
    }

    #[test]
    fn company_filter_and_search_combine() {
        let mut abholung = option("dhl_abholung", "DHL", "8,00", "31,5kg");
        abholung.options = Some("Abholung vor der Haustür".into());
        let catalog = vec![
            option("dhl_paket", "DHL", "6,99", "31,5kg"),
            abholung,
            option("hermes_paket", "Hermes", "5,00", "25kg"),
        ];
        let measurement = UserInput::default().normalize();

        let dhl_only = FilterCriteria {
            company: CompanyFilter::Company("DHL".into()),
            search: String::new(),
        };
        let filtered = filter_catalog(&catalog, &dhl_only, &measurement);
        assert_eq!(filtered.len(), 2);

        let search = FilterCriteria {
            company: CompanyFilter::All,
            search: "  HAUSTÜR ".into(),
        };
        let filtered = filter_catalog(&catalog, &search, &measurement);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].internal_name, "dhl_abholung");

        let nothing = FilterCriteria {
            company: CompanyFilter::Company("Hermes".into()),
            search: "abholung".into(),
        };
        assert!(filter_catalog(&catalog, &nothing, &measurement).is_empty());
    }

    #[test]
    fn filtering_keeps_catalog_order() {
        let catalog = vec![
            option("z", "X", "1", "10kg"),
            option("y", "X", "1", "1kg"),
            option("x", "X", "1", "10kg"),
        ];
        let input = UserInput::from_fields("", "", "", "2", WeightUnit::Kilograms);
        let filtered = filter_catalog(&catalog, &FilterCriteria::default(), &input.normalize());
        let names: Vec<&str> = filtered.iter().map(|o| o.internal_name.as_str()).collect();
        assert_eq!(names, vec!["z", "x"]);
    }

    #[test]
    fn company_filter_serializes_as_plain_key() {
        assert_eq!(serde_json::to_string(&CompanyFilter::All).unwrap(), "\"all\"");
        let dhl: CompanyFilter = serde_json::from_str("\"DHL\"").unwrap();
        assert_eq!(dhl, CompanyFilter::Company("DHL".into()));
        let all: CompanyFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(all, CompanyFilter::All);
    }

    #[test]
    fn companies_are_distinct_in_catalog_order() {
        let catalog = vec![
            option("a", "Hermes", "1", "1kg"),
            option("b", "DHL", "1", "1kg"),
            option("c", "Hermes", "1", "1kg"),
        ];
        assert_eq!(companies(&catalog), vec!["Hermes", "DHL"]);
    }
}
