use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use super::entities::ShippingOption;
use super::measurement::UserInput;
use super::pipeline::{companies, run_pipeline, CompanyFilter, FilterCriteria, FinderView};
use super::ranking::SortState;

/// Color scheme of the whole window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Dark => "Dunkel",
            Theme::Light => "Hell",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Dark => "🌙",
            Theme::Light => "☀️",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum CatalogStatus {
    #[default]
    Loading,
    Ready {
        /// Human readable origin, e.g. "eingebettet" or a file path.
        source: String,
        entries: usize,
        fetched_at: Option<SystemTime>,
    },
    Failed(String),
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub catalog: Vec<ShippingOption>,
    pub catalog_status: CatalogStatus,
    /// Committed input. Text fields may run ahead of this while the debouncer waits.
    pub user_input: UserInput,
    pub company_filter: CompanyFilter,
    pub search_query: String,
    pub sort: SortState,
    pub theme: Theme,
}

impl AppState {
    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.user_input = persisted.user_input;
        self.company_filter = persisted.company_filter;
        self.theme = persisted.theme;
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            user_input: self.user_input.clone(),
            company_filter: self.company_filter.clone(),
            theme: self.theme,
        }
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            company: self.company_filter.clone(),
            search: self.search_query.clone(),
        }
    }

    pub fn view(&self) -> FinderView<'_> {
        run_pipeline(&self.catalog, &self.user_input, &self.criteria(), self.sort)
    }

    pub fn companies(&self) -> Vec<String> {
        companies(&self.catalog)
    }

    /// Clears measurements, company filter and search. Theme and sort stay.
    pub fn reset_inputs(&mut self) {
        self.user_input = UserInput::default();
        self.company_filter = CompanyFilter::All;
        self.search_query.clear();
    }

    /// Replaces the catalog. A company filter that no longer exists falls back to all.
    pub fn set_catalog(&mut self, catalog: Vec<ShippingOption>, status: CatalogStatus) {
        self.catalog = catalog;
        self.catalog_status = status;
        if let CompanyFilter::Company(name) = &self.company_filter {
            if !self.catalog.iter().any(|option| &option.company == name) {
                self.company_filter = CompanyFilter::All;
            }
        }
    }
}

/// What survives a restart.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub user_input: UserInput,
    #[serde(default)]
    pub company_filter: CompanyFilter,
    #[serde(default)]
    pub theme: Theme,
}

impl PersistedState {
    /// Parses saved JSON. Corrupt or foreign data gives the defaults.
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::measurement::WeightUnit;
    use pretty_assertions::assert_eq;

    fn sample_persisted() -> PersistedState {
        PersistedState {
            user_input: UserInput {
                side1: 35.0,
                side2: 25.0,
                side3: 10.0,
                weight: 2500.0,
                weight_unit: WeightUnit::Kilograms,
            },
            company_filter: CompanyFilter::Company("Hermes".into()),
            theme: Theme::Light,
        }
    }

    #[test]
    fn persisted_state_round_trips_through_json() {
        let persisted = sample_persisted();
        let json = serde_json::to_string(&persisted).unwrap();
        assert_eq!(PersistedState::from_json(&json), persisted);
    }

    #[test]
    fn corrupt_json_gives_defaults() {
        assert_eq!(PersistedState::from_json("{not json"), PersistedState::default());
        assert_eq!(PersistedState::from_json("[]"), PersistedState::default());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let persisted = PersistedState::from_json(r#"{"theme":"light"}"#);
        assert_eq!(persisted.theme, Theme::Light);
        assert_eq!(persisted.user_input, UserInput::default());
        assert_eq!(persisted.company_filter, CompanyFilter::All);
    }

    #[test]
    fn apply_and_snapshot_are_symmetric() {
        let mut state = AppState::default();
        state.apply_persisted(sample_persisted());
        assert_eq!(state.to_persisted(), sample_persisted());
    }

    #[test]
    fn reset_keeps_theme_and_sort() {
        let mut state = AppState::default();
        state.apply_persisted(sample_persisted());
        state.search_query = "paket".into();
        state.sort.toggle(crate::domain::ranking::SortField::Company);

        state.reset_inputs();

        assert_eq!(state.user_input, UserInput::default());
        assert_eq!(state.company_filter, CompanyFilter::All);
        assert!(state.search_query.is_empty());
        assert_eq!(state.theme, Theme::Light);
        assert_eq!(state.sort.field, crate::domain::ranking::SortField::Company);
    }

    #[test]
    fn stale_company_filter_falls_back_to_all() {
        let mut state = AppState::default();
        state.company_filter = CompanyFilter::Company("Gone".into());
        state.set_catalog(
            vec![ShippingOption::new("dhl_paket", "DHL", "6,99")],
            CatalogStatus::Loading,
        );
        assert_eq!(state.company_filter, CompanyFilter::All);
        assert_eq!(state.companies(), vec!["DHL"]);
    }
}
