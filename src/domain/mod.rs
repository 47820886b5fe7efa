//! Measurement parsing, eligibility and ranking of shipping options.

pub mod app_state;
pub mod constraints;
pub mod eligibility;
pub mod entities;
pub mod measurement;
pub mod pipeline;
pub mod ranking;
pub mod share;

pub use app_state::{AppState, CatalogStatus, Theme};
pub use entities::{CatalogDocument, ShippingOption};
pub use measurement::{UserInput, WeightUnit};
pub use pipeline::{CompanyFilter, RankedOption};
pub use ranking::{SortField, SortState};
pub use share::{decode_share_link, share_link};
