pub mod filter_chips;
pub mod results_table;
pub mod stat_card;
pub mod toast;

pub use filter_chips::FilterChips;
pub use results_table::{ResultRow, ResultsTable};
pub use stat_card::StatCard;
pub use toast::{push_toast, Toast, ToastKind, ToastMessage};
