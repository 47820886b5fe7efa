pub mod finder;
pub mod settings;

pub use finder::FinderPage;
pub use settings::SettingsPage;
