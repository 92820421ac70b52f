pub mod reports;
pub mod settings;
pub mod switchlists;

pub use reports::ReportsPage;
pub use settings::SettingsPage;
pub use switchlists::SwitchlistsPage;
