use bootboard_engine::{ErrorBanner, Panel};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct FailedViewModel {
    pub api_url: String,
    pub panels: Vec<Panel>,
}

impl FailedViewModel {
    pub fn failed(&self) -> bool {
        self.panels.iter().any(Panel::is_error)
    }

    /// Banners in panel order, one per failing panel that has one.
    pub fn banners(&self) -> impl Iterator<Item = &ErrorBanner> {
        self.panels.iter().filter_map(Panel::banner)
    }
}
