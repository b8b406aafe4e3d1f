use bootboard_engine::{ErrorBanner, RunReport, RunState, TableView};
use bootboard_types::QuerySpec;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct BootsViewModel {
    pub api_url: String,
    pub query: QuerySpec,
    pub report: RunReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<ErrorBanner>,
    pub table: TableView,
}

impl BootsViewModel {
    pub fn failed(&self) -> bool {
        self.report.state == RunState::Error
    }
}
