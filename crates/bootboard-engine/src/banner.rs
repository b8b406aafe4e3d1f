use bootboard_types::FetchError;
use serde::Serialize;

/// Server resource a summary panel loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Defconfigs,
    Jobs,
    BootReports,
}

impl Resource {
    fn slug(self) -> &'static str {
        match self {
            Resource::Defconfigs => "defconfs",
            Resource::Jobs => "jobs",
            Resource::BootReports => "boots",
        }
    }
}

/// Dismissible alert raised next to a failed panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBanner {
    pub id: String,
    pub message: String,
}

impl ErrorBanner {
    /// Banner for `error`, if its status code has one. Only 404 and 500 do.
    pub fn for_error(resource: Resource, error: &FetchError) -> Option<Self> {
        let code = error.status().filter(|c| matches!(c, 404 | 500))?;
        let message = match resource {
            Resource::Defconfigs => format!(
                "{} error while loading defconfigs from the server.\n\
                 Please contact the website administrators.",
                code
            ),
            Resource::Jobs => format!(
                "{} error while loading jobs from the server.\n\
                 Please contact the website administrators.",
                code
            ),
            Resource::BootReports => format!(
                "Error while loading boot reports from the server.\n\
                 Please contact the website administrators. Error code was: {}",
                code
            ),
        };
        Some(Self {
            id: format!("{}-{}-error", resource.slug(), code),
            message,
        })
    }
}
