use serde::Serialize;

use crate::config::Config;

#[derive(Debug, Serialize)]
pub struct ConfigViewModel {
    pub path: String,
    pub exists: bool,
    /// Set when this invocation wrote the file.
    pub written: bool,
    pub config: Config,
}
