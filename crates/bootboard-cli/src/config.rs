use anyhow::{Context, Result, bail};
use bootboard_engine::{CompletionMode, DEFAULT_PAGE_LEN};
use bootboard_types::DateRange;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_API_URL: &str = "http://localhost:8888";
pub const MAX_QUERY_LIMIT: u64 = 1024;

/// Resolve the data directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. BOOTBOARD_PATH environment variable (with tilde expansion)
/// 3. ~/.bootboard
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("BOOTBOARD_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    match dirs::home_dir() {
        Some(home) => Ok(home.join(".bootboard")),
        None => bail!("Could not determine data directory: no home directory found"),
    }
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub max_query_limit: u64,
    pub date_range: DateRange,
    pub page_len: usize,
    pub request_timeout_secs: u64,
    pub completion: CompletionMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            max_query_limit: MAX_QUERY_LIMIT,
            date_range: DateRange::Max,
            page_len: DEFAULT_PAGE_LEN,
            request_timeout_secs: 30,
            completion: CompletionMode::Tail,
        }
    }
}

impl Config {
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_query_limit == 0 {
            bail!("max_query_limit must be greater than 0");
        }
        if self.page_len == 0 {
            bail!("page_len must be greater than 0");
        }
        if self.api_url.trim().is_empty() {
            bail!("api_url must not be empty");
        }
        Ok(())
    }

    /// Apply BOOTBOARD_API_URL, then an explicit flag value.
    pub fn with_overrides(mut self, api_url_flag: Option<&str>) -> Self {
        if let Ok(url) = std::env::var("BOOTBOARD_API_URL")
            && !url.trim().is_empty()
        {
            self.api_url = url;
        }
        if let Some(url) = api_url_flag {
            self.api_url = url.to_string();
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
