use std::path::PathBuf;

use anyhow::Result;
use bootboard_client::HttpFetcher;
use serde::Serialize;

use crate::config::Config;
use crate::presentation::{CommandResultViewModel, ConsoleRenderer, CreateView, TextStyle};
use crate::types::OutputFormat;

/// Context for handler execution with consistent presentation utilities
pub struct HandlerContext {
    pub data_dir: PathBuf,
    pub config: Config,
    pub format: OutputFormat,
    pub style: TextStyle,
}

impl HandlerContext {
    pub fn new(data_dir: PathBuf, config: Config, format: OutputFormat) -> Self {
        Self {
            data_dir,
            config,
            format,
            style: TextStyle::detect(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        Config::path_in(&self.data_dir)
    }

    pub fn fetcher(&self) -> Result<HttpFetcher> {
        Ok(HttpFetcher::new(
            self.config.api_url.clone(),
            self.config.request_timeout(),
        )?)
    }

    /// Render a view model using the configured format
    pub fn render<T>(&self, view_model: CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + CreateView,
    {
        ConsoleRenderer::new(self.format, self.style).render(view_model)
    }
}
