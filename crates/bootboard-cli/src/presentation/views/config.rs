use std::fmt;

use bootboard_engine::render::markup::escape;

use super::TextStyle;
use crate::presentation::view_models::{ConfigViewModel, CreateView};

impl CreateView for ConfigViewModel {
    fn create_view<'a>(&'a self, style: TextStyle) -> Box<dyn fmt::Display + 'a> {
        Box::new(ConfigView { data: self, style })
    }

    fn to_html(&self) -> String {
        let body = toml::to_string_pretty(&self.config).unwrap_or_default();
        format!("<pre>{}</pre>", escape(&body))
    }
}

struct ConfigView<'a> {
    data: &'a ConfigViewModel,
    style: TextStyle,
}

impl<'a> fmt::Display for ConfigView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.data.written {
            writeln!(f, "Wrote default configuration to {}", self.data.path)?;
        } else if self.data.exists {
            writeln!(f, "Config file: {}", self.data.path)?;
        } else {
            writeln!(
                f,
                "Config file: {} {}",
                self.data.path,
                self.style.dimmed("(not found, using defaults)")
            )?;
        }
        writeln!(f)?;

        let body = toml::to_string_pretty(&self.data.config).map_err(|_| fmt::Error)?;
        write!(f, "{}", body)
    }
}
