use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::view_models::{CommandResultViewModel, CreateView};
use super::views::TextStyle;
use crate::types::OutputFormat;

pub struct ConsoleRenderer {
    format: OutputFormat,
    style: TextStyle,
}

impl ConsoleRenderer {
    pub fn new(format: OutputFormat, style: TextStyle) -> Self {
        Self { format, style }
    }

    pub fn render<T>(&self, result: CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + CreateView,
    {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            OutputFormat::Html => {
                println!("{}", result.content.to_html());
            }
            OutputFormat::Plain => self.render_plain(&result),
        }
        Ok(())
    }

    fn render_plain<T>(&self, result: &CommandResultViewModel<T>)
    where
        T: Serialize + CreateView,
    {
        if let Some(badge) = &result.badge {
            println!("{} {}", badge.icon(), self.style.bold(&badge.label));
            println!();
        }

        print!("{}", result.content.create_view(self.style));

        if !result.suggestions.is_empty() {
            let heading = if self.style.color {
                "Tips:".yellow().bold().to_string()
            } else {
                "Tips:".to_string()
            };
            println!("\n{}", heading);
            for tip in &result.suggestions {
                print!("  • {}", tip.description);
                if let Some(cmd) = &tip.command {
                    print!(": {}", self.style.paint(cmd, owo_colors::Style::new().cyan()));
                }
                println!();
            }
        }
    }
}
