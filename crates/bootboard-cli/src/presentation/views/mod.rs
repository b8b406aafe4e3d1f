mod boots;
mod config;
mod failed;
mod grid;

use is_terminal::IsTerminal;
use owo_colors::{OwoColorize, Style};
use terminal_size::{Width, terminal_size};

pub(crate) use grid::{PlainCell, write_grid};

/// Terminal capabilities used by the plain views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub color: bool,
    pub width: usize,
}

impl TextStyle {
    pub const DEFAULT_WIDTH: usize = 120;

    /// Colors only when stdout is a terminal; width from the terminal when known.
    pub fn detect() -> Self {
        let width = terminal_size()
            .map(|(Width(w), _)| w as usize)
            .unwrap_or(Self::DEFAULT_WIDTH);
        Self {
            color: std::io::stdout().is_terminal(),
            width,
        }
    }

    pub fn plain(width: usize) -> Self {
        Self {
            color: false,
            width,
        }
    }

    pub(crate) fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    pub(crate) fn bold(&self, text: &str) -> String {
        self.paint(text, Style::new().bold())
    }

    pub(crate) fn dimmed(&self, text: &str) -> String {
        self.paint(text, Style::new().dimmed())
    }

    pub(crate) fn error(&self, text: &str) -> String {
        self.paint(text, Style::new().red().bold())
    }

    pub(crate) fn warning(&self, text: &str) -> String {
        self.paint(text, Style::new().yellow())
    }
}
