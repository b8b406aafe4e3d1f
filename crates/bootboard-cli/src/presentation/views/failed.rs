use std::fmt;

use bootboard_engine::{Markup, PanelOutcome, banner_html, panel_html};

use super::{PlainCell, TextStyle, write_grid};
use crate::presentation::view_models::{CreateView, FailedViewModel};

impl CreateView for FailedViewModel {
    fn create_view<'a>(&'a self, style: TextStyle) -> Box<dyn fmt::Display + 'a> {
        Box::new(FailedView { data: self, style })
    }

    fn to_html(&self) -> String {
        let mut out = String::new();
        for banner in self.banners() {
            out.push_str(&banner_html(banner));
            out.push('\n');
        }
        let panels: Vec<String> = self.panels.iter().map(panel_html).collect();
        out.push_str(&panels.join("\n"));
        out
    }
}

// --------------------------------------------------------
// Failed Results View
// --------------------------------------------------------

struct FailedView<'a> {
    data: &'a FailedViewModel,
    style: TextStyle,
}

impl<'a> fmt::Display for FailedView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut banners = self.data.banners().peekable();
        if banners.peek().is_some() {
            for banner in banners {
                writeln!(f, "{}", self.style.error(&banner.message))?;
            }
            writeln!(f)?;
        }

        for (i, panel) in self.data.panels.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", self.style.bold(panel.title))?;

            match &panel.outcome {
                PanelOutcome::Rows { rows } => {
                    let shown: Vec<usize> = panel
                        .headers
                        .iter()
                        .enumerate()
                        .filter(|(_, h)| !h.is_empty())
                        .map(|(i, _)| i)
                        .collect();
                    let headers: Vec<&str> = shown.iter().map(|&i| panel.headers[i]).collect();
                    let cells: Vec<Vec<PlainCell>> = rows
                        .iter()
                        .map(|row| {
                            shown
                                .iter()
                                .map(|&i| PlainCell::from_markup(row.get(i).unwrap_or(&Markup::Empty)))
                                .collect()
                        })
                        .collect();
                    write_grid(f, self.style, &headers, &cells)?;
                }
                PanelOutcome::Empty { message } => {
                    writeln!(f, "  {}", self.style.dimmed(message))?
                }
                PanelOutcome::Error { message, .. } => {
                    writeln!(f, "  {}", self.style.error(message))?
                }
            }
        }
        Ok(())
    }
}
