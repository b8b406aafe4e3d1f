use std::fmt;

use bootboard_engine::{Markup, RunState, TableStatus, banner_html, table_html};

use super::{PlainCell, TextStyle, write_grid};
use crate::presentation::view_models::{BootsViewModel, CreateView};

impl CreateView for BootsViewModel {
    fn create_view<'a>(&'a self, style: TextStyle) -> Box<dyn fmt::Display + 'a> {
        Box::new(BootsView { data: self, style })
    }

    fn to_html(&self) -> String {
        let mut out = String::new();
        if let Some(banner) = &self.banner {
            out.push_str(&banner_html(banner));
        }
        out.push_str(&table_html(&self.table));
        out
    }
}

fn state_label(state: RunState) -> &'static str {
    match state {
        RunState::Idle => "idle",
        RunState::FirstFetchInFlight | RunState::AdditionalFetchesInFlight => "loading",
        RunState::EmptyResult => "empty",
        RunState::Error => "error",
        RunState::PartialLoaded => "partial",
        RunState::Complete => "complete",
        RunState::Stalled => "incomplete",
    }
}

// --------------------------------------------------------
// Boot Table View
// --------------------------------------------------------

struct BootsView<'a> {
    data: &'a BootsViewModel,
    style: TextStyle,
}

impl<'a> fmt::Display for BootsView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let data = self.data;
        let table = &data.table;

        if let Some(banner) = &data.banner {
            writeln!(f, "{}", self.style.error(&banner.message))?;
            writeln!(f)?;
        }

        let date_range = data
            .query
            .date_range
            .map(|range| range.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            f,
            "{} {}",
            self.style.bold("Boot reports"),
            self.style
                .dimmed(&format!("({}, date range {})", data.api_url, date_range))
        )?;

        match &table.status {
            TableStatus::Loading => writeln!(f, "Loading...")?,
            TableStatus::Empty { message } => writeln!(f, "{}", message)?,
            TableStatus::Error { message, .. } => writeln!(f, "{}", self.style.error(message))?,
            TableStatus::Ready => {
                // Columns without a title (the detail link) carry no text.
                let shown: Vec<usize> = table
                    .headers
                    .iter()
                    .enumerate()
                    .filter(|(_, h)| !h.title.is_empty())
                    .map(|(i, _)| i)
                    .collect();
                let headers: Vec<&str> = shown
                    .iter()
                    .map(|&i| table.headers[i].title.as_str())
                    .collect();
                let rows: Vec<Vec<PlainCell>> = table
                    .rows
                    .iter()
                    .map(|row| {
                        shown
                            .iter()
                            .map(|&i| {
                                PlainCell::from_markup(row.cells.get(i).unwrap_or(&Markup::Empty))
                            })
                            .collect()
                    })
                    .collect();

                writeln!(f)?;
                write_grid(f, self.style, &headers, &rows)?;
                writeln!(f)?;
                writeln!(
                    f,
                    "{}  (page {} of {})",
                    table.info(),
                    table.page + 1,
                    table.page_count.max(1)
                )?;
            }
        }

        if table.loading_more {
            writeln!(f, "{}", self.style.dimmed("loading more results\u{2026}"))?;
        }

        let report = &data.report;
        if report.state != RunState::Error && report.state != RunState::EmptyResult {
            writeln!(
                f,
                "{}",
                self.style.dimmed(&format!(
                    "{} records reported, {} additional requests, {}",
                    report.count,
                    report.requested.len(),
                    state_label(report.state)
                ))
            )?;
        }

        for warning in &report.warnings {
            writeln!(
                f,
                "{}",
                self.style.warning(&format!(
                    "Warning: page at skip {} failed: {}",
                    warning.skip, warning.message
                ))
            )?;
        }

        Ok(())
    }
}
