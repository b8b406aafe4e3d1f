use std::cmp::Ordering;
use std::collections::HashSet;

use bootboard_types::{FetchError, RecordId};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::RunWarning;
use crate::error::{Error, Result};
use crate::render::{Markup, SortKey};
use crate::row::{Column, RenderedRow};

pub const DEFAULT_PAGE_LEN: usize = 25;

/// Message shown in place of the table when the first page fails.
pub const ERROR_MESSAGE: &str = "Error loading data.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

/// What occupies the table area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TableStatus {
    Loading,
    Ready,
    Empty {
        message: String,
    },
    Error {
        message: String,
        status: Option<u16>,
    },
}

/// Receiver of an aggregation run's rows and state changes.
///
/// All calls come from the task driving the run, one at a time.
pub trait TableSink {
    /// Drop everything left over from a previous run. Called first by every run.
    fn reset(&mut self) {}
    fn initialize(&mut self, columns: Vec<Column>, rows: Vec<RenderedRow>);
    fn append(&mut self, rows: Vec<RenderedRow>);
    fn set_loading(&mut self, loading: bool);
    fn show_empty(&mut self, message: &str);
    fn show_error(&mut self, error: &FetchError);
    fn warn(&mut self, warning: RunWarning);
}

#[derive(Debug, Clone)]
struct SearchFilter {
    text: String,
    pattern: Regex,
}

impl SearchFilter {
    /// Case-insensitive regex; invalid patterns match literally.
    fn new(text: &str) -> Option<Self> {
        let build = |pattern: &str| RegexBuilder::new(pattern).case_insensitive(true).build();
        let pattern = build(text).or_else(|_| build(&regex::escape(text))).ok()?;
        Some(Self {
            text: text.to_string(),
            pattern,
        })
    }
}

/// Append-capable table state: rows, sort order, page and filter.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<RenderedRow>,
    ids: HashSet<RecordId>,
    order: Option<(usize, Direction)>,
    page_len: usize,
    page: usize,
    filter: Option<SearchFilter>,
    loading: bool,
    status: TableStatus,
    warnings: Vec<RunWarning>,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            ids: HashSet::new(),
            order: None,
            page_len: DEFAULT_PAGE_LEN,
            page: 0,
            filter: None,
            loading: false,
            status: TableStatus::Loading,
            warnings: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[RenderedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn status(&self) -> &TableStatus {
        &self.status
    }

    pub fn warnings(&self) -> &[RunWarning] {
        &self.warnings
    }

    pub fn order(&self) -> Option<(usize, Direction)> {
        self.order
    }

    pub fn set_sort(&mut self, column: usize, direction: Direction) -> Result<()> {
        let col = self
            .columns
            .get(column)
            .ok_or(Error::ColumnOutOfRange(column))?;
        if !col.orderable {
            return Err(Error::NotOrderable(column));
        }
        self.order = Some((column, direction));
        Ok(())
    }

    pub fn set_page_len(&mut self, page_len: usize) -> Result<()> {
        if page_len == 0 {
            return Err(Error::InvalidPageLength);
        }
        self.page_len = page_len;
        self.page = 0;
        Ok(())
    }

    /// Zero-based page; clamped to the last page when drawn.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Search text; empty clears the filter.
    pub fn set_filter(&mut self, text: &str) {
        let text = text.trim();
        self.filter = if text.is_empty() {
            None
        } else {
            SearchFilter::new(text)
        };
        self.page = 0;
    }

    pub fn filter_text(&self) -> Option<&str> {
        self.filter.as_ref().map(|f| f.text.as_str())
    }

    fn clear_rows(&mut self) {
        self.rows.clear();
        self.ids.clear();
        self.warnings.clear();
    }

    fn matches(&self, row: &RenderedRow) -> bool {
        let Some(filter) = &self.filter else {
            return true;
        };
        self.columns
            .iter()
            .zip(&row.cells)
            .any(|(column, cell)| column.searchable && filter.pattern.is_match(&cell.filter))
    }

    /// Project the current state. Pure: equal state draws equal views.
    pub fn draw(&self) -> TableView {
        let mut indices: Vec<usize> = (0..self.rows.len())
            .filter(|&i| self.matches(&self.rows[i]))
            .collect();

        if let Some((column, direction)) = self.order {
            indices.sort_by(|&a, &b| {
                let (ra, rb) = (&self.rows[a], &self.rows[b]);
                let key_a = ra.cells.get(column).map(|c| &c.sort);
                let key_b = rb.cells.get(column).map(|c| &c.sort);
                let ord = match direction {
                    Direction::Asc => compare_keys(key_a, key_b),
                    Direction::Desc => compare_keys(key_b, key_a),
                };
                ord.then_with(|| ra.id.cmp(&rb.id))
            });
        }

        let filtered = indices.len();
        let page_count = filtered.div_ceil(self.page_len).max(1);
        let page = self.page.min(page_count - 1);
        let first = page * self.page_len;
        let last = (first + self.page_len).min(filtered);

        let visible: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.visible)
            .map(|(i, _)| i)
            .collect();

        let headers = visible
            .iter()
            .map(|&i| {
                let column = &self.columns[i];
                HeaderView {
                    title: column.title.to_string(),
                    class_name: column.class_name.map(str::to_string),
                    sorted: self
                        .order
                        .and_then(|(col, dir)| (col == i).then_some(dir)),
                }
            })
            .collect();

        let rows = indices[first..last]
            .iter()
            .map(|&i| {
                let row = &self.rows[i];
                RowView {
                    id: row.id.clone(),
                    detail_url: row.detail_url.clone(),
                    cells: visible
                        .iter()
                        .map(|&c| {
                            row.cells
                                .get(c)
                                .map(|cell| cell.display.clone())
                                .unwrap_or(Markup::Empty)
                        })
                        .collect(),
                }
            })
            .collect();

        TableView {
            status: self.status.clone(),
            loading_more: self.loading,
            headers,
            rows,
            page,
            page_count,
            start: if filtered == 0 { 0 } else { first + 1 },
            end: last,
            filtered,
            total: self.rows.len(),
            warnings: self.warnings.clone(),
        }
    }
}

impl TableSink for Table {
    fn reset(&mut self) {
        *self = Self::new();
    }

    fn initialize(&mut self, columns: Vec<Column>, rows: Vec<RenderedRow>) {
        self.columns = columns;
        self.clear_rows();
        self.order = None;
        self.page = 0;
        self.status = TableStatus::Ready;
        self.append(rows);
    }

    fn append(&mut self, rows: Vec<RenderedRow>) {
        let offered = rows.len();
        let before = self.rows.len();
        for row in rows {
            if self.ids.insert(row.id.clone()) {
                self.rows.push(row);
            }
        }
        let added = self.rows.len() - before;
        if added < offered {
            debug!(dropped = offered - added, "duplicate rows dropped");
        }
        debug!(added, total = self.rows.len(), "rows appended");
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn show_empty(&mut self, message: &str) {
        self.clear_rows();
        self.loading = false;
        self.status = TableStatus::Empty {
            message: message.to_string(),
        };
    }

    fn show_error(&mut self, error: &FetchError) {
        self.clear_rows();
        self.loading = false;
        self.status = TableStatus::Error {
            message: ERROR_MESSAGE.to_string(),
            status: error.status(),
        };
    }

    fn warn(&mut self, warning: RunWarning) {
        self.warnings.push(warning);
    }
}

fn compare_keys(a: Option<&SortKey>, b: Option<&SortKey>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp_caseless(b),
        _ => a.cmp(&b),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub title: String,
    pub class_name: Option<String>,
    pub sorted: Option<Direction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub id: RecordId,
    pub detail_url: Option<String>,
    pub cells: Vec<Markup>,
}

/// One drawn page of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub status: TableStatus,
    pub loading_more: bool,
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
    pub page: usize,
    pub page_count: usize,
    /// One-based index of the first shown entry, 0 when nothing is shown.
    pub start: usize,
    pub end: usize,
    pub filtered: usize,
    pub total: usize,
    pub warnings: Vec<RunWarning>,
}

impl TableView {
    pub fn info(&self) -> String {
        let mut info = format!(
            "Showing {} to {} of {} entries",
            self.start, self.end, self.filtered
        );
        if self.filtered != self.total {
            info.push_str(&format!(" (filtered from {} total entries)", self.total));
        }
        info
    }
}
