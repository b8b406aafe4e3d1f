//! Result aggregation and table engine.
//!
//! Turns the paginated result pages of a [`PageFetcher`](bootboard_client::PageFetcher)
//! into render-ready table rows:
//!
//! - [`render`]: per-field sort, filter and display projections
//! - [`row`]: column sets and the row formatter
//! - [`aggregate`]: the aggregation run (first page, then concurrent pages)
//! - [`table`]: the in-memory table sink (dedup, sort, filter, paging)
//! - [`summary`]: the failed-results panels
//! - [`html`]: HTML projection of drawn tables and panels

pub mod aggregate;
pub mod banner;
pub mod completion;
pub mod error;
pub mod html;
pub mod render;
pub mod row;
pub mod summary;
pub mod table;
pub mod url;

pub use aggregate::{
    Aggregator, BOOT_ENDPOINT, NO_BOOTS_MESSAGE, RunReport, RunState, RunWarning, boots_query,
};
pub use banner::{ErrorBanner, Resource};
pub use completion::{AllSettled, CompletionMode, CompletionPolicy, TailReached};
pub use error::{Error, Result};
pub use html::{banner_html, panel_html, table_html};
pub use render::{BadgeCategory, Field, Markup, RenderMode, Rendered, SortKey};
pub use row::{BOOT_DATE_COLUMN, Cell, Column, RenderedRow, RowFormatter, boot_columns};
pub use summary::{Panel, PanelKind, PanelOutcome, load_panel, load_summary};
pub use table::{
    DEFAULT_PAGE_LEN, Direction, ERROR_MESSAGE, HeaderView, RowView, Table, TableSink,
    TableStatus, TableView,
};
pub use url::{BootLevel, UrlTemplate};
