use bootboard_types::{Record, RecordId};
use serde::Serialize;

use crate::render::{Field, Markup, RenderMode, Rendered, SortKey};
use crate::url::UrlTemplate;

/// Column declaration of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub data: &'static str,
    pub title: &'static str,
    #[serde(skip)]
    pub field: Field,
    pub visible: bool,
    pub orderable: bool,
    pub searchable: bool,
    pub class_name: Option<&'static str>,
}

impl Column {
    pub fn new(data: &'static str, title: &'static str, field: Field) -> Self {
        Self {
            data,
            title,
            field,
            visible: true,
            orderable: true,
            searchable: true,
            class_name: None,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn unorderable(mut self) -> Self {
        self.orderable = false;
        self
    }

    pub fn unsearchable(mut self) -> Self {
        self.searchable = false;
        self
    }

    pub fn class(mut self, class_name: &'static str) -> Self {
        self.class_name = Some(class_name);
        self
    }
}

/// Index of the date column in [`boot_columns`]; the default sort column.
pub const BOOT_DATE_COLUMN: usize = 7;

/// Columns of the all-boots table.
pub fn boot_columns() -> Vec<Column> {
    vec![
        Column::new("_id", "", Field::Id)
            .hidden()
            .unorderable()
            .unsearchable(),
        Column::new("job", "Tree \u{2013} Branch", Field::Tree).class("tree-column"),
        Column::new("kernel", "Kernel", Field::Kernel).class("kernel-column"),
        Column::new("board", "Board Model", Field::Board).class("board-column"),
        Column::new("defconfig_full", "Defconfig", Field::Defconfig).class("defconfig-column"),
        Column::new("arch", "Arch.", Field::Arch),
        Column::new("lab_name", "Lab Name", Field::Lab).class("lab-column"),
        Column::new("created_on", "Date", Field::Date).class("date-column pull-center"),
        Column::new("status", "Status", Field::Status).class("pull-center"),
        Column::new("board", "", Field::Detail)
            .unorderable()
            .unsearchable()
            .class("pull-center"),
    ]
}

/// One column of a formatted row, in all three render modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub sort: SortKey,
    pub filter: String,
    pub display: Markup,
}

impl Cell {
    /// Render `field` of `record` once per mode.
    pub fn render(field: Field, record: &Record) -> Self {
        let mut cell = Cell {
            sort: SortKey::Null,
            filter: String::new(),
            display: Markup::Empty,
        };
        for mode in RenderMode::ALL {
            match field.render(record, mode) {
                Rendered::Key(key) => cell.sort = key,
                Rendered::Text(text) => cell.filter = text,
                Rendered::Markup(markup) => cell.display = markup,
            }
        }
        cell
    }
}

/// Render-ready row; consumed by a table sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
    pub id: RecordId,
    pub cells: Vec<Cell>,
    pub detail_url: Option<String>,
}

/// Applies a column set to raw records.
#[derive(Debug, Clone)]
pub struct RowFormatter {
    columns: Vec<Column>,
    row_url: UrlTemplate,
}

impl RowFormatter {
    pub fn new(columns: Vec<Column>, row_url: UrlTemplate) -> Self {
        Self { columns, row_url }
    }

    pub fn boots() -> Self {
        Self::new(boot_columns(), UrlTemplate::boot_detail())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn format(&self, record: &Record) -> RenderedRow {
        let cells = self
            .columns
            .iter()
            .map(|column| Cell::render(column.field, record))
            .collect();

        RenderedRow {
            id: record.id.clone(),
            cells,
            detail_url: self.row_url.fill(record),
        }
    }

    pub fn format_all(&self, records: &[Record]) -> Vec<RenderedRow> {
        records.iter().map(|r| self.format(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::BadgeCategory;

    fn scenario_record() -> Record {
        let mut record = Record::new("58d2ab5e");
        record.status = Some("FAIL".into());
        record.board = Some("sun7i".into());
        record.job = Some("mainline".into());
        record.kernel = Some("v4.9".into());
        record.defconfig_full = Some("defconfig+CONFIG_X".into());
        record.lab_name = Some("lab-01".into());
        record
    }

    #[test]
    fn test_failure_row_badge_and_detail_url() {
        let formatter = RowFormatter::boots();
        let row = formatter.format(&scenario_record());

        assert_eq!(row.cells.len(), formatter.columns().len());
        assert_eq!(row.cells[8].display, BadgeCategory::Failure.badge());
        assert_eq!(
            row.detail_url.as_deref(),
            Some("/boot/sun7i/job/mainline/kernel/v4.9/defconfig/defconfig+CONFIG_X/lab/lab-01/")
        );
    }

    #[test]
    fn test_cells_hold_every_render_mode() {
        let record = scenario_record();
        let row = RowFormatter::boots().format(&record);
        for (column, cell) in boot_columns().iter().zip(&row.cells) {
            assert_eq!(cell.sort, column.field.sort_key(&record));
            assert_eq!(cell.filter, column.field.filter_text(&record));
            assert_eq!(cell.display, column.field.display(&record));
        }
        assert_eq!(row.cells[3].filter, "sun7i");
    }

    #[test]
    fn test_boot_columns_shape() {
        let columns = boot_columns();
        assert_eq!(columns.len(), 10);
        assert!(!columns[0].visible);
        assert_eq!(columns[BOOT_DATE_COLUMN].field, Field::Date);
        assert!(!columns[9].orderable);
        assert!(!columns[9].searchable);
    }

    #[test]
    fn test_row_without_detail_segments() {
        let mut record = scenario_record();
        record.kernel = None;
        let row = RowFormatter::boots().format(&record);
        assert_eq!(row.detail_url, None);
        assert_eq!(row.id.as_str(), "58d2ab5e");
    }
}
