use bootboard_types::Record;

use super::badge::BadgeCategory;
use super::markup::Markup;
use super::time::format_iso_date;
use super::{RenderMode, Rendered, SortKey};
use crate::url::{BootLevel, UrlTemplate, boot_link};

const DASH: &str = "\u{2013}";

/// Renderer of one boot table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Tree,
    Kernel,
    Board,
    Defconfig,
    Arch,
    Lab,
    Date,
    Status,
    /// Magnifier icon linking to the boot detail page.
    Detail,
}

impl Field {
    pub fn render(self, record: &Record, mode: RenderMode) -> Rendered {
        match mode {
            RenderMode::Sort => Rendered::Key(self.sort_key(record)),
            RenderMode::Filter => Rendered::Text(self.filter_text(record)),
            RenderMode::Display => Rendered::Markup(self.display(record)),
        }
    }

    pub fn sort_key(self, record: &Record) -> SortKey {
        match self {
            Field::Id => SortKey::Text(record.id.as_str().to_string()),
            Field::Tree => SortKey::text(tree_value(record).as_deref()),
            Field::Kernel => SortKey::text(record.kernel.as_deref()),
            Field::Board => SortKey::text(record.board.as_deref()),
            Field::Defconfig => SortKey::text(record.defconfig_full.as_deref()),
            Field::Arch => SortKey::text(record.arch.as_deref()),
            Field::Lab => SortKey::text(record.lab_name.as_deref()),
            Field::Date => match record.created_on {
                Some(ts) => SortKey::Timestamp(ts.millis),
                None => SortKey::Null,
            },
            Field::Status => SortKey::text(record.status.as_deref()),
            Field::Detail => SortKey::Null,
        }
    }

    pub fn filter_text(self, record: &Record) -> String {
        match self {
            Field::Date => record
                .created_on
                .and_then(format_iso_date)
                .unwrap_or_default(),
            Field::Detail => String::new(),
            Field::Tree => tree_value(record).unwrap_or_default(),
            _ => match self.sort_key(record) {
                SortKey::Text(text) => text,
                SortKey::Timestamp(ms) => ms.to_string(),
                SortKey::Null => String::new(),
            },
        }
    }

    pub fn display(self, record: &Record) -> Markup {
        match self {
            Field::Id => Markup::text(record.id.as_str()),
            Field::Tree => display_tree(record),
            Field::Kernel => {
                let kernel = record.kernel.as_deref().unwrap_or_default();
                linked(
                    format!(
                        "Boot reports for {} {} {}",
                        record.job.as_deref().unwrap_or_default(),
                        DASH,
                        kernel
                    ),
                    boot_link(record, BootLevel::Kernel),
                    vec![Markup::text(kernel)],
                )
            }
            Field::Board => {
                let board = record.board.as_deref().unwrap_or_default();
                linked(
                    format!("Boot reports for board {} with {}", board, job_kernel(record)),
                    boot_link(record, BootLevel::Board),
                    vec![Markup::text(board)],
                )
            }
            Field::Defconfig => {
                let defconfig = record.defconfig_full.as_deref().unwrap_or_default();
                linked(
                    format!(
                        "Boot reports for board {} with {} and {}",
                        record.board.as_deref().unwrap_or_default(),
                        job_kernel(record),
                        defconfig
                    ),
                    boot_link(record, BootLevel::Defconfig),
                    vec![Markup::text(defconfig)],
                )
            }
            Field::Arch => Markup::text(record.arch.as_deref().unwrap_or_default()),
            Field::Lab => Markup::small(record.lab_name.as_deref().unwrap_or_default()),
            Field::Date => display_date(record),
            Field::Status => BadgeCategory::from_raw(record.status.as_deref()).badge(),
            Field::Detail => display_detail(record),
        }
    }
}

fn tree_value(record: &Record) -> Option<String> {
    let job = record.job.as_deref()?;
    Some(match record.branch() {
        Some(branch) => format!("{} {}", job, branch),
        None => job.to_string(),
    })
}

fn job_kernel(record: &Record) -> String {
    format!(
        "{} {} {}",
        record.job.as_deref().unwrap_or_default(),
        DASH,
        record.kernel.as_deref().unwrap_or_default()
    )
}

/// Tooltip-wrapped table link, or the bare content when the record lacks
/// the segments the link needs.
fn linked(title: String, href: Option<String>, children: Vec<Markup>) -> Markup {
    match href {
        Some(href) => Markup::tooltip(title, Markup::table_link(href, children)),
        None => Markup::seq(children),
    }
}

fn display_tree(record: &Record) -> Markup {
    let job = record.job.as_deref().unwrap_or_default();
    let mut children = vec![Markup::text(job)];
    if let Some(branch) = record.branch() {
        children.push(Markup::text(format!(" {} ", DASH)));
        children.push(Markup::small(branch));
    }
    linked(
        format!("Boot reports for {}", job),
        boot_link(record, BootLevel::Job),
        children,
    )
}

pub(crate) fn display_date(record: &Record) -> Markup {
    match record.created_on.and_then(format_iso_date) {
        Some(date) => Markup::text(date),
        None => not_available(),
    }
}

pub(crate) fn not_available() -> Markup {
    Markup::tooltip("Not available", Markup::icon("fa fa-ban"))
}

fn display_detail(record: &Record) -> Markup {
    let Some(path) = UrlTemplate::boot_detail().fill(record) else {
        return Markup::Empty;
    };
    let title = format!(
        "Details for board {} with tree {} and {} ({})",
        record.board.as_deref().unwrap_or_default(),
        job_kernel(record),
        record.defconfig_full.as_deref().unwrap_or_default(),
        record.lab_name.as_deref().unwrap_or_default()
    );
    Markup::tooltip(
        title,
        Markup::link(
            format!("{}?_id={}", path, record.id),
            vec![Markup::icon("fa fa-search")],
        ),
    )
}
