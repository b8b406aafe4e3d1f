//! Failed-results summary: three single-request panels of recent failures.

use bootboard_client::PageFetcher;
use bootboard_types::{DateRange, QuerySpec, Record, SortOrder};
use serde::Serialize;
use tracing::{debug, warn};

use crate::banner::{ErrorBanner, Resource};
use crate::render::Markup;
use crate::render::field::{display_date, not_available};
use crate::table::ERROR_MESSAGE;
use crate::url::{defconfig_boot_link, job_link};

const DASH: &str = "\u{2013}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Builds,
    Jobs,
    Boots,
}

impl PanelKind {
    pub const ALL: [PanelKind; 3] = [PanelKind::Builds, PanelKind::Jobs, PanelKind::Boots];

    pub fn endpoint(self) -> &'static str {
        match self {
            PanelKind::Builds => "/_ajax/defconf",
            PanelKind::Jobs => "/_ajax/job",
            PanelKind::Boots => "/_ajax/boot",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PanelKind::Builds => "Failed Builds",
            PanelKind::Jobs => "Failed Jobs",
            PanelKind::Boots => "Failed Boot Reports",
        }
    }

    pub fn resource(self) -> Resource {
        match self {
            PanelKind::Builds => Resource::Defconfigs,
            PanelKind::Jobs => Resource::Jobs,
            PanelKind::Boots => Resource::BootReports,
        }
    }

    pub fn headers(self) -> &'static [&'static str] {
        match self {
            PanelKind::Builds | PanelKind::Jobs => &["Tree \u{2013} Branch", "Kernel", "Date", ""],
            PanelKind::Boots => &["Tree", "Kernel", "Board", "Defconfig", "Date", ""],
        }
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            PanelKind::Builds => "No failed builds.",
            PanelKind::Jobs => "No failed jobs.",
            PanelKind::Boots => "No failed boot reports.",
        }
    }

    pub fn query(self) -> QuerySpec {
        let (limit, date_range, fields): (u64, Option<DateRange>, &[&str]) = match self {
            PanelKind::Builds => (
                5,
                Some(DateRange::Days(15)),
                &["job", "kernel", "metadata", "created_on"],
            ),
            PanelKind::Jobs => (
                5,
                Some(DateRange::Days(15)),
                &["job", "kernel", "created_on", "metadata"],
            ),
            PanelKind::Boots => (
                15,
                None,
                &["board", "job", "kernel", "defconfig", "created_on"],
            ),
        };
        QuerySpec {
            sort: "created_on".to_string(),
            sort_order: SortOrder::Descending,
            date_range,
            limit,
            status: Some("FAIL".to_string()),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Display cells of one summary row.
    pub fn row(self, record: &Record) -> Vec<Markup> {
        let job = record.job.as_deref().unwrap_or_default();
        let kernel = record.kernel.as_deref().unwrap_or_default();
        match self {
            PanelKind::Builds | PanelKind::Jobs => {
                let mut tree = vec![Markup::text(job)];
                if let Some(branch) = record.branch() {
                    tree.push(Markup::text(format!(" {} ", DASH)));
                    tree.push(Markup::small(branch));
                }
                vec![
                    Markup::seq(tree),
                    Markup::text(kernel),
                    display_date(record),
                    detail(
                        format!("Details for job {} {} {}", job, DASH, kernel),
                        job_link(record),
                    ),
                ]
            }
            PanelKind::Boots => {
                let board = record.board.as_deref().unwrap_or_default();
                vec![
                    Markup::text(job),
                    Markup::text(kernel),
                    Markup::text(board),
                    Markup::text(record.defconfig.as_deref().unwrap_or_default()),
                    display_date(record),
                    detail(
                        format!("Details for board {}", board),
                        defconfig_boot_link(record),
                    ),
                ]
            }
        }
    }
}

fn detail(title: String, href: Option<String>) -> Markup {
    match href {
        Some(href) => Markup::tooltip(title, Markup::link(href, vec![Markup::icon("fa fa-search")])),
        None => not_available(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PanelOutcome {
    Rows { rows: Vec<Vec<Markup>> },
    Empty { message: String },
    Error {
        message: String,
        banner: Option<ErrorBanner>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub kind: PanelKind,
    pub title: &'static str,
    pub headers: &'static [&'static str],
    #[serde(flatten)]
    pub outcome: PanelOutcome,
}

impl Panel {
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, PanelOutcome::Error { .. })
    }

    pub fn banner(&self) -> Option<&ErrorBanner> {
        match &self.outcome {
            PanelOutcome::Error { banner, .. } => banner.as_ref(),
            _ => None,
        }
    }
}

/// Load one panel with a single request. Failures land in the panel.
pub async fn load_panel<F: PageFetcher>(fetcher: &F, kind: PanelKind) -> Panel {
    let spec = kind.query();
    let outcome = match fetcher.fetch(kind.endpoint(), &spec.page(0)).await {
        Ok(page) if page.is_empty() => PanelOutcome::Empty {
            message: kind.empty_message().to_string(),
        },
        Ok(page) => {
            debug!(panel = ?kind, rows = page.result.len(), "panel loaded");
            PanelOutcome::Rows {
                rows: page.result.iter().map(|r| kind.row(r)).collect(),
            }
        }
        Err(error) => {
            warn!(panel = ?kind, endpoint = kind.endpoint(), %error, "panel failed");
            PanelOutcome::Error {
                message: ERROR_MESSAGE.to_string(),
                banner: ErrorBanner::for_error(kind.resource(), &error),
            }
        }
    };

    Panel {
        kind,
        title: kind.title(),
        headers: kind.headers(),
        outcome,
    }
}

/// Load every panel concurrently, in [`PanelKind::ALL`] order.
pub async fn load_summary<F: PageFetcher>(fetcher: &F) -> Vec<Panel> {
    let (builds, jobs, boots) = futures::join!(
        load_panel(fetcher, PanelKind::Builds),
        load_panel(fetcher, PanelKind::Jobs),
        load_panel(fetcher, PanelKind::Boots),
    );
    vec![builds, jobs, boots]
}

#[cfg(test)]
mod tests {
    use super::*;
    use bootboard_types::{Metadata, Timestamp};

    #[test]
    fn test_builds_query_pairs() {
        let spec = PanelKind::Builds.query();
        let pairs = spec.page(0).query_pairs();
        assert!(pairs.contains(&("status", "FAIL".to_string())));
        assert!(pairs.contains(&("date_range", "15".to_string())));
        assert!(pairs.contains(&("limit", "5".to_string())));
        assert_eq!(pairs.iter().filter(|(k, _)| *k == "field").count(), 4);
    }

    #[test]
    fn test_boots_query_has_no_date_range() {
        let spec = PanelKind::Boots.query();
        assert_eq!(spec.limit, 15);
        assert_eq!(spec.date_range, None);
    }

    #[test]
    fn test_job_row_cells() {
        let mut record = Record::new("a1");
        record.job = Some("next".into());
        record.kernel = Some("next-20170322".into());
        record.created_on = Some(Timestamp::from_millis(1_490_201_438_000));
        record.metadata = Some(Metadata {
            git_branch: Some("master".into()),
        });

        let row = PanelKind::Jobs.row(&record);
        assert_eq!(row.len(), PanelKind::Jobs.headers().len());
        assert_eq!(row[0].text_content(), "next \u{2013} master");
        assert_eq!(row[2].text_content(), "2017-03-22");
        assert_eq!(row[3].href(), Some("/job/next/kernel/next-20170322/"));
    }

    #[test]
    fn test_boot_row_without_defconfig_has_no_link() {
        let mut record = Record::new("b1");
        record.board = Some("panda".into());
        record.job = Some("next".into());
        record.kernel = Some("k".into());

        let row = PanelKind::Boots.row(&record);
        assert_eq!(row.len(), 6);
        assert_eq!(row[5].href(), None);
        assert_eq!(row[4], not_available());
    }
}
