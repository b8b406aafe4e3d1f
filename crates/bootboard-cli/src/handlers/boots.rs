use anyhow::Result;
use bootboard_engine::{
    Aggregator, CompletionMode, Direction, ErrorBanner, Resource, RunState, Table, TableStatus,
    boots_query,
};
use bootboard_types::DateRange;
use tracing::debug;

use super::{HandlerContext, Outcome};
use crate::presentation::view_models::{BootsViewModel, Guidance, StatusBadge};
use crate::presentation::CommandResultViewModel;

/// Table controls requested on the command line.
#[derive(Debug, Clone)]
pub struct BootsOptions {
    pub date_range: Option<DateRange>,
    pub search: Option<String>,
    pub page_len: Option<usize>,
    /// One-based.
    pub page: usize,
    pub sort_column: usize,
    pub direction: Direction,
    pub limit: Option<u64>,
    pub completion: Option<CompletionMode>,
}

pub async fn handle(ctx: &HandlerContext, options: BootsOptions) -> Result<Outcome> {
    let config = &ctx.config;
    let limit = options.limit.unwrap_or(config.max_query_limit);
    let date_range = options.date_range.unwrap_or(config.date_range);
    let completion = options.completion.unwrap_or(config.completion);
    let page_len = options.page_len.unwrap_or(config.page_len);

    let spec = boots_query(date_range, limit)?;
    let fetcher = ctx.fetcher()?;
    debug!(api_url = %config.api_url, %date_range, limit, %completion, "loading boot reports");

    let mut table = Table::new();
    let report = Aggregator::boots(&fetcher)
        .with_policy(completion.policy())
        .run(spec.clone(), &mut table)
        .await;

    if table.status() == &TableStatus::Ready {
        table.set_sort(options.sort_column, options.direction)?;
        table.set_page_len(page_len)?;
        if let Some(search) = &options.search {
            table.set_filter(search);
        }
        table.set_page(options.page.saturating_sub(1));
    }

    let banner = report
        .error
        .as_ref()
        .and_then(|e| ErrorBanner::for_error(Resource::BootReports, e));
    let state = report.state;

    let content = BootsViewModel {
        api_url: config.api_url.clone(),
        query: spec,
        report,
        banner,
        table: table.draw(),
    };
    let outcome = if content.failed() {
        Outcome::LoadFailed
    } else {
        Outcome::Success
    };

    let mut result = CommandResultViewModel::new(content);
    match state {
        RunState::Error => {
            result = result.with_suggestion(
                Guidance::new("Check the results API address").with_command("bootboard config show"),
            );
        }
        RunState::Stalled => {
            result = result.with_badge(StatusBadge::warning(
                "Some pages never arrived; the table may be incomplete",
            ));
        }
        _ => {}
    }

    ctx.render(result)?;
    Ok(outcome)
}
