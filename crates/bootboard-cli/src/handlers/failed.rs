use anyhow::Result;
use bootboard_engine::load_summary;

use super::{HandlerContext, Outcome};
use crate::presentation::CommandResultViewModel;
use crate::presentation::view_models::FailedViewModel;

pub async fn handle(ctx: &HandlerContext) -> Result<Outcome> {
    let fetcher = ctx.fetcher()?;
    let panels = load_summary(&fetcher).await;

    let content = FailedViewModel {
        api_url: ctx.config.api_url.clone(),
        panels,
    };
    let outcome = if content.failed() {
        Outcome::LoadFailed
    } else {
        Outcome::Success
    };

    ctx.render(CommandResultViewModel::new(content))?;
    Ok(outcome)
}
