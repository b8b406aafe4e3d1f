use anyhow::{Result, bail};

use super::{HandlerContext, Outcome};
use crate::config::Config;
use crate::presentation::CommandResultViewModel;
use crate::presentation::view_models::{ConfigViewModel, Guidance, StatusBadge};

pub fn show(ctx: &HandlerContext) -> Result<Outcome> {
    let path = ctx.config_path();
    let exists = path.exists();

    let mut result = CommandResultViewModel::new(ConfigViewModel {
        path: path.display().to_string(),
        exists,
        written: false,
        config: ctx.config.clone(),
    });
    if !exists {
        result = result.with_suggestion(
            Guidance::new("Create a config file with the defaults").with_command("bootboard config init"),
        );
    }

    ctx.render(result)?;
    Ok(Outcome::Success)
}

pub fn init(ctx: &HandlerContext, force: bool) -> Result<Outcome> {
    let path = ctx.config_path();
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let config = Config::default();
    config.save_to(&path)?;

    let result = CommandResultViewModel::new(ConfigViewModel {
        path: path.display().to_string(),
        exists: true,
        written: true,
        config,
    })
    .with_badge(StatusBadge::success("Configuration initialized"));

    ctx.render(result)?;
    Ok(Outcome::Success)
}
