use super::args::{Cli, Commands, ConfigCommand};
use super::handlers::{self, HandlerContext, Outcome};
use crate::config::{Config, resolve_data_dir};
use crate::handlers::boots::BootsOptions;
use crate::logging;
use anyhow::Result;
use bootboard_engine::Direction;

pub fn run(cli: Cli) -> Result<Outcome> {
    logging::init(cli.log_level);

    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let config = Config::load_from(&Config::path_in(&data_dir))?
        .with_overrides(cli.api_url.as_deref());
    let ctx = HandlerContext::new(data_dir, config, cli.format);

    match cli.command {
        Commands::Boots {
            date_range,
            search,
            page_len,
            page,
            sort_column,
            asc,
            limit,
            completion,
        } => {
            let options = BootsOptions {
                date_range,
                search,
                page_len,
                page,
                sort_column,
                direction: if asc { Direction::Asc } else { Direction::Desc },
                limit,
                completion: completion.map(Into::into),
            };
            block_on(handlers::boots::handle(&ctx, options))
        }

        Commands::Failed => block_on(handlers::failed::handle(&ctx)),

        Commands::Config { command } => match command {
            ConfigCommand::Show => handlers::config::show(&ctx),
            ConfigCommand::Init { force } => handlers::config::init(&ctx, force),
        },
    }
}

/// Drive one command on a single-threaded runtime.
fn block_on<F>(future: F) -> Result<Outcome>
where
    F: std::future::Future<Output = Result<Outcome>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}
