//! `bootboard` command-line dashboard.
//!
//! Commands resolve configuration, run one aggregation (or the failed
//! results summary) on a current-thread runtime and render the result as
//! plain text, JSON or HTML.

mod args;
mod commands;
pub mod config;
mod handlers;
mod logging;
pub mod presentation;
pub mod types;

pub use args::{Cli, Commands, ConfigCommand};
pub use commands::run;
pub use handlers::Outcome;
