use crate::types::{CompletionArg, LogLevel, OutputFormat};
use bootboard_engine::BOOT_DATE_COLUMN;
use bootboard_types::DateRange;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bootboard")]
#[command(about = "Browse kernel CI boot reports and recent failures", long_about = None)]
#[command(version)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Directory holding config.toml (default: $BOOTBOARD_PATH or ~/.bootboard)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Results API base URL, overriding config and $BOOTBOARD_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load every boot report in a date range into one table
    Boots {
        /// Look-back window in days, or "max"
        #[arg(long, value_parser = parse_date_range)]
        date_range: Option<DateRange>,

        /// Case-insensitive search across the searchable columns
        #[arg(long)]
        search: Option<String>,

        /// Rows per page
        #[arg(long)]
        page_len: Option<usize>,

        /// Page to show, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Column index to sort on (7 is the date)
        #[arg(long, default_value_t = BOOT_DATE_COLUMN)]
        sort_column: usize,

        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,

        /// Records per request
        #[arg(long)]
        limit: Option<u64>,

        #[arg(long)]
        completion: Option<CompletionArg>,
    },

    /// Show the latest failed builds, jobs and boots
    Failed,

    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write a default config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_date_range(raw: &str) -> Result<DateRange, String> {
    raw.parse().map_err(|e: bootboard_types::Error| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boots_defaults() {
        let cli = Cli::try_parse_from(["bootboard", "boots"]).unwrap();
        match cli.command {
            Commands::Boots {
                date_range,
                page,
                sort_column,
                asc,
                ..
            } => {
                assert_eq!(date_range, None);
                assert_eq!(page, 1);
                assert_eq!(sort_column, BOOT_DATE_COLUMN);
                assert!(!asc);
            }
            _ => panic!("expected boots"),
        }
        assert_eq!(cli.format, OutputFormat::Plain);
    }

    #[test]
    fn test_date_range_values() {
        let cli = Cli::try_parse_from(["bootboard", "boots", "--date-range", "max"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Boots {
                date_range: Some(DateRange::Max),
                ..
            }
        ));

        assert!(Cli::try_parse_from(["bootboard", "boots", "--date-range", "soon"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["bootboard", "failed", "--format", "json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
