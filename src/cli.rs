//! CLI argument parsing and logging setup

use anyhow::Result;
use clap::Parser;

use crate::commands;

/// Fetch MicroPython stub packages and consolidate them into one stub tree
#[derive(Parser, Debug)]
#[command(name = "stubmerge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    update: commands::update::UpdateArgs,

    /// Colorize output (always, never, auto)
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "info",
        value_parser = ["off", "error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        commands::update::execute(self.update, &self.color)
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // Ignore the error from a logger that is already installed
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_is_a_full_run() {
        let cli = Cli::try_parse_from(["stubmerge"]).unwrap();
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.color, "auto");
        assert!(!cli.update.skip_fetch);
        assert!(!cli.update.dry_run);
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(Cli::try_parse_from(["stubmerge", "--log-level", "loud"]).is_err());
    }
}
