//! Update command implementation
//!
//! Runs the whole maintenance step:
//! 1. Load `stubmerge.yaml` (if any) and apply flag overrides
//! 2. Refetch the stub packages into the input root with pip
//! 3. Consolidate the input root into the output root
//! 4. Print a summary

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use stubmerge::config::Config;
use stubmerge::fetch::PipFetcher;
use stubmerge::filesystem::HostFS;
use stubmerge::output::{render_summary, OutputConfig};
use stubmerge::pipeline::{self, Options};

/// Arguments for the update command
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Path to config file (defaults to stubmerge.yaml when present)
    #[arg(short, long, value_name = "PATH", env = "STUBMERGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Input root the packages are fetched into
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output root, deleted and rebuilt on every run
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Python interpreter used to run pip
    #[arg(long, value_name = "EXE", env = "STUBMERGE_PYTHON")]
    pub python: Option<String>,

    /// Reuse the existing input root instead of fetching
    #[arg(long)]
    pub skip_fetch: bool,

    /// Consolidate in memory and report, without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Suppress the summary
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the update command
pub fn execute(args: UpdateArgs, color_flag: &str) -> Result<()> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(input) = args.input {
        config.layout.input_root = input;
    }
    if let Some(output) = args.output {
        config.layout.output_root = output;
    }
    if let Some(python) = args.python {
        config.python = python;
    }
    config.validate()?;

    let out = OutputConfig::from_env_and_flag(color_flag);

    let report = if args.dry_run {
        let (_, report) = pipeline::dry_run(&config.layout).with_context(|| {
            format!(
                "Dry run over {} failed",
                config.layout.input_root.display()
            )
        })?;
        report
    } else {
        let options = Options {
            packages: config.package_specs()?,
            layout: config.layout.clone(),
            fetch: !args.skip_fetch,
        };
        let fetcher = PipFetcher::new(config.python.clone());
        pipeline::run(&mut HostFS, &fetcher, &options)?
    };

    if !args.quiet {
        print!(
            "{}",
            render_summary(&out, &report, &config.layout.output_root, args.dry_run)
        );
    }

    Ok(())
}
