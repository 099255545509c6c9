//! # Output
//!
//! Renders the end-of-run summary. Markers are emoji when color is on and
//! bracketed tags otherwise.
//!
//! Color follows `--color=always|never|auto`. In auto mode it is disabled by
//! `NO_COLOR` (any value), `CLICOLOR=0`, `TERM=dumb` or a non-TTY stdout,
//! and forced on by `CLICOLOR_FORCE=1`.

use crate::consolidate::Report;
use std::env;
use std::fmt::Write;
use std::path::Path;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and the `--color` flag.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns `emoji_str` when colors are enabled, `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Summary printed after a successful run.
pub fn render_summary(
    config: &OutputConfig,
    report: &Report,
    output_root: &Path,
    dry_run: bool,
) -> String {
    let mut out = String::new();

    let headline = if dry_run {
        format!("{} Dry run, nothing written", emoji(config, "🔎", "[DRY]"))
    } else {
        format!(
            "{} Stubs consolidated into {}",
            emoji(config, "✅", "[OK]"),
            output_root.display()
        )
    };
    let _ = writeln!(out, "{}", headline);

    let _ = writeln!(out, "   seed directories: {}", report.seeded.join(", "));
    let _ = writeln!(out, "   modules copied:   {}", report.modules.len());
    let _ = writeln!(out, "   packages merged:  {}", report.packages.len());

    for name in &report.removed {
        let _ = writeln!(out, "{} Removed plain {}", emoji(config, "🧹", "[DEL]"), name);
    }

    out
}
