//! Command line arguments

use chrono::NaiveDateTime;
use clap::Parser;
use std::path::PathBuf;
use tickmark_theme::ColorScheme;

/// A live clock icon. Writes `icon.png` and `title.txt` every minute and
/// reads `click`, `menu <id>`, `scheme <light|dark>` and `quit` from stdin.
#[derive(Debug, Parser)]
#[command(
    name = "tickmark",
    version,
    after_help = concat!("Project home: ", env!("CARGO_PKG_REPOSITORY"))
)]
pub struct Args {
    /// Config file (default: <config dir>/tickmark/tickmark.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory the icon files are written to (overrides the config file)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Preference file (overrides the config file)
    #[arg(long)]
    pub preferences: Option<PathBuf>,

    /// Keep preferences in memory only
    #[arg(long, conflicts_with = "preferences")]
    pub ephemeral: bool,

    /// Start the clock at a fixed local time, e.g. 2024-05-17T09:00:37
    #[arg(long, value_parser = parse_start_at)]
    pub start_at: Option<NaiveDateTime>,

    /// Pin the color scheme instead of following the OS
    #[arg(long)]
    pub scheme: Option<ColorScheme>,

    /// Log filter, e.g. `debug` or `tickmark_app=trace` (default: RUST_LOG, then info)
    #[arg(long)]
    pub log_level: Option<String>,
}

fn parse_start_at(value: &str) -> Result<NaiveDateTime, String> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| format!("expected YYYY-MM-DDTHH:MM[:SS], got {value:?}"))
}
