//! `amplitude_report`: rank logged CSV files by oscillation amplitude.
//!
//! Scans a folder of logged runs, finds where each run reached its target
//! step, computes the half peak-to-peak amplitude of `position_deg` from
//! there on, and reports the files with the highest and lowest amplitude.

use anyhow::Context;
use clap::Parser;
use servo_daq::analysis;
use servo_daq::config::Settings;
use std::path::PathBuf;

/// Compare logged runs by position amplitude.
#[derive(Debug, Parser)]
#[command(name = "amplitude_report", version, about)]
struct Cli {
    /// Folder containing the CSV files (defaults to the configured data dir).
    dir: Option<PathBuf>,

    /// Settings file path.
    #[arg(long, default_value = "servo_daq.toml")]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let settings = Settings::load_from(&cli.config).context("failed to load settings")?;
    let dir = cli.dir.unwrap_or(settings.analysis.data_dir);

    let results = analysis::analyze_dir(&dir)
        .with_context(|| format!("failed to scan directory {}", dir.display()))?;
    println!("\n{}", analysis::summarize(&results));
    Ok(())
}
