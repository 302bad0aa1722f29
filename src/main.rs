//! `servo_logger`: log serial lines to a CSV file.
//!
//! Reads delimiter-separated lines from a serial device, classifies the
//! first non-numeric row as a header, appends everything to a CSV file
//! with per-row flushing, and tracks the signed maximum-magnitude value
//! per column. Logging ends on the stop token, ctrl-c, or a fatal device
//! error; the extremum summary prints on every exit path.

use anyhow::Context;
use clap::Parser;
use servo_daq::config::Settings;
use servo_daq::data::CsvSink;
use servo_daq::device::SerialLineSource;
use servo_daq::error::DaqError;
use servo_daq::session::{LogSession, SessionOptions};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Log serial lines to a CSV file.
#[derive(Debug, Parser)]
#[command(name = "servo_logger", version, about)]
struct Cli {
    /// Output CSV filename.
    csvfile: Option<PathBuf>,

    /// Serial port (e.g. COM13 or /dev/ttyUSB0).
    #[arg(long)]
    port: Option<String>,

    /// Baud rate.
    #[arg(long)]
    baud: Option<u32>,

    /// Line that stops logging.
    #[arg(long)]
    stop_token: Option<String>,

    /// Append to the CSV instead of overwriting it.
    #[arg(long)]
    append: bool,

    /// CSV delimiter.
    #[arg(long)]
    delimiter: Option<char>,

    /// Settings file path.
    #[arg(long, default_value = "servo_daq.toml")]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let settings = Settings::load_from(&cli.config).context("failed to load settings")?;
    let port = cli.port.unwrap_or(settings.logger.port);
    let baud = cli.baud.unwrap_or(settings.logger.baud);
    let stop_token = cli.stop_token.unwrap_or(settings.logger.stop_token);
    let delimiter = cli.delimiter.unwrap_or(settings.logger.delimiter);
    let csvfile = cli.csvfile.unwrap_or(settings.logger.output);

    if !delimiter.is_ascii() {
        return Err(
            DaqError::Configuration("delimiter must be a single ASCII character".into()).into(),
        );
    }

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || running.store(false, Ordering::Relaxed))
            .context("failed to install interrupt handler")?;
    }

    // Device-open failure is fatal; nothing has been written yet.
    let mut source = SerialLineSource::open(
        &port,
        baud,
        Duration::from_millis(settings.logger.read_timeout_ms),
        Duration::from_millis(settings.logger.settle_ms),
    )?;

    let sink = CsvSink::create(&csvfile, delimiter as u8, cli.append)
        .with_context(|| format!("failed to open output file {}", csvfile.display()))?;
    let session = LogSession::new(
        sink,
        SessionOptions {
            stop_token,
            delimiter,
            append: cli.append,
            echo_lines: true,
        },
    );

    let summary = session.run(&mut source, &running)?;
    println!("\n{summary}");
    Ok(())
}
