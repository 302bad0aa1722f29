//! `quick_log`: the no-flags logger.
//!
//! Opens the configured port, echoes every non-empty line, and appends
//! its fields to `experiment1.csv` until interrupted. No header
//! classification, no extremum tracking; use `servo_logger` for that.

use anyhow::Context;
use servo_daq::config::Settings;
use servo_daq::data::{split_row, CsvSink};
use servo_daq::device::{LineSource, ReadEvent, SerialLineSource};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const OUTPUT: &str = "experiment1.csv";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let settings = Settings::load().context("failed to load settings")?;

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || running.store(false, Ordering::Relaxed))
            .context("failed to install interrupt handler")?;
    }

    let mut source = SerialLineSource::open(
        &settings.logger.port,
        settings.logger.baud,
        Duration::from_millis(settings.logger.read_timeout_ms),
        Duration::from_millis(settings.logger.settle_ms),
    )?;
    let mut sink = CsvSink::create(OUTPUT, settings.logger.delimiter as u8, false)?;

    while running.load(Ordering::Relaxed) {
        match source.read_line() {
            Ok(ReadEvent::TimedOut) => continue,
            Ok(ReadEvent::Closed) => break,
            Ok(ReadEvent::Line(line)) => {
                if line.is_empty() {
                    continue;
                }
                let fields = split_row(&line, settings.logger.delimiter);
                if let Err(e) = sink.append_row(&fields) {
                    log::warn!("Skipped line due to error: {e}");
                    continue;
                }
                println!("{line}");
            }
            Err(e) => {
                log::warn!("Skipped read due to error: {e}");
                continue;
            }
        }
    }

    sink.finish()?;
    Ok(())
}
