//! The logging session: one context object per run of the read loop.
//!
//! `LogSession` owns the classifier state, the extremum tracker, and the
//! CSV sink. The loop in [`LogSession::run`] keeps going through skipped
//! lines and read timeouts; it ends only on the stop token, an interrupt,
//! or the source closing, and every exit path funnels through
//! [`LogSession::finish`] exactly once.

use crate::data::{classify_row, split_row, ColumnExtrema, CsvSink, RowClass};
use crate::device::{LineSource, ReadEvent};
use crate::error::AppResult;
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};

/// Knobs for a logging session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Line that terminates the loop when received verbatim.
    pub stop_token: String,
    /// Field delimiter of the incoming lines.
    pub delimiter: char,
    /// In append mode the header row is not rewritten to the sink.
    pub append: bool,
    /// Echo every logged data line to stdout.
    pub echo_lines: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            stop_token: "STOP".to_string(),
            delimiter: ',',
            append: false,
            echo_lines: false,
        }
    }
}

/// Outcome of processing one incoming line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Stop token received; the loop must terminate.
    Stop,
    /// Header row recorded (and written unless appending).
    Header,
    /// Data row written and folded into the tracker.
    Data,
    /// Blank line, nothing to do.
    Ignored,
}

/// State for one run of the logging loop.
pub struct LogSession {
    sink: CsvSink,
    options: SessionOptions,
    extrema: ColumnExtrema,
    header: Option<Vec<String>>,
    saw_data_row: bool,
    rows_logged: u64,
}

impl LogSession {
    /// A fresh session writing to `sink`.
    pub fn new(sink: CsvSink, options: SessionOptions) -> Self {
        Self {
            sink,
            options,
            extrema: ColumnExtrema::new(),
            header: None,
            saw_data_row: false,
            rows_logged: 0,
        }
    }

    /// Classify one line and apply it.
    ///
    /// The stop token short-circuits before any classification or tracker
    /// update. Header-like rows keep overwriting the recorded header until
    /// the first data row latches classification to data for good.
    pub fn process_line(&mut self, line: &str) -> AppResult<LineOutcome> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(LineOutcome::Ignored);
        }
        if line == self.options.stop_token {
            return Ok(LineOutcome::Stop);
        }

        let fields = split_row(line, self.options.delimiter);
        if classify_row(&fields, self.saw_data_row) == RowClass::Header {
            if !self.options.append {
                self.sink.append_row(&fields)?;
            }
            info!("[header] {}", fields.join(&self.options.delimiter.to_string()));
            self.header = Some(fields);
            return Ok(LineOutcome::Header);
        }

        self.saw_data_row = true;
        self.extrema.update(&fields);
        self.sink.append_row(&fields)?;
        self.rows_logged += 1;
        Ok(LineOutcome::Data)
    }

    /// Drive the loop until stop token, interrupt, or source close.
    ///
    /// `running` is flipped by the interrupt handler; timeouts re-check it
    /// so an interrupt is honored within one read timeout. Line-level
    /// failures are logged and skipped, never fatal.
    pub fn run(mut self, source: &mut dyn LineSource, running: &AtomicBool) -> AppResult<String> {
        loop {
            if !running.load(Ordering::Relaxed) {
                info!("Interrupt received, halting logging");
                break;
            }
            match source.read_line() {
                Ok(ReadEvent::TimedOut) => continue,
                Ok(ReadEvent::Closed) => {
                    info!("Line source closed, halting logging");
                    break;
                }
                Ok(ReadEvent::Line(line)) => match self.process_line(&line) {
                    Ok(LineOutcome::Stop) => {
                        info!("Stop token received, halting logging");
                        break;
                    }
                    Ok(LineOutcome::Data) => {
                        if self.options.echo_lines {
                            println!("{line}");
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("Skipped line due to error: {e}");
                        continue;
                    }
                },
                Err(e) => {
                    warn!("Skipped read due to error: {e}");
                    continue;
                }
            }
        }
        self.finish()
    }

    /// Flush and close the sink, returning the extremum summary.
    pub fn finish(self) -> AppResult<String> {
        let summary = self.extrema.summary(self.header.as_deref());
        info!("Logged {} data row(s)", self.rows_logged);
        self.sink.finish()?;
        Ok(summary)
    }

    /// Number of data rows written so far.
    pub fn rows_logged(&self) -> u64 {
        self.rows_logged
    }
}
