//! CSV output with per-row durability.

use crate::error::AppResult;
use log::info;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Append-only CSV writer for classified rows.
///
/// Every record is flushed as soon as it is written so that a partial log
/// survives an abrupt termination of the process. Rows of differing width
/// are allowed; the device decides how many fields a line carries.
pub struct CsvSink {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl CsvSink {
    /// Open the sink, truncating the file unless `append` is set.
    pub fn create<P: AsRef<Path>>(path: P, delimiter: u8, append: bool) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = if append {
            OpenOptions::new().create(true).append(true).open(&path)?
        } else {
            File::create(&path)?
        };
        let writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_writer(file);
        info!(
            "CSV sink opened at '{}' ({})",
            path.display(),
            if append { "append" } else { "overwrite" }
        );
        Ok(Self { path, writer })
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one row and flush it to disk.
    pub fn append_row<S: AsRef<[u8]>>(&mut self, fields: &[S]) -> AppResult<()> {
        self.writer.write_record(fields)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Final flush; the file closes when the sink is dropped.
    pub fn finish(mut self) -> AppResult<()> {
        self.writer.flush()?;
        info!("CSV sink at '{}' closed", self.path.display());
        Ok(())
    }
}
