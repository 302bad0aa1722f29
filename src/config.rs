//! Configuration loading for the toolkit.
//!
//! Settings are loaded from (in order of precedence):
//! 1. Environment variables prefixed with `SERVODAQ_`
//! 2. A TOML configuration file (default: `servo_daq.toml`)
//! 3. Built-in defaults
//!
//! Keys are nested with a double underscore in environment variables:
//!
//! ```text
//! SERVODAQ_LOGGER__PORT=/dev/ttyUSB0
//! SERVODAQ_LOGGER__BAUD=9600
//! SERVODAQ_ANALYSIS__DATA_DIR=./runs
//! ```
//!
//! CLI flags override everything here; the settings file only supplies
//! defaults for flags that were not given.

use crate::error::{AppResult, DaqError};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Serial logger settings.
    #[serde(default)]
    pub logger: LoggerSettings,
    /// Batch analysis settings.
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

/// Settings for the serial logging loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Serial port path (e.g. "/dev/ttyUSB0", "COM13").
    #[serde(default = "default_port")]
    pub port: String,
    /// Baud rate.
    #[serde(default = "default_baud")]
    pub baud: u32,
    /// Line that stops logging when received verbatim.
    #[serde(default = "default_stop_token")]
    pub stop_token: String,
    /// Field delimiter for both the incoming lines and the CSV output.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Default output CSV path.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Per-read timeout on the serial port in milliseconds.
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    /// Delay after opening the port, letting the board finish its
    /// auto-reset before data is trusted.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

/// Settings for the offline amplitude analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Directory scanned for CSV files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_port() -> String {
    "/dev/cu.usbmodem101".to_string()
}

fn default_baud() -> u32 {
    115_200
}

fn default_stop_token() -> String {
    "STOP".to_string()
}

fn default_delimiter() -> char {
    ','
}

fn default_output() -> PathBuf {
    PathBuf::from("experiment2.csv")
}

fn default_read_timeout_ms() -> u64 {
    1000
}

fn default_settle_ms() -> u64 {
    2000
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
            baud: default_baud(),
            stop_token: default_stop_token(),
            delimiter: default_delimiter(),
            output: default_output(),
            read_timeout_ms: default_read_timeout_ms(),
            settle_ms: default_settle_ms(),
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logger: LoggerSettings::default(),
            analysis: AnalysisSettings::default(),
        }
    }
}

impl Settings {
    /// Load configuration from `servo_daq.toml` and the environment.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load() -> AppResult<Self> {
        Self::load_from("servo_daq.toml")
    }

    /// Load configuration from a specific file path.
    pub fn load_from<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let settings: Self = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("SERVODAQ_").split("__"))
            .extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate values that parse but are logically invalid.
    pub fn validate(&self) -> AppResult<()> {
        if !self.logger.delimiter.is_ascii() {
            return Err(DaqError::Configuration(
                "delimiter must be a single ASCII character".to_string(),
            ));
        }
        if self.logger.baud == 0 {
            return Err(DaqError::Configuration("baud rate must be non-zero".to_string()));
        }
        if self.logger.stop_token.trim().is_empty() {
            return Err(DaqError::Configuration("stop token must be non-empty".to_string()));
        }
        Ok(())
    }
}
