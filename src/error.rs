//! Custom error types for the toolkit.
//!
//! This module defines the primary error type, `DaqError`, using the
//! `thiserror` crate. Fatal conditions (device open failure, unreadable
//! configuration) surface through it. Token-level parse failures never do:
//! they are modelled as "no value" in the data layer, and line-level
//! failures are logged and skipped by the session loop.
//!
//! By using `#[from]`, `DaqError` can be seamlessly created from underlying
//! error types, simplifying error handling throughout the application with
//! the `?` operator.

use thiserror::Error;

/// Convenience alias for results using the application error type.
pub type AppResult<T> = std::result::Result<T, DaqError>;

#[allow(missing_docs)]
#[derive(Error, Debug)]
pub enum DaqError {
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("Configuration validation error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Device error: {0}")]
    Device(String),

    #[error("Serial support not enabled. Rebuild with --features instrument_serial")]
    SerialFeatureDisabled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DaqError::Device("port vanished".to_string());
        assert_eq!(err.to_string(), "Device error: port vanished");
    }

    #[test]
    fn test_validation_error_display() {
        let err = DaqError::Configuration("delimiter must be a single ASCII character".into());
        assert!(err.to_string().contains("validation"));
    }
}
