//! Core library for the servo_daq toolkit.
//!
//! This library contains the line classification, extremum tracking, CSV
//! sink, and amplitude analysis logic shared by the `servo_logger`,
//! `quick_log`, and `amplitude_report` binaries. The serial device layer
//! is gated behind the `instrument_serial` feature.

pub mod analysis;
pub mod config;
pub mod data;
pub mod device;
pub mod error;
pub mod session;
