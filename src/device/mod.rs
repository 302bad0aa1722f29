//! Line-oriented device boundary.
//!
//! The logging loop only needs "read a line or time out"; the actual
//! transport lives behind [`LineSource`]. The serial implementation is
//! compiled in with the `instrument_serial` feature, mirroring how the
//! rest of the toolkit gates hardware support. [`MockLineSource`] replays
//! scripted traffic for tests.

pub mod mock;
pub mod serial;

pub use mock::MockLineSource;
pub use serial::SerialLineSource;

use crate::error::AppResult;

/// One read attempt against a line source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadEvent {
    /// A complete line, lossily decoded and trimmed.
    Line(String),
    /// Nothing arrived within the read timeout; retry.
    TimedOut,
    /// The source will produce no further lines.
    Closed,
}

/// A blocking, line-oriented byte stream.
pub trait LineSource {
    /// Block until a full line arrives, the read times out, or the
    /// source closes.
    fn read_line(&mut self) -> AppResult<ReadEvent>;
}
