//! Row parsing, classification, extremum tracking, and CSV output.

pub mod classify;
pub mod extrema;
pub mod sink;

pub use classify::{classify_row, parse_numeric, split_row, RowClass};
pub use extrema::ColumnExtrema;
pub use sink::CsvSink;
