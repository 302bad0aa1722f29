//! Token parsing and header/data row classification.
//!
//! A row is a header only while no data row has been seen; once the first
//! fully numeric row arrives, every later row is data, even if it contains
//! non-numeric tokens. The caller owns the "saw a data row" flag (see
//! [`crate::session::LogSession`]).

/// Classification of an incoming row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowClass {
    /// Column labels, not data.
    Header,
    /// A data row.
    Data,
}

/// Parse a token as a finite numeric value.
///
/// Empty tokens and any spelling of NaN or infinity are treated as "no
/// value" rather than as numeric specials, so they never participate in
/// magnitude comparisons.
pub fn parse_numeric(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

/// Split a raw line into trimmed fields on the given delimiter.
pub fn split_row(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter).map(|t| t.trim().to_string()).collect()
}

/// Classify a row of fields.
///
/// Before the first data row, any non-numeric token makes the row a
/// header. After that the question no longer arises and every row is data.
pub fn classify_row(fields: &[String], saw_data_row: bool) -> RowClass {
    if !saw_data_row && fields.iter().any(|t| parse_numeric(t).is_none()) {
        RowClass::Header
    } else {
        RowClass::Data
    }
}
