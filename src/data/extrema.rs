//! Streaming per-column extremum tracking.
//!
//! The tracker keeps, per column index, the signed value with the largest
//! absolute magnitude seen so far. Column count grows lazily as wider rows
//! arrive and never shrinks. Columns that never received a numeric token
//! stay unset and render as "n/a".

use crate::data::classify::parse_numeric;

/// Per-column signed maximum-magnitude values over all rows seen.
#[derive(Debug, Default, Clone)]
pub struct ColumnExtrema {
    values: Vec<Option<f64>>,
}

impl ColumnExtrema {
    /// An empty tracker with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no row has ever widened the tracker.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Current column count.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Stored extrema, one entry per observed column index.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Fold one row of fields into the tracker.
    ///
    /// The tracker is first widened to the row's length, then each numeric
    /// token replaces the stored value at its index iff its absolute
    /// magnitude is strictly greater (ties keep the first-seen value).
    /// Non-numeric tokens contribute nothing.
    pub fn update<S: AsRef<str>>(&mut self, fields: &[S]) {
        if self.values.len() < fields.len() {
            self.values.resize(fields.len(), None);
        }
        for (slot, token) in self.values.iter_mut().zip(fields.iter()) {
            let Some(v) = parse_numeric(token.as_ref()) else {
                continue;
            };
            match slot {
                Some(best) if v.abs() <= best.abs() => {}
                _ => *slot = Some(v),
            }
        }
    }

    /// Render the summary printed at the end of a logging session.
    ///
    /// Labels come from the header row when it covers every tracked
    /// column; otherwise columns are labelled `col1..colN`.
    pub fn summary(&self, header: Option<&[String]>) -> String {
        if self.values.is_empty() {
            return "No data logged before stop.".to_string();
        }
        let mut out = String::from("Max magnitude per column (signed):");
        for (i, value) in self.values.iter().enumerate() {
            let label = match header {
                Some(labels) if labels.len() >= self.values.len() => labels[i].clone(),
                _ => format!("col{}", i + 1),
            };
            let rendered = match value {
                Some(v) => format_sig6(*v),
                None => "n/a".to_string(),
            };
            out.push_str(&format!("\n{label}: {rendered}"));
        }
        out
    }
}

/// Format a value with 6 significant digits, trimming trailing zeros.
///
/// Matches `%g` output: plain decimal while it stays readable, signed
/// two-digit exponent notation otherwise. Rounding that carries into a
/// new decade (999999.5 rounding to 1000000) is re-normalized so the
/// rendering never exceeds 6 significant digits.
pub fn format_sig6(v: f64) -> String {
    const SIG: i32 = 6;
    if v == 0.0 {
        return "0".to_string();
    }
    let exp = v.abs().log10().floor() as i32;
    if exp < -4 || exp >= SIG {
        return format_exponential(v, SIG);
    }
    let precision = (SIG - 1 - exp).max(0) as usize;
    let formatted = format!("{v:.precision$}");
    let int_digits = formatted
        .trim_start_matches('-')
        .split('.')
        .next()
        .unwrap_or("")
        .len() as i32;
    if int_digits > SIG {
        return format_exponential(v, SIG);
    }
    trim_fraction(&formatted).to_string()
}

/// `%g`-style exponent rendering: trimmed mantissa, signed two-digit
/// exponent (`1.23457e+06`).
fn format_exponential(v: f64, sig: i32) -> String {
    let formatted = format!("{:.*e}", (sig - 1) as usize, v);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let mantissa = trim_fraction(mantissa);
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(rest) => ('-', rest),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => formatted,
    }
}

/// Drop trailing zeros (and a bare trailing point) from a decimal string.
fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_signed_max_magnitude_per_column() {
        let mut extrema = ColumnExtrema::new();
        extrema.update(&row(&["1", "2"]));
        extrema.update(&row(&["-5", "3"]));
        extrema.update(&row(&["4", "-1"]));
        assert_eq!(extrema.values(), &[Some(-5.0), Some(3.0)]);
    }

    #[test]
    fn test_ties_keep_first_seen_value() {
        let mut extrema = ColumnExtrema::new();
        extrema.update(&row(&["-2"]));
        extrema.update(&row(&["2"]));
        assert_eq!(extrema.values(), &[Some(-2.0)]);
    }

    #[test]
    fn test_widening_rows_extend_with_unset() {
        let mut extrema = ColumnExtrema::new();
        extrema.update(&row(&["1"]));
        extrema.update(&row(&["2", "x", "7"]));
        assert_eq!(extrema.len(), 3);
        assert_eq!(extrema.values(), &[Some(2.0), None, Some(7.0)]);
    }

    #[test]
    fn test_specials_and_blanks_never_update() {
        let mut extrema = ColumnExtrema::new();
        extrema.update(&row(&["nan", "inf", "-inf", ""]));
        assert_eq!(extrema.values(), &[None, None, None, None]);
    }

    #[test]
    fn test_summary_uses_header_labels_when_wide_enough() {
        let mut extrema = ColumnExtrema::new();
        extrema.update(&row(&["3", "-9"]));
        let header = row(&["time_ms", "position_deg"]);
        let summary = extrema.summary(Some(&header));
        assert!(summary.contains("time_ms: 3"));
        assert!(summary.contains("position_deg: -9"));
    }

    #[test]
    fn test_summary_falls_back_to_col_labels() {
        let mut extrema = ColumnExtrema::new();
        extrema.update(&row(&["3", "-9"]));
        let narrow_header = row(&["time_ms"]);
        let summary = extrema.summary(Some(&narrow_header));
        assert!(summary.contains("col1: 3"));
        assert!(summary.contains("col2: -9"));
    }

    #[test]
    fn test_empty_tracker_summary() {
        let extrema = ColumnExtrema::new();
        assert_eq!(extrema.summary(None), "No data logged before stop.");
    }

    #[test]
    fn test_format_sig6() {
        assert_eq!(format_sig6(0.0), "0");
        assert_eq!(format_sig6(-5.0), "-5");
        assert_eq!(format_sig6(12345.6789), "12345.7");
        assert_eq!(format_sig6(0.000123456), "0.000123456");
        assert_eq!(format_sig6(1234567.0), "1.23457e+06");
        assert_eq!(format_sig6(0.5), "0.5");
        assert_eq!(format_sig6(0.00001), "1e-05");
    }

    #[test]
    fn test_format_sig6_decade_boundary_carry() {
        // Rounding carries 999999.5 into the next decade; the result must
        // switch to exponent notation instead of showing 7 digits.
        assert_eq!(format_sig6(999999.5), "1e+06");
        assert_eq!(format_sig6(-999999.5), "-1e+06");
    }
}
