//! Offline amplitude analysis over a folder of logged CSV files.
//!
//! Each file is expected to carry the rig's standard columns. Analysis
//! starts at the first row where the commanded and measured step counts
//! agree (the servo has reached its target) and computes the mean and the
//! half peak-to-peak amplitude of `position_deg` from there on. Files
//! that cannot be analyzed are skipped with a warning and never affect
//! the ranking.

use crate::data::parse_numeric;
use crate::error::AppResult;
use log::{info, warn};
use std::path::Path;

/// Columns a logged file must contain to be analyzed.
pub const REQUIRED_COLUMNS: [&str; 4] = ["time_ms", "position_step", "position_deg", "target_step"];

/// Per-file analysis result.
#[derive(Debug, Clone, PartialEq)]
pub struct FileAmplitude {
    /// File name (not the full path).
    pub file: String,
    /// Half the peak-to-peak range of `position_deg` after the servo
    /// reached its target.
    pub amplitude: f64,
    /// Mean of `position_deg` over the same range.
    pub mean: f64,
}

/// Analyze a single CSV file.
///
/// Returns `Ok(None)` when the file is skipped: missing required columns,
/// never reaching the target, or no parsable `position_deg` values after
/// the start row. Each skip is logged.
pub fn analyze_file(path: &Path) -> AppResult<Option<FileAmplitude>> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let mut indices = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, col) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        match headers.iter().position(|h| h.trim() == col) {
            Some(i) => *slot = i,
            None => {
                warn!("Skipping {file_name}: missing required columns");
                return Ok(None);
            }
        }
    }
    let [_, position_step, position_deg, target_step] = indices;

    let mut reached_target = false;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut count = 0usize;

    for record in reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                warn!("{file_name}: skipped malformed row: {e}");
                continue;
            }
        };
        if !reached_target {
            let position = record.get(position_step).unwrap_or("");
            let target = record.get(target_step).unwrap_or("");
            if !cells_equal(position, target) {
                continue;
            }
            reached_target = true;
        }
        if let Some(v) = record.get(position_deg).and_then(parse_numeric) {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            count += 1;
        }
    }

    if !reached_target {
        warn!("{file_name}: never reached target_step");
        return Ok(None);
    }
    if count == 0 {
        warn!("{file_name}: no position_deg values after reaching target");
        return Ok(None);
    }

    Ok(Some(FileAmplitude {
        file: file_name,
        amplitude: (max - min) / 2.0,
        mean: sum / count as f64,
    }))
}

/// Equality predicate between two cells of the start condition.
///
/// Compares numerically when both cells parse, so "5" matches "5.0";
/// otherwise falls back to trimmed string equality. A missing or empty
/// cell never matches anything, so rows too short to carry both step
/// columns cannot satisfy the start condition.
fn cells_equal(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    if a.is_empty() || b.is_empty() {
        return false;
    }
    match (parse_numeric(a), parse_numeric(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

/// Analyze every `*.csv` file in a directory (non-recursive).
///
/// Files are visited in name order so reports are deterministic. Per-file
/// read errors are logged and skipped; only the directory scan itself can
/// fail.
pub fn analyze_dir(dir: &Path) -> AppResult<Vec<FileAmplitude>> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension()
                .map(|ext| ext.eq_ignore_ascii_case("csv"))
                .unwrap_or(false)
        })
        .collect();
    paths.sort();

    info!("Analyzing {} CSV file(s) in '{}'", paths.len(), dir.display());
    let mut results = Vec::new();
    for path in paths {
        match analyze_file(&path) {
            Ok(Some(result)) => results.push(result),
            Ok(None) => {}
            Err(e) => warn!("Skipping {}: {e}", path.display()),
        }
    }
    Ok(results)
}

/// Render the max/min amplitude report, 3 decimal digits per value.
pub fn summarize(results: &[FileAmplitude]) -> String {
    let mut best: Option<&FileAmplitude> = None;
    let mut worst: Option<&FileAmplitude> = None;
    for r in results {
        if best.map_or(true, |b| r.amplitude > b.amplitude) {
            best = Some(r);
        }
        if worst.map_or(true, |w| r.amplitude < w.amplitude) {
            worst = Some(r);
        }
    }
    match (best, worst) {
        (Some(best), Some(worst)) => format!(
            "Summary:\nHighest amplitude: {:.3} from {}\nLowest amplitude: {:.3} from {}",
            best.amplitude, best.file, worst.amplitude, worst.file
        ),
        _ => "No valid data found in any CSVs.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_amplitude_after_target_reached() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "a.csv",
            "time_ms,position_step,position_deg,target_step\n\
             0,0,99,10\n\
             1,10,10,10\n\
             2,10,20,10\n\
             3,10,0,10\n",
        );
        let result = analyze_file(&path).unwrap().unwrap();
        // Rows before the first position_step == target_step row are ignored.
        assert_eq!(result.amplitude, 10.0);
        assert_eq!(result.mean, 10.0);
    }

    #[test]
    fn test_missing_column_skips_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "a.csv", "time_ms,position_deg\n0,1\n");
        assert_eq!(analyze_file(&path).unwrap(), None);
    }

    #[test]
    fn test_never_reaching_target_skips_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "a.csv",
            "time_ms,position_step,position_deg,target_step\n0,1,5,10\n1,2,6,10\n",
        );
        assert_eq!(analyze_file(&path).unwrap(), None);
    }

    #[test]
    fn test_cells_equal_numeric_and_string() {
        assert!(cells_equal("5", "5.0"));
        assert!(cells_equal(" x ", "x"));
        assert!(!cells_equal("5", "6"));
        assert!(!cells_equal("x", "y"));
    }

    #[test]
    fn test_cells_equal_rejects_empty_cells() {
        assert!(!cells_equal("", ""));
        assert!(!cells_equal("  ", ""));
        assert!(!cells_equal("5", ""));
        assert!(!cells_equal("", "5"));
    }

    #[test]
    fn test_short_rows_never_satisfy_start_condition() {
        let dir = tempfile::tempdir().unwrap();
        // The first row is too short to carry the step columns; both
        // cells read as missing and must not count as target-reached.
        let path = write_csv(
            dir.path(),
            "short.csv",
            "time_ms,position_step,position_deg,target_step\n\
             0\n\
             1,2,50,9\n",
        );
        assert_eq!(analyze_file(&path).unwrap(), None);
    }

    #[test]
    fn test_summarize_ranks_files() {
        let results = vec![
            FileAmplitude {
                file: "a.csv".into(),
                amplitude: 10.0,
                mean: 10.0,
            },
            FileAmplitude {
                file: "b.csv".into(),
                amplitude: 0.0,
                mean: 5.0,
            },
        ];
        let summary = summarize(&results);
        assert!(summary.contains("Highest amplitude: 10.000 from a.csv"));
        assert!(summary.contains("Lowest amplitude: 0.000 from b.csv"));
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), "No valid data found in any CSVs.");
    }
}
