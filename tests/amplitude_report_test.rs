//! Directory-level tests for the batch amplitude analyzer.

use servo_daq::analysis::{analyze_dir, summarize};
use std::path::Path;

fn write_csv(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn ranks_files_and_skips_invalid_ones() {
    let dir = tempfile::tempdir().unwrap();
    // Amplitude (20 - 0) / 2 = 10.
    write_csv(
        dir.path(),
        "wide.csv",
        "time_ms,position_step,position_deg,target_step\n\
         0,5,10,5\n\
         1,5,20,5\n\
         2,5,0,5\n",
    );
    // Amplitude 0: position_deg never moves.
    write_csv(
        dir.path(),
        "flat.csv",
        "time_ms,position_step,position_deg,target_step\n\
         0,5,5,5\n\
         1,5,5,5\n\
         2,5,5,5\n",
    );
    // Missing position_deg: skipped.
    write_csv(
        dir.path(),
        "missing.csv",
        "time_ms,position_step,target_step\n0,5,5\n",
    );
    // Never reaches the target: skipped.
    write_csv(
        dir.path(),
        "unreached.csv",
        "time_ms,position_step,position_deg,target_step\n0,1,5,9\n1,2,6,9\n",
    );
    // Not a CSV file: ignored by the scan.
    write_csv(dir.path(), "notes.txt", "hello");

    let results = analyze_dir(dir.path()).unwrap();
    assert_eq!(results.len(), 2);

    let summary = summarize(&results);
    assert!(summary.contains("Highest amplitude: 10.000 from wide.csv"));
    assert!(summary.contains("Lowest amplitude: 0.000 from flat.csv"));
}

#[test]
fn start_row_is_included_in_the_statistics() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(
        dir.path(),
        "run.csv",
        "time_ms,position_step,position_deg,target_step\n\
         0,0,1000,8\n\
         1,8,4,8\n\
         2,9,6,8\n",
    );

    let results = analyze_dir(dir.path()).unwrap();
    assert_eq!(results.len(), 1);
    // The huge pre-target excursion is excluded; range is [4, 6].
    assert_eq!(results[0].amplitude, 1.0);
    assert_eq!(results[0].mean, 5.0);
}

#[test]
fn short_rows_do_not_count_as_target_reached() {
    let dir = tempfile::tempdir().unwrap();
    // A truncated first row leaves both step cells missing; the file
    // must be skipped as never having reached its target, not analyzed
    // from the short row onward.
    write_csv(
        dir.path(),
        "short.csv",
        "time_ms,position_step,position_deg,target_step\n\
         0\n\
         1,2,50,9\n",
    );

    let results = analyze_dir(dir.path()).unwrap();
    assert!(results.is_empty());
    assert_eq!(summarize(&results), "No valid data found in any CSVs.");
}

#[test]
fn empty_directory_reports_no_valid_data() {
    let dir = tempfile::tempdir().unwrap();
    let results = analyze_dir(dir.path()).unwrap();
    assert_eq!(summarize(&results), "No valid data found in any CSVs.");
}
