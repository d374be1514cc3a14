//! Output formatters for scan results.
//!
//! Three presentations of the same [`ScanResult`] rows:
//! - [`table`]: aligned columns for the terminal (default view)
//! - [`txt`]: one pipe-delimited line per result
//! - [`csv`]: header plus rows for spreadsheet import
//!
//! Plus [`filter_by_language`], the presentation-layer language filter.
//! All formatters are pure serializations; no scan logic lives here.

pub mod csv;
pub mod table;
pub mod txt;

pub use csv::CsvOutput;
pub use table::TableOutput;
pub use txt::TxtOutput;

use crate::scan::ScanResult;

/// Keep only results whose language matches `filter`, compared
/// case-insensitively for exact equality. An empty (or all-whitespace)
/// filter passes everything.
#[must_use]
pub fn filter_by_language(results: &[ScanResult], filter: &str) -> Vec<ScanResult> {
    let filter = filter.trim().to_lowercase();
    if filter.is_empty() {
        return results.to_vec();
    }
    results
        .iter()
        .filter(|r| r.language.to_lowercase() == filter)
        .cloned()
        .collect()
}
