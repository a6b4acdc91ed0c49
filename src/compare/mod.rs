//! # Scan Comparison Module
//!
//! Compares two scan sources scan number by scan number and writes a plain
//! text report of every difference.
//!
//! ## Report Layout
//!
//! ```text
//! > first.mzXML
//! < second.mzXML
//!
//! Headers for scan 5 differ.
//! filterLine	FTMS + p NSI Full ms	ITMS + c NSI Full ms
//!
//! Peaks for scan 7 differ
//! 300 - 5	299 - 6	(1 - -1)
//!
//! Peaks count for scan 9 differ
//! 2 peaks
//! 1	100	10
//! 2	200	0
//! ---
//! 1 peaks
//! 1	100	10
//! ```
//!
//! All floating point values are rendered with [`GFloat`]. Identical inputs
//! produce only the two name lines.

mod driver;
mod error;
mod format;
mod header;
mod peaks;

pub use driver::{compare_sources, CompareOptions, ComparisonSummary};
pub use error::CompareError;
pub use format::{GFloat, SIGNIFICANT_DIGITS};
pub use header::{differing_fields, headers_equal, write_header_diff, FieldValue, HeaderField};
pub use peaks::{
    mismatched_peaks, peaks_differ, write_peak_comparison, write_peak_dump, PeakComparison,
    MZ_TOLERANCE,
};
