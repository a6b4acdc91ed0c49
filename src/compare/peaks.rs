//! Peak list comparison
//!
//! Peak lists are aligned by position only: peak `i` of the first list is
//! compared with peak `i` of the second. The m/z test is directional, a peak
//! is flagged when the first m/z exceeds the second by more than the
//! tolerance, never the other way round. Historical reports depend on this,
//! so it must not become an absolute difference.

use std::io::{self, Write};

use super::format::GFloat;
use crate::mzxml::{Peak, PeakList, ScanHeader};

/// Default m/z tolerance
pub const MZ_TOLERANCE: f64 = 1e-4;

/// Outcome of comparing the peaks of one scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeakComparison {
    /// All aligned peaks agree
    Identical,
    /// This many aligned peaks disagree
    Mismatched(usize),
    /// The headers declare different peak counts, both lists were dumped
    CountMismatch,
}

/// Whether two aligned peaks disagree
pub fn peaks_differ(first: &Peak, second: &Peak, tolerance: f64) -> bool {
    (first.mz - second.mz) > tolerance || first.intensity != second.intensity
}

/// Aligned peak pairs that disagree, limited to the first `count` positions
pub fn mismatched_peaks<'a>(
    first: &'a PeakList,
    second: &'a PeakList,
    count: usize,
    tolerance: f64,
) -> impl Iterator<Item = (&'a Peak, &'a Peak)> + 'a {
    first
        .iter()
        .zip(second.iter())
        .take(count)
        .filter(move |(a, b)| peaks_differ(a, b, tolerance))
}

/// Compare the peaks of scan `scan_number` and report differences to `out`.
///
/// When the headers declare different peak counts no peak values are
/// compared; both lists are dumped instead.
pub fn write_peak_comparison<W: Write>(
    out: &mut W,
    scan_number: u32,
    first_header: &ScanHeader,
    second_header: &ScanHeader,
    first: &PeakList,
    second: &PeakList,
    tolerance: f64,
) -> io::Result<PeakComparison> {
    if first_header.peaks_count != second_header.peaks_count {
        writeln!(out)?;
        writeln!(out, "Peaks count for scan {} differ", scan_number)?;
        write_peak_dump(out, first_header.peaks_count, first)?;
        writeln!(out, "---")?;
        write_peak_dump(out, second_header.peaks_count, second)?;
        return Ok(PeakComparison::CountMismatch);
    }

    let count = first_header.peaks_count.max(0) as usize;
    let mut mismatches = 0;
    for (a, b) in mismatched_peaks(first, second, count, tolerance) {
        if mismatches == 0 {
            writeln!(out)?;
            writeln!(out, "Peaks for scan {} differ", scan_number)?;
        }
        writeln!(
            out,
            "{} - {}\t{} - {}\t({} - {})",
            GFloat(a.mz),
            GFloat(a.intensity),
            GFloat(b.mz),
            GFloat(b.intensity),
            GFloat(a.mz - b.mz),
            GFloat(a.intensity - b.intensity)
        )?;
        mismatches += 1;
    }

    Ok(if mismatches == 0 {
        PeakComparison::Identical
    } else {
        PeakComparison::Mismatched(mismatches)
    })
}

/// Write `N peaks` followed by one `index\tm/z\tintensity` line per peak
pub fn write_peak_dump<W: Write>(out: &mut W, peaks_count: i32, peaks: &PeakList) -> io::Result<()> {
    writeln!(out, "{} peaks", peaks_count)?;
    for (i, peak) in peaks.iter().take(peaks_count.max(0) as usize).enumerate() {
        writeln!(out, "{}\t{}\t{}", i + 1, GFloat(peak.mz), GFloat(peak.intensity))?;
    }
    Ok(())
}
