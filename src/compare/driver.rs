//! Scan-by-scan comparison of two sources

use std::fmt;
use std::io::Write;

use log::{debug, info};

use super::error::CompareError;
use super::header::{headers_equal, write_header_diff};
use super::peaks::{write_peak_comparison, PeakComparison, MZ_TOLERANCE};
use crate::source::{ScanLoader, ScanSource};

/// What to compare
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompareOptions {
    /// Compare scan headers
    pub headers: bool,
    /// Compare peak lists
    pub peaks: bool,
    /// Keep zero-intensity peaks in the peak comparison
    pub zero_intensity: bool,
    /// m/z tolerance of the peak comparison
    pub mz_tolerance: f64,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            headers: true,
            peaks: true,
            zero_intensity: true,
            mz_tolerance: MZ_TOLERANCE,
        }
    }
}

/// Counts of what a comparison reported
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonSummary {
    /// Scans visited
    pub scans_compared: u32,
    /// Scans whose headers differ
    pub header_mismatch_scans: u32,
    /// Scans with at least one differing peak
    pub peak_mismatch_scans: u32,
    /// Scans whose peak counts differ
    pub peak_count_mismatch_scans: u32,
    /// Differing peaks over all scans
    pub mismatched_peaks: usize,
}

impl ComparisonSummary {
    /// Whether any difference was reported
    pub fn has_differences(&self) -> bool {
        self.header_mismatch_scans > 0
            || self.peak_mismatch_scans > 0
            || self.peak_count_mismatch_scans > 0
    }
}

impl fmt::Display for ComparisonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} scans compared: {} with header differences, {} with peak differences ({} peaks), {} with peak count differences",
            self.scans_compared,
            self.header_mismatch_scans,
            self.peak_mismatch_scans,
            self.mismatched_peaks,
            self.peak_count_mismatch_scans
        )
    }
}

/// Compare two sources scan by scan, writing the report to `out`.
///
/// Both sources must hold the same number of scans; otherwise the counts are
/// reported and [`CompareError::ScanCountMismatch`] is returned before any
/// scan is read. Differences are not errors: they are written to `out` and
/// counted in the returned summary.
pub fn compare_sources<A, B, W>(
    first: &mut ScanSource<A>,
    second: &mut ScanSource<B>,
    options: &CompareOptions,
    out: &mut W,
) -> Result<ComparisonSummary, CompareError>
where
    A: ScanLoader,
    B: ScanLoader,
    W: Write,
{
    writeln!(out, "> {}", first.name())?;
    writeln!(out, "< {}", second.name())?;

    let total = first.total_scans();
    if total != second.total_scans() {
        writeln!(out, "Total number of scans in both files differ!")?;
        writeln!(out, "{} has {}", first.name(), total)?;
        writeln!(out, "{} has {}", second.name(), second.total_scans())?;
        writeln!(out, "Note that this assumes that scans are sequentially numbered.")?;
        writeln!(out, "If this is not the case use indexMzXML to fix files.")?;
        writeln!(out)?;

        return Err(CompareError::ScanCountMismatch {
            first: first.name().to_string(),
            first_scans: total,
            second: second.name().to_string(),
            second_scans: second.total_scans(),
        });
    }

    info!("Comparing {} scans ({:?})", total, options);
    let mut summary = ComparisonSummary::default();

    for scan_number in 1..=total {
        let mut first_header = first.header(scan_number)?.clone();
        let mut second_header = second.header(scan_number)?.clone();

        if options.headers && !headers_equal(&first_header, &second_header) {
            writeln!(out)?;
            writeln!(out, "Headers for scan {} differ.", scan_number)?;
            let fields = write_header_diff(out, &first_header, &second_header)?;
            debug!("scan {}: {} header fields differ", scan_number, fields);
            summary.header_mismatch_scans += 1;
        }

        if options.peaks {
            if !options.zero_intensity {
                first.filter_zero_intensity();
                second.filter_zero_intensity();

                // filtering changed peaks_count
                first_header = first.header(scan_number)?.clone();
                second_header = second.header(scan_number)?.clone();
            }

            let first_peaks = first.peaks(scan_number)?;
            let second_peaks = second.peaks(scan_number)?;
            match write_peak_comparison(
                out,
                scan_number,
                &first_header,
                &second_header,
                first_peaks,
                second_peaks,
                options.mz_tolerance,
            )? {
                PeakComparison::Identical => {}
                PeakComparison::Mismatched(count) => {
                    summary.peak_mismatch_scans += 1;
                    summary.mismatched_peaks += count;
                }
                PeakComparison::CountMismatch => summary.peak_count_mismatch_scans += 1,
            }
        }

        summary.scans_compared += 1;
    }

    info!("{}", summary);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mzxml::{Peak, PeakList, ScanHeader};
    use crate::source::MemoryLoader;

    fn scan(num: i32, peaks: &[(f64, f64)]) -> (ScanHeader, PeakList) {
        let header = ScanHeader {
            seq_num: num,
            acquisition_num: num,
            ms_level: 1,
            peaks_count: peaks.len() as i32,
            retention_time: num as f64 * 1.5,
            filter_line: "FTMS + p NSI Full ms".to_string(),
            ..Default::default()
        };
        let peaks = PeakList::new(peaks.iter().map(|&(mz, i)| Peak::new(mz, i)).collect());
        (header, peaks)
    }

    type Scans = Vec<(ScanHeader, PeakList)>;

    fn run(
        first: Scans,
        second: Scans,
        options: CompareOptions,
    ) -> (Result<ComparisonSummary, CompareError>, String) {
        let mut first = ScanSource::new(MemoryLoader::new("a.mzXML", first));
        let mut second = ScanSource::new(MemoryLoader::new("b.mzXML", second));
        let mut out = Vec::new();
        let result = compare_sources(&mut first, &mut second, &options, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    fn ten_scans() -> Scans {
        (1..=10)
            .map(|n| scan(n, &[(100.0 + n as f64, 10.0), (200.0, 0.0), (300.0, 5.0)]))
            .collect()
    }

    #[test]
    fn test_identical_sources() {
        let (result, text) = run(ten_scans(), ten_scans(), CompareOptions::default());
        let summary = result.unwrap();

        assert_eq!(text, "> a.mzXML\n< b.mzXML\n");
        assert_eq!(summary.scans_compared, 10);
        assert!(!summary.has_differences());
    }

    #[test]
    fn test_scan_count_mismatch_is_fatal() {
        let mut nine = ten_scans();
        nine.pop();
        let (result, text) = run(ten_scans(), nine, CompareOptions::default());

        assert!(matches!(
            result,
            Err(CompareError::ScanCountMismatch {
                first_scans: 10,
                second_scans: 9,
                ..
            })
        ));
        assert!(text.contains("Total number of scans in both files differ!\n"));
        assert!(text.contains("a.mzXML has 10\nb.mzXML has 9\n"));
        assert!(!text.contains("differ."));
    }

    #[test]
    fn test_single_filter_line_difference() {
        let mut second = ten_scans();
        second[4].0.filter_line = "ITMS + c NSI Full ms".to_string();
        let (result, text) = run(ten_scans(), second, CompareOptions::default());

        assert_eq!(
            text,
            "> a.mzXML\n< b.mzXML\n\n\
             Headers for scan 5 differ.\n\
             filterLine\tFTMS + p NSI Full ms\tITMS + c NSI Full ms\n"
        );
        let summary = result.unwrap();
        assert_eq!(summary.header_mismatch_scans, 1);
        assert!(summary.has_differences());
    }

    #[test]
    fn test_headers_can_be_skipped() {
        let mut second = ten_scans();
        second[2].0.retention_time = 99.0;
        let options = CompareOptions {
            headers: false,
            ..Default::default()
        };
        let (result, text) = run(ten_scans(), second, options);

        assert_eq!(text, "> a.mzXML\n< b.mzXML\n");
        assert!(!result.unwrap().has_differences());
    }

    #[test]
    fn test_peaks_can_be_skipped() {
        let mut second = ten_scans();
        second[0] = scan(1, &[(101.0, 11.0), (200.0, 0.0), (300.0, 5.0)]);
        let options = CompareOptions {
            peaks: false,
            ..Default::default()
        };
        let (result, _) = run(ten_scans(), second, options);
        assert_eq!(result.unwrap().peak_mismatch_scans, 0);
    }

    #[test]
    fn test_zero_intensity_peaks_count_by_default() {
        // second file dropped the zero-intensity peak of scan 2
        let mut second = ten_scans();
        second[1] = scan(2, &[(102.0, 10.0), (300.0, 5.0)]);
        let options = CompareOptions {
            headers: false,
            ..Default::default()
        };
        let (result, text) = run(ten_scans(), second, options);

        let summary = result.unwrap();
        assert_eq!(summary.peak_count_mismatch_scans, 1);
        assert!(text.contains("\nPeaks count for scan 2 differ\n3 peaks\n"));
        assert!(text.contains("---\n2 peaks\n1\t102\t10\n2\t300\t5\n"));
    }

    #[test]
    fn test_zero_intensity_peaks_can_be_excluded() {
        let mut second = ten_scans();
        second[1] = scan(2, &[(102.0, 10.0), (300.0, 5.0)]);
        let options = CompareOptions {
            headers: false,
            zero_intensity: false,
            ..Default::default()
        };
        let (result, text) = run(ten_scans(), second, options);

        assert_eq!(text, "> a.mzXML\n< b.mzXML\n");
        assert!(!result.unwrap().has_differences());
    }

    #[test]
    fn test_excluded_zero_intensity_peaks_leave_dump_filtered() {
        let mut second = ten_scans();
        second[1] = scan(2, &[(102.0, 10.0), (300.0, 5.0), (400.0, 0.0), (500.0, 1.0)]);
        let options = CompareOptions {
            headers: false,
            zero_intensity: false,
            ..Default::default()
        };
        let (result, text) = run(ten_scans(), second, options);

        assert_eq!(
            text,
            "> a.mzXML\n< b.mzXML\n\n\
             Peaks count for scan 2 differ\n\
             2 peaks\n1\t102\t10\n2\t300\t5\n\
             ---\n\
             3 peaks\n1\t102\t10\n2\t300\t5\n3\t500\t1\n"
        );
        assert_eq!(result.unwrap().peak_count_mismatch_scans, 1);
    }

    #[test]
    fn test_peak_mismatch_reported_once_per_scan() {
        let mut second = ten_scans();
        second[6] = scan(7, &[(107.0, 12.0), (200.0, 0.0), (299.0, 6.0)]);
        let (result, text) = run(ten_scans(), second, CompareOptions::default());

        assert_eq!(text.matches("Peaks for scan 7 differ").count(), 1);
        assert!(text.contains("107 - 10\t107 - 12\t(0 - -2)\n"));
        assert!(text.contains("300 - 5\t299 - 6\t(1 - -1)\n"));
        let summary = result.unwrap();
        assert_eq!(summary.peak_mismatch_scans, 1);
        assert_eq!(summary.mismatched_peaks, 2);
    }

    #[test]
    fn test_missing_scan_propagates() {
        let mut first = ScanSource::new(MemoryLoader::new("a.mzXML", ten_scans()));

        struct Gappy(MemoryLoader);
        impl ScanLoader for Gappy {
            fn name(&self) -> &str {
                self.0.name()
            }
            fn last_scan(&self) -> u32 {
                10
            }
            fn load_scan(
                &mut self,
                scan_number: u32,
            ) -> Result<(ScanHeader, PeakList), crate::source::SourceError> {
                self.0.load_scan(scan_number)
            }
        }

        let mut short = ten_scans();
        short.truncate(3);
        let mut second = ScanSource::new(Gappy(MemoryLoader::new("b.mzXML", short)));
        let mut out = Vec::new();
        let result = compare_sources(&mut first, &mut second, &CompareOptions::default(), &mut out);

        assert!(matches!(result, Err(CompareError::Source(_))));
    }
}
