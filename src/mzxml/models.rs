//! Data models for mzXML scans
//!
//! These models hold one decoded scan at a time: the per-scan metadata
//! record and its peak list.

use std::collections::BTreeMap;

/// Metadata record for a single mzXML scan
///
/// Numeric fields that are absent from the source file default to zero,
/// text fields to the empty string. Content equality lives in
/// [`crate::compare::headers_equal`], which ignores `file_position`.
#[derive(Debug, Clone, Default)]
pub struct ScanHeader {
    /// Sequence number of the scan within the file (the requested scan number)
    pub seq_num: i32,

    /// Native acquisition number (`num` attribute)
    pub acquisition_num: i32,

    /// MS level (1 for MS1, 2 for MS2, etc.)
    pub ms_level: i32,

    /// Number of (m/z, intensity) pairs in the scan
    pub peaks_count: i32,

    /// Total ion current
    pub tot_ion_current: f64,

    /// Retention time in seconds
    pub retention_time: f64,

    /// Base peak m/z
    pub base_peak_mz: f64,

    /// Base peak intensity
    pub base_peak_intensity: f64,

    /// Collision energy
    pub collision_energy: f64,

    /// FAIMS compensation voltage
    pub compensation_voltage: f64,

    /// Ionisation energy
    pub ionisation_energy: f64,

    /// Lower bound of the scanned m/z range
    pub low_mz: f64,

    /// Upper bound of the scanned m/z range
    pub high_mz: f64,

    /// Scan number of the precursor scan
    pub precursor_scan_num: i32,

    /// Precursor m/z
    pub precursor_mz: f64,

    /// Precursor charge state
    pub precursor_charge: i32,

    /// Precursor intensity
    pub precursor_intensity: f64,

    /// Scan type (e.g. "Full", "SRM")
    pub scan_type: String,

    /// Activation method (e.g. "CID", "ETD")
    pub activation_method: String,

    /// Possible charges exactly as written in the file
    pub possible_charges: String,

    /// Number of charge states covered by `possible_charges_array`
    pub num_possible_charges: i32,

    /// `possible_charges_array[i]` is set when charge `i + 1` is listed
    pub possible_charges_array: Vec<bool>,

    /// Whether this scan is the result of merging several scans
    pub merged_scan: i32,

    /// Scan number of the merge result
    pub merged_result_scan_num: i32,

    /// First scan number of the merged range
    pub merged_result_start_scan_num: i32,

    /// Last scan number of the merged range
    pub merged_result_end_scan_num: i32,

    /// Vendor filter line
    pub filter_line: String,

    /// Byte offset of the scan in its file.
    ///
    /// Storage artefact, never part of a content comparison.
    pub file_position: u64,
}

/// A single (m/z, intensity) measurement
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Peak {
    /// Mass-to-charge ratio
    pub mz: f64,
    /// Signal intensity
    pub intensity: f64,
}

impl Peak {
    /// Create a new peak
    pub fn new(mz: f64, intensity: f64) -> Self {
        Self { mz, intensity }
    }
}

/// Ordered peak list of one scan, sorted by increasing m/z in the source file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeakList {
    peaks: Vec<Peak>,
}

impl PeakList {
    /// Create a peak list from already paired peaks
    pub fn new(peaks: Vec<Peak>) -> Self {
        Self { peaks }
    }

    /// Build a peak list from interleaved `m/z, intensity, m/z, ...` values.
    ///
    /// A trailing unpaired value is dropped.
    pub fn from_interleaved(values: &[f64]) -> Self {
        let peaks = values
            .chunks_exact(2)
            .map(|pair| Peak::new(pair[0], pair[1]))
            .collect();
        Self { peaks }
    }

    /// Number of peaks
    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    /// Whether the list holds no peaks
    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    /// Borrow the peaks
    pub fn peaks(&self) -> &[Peak] {
        &self.peaks
    }

    /// Iterate over the peaks
    pub fn iter(&self) -> std::slice::Iter<'_, Peak> {
        self.peaks.iter()
    }

    /// A new list without the peaks whose intensity is exactly zero
    pub fn without_zero_intensity(&self) -> Self {
        let peaks = self
            .peaks
            .iter()
            .filter(|p| p.intensity != 0.0)
            .copied()
            .collect();
        Self { peaks }
    }
}

impl<'a> IntoIterator for &'a PeakList {
    type Item = &'a Peak;
    type IntoIter = std::slice::Iter<'a, Peak>;

    fn into_iter(self) -> Self::IntoIter {
        self.peaks.iter()
    }
}

/// Byte offsets of scans keyed by scan number
#[derive(Debug, Clone, Default)]
pub struct ScanIndex {
    /// Scan number to byte offset of its `<scan>` element
    pub offsets: BTreeMap<u32, u64>,
    /// Offset of the `<index>` element, when the file carried one
    pub index_offset: Option<u64>,
}

impl ScanIndex {
    /// Whether the offsets came from an embedded index
    pub fn is_indexed(&self) -> bool {
        self.index_offset.is_some()
    }

    /// Highest scan number in the index, 0 when empty
    pub fn last_scan(&self) -> u32 {
        self.offsets.keys().next_back().copied().unwrap_or(0)
    }

    /// Number of indexed scans
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether no scans were indexed
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Offset of a scan
    pub fn offset_of(&self, scan_number: u32) -> Option<u64> {
        self.offsets.get(&scan_number).copied()
    }
}
