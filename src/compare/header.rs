//! Scan header comparison
//!
//! Every content field of [`ScanHeader`] is compared with exact equality,
//! floats included. `file_position` is ignored: it reflects where a scan
//! sits in its file, not what it contains.

use std::fmt;
use std::io::{self, Write};

use super::format::GFloat;
use crate::mzxml::ScanHeader;

/// A compared header field, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
    /// `seqNum`
    SeqNum,
    /// `acquisitionNum`
    AcquisitionNum,
    /// `msLevel`
    MsLevel,
    /// `peaksCount`
    PeaksCount,
    /// `totIonCurrent`
    TotIonCurrent,
    /// `retentionTime`
    RetentionTime,
    /// `basePeakMZ`
    BasePeakMz,
    /// `basePeakIntensity`
    BasePeakIntensity,
    /// `collisionEnergy`
    CollisionEnergy,
    /// `compensationVoltage`
    CompensationVoltage,
    /// `ionisationEnergy`
    IonisationEnergy,
    /// `lowMZ`
    LowMz,
    /// `highMZ`
    HighMz,
    /// `precursorScanNum`
    PrecursorScanNum,
    /// `precursorMZ`
    PrecursorMz,
    /// `precursorCharge`
    PrecursorCharge,
    /// `precursorIntensity`
    PrecursorIntensity,
    /// `scanType`
    ScanType,
    /// `activationMethod`
    ActivationMethod,
    /// `possibleCharges`
    PossibleCharges,
    /// `numPossibleCharges`
    NumPossibleCharges,
    /// `possibleChargesArray`
    PossibleChargesArray,
    /// `mergedScan`
    MergedScan,
    /// `mergedResultScanNum`
    MergedResultScanNum,
    /// `mergedResultStartScanNum`
    MergedResultStartScanNum,
    /// `mergedResultEndScanNum`
    MergedResultEndScanNum,
    /// `filterLine`
    FilterLine,
}

/// Borrowed value of one header field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Integer field
    Int(i32),
    /// Floating point field, compared exactly
    Float(f64),
    /// Text field
    Text(&'a str),
    /// Per-charge flags
    Flags(&'a [bool]),
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", GFloat(*v)),
            FieldValue::Text(v) => f.write_str(v),
            FieldValue::Flags(flags) => {
                // leading 0 stands for the unused charge-zero slot
                f.write_str("0")?;
                for &flag in flags.iter() {
                    f.write_str(if flag { "1" } else { "0" })?;
                }
                Ok(())
            }
        }
    }
}

impl HeaderField {
    /// All compared fields, in report order
    pub const ALL: [HeaderField; 27] = [
        HeaderField::SeqNum,
        HeaderField::AcquisitionNum,
        HeaderField::MsLevel,
        HeaderField::PeaksCount,
        HeaderField::TotIonCurrent,
        HeaderField::RetentionTime,
        HeaderField::BasePeakMz,
        HeaderField::BasePeakIntensity,
        HeaderField::CollisionEnergy,
        HeaderField::CompensationVoltage,
        HeaderField::IonisationEnergy,
        HeaderField::LowMz,
        HeaderField::HighMz,
        HeaderField::PrecursorScanNum,
        HeaderField::PrecursorMz,
        HeaderField::PrecursorCharge,
        HeaderField::PrecursorIntensity,
        HeaderField::ScanType,
        HeaderField::ActivationMethod,
        HeaderField::PossibleCharges,
        HeaderField::NumPossibleCharges,
        HeaderField::PossibleChargesArray,
        HeaderField::MergedScan,
        HeaderField::MergedResultScanNum,
        HeaderField::MergedResultStartScanNum,
        HeaderField::MergedResultEndScanNum,
        HeaderField::FilterLine,
    ];

    /// Name printed in the report
    pub fn name(self) -> &'static str {
        match self {
            HeaderField::SeqNum => "seqNum",
            HeaderField::AcquisitionNum => "acquisitionNum",
            HeaderField::MsLevel => "msLevel",
            HeaderField::PeaksCount => "peaksCount",
            HeaderField::TotIonCurrent => "totIonCurrent",
            HeaderField::RetentionTime => "retentionTime",
            HeaderField::BasePeakMz => "basePeakMZ",
            HeaderField::BasePeakIntensity => "basePeakIntensity",
            HeaderField::CollisionEnergy => "collisionEnergy",
            HeaderField::CompensationVoltage => "compensationVoltage",
            HeaderField::IonisationEnergy => "ionisationEnergy",
            HeaderField::LowMz => "lowMZ",
            HeaderField::HighMz => "highMZ",
            HeaderField::PrecursorScanNum => "precursorScanNum",
            HeaderField::PrecursorMz => "precursorMZ",
            HeaderField::PrecursorCharge => "precursorCharge",
            HeaderField::PrecursorIntensity => "precursorIntensity",
            HeaderField::ScanType => "scanType",
            HeaderField::ActivationMethod => "activationMethod",
            HeaderField::PossibleCharges => "possibleCharges",
            HeaderField::NumPossibleCharges => "numPossibleCharges",
            HeaderField::PossibleChargesArray => "possibleChargesArray",
            HeaderField::MergedScan => "mergedScan",
            HeaderField::MergedResultScanNum => "mergedResultScanNum",
            HeaderField::MergedResultStartScanNum => "mergedResultStartScanNum",
            HeaderField::MergedResultEndScanNum => "mergedResultEndScanNum",
            HeaderField::FilterLine => "filterLine",
        }
    }

    /// This field's value in `header`
    pub fn value(self, header: &ScanHeader) -> FieldValue<'_> {
        use FieldValue::{Flags, Float, Int, Text};

        match self {
            HeaderField::SeqNum => Int(header.seq_num),
            HeaderField::AcquisitionNum => Int(header.acquisition_num),
            HeaderField::MsLevel => Int(header.ms_level),
            HeaderField::PeaksCount => Int(header.peaks_count),
            HeaderField::TotIonCurrent => Float(header.tot_ion_current),
            HeaderField::RetentionTime => Float(header.retention_time),
            HeaderField::BasePeakMz => Float(header.base_peak_mz),
            HeaderField::BasePeakIntensity => Float(header.base_peak_intensity),
            HeaderField::CollisionEnergy => Float(header.collision_energy),
            HeaderField::CompensationVoltage => Float(header.compensation_voltage),
            HeaderField::IonisationEnergy => Float(header.ionisation_energy),
            HeaderField::LowMz => Float(header.low_mz),
            HeaderField::HighMz => Float(header.high_mz),
            HeaderField::PrecursorScanNum => Int(header.precursor_scan_num),
            HeaderField::PrecursorMz => Float(header.precursor_mz),
            HeaderField::PrecursorCharge => Int(header.precursor_charge),
            HeaderField::PrecursorIntensity => Float(header.precursor_intensity),
            HeaderField::ScanType => Text(&header.scan_type),
            HeaderField::ActivationMethod => Text(&header.activation_method),
            HeaderField::PossibleCharges => Text(&header.possible_charges),
            HeaderField::NumPossibleCharges => Int(header.num_possible_charges),
            HeaderField::PossibleChargesArray => Flags(&header.possible_charges_array),
            HeaderField::MergedScan => Int(header.merged_scan),
            HeaderField::MergedResultScanNum => Int(header.merged_result_scan_num),
            HeaderField::MergedResultStartScanNum => Int(header.merged_result_start_scan_num),
            HeaderField::MergedResultEndScanNum => Int(header.merged_result_end_scan_num),
            HeaderField::FilterLine => Text(&header.filter_line),
        }
    }

    /// Whether the two headers disagree on this field
    pub fn differs(self, first: &ScanHeader, second: &ScanHeader) -> bool {
        self.value(first) != self.value(second)
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether two headers agree on every compared field
pub fn headers_equal(first: &ScanHeader, second: &ScanHeader) -> bool {
    HeaderField::ALL.iter().all(|field| !field.differs(first, second))
}

/// Fields on which two headers disagree, in report order
pub fn differing_fields(first: &ScanHeader, second: &ScanHeader) -> Vec<HeaderField> {
    HeaderField::ALL
        .iter()
        .copied()
        .filter(|field| field.differs(first, second))
        .collect()
}

/// Write one `name\tfirst\tsecond` line per differing field.
///
/// Returns the number of lines written.
pub fn write_header_diff<W: Write>(
    out: &mut W,
    first: &ScanHeader,
    second: &ScanHeader,
) -> io::Result<usize> {
    let fields = differing_fields(first, second);
    for field in &fields {
        writeln!(
            out,
            "{}\t{}\t{}",
            field.name(),
            field.value(first),
            field.value(second)
        )?;
    }
    Ok(fields.len())
}
