//! Mapping of `<scan>` and `<precursorMz>` attributes onto [`ScanHeader`]

use std::str::FromStr;

use log::warn;
use quick_xml::events::BytesStart;

use super::binary::{ByteOrder, CompressionType, PeaksEncoding, Precision};
use super::error::MzXmlError;
use super::models::ScanHeader;

/// Read an attribute value as an owned string
pub(crate) fn get_attribute(e: &BytesStart, name: &str) -> Result<Option<String>, MzXmlError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| MzXmlError::XmlError(quick_xml::Error::from(e)))?;
        if attr.key.as_ref() == name.as_bytes() {
            let raw = std::str::from_utf8(&attr.value)?;
            let value = quick_xml::escape::unescape(raw)
                .map_err(quick_xml::Error::from)?
                .into_owned();
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// Parse a numeric attribute, zero when absent
fn numeric_attribute<T>(e: &BytesStart, name: &str) -> Result<T, MzXmlError>
where
    T: FromStr + Default,
{
    match get_attribute(e, name)? {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| MzXmlError::InvalidAttributeValue {
                name: name.to_string(),
                value,
            }),
        None => Ok(T::default()),
    }
}

/// Same as [`numeric_attribute`] but tries each name in turn
fn numeric_attribute_any<T>(e: &BytesStart, names: &[&str]) -> Result<T, MzXmlError>
where
    T: FromStr + Default,
{
    for name in names {
        if get_attribute(e, name)?.is_some() {
            return numeric_attribute(e, name);
        }
    }
    Ok(T::default())
}

fn text_attribute(e: &BytesStart, name: &str) -> Result<String, MzXmlError> {
    Ok(get_attribute(e, name)?.unwrap_or_default())
}

/// Fill the scan-level fields of `header` from a `<scan>` start tag
pub(crate) fn apply_scan_attributes(
    header: &mut ScanHeader,
    e: &BytesStart,
) -> Result<(), MzXmlError> {
    header.acquisition_num = numeric_attribute(e, "num")?;
    header.ms_level = numeric_attribute(e, "msLevel")?;
    header.peaks_count = numeric_attribute(e, "peaksCount")?;
    header.tot_ion_current = numeric_attribute(e, "totIonCurrent")?;
    header.base_peak_mz = numeric_attribute(e, "basePeakMz")?;
    header.base_peak_intensity = numeric_attribute(e, "basePeakIntensity")?;
    header.collision_energy = numeric_attribute(e, "collisionEnergy")?;
    header.compensation_voltage = numeric_attribute(e, "compensationVoltage")?;
    header.ionisation_energy = numeric_attribute(e, "ionisationEnergy")?;
    header.low_mz = numeric_attribute_any(e, &["lowMz", "startMz"])?;
    header.high_mz = numeric_attribute_any(e, &["highMz", "endMz"])?;
    header.scan_type = text_attribute(e, "scanType")?;
    header.filter_line = text_attribute(e, "filterLine")?;
    header.merged_scan = numeric_attribute(e, "merged")?;
    header.merged_result_scan_num = numeric_attribute(e, "mergedScanNum")?;
    header.merged_result_start_scan_num = numeric_attribute(e, "mergedResultStartScanNum")?;
    header.merged_result_end_scan_num = numeric_attribute(e, "mergedResultEndScanNum")?;

    if let Some(rt) = get_attribute(e, "retentionTime")? {
        header.retention_time =
            parse_duration_seconds(&rt).ok_or(MzXmlError::InvalidAttributeValue {
                name: "retentionTime".to_string(),
                value: rt,
            })?;
    }

    Ok(())
}

/// Fill the precursor fields of `header` from a `<precursorMz>` start tag
pub(crate) fn apply_precursor_attributes(
    header: &mut ScanHeader,
    e: &BytesStart,
) -> Result<(), MzXmlError> {
    header.precursor_scan_num = numeric_attribute(e, "precursorScanNum")?;
    header.precursor_intensity = numeric_attribute(e, "precursorIntensity")?;
    header.precursor_charge = numeric_attribute(e, "precursorCharge")?;

    let activation = text_attribute(e, "activationMethod")?;
    if !activation.is_empty() {
        header.activation_method = activation;
    }

    if let Some(charges) = get_attribute(e, "possibleCharges")? {
        header.possible_charges_array = parse_possible_charges(&charges);
        header.num_possible_charges = i32::try_from(header.possible_charges_array.len())
            .map_err(|_| MzXmlError::InvalidAttributeValue {
                name: "possibleCharges".to_string(),
                value: charges.clone(),
            })?;
        header.possible_charges = charges;
    }

    Ok(())
}

/// Read the encoding parameters from a `<peaks>` start tag
pub(crate) fn peaks_encoding(e: &BytesStart) -> Result<PeaksEncoding, MzXmlError> {
    let invalid = |name: &str, value: String| MzXmlError::InvalidAttributeValue {
        name: name.to_string(),
        value,
    };

    let mut encoding = PeaksEncoding::default();
    if let Some(value) = get_attribute(e, "precision")? {
        encoding.precision =
            Precision::from_attribute(&value).ok_or_else(|| invalid("precision", value))?;
    }
    if let Some(value) = get_attribute(e, "byteOrder")? {
        encoding.byte_order =
            ByteOrder::from_attribute(&value).ok_or_else(|| invalid("byteOrder", value))?;
    }
    if let Some(value) = get_attribute(e, "compressionType")? {
        encoding.compression = CompressionType::from_attribute(&value)
            .ok_or_else(|| invalid("compressionType", value))?;
    }
    for name in ["contentType", "pairOrder"] {
        if let Some(value) = get_attribute(e, name)? {
            if value != "m/z-int" {
                return Err(invalid(name, value));
            }
        }
    }

    Ok(encoding)
}

/// Parse an xs:duration such as `PT61.5S` or `PT1M1.5S` into seconds
pub fn parse_duration_seconds(value: &str) -> Option<f64> {
    let value = value.trim();
    let (negative, value) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };
    let rest = value.strip_prefix('P')?;

    let mut seconds = 0.0;
    let mut in_time = false;
    let mut number = String::new();
    for c in rest.chars() {
        match c {
            'T' => in_time = true,
            '0'..='9' | '.' => number.push(c),
            unit => {
                let amount: f64 = number.parse().ok()?;
                number.clear();
                seconds += amount
                    * match (in_time, unit) {
                        (false, 'D') => 86_400.0,
                        (true, 'H') => 3_600.0,
                        (true, 'M') => 60.0,
                        (true, 'S') => 1.0,
                        _ => return None,
                    };
            }
        }
    }
    if !number.is_empty() {
        return None;
    }

    Some(if negative { -seconds } else { seconds })
}

/// Highest charge kept in the possible-charge flags
pub const MAX_CHARGE: usize = 128;

/// Parse a comma separated charge list into per-charge flags.
///
/// The returned vector covers charges `1..=max`; entry `i` is set when
/// charge `i + 1` was listed. Charges above [`MAX_CHARGE`] are skipped.
pub fn parse_possible_charges(value: &str) -> Vec<bool> {
    let charges: Vec<usize> = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .filter_map(|token| match token.trim_start_matches('+').parse::<usize>() {
            Ok(charge) if charge > MAX_CHARGE => {
                warn!("Ignoring possible charge {} above {}", charge, MAX_CHARGE);
                None
            }
            Ok(charge) if charge > 0 => Some(charge),
            _ => {
                warn!("Ignoring unparsable possible charge {:?}", token);
                None
            }
        })
        .collect();

    let max = charges.iter().copied().max().unwrap_or(0);
    let mut flags = vec![false; max];
    for charge in charges {
        flags[charge - 1] = true;
    }
    flags
}
