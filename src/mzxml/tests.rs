use super::*;
use std::io::Cursor;

use base64::prelude::*;

fn encode_peaks(peaks: &[(f64, f64)]) -> String {
    let bytes: Vec<u8> = peaks
        .iter()
        .flat_map(|(mz, intensity)| [mz.to_be_bytes(), intensity.to_be_bytes()])
        .flatten()
        .collect();
    BASE64_STANDARD.encode(bytes)
}

/// Build an indexed document from pre-rendered `<scan>` elements
fn indexed_document(scans: &[(u32, String)]) -> String {
    let mut doc = String::from(
        "<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<mzXML xmlns=\"http://sashimi.sourceforge.net/schema_revision/mzXML_3.2\">\n  <msRun scanCount=\"2\">\n",
    );
    let mut offsets = Vec::new();
    for (num, element) in scans {
        doc.push_str("    ");
        offsets.push((*num, doc.len()));
        doc.push_str(element);
        doc.push('\n');
    }
    doc.push_str("  </msRun>\n  ");
    let index_offset = doc.len();
    doc.push_str("<index name=\"scan\">\n");
    for (num, offset) in offsets {
        doc.push_str(&format!("    <offset id=\"{}\">{}</offset>\n", num, offset));
    }
    doc.push_str(&format!(
        "  </index>\n  <indexOffset>{}</indexOffset>\n  <sha1>0</sha1>\n</mzXML>\n",
        index_offset
    ));
    doc
}

fn ms1_scan(num: u32, peaks: &[(f64, f64)]) -> String {
    format!(
        r#"<scan num="{num}" msLevel="1" peaksCount="{count}" polarity="+" scanType="Full" filterLine="FTMS + p NSI Full ms [350.00-1800.00]" retentionTime="PT{rt}S" lowMz="350" highMz="1800" basePeakMz="445.12" basePeakIntensity="1.5e6" totIonCurrent="3.2e7">
      <peaks precision="64" byteOrder="network" contentType="m/z-int" compressionType="none" compressedLen="0">{payload}</peaks>
    </scan>"#,
        num = num,
        count = peaks.len(),
        rt = num as f64 * 1.5,
        payload = encode_peaks(peaks),
    )
}

fn reader_for(doc: String) -> MzXmlReader<Cursor<Vec<u8>>> {
    MzXmlReader::new(Cursor::new(doc.into_bytes()), "test.mzXML").unwrap()
}

#[test]
fn test_read_ms1_scan() {
    let doc = indexed_document(&[
        (1, ms1_scan(1, &[(100.0, 10.0), (200.5, 0.0)])),
        (2, ms1_scan(2, &[(150.0, 3.0)])),
    ]);
    let mut reader = reader_for(doc);

    assert_eq!(reader.last_scan(), 2);
    assert!(reader.index().is_indexed());

    let (header, peaks) = reader.read_scan(1).unwrap();
    assert_eq!(header.seq_num, 1);
    assert_eq!(header.acquisition_num, 1);
    assert_eq!(header.ms_level, 1);
    assert_eq!(header.peaks_count, 2);
    assert_eq!(header.retention_time, 1.5);
    assert_eq!(header.scan_type, "Full");
    assert_eq!(header.base_peak_intensity, 1.5e6);
    assert_eq!(header.low_mz, 350.0);
    assert_eq!(peaks.peaks(), &[Peak::new(100.0, 10.0), Peak::new(200.5, 0.0)]);

    let (header, peaks) = reader.read_scan(2).unwrap();
    assert_eq!(header.retention_time, 3.0);
    assert_eq!(peaks.len(), 1);
}

#[test]
fn test_read_nested_msn_scan() {
    let ms2 = format!(
        r#"<scan num="2" msLevel="2" peaksCount="1" collisionEnergy="35" retentionTime="PT3.1S">
        <precursorMz precursorScanNum="1" precursorIntensity="2500" precursorCharge="2" possibleCharges="2,3" activationMethod="CID">445.3456</precursorMz>
        <peaks precision="64" byteOrder="network" pairOrder="m/z-int">{}</peaks>
      </scan>"#,
        encode_peaks(&[(300.25, 42.0)])
    );
    // scan 1 wraps scan 2
    let ms1 = format!(
        r#"<scan num="1" msLevel="1" peaksCount="1">
      <peaks precision="64" byteOrder="network" pairOrder="m/z-int">{}</peaks>
      {}
    </scan>"#,
        encode_peaks(&[(445.3, 9.0)]),
        ms2
    );
    let ms2_offset_in_ms1 = ms1.find("<scan num=\"2\"").unwrap();

    let mut doc = String::from("<mzXML><msRun>\n    ");
    let ms1_offset = doc.len();
    doc.push_str(&ms1);
    doc.push_str("\n  </msRun>\n  ");
    let index_offset = doc.len();
    doc.push_str(&format!(
        "<index name=\"scan\"><offset id=\"1\">{}</offset><offset id=\"2\">{}</offset></index>\n<indexOffset>{}</indexOffset></mzXML>",
        ms1_offset,
        ms1_offset + ms2_offset_in_ms1,
        index_offset
    ));

    let mut reader = reader_for(doc);

    let (parent, parent_peaks) = reader.read_scan(1).unwrap();
    assert_eq!(parent.ms_level, 1);
    assert_eq!(parent.precursor_mz, 0.0);
    assert_eq!(parent_peaks.peaks(), &[Peak::new(445.3, 9.0)]);

    let (child, child_peaks) = reader.read_scan(2).unwrap();
    assert_eq!(child.ms_level, 2);
    assert_eq!(child.collision_energy, 35.0);
    assert_eq!(child.precursor_scan_num, 1);
    assert_eq!(child.precursor_mz, 445.3456);
    assert_eq!(child.precursor_charge, 2);
    assert_eq!(child.precursor_intensity, 2500.0);
    assert_eq!(child.activation_method, "CID");
    assert_eq!(child.possible_charges, "2,3");
    assert_eq!(child.num_possible_charges, 3);
    assert_eq!(child.possible_charges_array, vec![false, true, true]);
    assert_eq!(child_peaks.peaks(), &[Peak::new(300.25, 42.0)]);
}

#[test]
fn test_file_position_is_offset() {
    let doc = indexed_document(&[(1, ms1_scan(1, &[])), (2, ms1_scan(2, &[]))]);
    let mut reader = reader_for(doc);
    let expected = reader.index().offset_of(2).unwrap();

    let (header, peaks) = reader.read_scan(2).unwrap();
    assert_eq!(header.file_position, expected);
    assert!(peaks.is_empty());
}

#[test]
fn test_missing_scan_is_an_error() {
    let doc = indexed_document(&[(1, ms1_scan(1, &[(1.0, 1.0)]))]);
    let mut reader = reader_for(doc);

    assert!(matches!(reader.read_scan(5), Err(MzXmlError::ScanNotIndexed(5))));
}

#[test]
fn test_unindexed_document() {
    let doc = format!(
        "<mzXML><msRun>\n{}\n{}\n</msRun></mzXML>",
        ms1_scan(1, &[(1.0, 2.0)]),
        ms1_scan(2, &[(3.0, 4.0), (5.0, 6.0)])
    );
    let mut reader = reader_for(doc);

    assert!(!reader.index().is_indexed());
    assert_eq!(reader.last_scan(), 2);
    let (header, peaks) = reader.read_scan(2).unwrap();
    assert_eq!(header.acquisition_num, 2);
    assert_eq!(peaks.len(), 2);
}

#[test]
fn test_peak_count_disagreement_uses_decoded_peaks() {
    let element = format!(
        r#"<scan num="1" msLevel="1" peaksCount="5"><peaks precision="64">{}</peaks></scan>"#,
        encode_peaks(&[(1.0, 2.0)])
    );
    let mut reader = reader_for(indexed_document(&[(1, element)]));

    let (header, peaks) = reader.read_scan(1).unwrap();
    assert_eq!(header.peaks_count, 5);
    assert_eq!(peaks.len(), 1);
}

#[test]
fn test_open_missing_file() {
    let err = MzXmlReader::open("/nonexistent/path/run.mzXML").err().unwrap();
    assert!(matches!(err, MzXmlError::IoError(_)));
}
