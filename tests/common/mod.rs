//! mzXML fixture generation shared by the integration tests

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use base64::prelude::*;
use flate2::write::ZlibEncoder;
use flate2::Compression;

/// How a fixture stores its peak payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeakEncoding {
    /// 64-bit network order, uncompressed
    Plain64,
    /// 32-bit network order, zlib compressed
    Zlib32,
}

/// One scan of a fixture file
#[derive(Debug, Clone)]
pub struct FixtureScan {
    pub num: u32,
    pub ms_level: u32,
    pub retention_time: f64,
    pub filter_line: String,
    pub precursor_mz: Option<f64>,
    pub peaks: Vec<(f64, f64)>,
}

impl FixtureScan {
    pub fn new(num: u32, peaks: &[(f64, f64)]) -> Self {
        Self {
            num,
            ms_level: if num % 3 == 1 { 1 } else { 2 },
            retention_time: num as f64 * 2.5,
            filter_line: format!("FTMS + p NSI Full ms scan {}", num),
            precursor_mz: if num % 3 == 1 { None } else { Some(400.5 + num as f64) },
            peaks: peaks.to_vec(),
        }
    }

    fn render(&self, encoding: PeakEncoding) -> String {
        let precursor = match self.precursor_mz {
            Some(mz) => format!(
                "\n      <precursorMz precursorScanNum=\"1\" precursorIntensity=\"12000\" precursorCharge=\"2\" activationMethod=\"HCD\">{}</precursorMz>",
                mz
            ),
            None => String::new(),
        };
        let (precision, compression, payload) = match encoding {
            PeakEncoding::Plain64 => ("64", "none", encode_plain64(&self.peaks)),
            PeakEncoding::Zlib32 => ("32", "zlib", encode_zlib32(&self.peaks)),
        };
        format!(
            r#"<scan num="{num}" msLevel="{level}" peaksCount="{count}" polarity="+" retentionTime="PT{rt}S" filterLine="{filter}">{precursor}
      <peaks precision="{precision}" byteOrder="network" contentType="m/z-int" compressionType="{compression}">{payload}</peaks>
    </scan>"#,
            num = self.num,
            level = self.ms_level,
            count = self.peaks.len(),
            rt = self.retention_time,
            filter = self.filter_line,
            precursor = precursor,
            precision = precision,
            compression = compression,
            payload = payload,
        )
    }
}

fn encode_plain64(peaks: &[(f64, f64)]) -> String {
    let bytes: Vec<u8> = peaks
        .iter()
        .flat_map(|(mz, intensity)| [mz.to_be_bytes(), intensity.to_be_bytes()])
        .flatten()
        .collect();
    BASE64_STANDARD.encode(bytes)
}

fn encode_zlib32(peaks: &[(f64, f64)]) -> String {
    let bytes: Vec<u8> = peaks
        .iter()
        .flat_map(|&(mz, intensity)| [(mz as f32).to_be_bytes(), (intensity as f32).to_be_bytes()])
        .flatten()
        .collect();
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&bytes).unwrap();
    BASE64_STANDARD.encode(encoder.finish().unwrap())
}

/// Render a complete document, with a trailing scan index when `indexed`
pub fn render_document(scans: &[FixtureScan], encoding: PeakEncoding, indexed: bool) -> String {
    let mut doc = format!(
        "<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<mzXML xmlns=\"http://sashimi.sourceforge.net/schema_revision/mzXML_3.2\">\n  <msRun scanCount=\"{}\">\n",
        scans.len()
    );
    let mut offsets = Vec::new();
    for scan in scans {
        doc.push_str("    ");
        offsets.push((scan.num, doc.len()));
        doc.push_str(&scan.render(encoding));
        doc.push('\n');
    }
    doc.push_str("  </msRun>\n");

    if indexed {
        doc.push_str("  ");
        let index_offset = doc.len();
        doc.push_str("<index name=\"scan\">\n");
        for (num, offset) in offsets {
            doc.push_str(&format!("    <offset id=\"{}\">{}</offset>\n", num, offset));
        }
        doc.push_str(&format!(
            "  </index>\n  <indexOffset>{}</indexOffset>\n",
            index_offset
        ));
    }
    doc.push_str("</mzXML>\n");
    doc
}

/// Write an indexed, uncompressed fixture
pub fn write_mzxml(dir: &Path, name: &str, scans: &[FixtureScan]) -> PathBuf {
    write_mzxml_with(dir, name, scans, PeakEncoding::Plain64, true)
}

/// Write a fixture with explicit encoding and indexing
pub fn write_mzxml_with(
    dir: &Path,
    name: &str,
    scans: &[FixtureScan],
    encoding: PeakEncoding,
    indexed: bool,
) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, render_document(scans, encoding, indexed)).unwrap();
    path
}

/// `count` scans with three peaks each, the middle one at zero intensity.
/// Every value is exact in 32-bit floats.
pub fn sample_scans(count: u32) -> Vec<FixtureScan> {
    (1..=count)
        .map(|num| {
            let base = 100.0 + num as f64 * 0.5;
            FixtureScan::new(num, &[(base, 1000.0), (base + 50.25, 0.0), (base + 150.75, 250.5)])
        })
        .collect()
}
