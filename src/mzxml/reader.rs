use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

use log::{debug, warn};
use quick_xml::events::Event;
use quick_xml::Reader;

use super::binary::{BinaryDecoder, PeaksEncoding};
use super::error::MzXmlError;
use super::header::{apply_precursor_attributes, apply_scan_attributes, peaks_encoding};
use super::index::{read_scan_index, DEFAULT_INPUT_BUFFER_SIZE};
use super::models::{PeakList, ScanHeader, ScanIndex};

/// Random-access reader for mzXML scans
///
/// The scan index is read once on open; each [`read_scan`](Self::read_scan)
/// seeks to the indexed offset and decodes a single scan.
pub struct MzXmlReader<R: BufRead + Seek = BufReader<File>> {
    reader: R,
    name: String,
    index: ScanIndex,
}

impl MzXmlReader<BufReader<File>> {
    /// Open an mzXML file with the default buffer size (64KB)
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MzXmlError> {
        Self::open_with_buffer_size(path, DEFAULT_INPUT_BUFFER_SIZE)
    }

    /// Open an mzXML file with a custom buffer size
    ///
    /// # Example
    /// ```rust,no_run
    /// use mzxml_diff::mzxml::MzXmlReader;
    ///
    /// let mut reader = MzXmlReader::open_with_buffer_size("run.mzXML", 256 * 1024)?;
    /// let (header, peaks) = reader.read_scan(1)?;
    /// println!("scan 1: MS{} with {} peaks", header.ms_level, peaks.len());
    /// # Ok::<(), mzxml_diff::mzxml::MzXmlError>(())
    /// ```
    pub fn open_with_buffer_size<P: AsRef<Path>>(
        path: P,
        buffer_size: usize,
    ) -> Result<Self, MzXmlError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(buffer_size, file);
        Self::new(reader, path.display().to_string())
    }
}

impl<R: BufRead + Seek> MzXmlReader<R> {
    /// Create a reader over any seekable source, reading its scan index
    pub fn new(mut reader: R, name: impl Into<String>) -> Result<Self, MzXmlError> {
        let name = name.into();
        let index = read_scan_index(&mut reader)?;
        debug!("{}: {} scans indexed", name, index.len());

        Ok(Self {
            reader,
            name,
            index,
        })
    }

    /// Name used in diagnostics (the file path for files)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scan index
    pub fn index(&self) -> &ScanIndex {
        &self.index
    }

    /// Highest indexed scan number
    pub fn last_scan(&self) -> u32 {
        self.index.last_scan()
    }

    /// Read the header and peaks of one scan
    pub fn read_scan(&mut self, scan_number: u32) -> Result<(ScanHeader, PeakList), MzXmlError> {
        let offset = self
            .index
            .offset_of(scan_number)
            .ok_or(MzXmlError::ScanNotIndexed(scan_number))?;
        self.reader.seek(SeekFrom::Start(offset))?;

        let mut xml = Reader::from_reader(&mut self.reader);
        xml.config_mut().trim_text(true);

        let mut header = ScanHeader {
            seq_num: scan_number as i32,
            file_position: offset,
            ..Default::default()
        };
        let mut buf = Vec::new();

        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.name().as_ref() == b"scan" => {
                apply_scan_attributes(&mut header, e)?;
            }
            Event::Empty(ref e) if e.name().as_ref() == b"scan" => {
                apply_scan_attributes(&mut header, e)?;
                return Ok((header, PeakList::default()));
            }
            other => {
                return Err(MzXmlError::InvalidStructure(format!(
                    "expected <scan> at offset {} for scan {}, found {:?}",
                    offset, scan_number, other
                )));
            }
        }

        let mut precursor_seen = false;
        let mut in_precursor = false;
        let mut precursor_text = String::new();
        let mut peaks: Option<(PeaksEncoding, String)> = None;
        let mut in_peaks = false;

        loop {
            buf.clear();
            match xml.read_event_into(&mut buf)? {
                Event::Start(ref e) => match e.name().as_ref() {
                    b"precursorMz" if !precursor_seen => {
                        apply_precursor_attributes(&mut header, e)?;
                        precursor_seen = true;
                        in_precursor = true;
                    }
                    b"peaks" => {
                        peaks = Some((peaks_encoding(e)?, String::new()));
                        in_peaks = true;
                    }
                    // child scans follow the parent's own elements
                    b"scan" => break,
                    _ => {}
                },
                Event::Empty(ref e) => match e.name().as_ref() {
                    b"precursorMz" if !precursor_seen => {
                        apply_precursor_attributes(&mut header, e)?;
                        precursor_seen = true;
                    }
                    b"peaks" => {
                        peaks = Some((peaks_encoding(e)?, String::new()));
                    }
                    b"scan" => break,
                    _ => {}
                },
                Event::Text(ref t) => {
                    let text = std::str::from_utf8(t)?;
                    if in_precursor {
                        precursor_text.push_str(text);
                    } else if in_peaks {
                        if let Some((_, payload)) = peaks.as_mut() {
                            payload.push_str(text);
                        }
                    }
                }
                Event::End(ref e) => match e.name().as_ref() {
                    b"precursorMz" => in_precursor = false,
                    b"peaks" => in_peaks = false,
                    b"scan" => break,
                    _ => {}
                },
                Event::Eof => {
                    return Err(MzXmlError::InvalidStructure(format!(
                        "unexpected end of document inside scan {}",
                        scan_number
                    )));
                }
                _ => {}
            }
        }

        let precursor_text = precursor_text.trim();
        if !precursor_text.is_empty() {
            header.precursor_mz =
                precursor_text
                    .parse()
                    .map_err(|_| MzXmlError::InvalidAttributeValue {
                        name: "precursorMz".to_string(),
                        value: precursor_text.to_string(),
                    })?;
        }

        let peaks = match peaks {
            Some((encoding, payload)) => {
                PeakList::from_interleaved(&BinaryDecoder::decode(&payload, encoding)?)
            }
            None => PeakList::default(),
        };

        if peaks.len() != header.peaks_count.max(0) as usize {
            warn!(
                "{}: scan {} declares {} peaks but {} were decoded",
                self.name,
                scan_number,
                header.peaks_count,
                peaks.len()
            );
        }

        debug!(
            "{}: loaded scan {} (MS{}, {} peaks)",
            self.name,
            scan_number,
            header.ms_level,
            peaks.len()
        );
        Ok((header, peaks))
    }
}
