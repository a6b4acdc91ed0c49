//! Scan offset index discovery
//!
//! Indexed mzXML files end with
//!
//! ```text
//! <index name="scan">
//!   <offset id="1">1234</offset>
//!   ...
//! </index>
//! <indexOffset>56789</indexOffset>
//! ```
//!
//! The `<indexOffset>` element is looked up in the last kilobyte of the file.
//! Files without an index are scanned once and the position of every `<scan>`
//! start tag is recorded instead.

use std::io::{BufRead, Read, Seek, SeekFrom};

use log::{debug, info, warn};
use quick_xml::events::Event;
use quick_xml::Reader;

use super::error::MzXmlError;
use super::header::get_attribute;
use super::models::ScanIndex;

/// Default input buffer size for mzXML reading (64KB)
pub const DEFAULT_INPUT_BUFFER_SIZE: usize = 64 * 1024;

/// Size of the file tail searched for `<indexOffset>`
const TAIL_SIZE: u64 = 1024;

const INDEX_OFFSET_OPEN: &str = "<indexOffset>";
const INDEX_OFFSET_CLOSE: &str = "</indexOffset>";

/// Build the scan index of a document, from its embedded index when present
pub(crate) fn read_scan_index<R: BufRead + Seek>(reader: &mut R) -> Result<ScanIndex, MzXmlError> {
    let index = match find_index_offset(reader)? {
        Some(offset) => {
            reader.seek(SeekFrom::Start(offset))?;
            let index = parse_index(reader, offset)?;
            if index.is_empty() {
                warn!("Embedded scan index at offset {} is empty, scanning file", offset);
                scan_for_offsets(reader)?
            } else {
                index
            }
        }
        None => {
            info!("No embedded scan index, scanning file for <scan> elements");
            scan_for_offsets(reader)?
        }
    };

    debug!("Indexed {} scans, last scan {}", index.len(), index.last_scan());
    Ok(index)
}

/// Read `<indexOffset>` from the tail of the document
fn find_index_offset<R: Read + Seek>(reader: &mut R) -> Result<Option<u64>, MzXmlError> {
    let file_size = reader.seek(SeekFrom::End(0))?;
    let read_size = std::cmp::min(TAIL_SIZE, file_size);
    reader.seek(SeekFrom::Start(file_size - read_size))?;

    let mut tail = vec![0u8; read_size as usize];
    reader.read_exact(&mut tail)?;
    let tail_str = String::from_utf8_lossy(&tail);

    let Some(pos) = tail_str.rfind(INDEX_OFFSET_OPEN) else {
        return Ok(None);
    };
    let start = pos + INDEX_OFFSET_OPEN.len();
    let end = tail_str[start..].find(INDEX_OFFSET_CLOSE).ok_or_else(|| {
        MzXmlError::InvalidStructure("unterminated <indexOffset> element".to_string())
    })?;

    let value = tail_str[start..start + end].trim();
    let offset: u64 = value.parse().map_err(|_| {
        MzXmlError::InvalidStructure(format!("invalid index offset {:?}", value))
    })?;
    if offset == 0 || offset >= file_size {
        // some writers emit a zero offset for an index they never wrote
        return Ok(None);
    }

    Ok(Some(offset))
}

/// Parse the `<index name="scan">` block the reader is positioned at
fn parse_index<R: BufRead>(reader: &mut R, offset: u64) -> Result<ScanIndex, MzXmlError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut index = ScanIndex {
        index_offset: Some(offset),
        ..Default::default()
    };

    let mut buf = Vec::new();
    let mut in_scan_index = false;
    let mut current_id: Option<u32> = None;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.name().as_ref() {
                b"index" => {
                    in_scan_index = get_attribute(e, "name")?.as_deref() == Some("scan");
                }
                b"offset" if in_scan_index => {
                    let id = get_attribute(e, "id")?.unwrap_or_default();
                    current_id = Some(id.trim().parse().map_err(|_| {
                        MzXmlError::InvalidStructure(format!("invalid scan id {:?} in index", id))
                    })?);
                }
                _ => {}
            },
            Event::Text(ref t) => {
                if let Some(id) = current_id.take() {
                    let text = std::str::from_utf8(t)?.trim();
                    let position: u64 = text.parse().map_err(|_| {
                        MzXmlError::InvalidStructure(format!(
                            "invalid offset {:?} for scan {}",
                            text, id
                        ))
                    })?;
                    index.offsets.insert(id, position);
                }
            }
            Event::End(ref e) => {
                if e.name().as_ref() == b"index" && in_scan_index {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(index)
}

/// Record the position of every `<scan>` element by reading the whole document
fn scan_for_offsets<R: BufRead + Seek>(reader: &mut R) -> Result<ScanIndex, MzXmlError> {
    reader.seek(SeekFrom::Start(0))?;
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut index = ScanIndex::default();
    let mut buf = Vec::new();

    loop {
        let position = xml.buffer_position() as u64;
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) if e.name().as_ref() == b"scan" => {
                let num = get_attribute(e, "num")?.unwrap_or_default();
                let num: u32 = num.trim().parse().map_err(|_| {
                    MzXmlError::InvalidStructure(format!("invalid scan num {:?}", num))
                })?;
                index.offsets.insert(num, position);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(index)
}
