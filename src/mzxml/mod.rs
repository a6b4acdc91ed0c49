//! # mzXML Reader Module
//!
//! Random-access reading of mzXML files: the scan index is read once, and
//! individual scans are decoded on request by seeking to their offset.
//!
//! ## mzXML Structure
//!
//! ```text
//! mzXML
//! ├── msRun
//! │   └── scan* (MS1, may contain nested MSn scans)
//! │       ├── precursorMz (MSn only; text is the precursor m/z)
//! │       ├── peaks (base64, network byte order, m/z-int pairs)
//! │       └── scan* (child scans)
//! ├── index name="scan"
//! │   └── offset id="N" (byte offset of scan N)
//! └── indexOffset (byte offset of the index element)
//! ```
//!
//! Only the header attributes and peak payload of the requested scan are
//! decoded. Document schema validation is out of scope.

mod binary;
mod error;
mod header;
mod index;
mod models;
mod reader;

#[cfg(test)]
mod tests;

pub use binary::{BinaryDecodeError, BinaryDecoder, ByteOrder, CompressionType, PeaksEncoding, Precision};
pub use error::MzXmlError;
pub use header::{parse_duration_seconds, parse_possible_charges, MAX_CHARGE};
pub use index::DEFAULT_INPUT_BUFFER_SIZE;
pub use models::{Peak, PeakList, ScanHeader, ScanIndex};
pub use reader::MzXmlReader;
