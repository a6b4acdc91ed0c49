//! Peak payload decoding for mzXML
//!
//! mzXML stores each scan's peaks as a single Base64 string of interleaved
//! `m/z, intensity` values in network byte order, optionally zlib
//! compressed. Decoding runs in three steps:
//!
//! 1. Base64 decode the text
//! 2. Inflate if `compressionType="zlib"`
//! 3. Read big-endian float32 or float64 values

use std::io::Read;

use base64::prelude::*;
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use flate2::read::ZlibDecoder;

/// Compression applied to a `<peaks>` payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionType {
    /// No compression
    #[default]
    None,
    /// zlib compression
    Zlib,
}

impl CompressionType {
    /// Parse the `compressionType` attribute
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "none" | "" => Some(CompressionType::None),
            "zlib" => Some(CompressionType::Zlib),
            _ => None,
        }
    }
}

/// Floating point width of the stored values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    /// 32-bit floats (the mzXML default)
    #[default]
    Float32,
    /// 64-bit floats
    Float64,
}

impl Precision {
    /// Parse the `precision` attribute
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "32" => Some(Precision::Float32),
            "64" => Some(Precision::Float64),
            _ => None,
        }
    }

    /// Get the byte size per value
    pub fn byte_size(&self) -> usize {
        match self {
            Precision::Float32 => 4,
            Precision::Float64 => 8,
        }
    }
}

/// Byte order of the stored values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Big-endian, the only order the mzXML schema allows
    #[default]
    Network,
    /// Little-endian, written by a few non-conforming converters
    Little,
}

impl ByteOrder {
    /// Parse the `byteOrder` attribute
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "network" | "big" => Some(ByteOrder::Network),
            "little" => Some(ByteOrder::Little),
            _ => None,
        }
    }
}

/// Encoding parameters of a `<peaks>` element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeaksEncoding {
    /// Float width
    pub precision: Precision,
    /// Byte order
    pub byte_order: ByteOrder,
    /// Compression
    pub compression: CompressionType,
}

/// Errors that can occur during peak decoding
#[derive(Debug, thiserror::Error)]
pub enum BinaryDecodeError {
    /// Payload is not valid Base64
    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    /// zlib inflation or byte reading failed
    #[error("Decompression error: {0}")]
    DecompressionError(#[from] std::io::Error),

    /// Byte count is not a whole number of values
    #[error("Invalid data length: {actual} bytes is not a multiple of {value_size}")]
    InvalidLength {
        /// Bytes per value
        value_size: usize,
        /// Decoded byte count
        actual: usize,
    },

    /// A value is missing its m/z or intensity partner
    #[error("Odd number of values ({0}) in an m/z-int peak list")]
    UnpairedValue(usize),
}

/// Decoder for mzXML `<peaks>` payloads
pub struct BinaryDecoder;

impl BinaryDecoder {
    /// Decode a `<peaks>` payload into interleaved `m/z, intensity` values
    ///
    /// # Arguments
    /// * `base64_data` - Text content of the `<peaks>` element
    /// * `encoding` - Precision, byte order and compression from its attributes
    pub fn decode(
        base64_data: &str,
        encoding: PeaksEncoding,
    ) -> Result<Vec<f64>, BinaryDecodeError> {
        let trimmed = base64_data.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        // some writers wrap long payloads
        let decoded_bytes = if trimmed.contains(char::is_whitespace) {
            let compact: String = trimmed.split_whitespace().collect();
            BASE64_STANDARD.decode(compact)?
        } else {
            BASE64_STANDARD.decode(trimmed)?
        };

        let uncompressed = match encoding.compression {
            CompressionType::None => decoded_bytes,
            CompressionType::Zlib => {
                let mut decoder = ZlibDecoder::new(&decoded_bytes[..]);
                let mut uncompressed = Vec::new();
                decoder.read_to_end(&mut uncompressed)?;
                uncompressed
            }
        };

        let values = Self::bytes_to_floats(&uncompressed, encoding)?;
        if values.len() % 2 != 0 {
            return Err(BinaryDecodeError::UnpairedValue(values.len()));
        }

        Ok(values)
    }

    fn bytes_to_floats(
        bytes: &[u8],
        encoding: PeaksEncoding,
    ) -> Result<Vec<f64>, BinaryDecodeError> {
        let value_size = encoding.precision.byte_size();

        if bytes.len() % value_size != 0 {
            return Err(BinaryDecodeError::InvalidLength {
                value_size,
                actual: bytes.len(),
            });
        }

        let count = bytes.len() / value_size;
        let mut values = Vec::with_capacity(count);
        let mut cursor = std::io::Cursor::new(bytes);

        for _ in 0..count {
            let val = match (encoding.precision, encoding.byte_order) {
                (Precision::Float32, ByteOrder::Network) => cursor.read_f32::<BigEndian>()? as f64,
                (Precision::Float32, ByteOrder::Little) => cursor.read_f32::<LittleEndian>()? as f64,
                (Precision::Float64, ByteOrder::Network) => cursor.read_f64::<BigEndian>()?,
                (Precision::Float64, ByteOrder::Little) => cursor.read_f64::<LittleEndian>()?,
            };
            values.push(val);
        }

        Ok(values)
    }
}
