/// Errors that can occur while reading an mzXML file
#[derive(Debug, thiserror::Error)]
pub enum MzXmlError {
    /// Error parsing XML
    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error decoding a peak payload
    #[error("Binary decode error: {0}")]
    BinaryError(#[from] super::binary::BinaryDecodeError),

    /// Invalid mzXML document structure
    #[error("Invalid mzXML structure: {0}")]
    InvalidStructure(String),

    /// Invalid value for an XML attribute
    #[error("Invalid value {value:?} for attribute {name}")]
    InvalidAttributeValue {
        /// Attribute name
        name: String,
        /// Raw attribute value
        value: String,
    },

    /// UTF-8 encoding error in text content
    #[error("UTF-8 encoding error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),

    /// Requested scan number has no index entry
    #[error("Scan {0} is not present in the scan index")]
    ScanNotIndexed(u32),
}
