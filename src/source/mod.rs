//! Scan sources with a single-scan cache
//!
//! A [`ScanSource`] wraps a [`ScanLoader`] (the mzXML reader, or an in-memory
//! list of scans) and keeps exactly one decoded scan resident. Asking for the
//! resident scan again returns the cached data; asking for any other scan
//! replaces it.

mod memory;

pub use memory::MemoryLoader;

use log::debug;

use crate::mzxml::{MzXmlError, MzXmlReader, PeakList, ScanHeader};

/// Errors raised while loading scans from a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The underlying mzXML reader failed
    #[error("{name}: {source}")]
    Read {
        /// Source name (usually the file path)
        name: String,
        /// Reader error
        #[source]
        source: MzXmlError,
    },

    /// The loader has no scan with this number
    #[error("{name}: scan {scan_number} does not exist")]
    MissingScan {
        /// Source name
        name: String,
        /// Requested scan number
        scan_number: u32,
    },
}

/// Loads individual scans by 1-based scan number
pub trait ScanLoader {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Highest scan number available; scans are numbered from 1
    fn last_scan(&self) -> u32;

    /// Decode one scan
    fn load_scan(&mut self, scan_number: u32) -> Result<(ScanHeader, PeakList), SourceError>;
}

impl<R: std::io::BufRead + std::io::Seek> ScanLoader for MzXmlReader<R> {
    fn name(&self) -> &str {
        MzXmlReader::name(self)
    }

    fn last_scan(&self) -> u32 {
        MzXmlReader::last_scan(self)
    }

    fn load_scan(&mut self, scan_number: u32) -> Result<(ScanHeader, PeakList), SourceError> {
        self.read_scan(scan_number).map_err(|source| SourceError::Read {
            name: MzXmlReader::name(self).to_string(),
            source,
        })
    }
}

/// The one resident scan
#[derive(Debug, Clone)]
struct LoadedScan {
    scan_number: u32,
    header: ScanHeader,
    peaks: PeakList,
}

/// A scan loader plus its single-scan cache
pub struct ScanSource<L: ScanLoader> {
    loader: L,
    current: Option<LoadedScan>,
}

impl<L: ScanLoader> ScanSource<L> {
    /// Wrap a loader; nothing is loaded until a scan is requested
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            current: None,
        }
    }

    /// Name used in diagnostics
    pub fn name(&self) -> &str {
        self.loader.name()
    }

    /// Number of scans, assuming contiguous numbering from 1
    pub fn total_scans(&self) -> u32 {
        self.loader.last_scan()
    }

    /// Scan number of the resident scan, if any
    pub fn current_scan(&self) -> Option<u32> {
        self.current.as_ref().map(|scan| scan.scan_number)
    }

    /// Header of a scan, loading it unless it is already resident
    pub fn header(&mut self, scan_number: u32) -> Result<&ScanHeader, SourceError> {
        Ok(&self.load(scan_number)?.header)
    }

    /// Peaks of a scan, loading it unless it is already resident
    pub fn peaks(&mut self, scan_number: u32) -> Result<&PeakList, SourceError> {
        Ok(&self.load(scan_number)?.peaks)
    }

    /// Drop zero-intensity peaks from the resident scan.
    ///
    /// The resident header's `peaks_count` is updated to match, so headers
    /// fetched before this call are stale. Does nothing when no scan is
    /// resident.
    pub fn filter_zero_intensity(&mut self) {
        if let Some(scan) = self.current.as_mut() {
            let filtered = scan.peaks.without_zero_intensity();
            debug!(
                "{}: scan {} keeps {} of {} peaks after zero-intensity filtering",
                self.loader.name(),
                scan.scan_number,
                filtered.len(),
                scan.peaks.len()
            );
            scan.header.peaks_count = filtered.len() as i32;
            scan.peaks = filtered;
        }
    }

    /// Give back the loader
    pub fn into_inner(self) -> L {
        self.loader
    }

    fn load(&mut self, scan_number: u32) -> Result<&LoadedScan, SourceError> {
        let resident = matches!(&self.current, Some(scan) if scan.scan_number == scan_number);
        if !resident {
            // release the previous scan before decoding the next one
            self.current = None;
            let (header, peaks) = self.loader.load_scan(scan_number)?;
            self.current = Some(LoadedScan {
                scan_number,
                header,
                peaks,
            });
        }

        self.current
            .as_ref()
            .ok_or_else(|| SourceError::MissingScan {
                name: self.loader.name().to_string(),
                scan_number,
            })
    }
}
