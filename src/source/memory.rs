use super::{ScanLoader, SourceError};
use crate::mzxml::{PeakList, ScanHeader};

/// Scans held in memory, numbered from 1 in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    name: String,
    scans: Vec<(ScanHeader, PeakList)>,
}

impl MemoryLoader {
    /// Create a loader over already decoded scans
    pub fn new(name: impl Into<String>, scans: Vec<(ScanHeader, PeakList)>) -> Self {
        Self {
            name: name.into(),
            scans,
        }
    }
}

impl ScanLoader for MemoryLoader {
    fn name(&self) -> &str {
        &self.name
    }

    fn last_scan(&self) -> u32 {
        self.scans.len() as u32
    }

    fn load_scan(&mut self, scan_number: u32) -> Result<(ScanHeader, PeakList), SourceError> {
        scan_number
            .checked_sub(1)
            .and_then(|i| self.scans.get(i as usize))
            .cloned()
            .ok_or_else(|| SourceError::MissingScan {
                name: self.name.clone(),
                scan_number,
            })
    }
}
