//! # mzxml-diff - Scan-by-Scan Comparison of mzXML Files
//!
//! `mzxml_diff` reads two mzXML files through their scan index and reports
//! every scan whose header or peak list differs. It is meant for checking
//! that a converter or a processing step changed only what it should.
//!
//! ## Key Features
//!
//! - **Random access**: scans are located through the `<index>` at the end of
//!   the file; unindexed files fall back to a single linear pass.
//!
//! - **One scan in memory**: each input keeps only the scan being compared
//!   resident, so file size does not bound memory use.
//!
//! - **Stable report format**: numbers are printed with `%g` semantics, so
//!   reports can themselves be diffed across tool versions.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mzxml_diff::compare::{compare_sources, CompareOptions};
//! use mzxml_diff::mzxml::MzXmlReader;
//! use mzxml_diff::source::ScanSource;
//!
//! let mut first = ScanSource::new(MzXmlReader::open("run_a.mzXML")?);
//! let mut second = ScanSource::new(MzXmlReader::open("run_b.mzXML")?);
//!
//! let mut stdout = std::io::stdout().lock();
//! let summary = compare_sources(&mut first, &mut second, &CompareOptions::default(), &mut stdout)?;
//! println!("{}", summary);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`mzxml`]: mzXML scan index, header attributes and peak decoding
//! - [`source`]: scan loaders behind a single-scan cache
//! - [`compare`]: header and peak comparison, report rendering

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod compare;
pub mod mzxml;
pub mod source;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::compare::{
        compare_sources, CompareError, CompareOptions, ComparisonSummary, GFloat,
    };
    pub use crate::mzxml::{MzXmlError, MzXmlReader, Peak, PeakList, ScanHeader};
    pub use crate::source::{MemoryLoader, ScanLoader, ScanSource, SourceError};
}
