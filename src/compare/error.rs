use crate::source::SourceError;

/// Errors that abort a comparison
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// The files hold different numbers of scans, so scan numbers cannot be aligned
    #[error(
        "total number of scans differ: {first} has {first_scans}, {second} has {second_scans}"
    )]
    ScanCountMismatch {
        /// Name of the first source
        first: String,
        /// Scan count of the first source
        first_scans: u32,
        /// Name of the second source
        second: String,
        /// Scan count of the second source
        second_scans: u32,
    },

    /// A scan could not be loaded
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Writing the report failed
    #[error("failed to write comparison report: {0}")]
    Output(#[from] std::io::Error),
}
