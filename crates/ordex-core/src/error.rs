//! Error types for the ordex-core library.

use thiserror::Error;

/// Main error type for the ordex library.
#[derive(Error, Debug)]
pub enum OrdexError {
    /// Work-order field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),
}

/// Errors related to work-order field extraction.
///
/// Absence of data is never an error: missing fields degrade to empty
/// sequences or `None` values. Only a caller contract violation surfaces
/// here.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    /// The caller handed over no usable page text.
    #[error("page text is empty")]
    EmptyInput,
}

/// Result type for the ordex library.
pub type Result<T> = std::result::Result<T, OrdexError>;
