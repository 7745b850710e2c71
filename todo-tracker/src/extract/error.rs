//! Issue extraction error types.

use crate::provenance::ProvenanceError;
use thiserror::Error;

/// Errors that abort issue extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Failed to read a source file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid include glob or directory walk failure.
    #[error("Failed to walk source tree: {0}")]
    WalkError(#[from] ignore::Error),

    /// Version-control failure that is not limited to a single line.
    #[error(transparent)]
    Provenance(#[from] ProvenanceError),

    /// The configured markers do not form a valid pattern.
    #[error("Invalid marker lexicon: {0}")]
    LexiconError(#[from] regex::Error),
}
