//! Payload decoding error types.

use thiserror::Error;

/// Errors decoding the machine-readable payload of a tracked issue.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The body has no `<!--{...}-->` block.
    #[error("Issue body has no embedded payload")]
    Missing,

    /// The payload is not a valid issue record.
    #[error("Embedded payload is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
