//! Provenance lookup error types.

use thiserror::Error;

/// Errors that can occur while querying version control.
#[derive(Debug, Error)]
pub enum ProvenanceError {
    /// The line has no committed history (uncommitted edit or untracked file).
    #[error("No committed history for {file}:{line}: {reason}")]
    Unavailable {
        file: String,
        line: usize,
        reason: String,
    },

    /// Failed to run git.
    #[error("Failed to execute git {command}: {source}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A git query other than blame failed.
    #[error("git {command} failed: {stderr}")]
    GitFailed { command: String, stderr: String },

    /// git printed output that could not be parsed.
    #[error("Malformed git {command} output: {message}")]
    Malformed { command: String, message: String },
}

impl ProvenanceError {
    /// Returns true for failures that only affect a single issue or file.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
