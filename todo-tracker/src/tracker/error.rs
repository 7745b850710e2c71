//! Remote tracker error types.

use thiserror::Error;

/// Errors returned by the remote issue tracker.
///
/// These are never retried; re-running the whole batch is the recovery path.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// GitHub API error (authentication, rate limit, network).
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// Any other remote failure.
    #[error("Issue tracker error: {message}")]
    Remote { message: String },
}
