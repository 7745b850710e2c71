//! Remote issue tracker access.
//!
//! The engine only needs four operations from the tracker: list the open
//! issues carrying a label, list labels, create an issue and edit an issue.
//! [`IssueTracker`] captures those; [`GitHubTracker`] implements them on top
//! of the GitHub REST API.

mod error;
mod github;
mod issue;

pub use error::TrackerError;
pub use github::GitHubTracker;
pub use issue::{IssueEdit, IssueState, RenderedIssue, TrackedIssue};

use async_trait::async_trait;

/// CRUD operations on the remote issue tracker.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Lists all open issues carrying `label`, in ascending issue number order.
    async fn list_open_issues(&self, label: &str) -> Result<Vec<TrackedIssue>, TrackerError>;

    /// Lists the names of all labels defined in the repository.
    async fn list_labels(&self) -> Result<Vec<String>, TrackerError>;

    /// Creates an issue and returns its number.
    async fn create_issue(&self, issue: &RenderedIssue) -> Result<u64, TrackerError>;

    /// Applies an edit to an existing issue.
    async fn edit_issue(&self, number: u64, edit: &IssueEdit) -> Result<(), TrackerError>;
}
