//! Snapshot of the issues currently tracked on the remote service.

mod error;
mod payload;

pub use error::PayloadError;
pub use payload::{decode_payload, encode_payload};

use crate::extract::IssueRecord;
use crate::tracker::{IssueState, IssueTracker, TrackedIssue, TrackerError};
use tracing::{info, warn};

/// A tracked issue together with the record decoded from its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenIssue {
    /// The remote issue.
    pub handle: TrackedIssue,

    /// Record decoded from the issue body.
    pub record: IssueRecord,
}

/// All open tracked issues, split by whether their payload decoded.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Issues available for matching, in ascending issue number order.
    pub open: Vec<OpenIssue>,

    /// Issues whose payload could not be decoded. They never match.
    pub corrupt: Vec<TrackedIssue>,
}

impl Snapshot {
    /// Splits tracked issues into decodable and corrupt ones.
    ///
    /// Issues that are closed or lack the sentinel label are ignored.
    #[must_use]
    pub fn from_issues(issues: Vec<TrackedIssue>, sentinel: &str) -> Self {
        let mut snapshot = Self::default();

        for issue in issues {
            if issue.state != IssueState::Open || !issue.has_label(sentinel) {
                continue;
            }

            match decode_payload(issue.body.as_deref().unwrap_or_default()) {
                Ok(record) => snapshot.open.push(OpenIssue {
                    handle: issue,
                    record,
                }),
                Err(e) => {
                    warn!(
                        issue_number = issue.number,
                        error = %e,
                        "Tracked issue has an unreadable payload, it will be closed"
                    );
                    snapshot.corrupt.push(issue);
                }
            }
        }

        snapshot.open.sort_by_key(|issue| issue.handle.number);
        snapshot
    }

    /// Returns the number of tracked issues in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.open.len() + self.corrupt.len()
    }

    /// Returns true if nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty() && self.corrupt.is_empty()
    }
}

/// Fetches every open issue carrying the sentinel label and decodes it.
///
/// # Errors
///
/// Returns [`TrackerError`] if the issues cannot be listed. Undecodable
/// payloads are not errors; those issues end up in [`Snapshot::corrupt`].
pub async fn load_snapshot(
    tracker: &dyn IssueTracker,
    sentinel: &str,
) -> Result<Snapshot, TrackerError> {
    let issues = tracker.list_open_issues(sentinel).await?;
    let snapshot = Snapshot::from_issues(issues, sentinel);

    info!(
        open = snapshot.open.len(),
        corrupt = snapshot.corrupt.len(),
        "Loaded tracked issues"
    );
    Ok(snapshot)
}
