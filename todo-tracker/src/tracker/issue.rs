//! Remote issue types.

use serde::Serialize;

/// Open/closed state of a remote issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    /// Issue is open.
    Open,
    /// Issue is closed.
    Closed,
}

/// An issue as currently stored by the remote tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedIssue {
    /// Issue number.
    pub number: u64,

    /// Current title.
    pub title: String,

    /// Current body, if any.
    pub body: Option<String>,

    /// Current label names.
    pub labels: Vec<String>,

    /// Current state.
    pub state: IssueState,
}

impl TrackedIssue {
    /// Returns true if the issue carries `label`.
    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// Title, body, labels and assignee of an issue to create or rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedIssue {
    /// Issue title.
    pub title: String,

    /// Issue body, payload included.
    pub body: String,

    /// Label names.
    pub labels: Vec<String>,

    /// GitHub login to assign.
    pub assignee: String,
}

/// Fields to change on an existing issue; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueEdit {
    /// New title.
    pub title: Option<String>,

    /// New body.
    pub body: Option<String>,

    /// New label set.
    pub labels: Option<Vec<String>>,

    /// New state.
    pub state: Option<IssueState>,
}

impl IssueEdit {
    /// An edit that closes the issue.
    #[must_use]
    pub fn close() -> Self {
        Self {
            state: Some(IssueState::Closed),
            ..Self::default()
        }
    }

    /// An edit that rewrites title, body and labels from a rendered issue.
    #[must_use]
    pub fn rewrite(rendered: &RenderedIssue) -> Self {
        Self {
            title: Some(rendered.title.clone()),
            body: Some(rendered.body.clone()),
            labels: Some(rendered.labels.clone()),
            state: None,
        }
    }
}
