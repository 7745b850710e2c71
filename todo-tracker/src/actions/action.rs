//! Planned tracker mutations.

use crate::tracker::RenderedIssue;
use serde::Serialize;

/// A single mutation of the remote tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Track a new source issue.
    Create {
        /// `file:line` of the comment block, 1-based.
        location: String,
        /// Issue to create.
        issue: RenderedIssue,
    },

    /// Rewrite a tracked issue from its matched source issue.
    Update {
        /// Issue number.
        number: u64,
        /// `file:line` of the comment block, 1-based.
        location: String,
        /// New title, body and labels.
        issue: RenderedIssue,
    },

    /// Close a tracked issue whose comment is gone.
    Close {
        /// Issue number.
        number: u64,
        /// Current title, for logging.
        title: String,
    },
}

impl Action {
    /// Returns the title of the affected issue.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Create { issue, .. } | Self::Update { issue, .. } => &issue.title,
            Self::Close { title, .. } => title,
        }
    }

    /// Returns a short verb describing the action.
    #[must_use]
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Close { .. } => "close",
        }
    }
}

/// Outcome of applying an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ActionStatus {
    /// Issue created.
    Created {
        /// GitHub issue number.
        number: u64,
    },

    /// Issue rewritten.
    Updated {
        /// GitHub issue number.
        number: u64,
    },

    /// Issue closed.
    Closed {
        /// GitHub issue number.
        number: u64,
    },

    /// Dry run; nothing was sent.
    Previewed,
}
