//! Failure policies selected in the tracker config.

use serde::Deserialize;

/// What to do when an issue's author has no configured GitHub login.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownAuthorPolicy {
    /// Stop the run before any mutation is made.
    #[default]
    Abort,
    /// Log the issue and leave it out of this run.
    Skip,
}

/// What to do when a marker line has no committed history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProvenancePolicy {
    /// Drop every issue of the affected file for this run.
    #[default]
    SkipFile,
    /// Drop only the affected issue.
    SkipIssue,
}
