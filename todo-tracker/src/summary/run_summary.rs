//! Run summary types.

use crate::actions::{Action, ActionPlan};
use crate::extract::Extraction;
use crate::snapshot::Snapshot;

/// Summary of a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Whether this was a dry run.
    pub dry_run: bool,

    /// Number of files scanned.
    pub files_scanned: usize,

    /// Number of files left for a later run (uncommitted lines, not UTF-8).
    pub files_skipped: usize,

    /// Number of issues found in the source tree.
    pub source_issues: usize,

    /// Number of open issues carrying the sentinel label.
    pub tracked_issues: usize,

    /// Number of tracked issues with an unreadable payload.
    pub corrupt_payloads: usize,

    /// Number of issues created (or that would be, in a dry run).
    pub issues_created: usize,

    /// Number of issues updated.
    pub issues_updated: usize,

    /// Number of issues closed.
    pub issues_closed: usize,

    /// Number of matched issues that needed no change.
    pub issues_unchanged: usize,

    /// Number of issues left out because of missing history or an unknown author.
    pub issues_skipped: usize,

    /// Number of tracked issues left alone because their source was skipped.
    pub issues_deferred: usize,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Records the outcome of extraction.
    pub fn record_extraction(&mut self, extraction: &Extraction) {
        self.files_scanned += extraction.files_scanned;
        self.files_skipped += extraction.files_skipped;
        self.source_issues += extraction.issues.len();
        self.issues_skipped += extraction.issues_skipped;
    }

    /// Records the loaded tracker state.
    pub fn record_snapshot(&mut self, snapshot: &Snapshot) {
        self.tracked_issues += snapshot.len();
        self.corrupt_payloads += snapshot.corrupt.len();
    }

    /// Records what planning decided to leave alone.
    pub fn record_plan(&mut self, plan: &ActionPlan) {
        self.issues_unchanged += plan.unchanged;
        self.issues_skipped += plan.skipped;
        self.issues_deferred += plan.deferred;
    }

    /// Records an applied (or previewed) action.
    pub fn record_action(&mut self, action: &Action) {
        match action {
            Action::Create { .. } => self.issues_created += 1,
            Action::Update { .. } => self.issues_updated += 1,
            Action::Close { .. } => self.issues_closed += 1,
        }
    }

    /// Returns the number of mutations made (or previewed).
    #[must_use]
    pub fn actions(&self) -> usize {
        self.issues_created + self.issues_updated + self.issues_closed
    }
}
