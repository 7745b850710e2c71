//! Turning a reconciliation into a list of actions.

use super::Action;
use crate::config::UnknownAuthorPolicy;
use crate::extract::{Extraction, SourceIssue};
use crate::reconcile::reconcile;
use crate::snapshot::{OpenIssue, Snapshot};
use crate::templates::{IssueRenderer, RenderError};
use crate::tracker::RenderedIssue;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Every action of a run, rendered and ready to apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionPlan {
    /// Updates, then closes, then creates.
    pub actions: Vec<Action>,

    /// Matched issues that are already up to date.
    pub unchanged: usize,

    /// Source issues left out because their author is unknown.
    pub skipped: usize,

    /// Tracked issues left alone because their file could not be extracted.
    pub deferred: usize,
}

impl ActionPlan {
    /// Returns true if the plan makes no change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Plans the actions that make the tracker mirror the extracted issues.
///
/// Everything is rendered here, before any mutation, so an author lookup
/// failure under [`UnknownAuthorPolicy::Abort`] leaves the tracker untouched.
/// Tracked issues in files or blocks the extraction had to drop take no
/// part in matching; they are neither updated nor closed.
///
/// # Errors
///
/// Returns [`RenderError`] if an issue cannot be rendered. Under
/// [`UnknownAuthorPolicy::Skip`] unknown authors are logged and counted in
/// [`ActionPlan::skipped`] instead.
pub fn plan_actions(
    snapshot: &Snapshot,
    extraction: &Extraction,
    renderer: &IssueRenderer,
    policy: UnknownAuthorPolicy,
) -> Result<ActionPlan, RenderError> {
    let mut plan = ActionPlan::default();

    let mut candidates = Vec::with_capacity(snapshot.open.len());
    for open in &snapshot.open {
        if extraction.defers(&open.record) {
            debug!(
                issue_number = open.handle.number,
                file = %open.record.file,
                "Source not extracted this run, leaving tracked issue alone"
            );
            plan.deferred += 1;
        } else {
            candidates.push(open);
        }
    }

    let sources = extraction.issues.as_slice();
    let open_records: Vec<_> = candidates.iter().map(|o| &o.record).collect();
    let source_records: Vec<_> = sources.iter().map(|s| &s.record).collect();
    let mut reconciliation = reconcile(&open_records, &source_records);
    reconciliation.matches.sort_by_key(|m| m.open);

    for pair in &reconciliation.matches {
        let open = candidates[pair.open];
        let source = &sources[pair.source];
        let Some(rendered) = render_or_skip(renderer, source, policy, &mut plan)? else {
            continue;
        };

        if needs_update(open, source, &rendered) {
            plan.actions.push(Action::Update {
                number: open.handle.number,
                location: location_of(source),
                issue: rendered,
            });
        } else {
            debug!(
                issue_number = open.handle.number,
                score = pair.score,
                "Tracked issue is up to date"
            );
            plan.unchanged += 1;
        }
    }

    let unmatched = reconciliation
        .unmatched_open
        .iter()
        .map(|&i| &candidates[i].handle);
    for handle in unmatched.chain(&snapshot.corrupt) {
        plan.actions.push(Action::Close {
            number: handle.number,
            title: handle.title.clone(),
        });
    }

    for &j in &reconciliation.unmatched_source {
        let source = &sources[j];
        if let Some(rendered) = render_or_skip(renderer, source, policy, &mut plan)? {
            plan.actions.push(Action::Create {
                location: location_of(source),
                issue: rendered,
            });
        }
    }

    Ok(plan)
}

/// Renders `source`, applying the unknown author policy.
fn render_or_skip(
    renderer: &IssueRenderer,
    source: &SourceIssue,
    policy: UnknownAuthorPolicy,
    plan: &mut ActionPlan,
) -> Result<Option<RenderedIssue>, RenderError> {
    match renderer.render(source) {
        Ok(rendered) => Ok(Some(rendered)),
        Err(RenderError::UnknownAuthor { email }) if policy == UnknownAuthorPolicy::Skip => {
            warn!(
                location = %location_of(source),
                author = %email,
                "No GitHub login for author, skipping issue"
            );
            plan.skipped += 1;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Returns true if the tracked issue differs from its rendered source.
///
/// Only the title, raw body text and labels are compared; rendered
/// permalinks change with every commit and would cause an edit per run.
fn needs_update(open: &OpenIssue, source: &SourceIssue, rendered: &RenderedIssue) -> bool {
    let current: BTreeSet<&str> = open.handle.labels.iter().map(String::as_str).collect();
    let wanted: BTreeSet<&str> = rendered.labels.iter().map(String::as_str).collect();

    open.handle.title != rendered.title || open.record.body != source.record.body || current != wanted
}

fn location_of(source: &SourceIssue) -> String {
    format!("{}:{}", source.record.file, source.record.line + 1)
}
