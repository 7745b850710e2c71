//! Applying create/update/close actions to the tracker.

mod action;
mod plan;

pub use action::{Action, ActionStatus};
pub use plan::{plan_actions, ActionPlan};

use crate::tracker::{IssueEdit, IssueTracker, TrackerError};
use tracing::{info, info_span, Instrument};

/// Lines of a new issue's body shown in the dry-run preview.
const PREVIEW_LINES: usize = 10;

/// Applies actions through an [`IssueTracker`].
///
/// In dry-run mode every action is logged exactly as in a live run but no
/// mutation is sent.
pub struct ActionExecutor<'a> {
    tracker: &'a dyn IssueTracker,
    dry_run: bool,
}

impl<'a> ActionExecutor<'a> {
    /// Creates an executor.
    #[must_use]
    pub fn new(tracker: &'a dyn IssueTracker, dry_run: bool) -> Self {
        Self { tracker, dry_run }
    }

    /// Returns whether mutations are suppressed.
    #[must_use]
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Applies a single action.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] if the remote call fails. Nothing is retried.
    pub async fn execute(&self, action: &Action) -> Result<ActionStatus, TrackerError> {
        let span = info_span!("apply_action", action = action.verb(), dry_run = self.dry_run);

        async {
            match action {
                Action::Create { location, issue } => {
                    info!(%location, title = %issue.title, assignee = %issue.assignee, "Creating issue");
                    if self.dry_run {
                        return Ok(ActionStatus::Previewed);
                    }
                    let number = self.tracker.create_issue(issue).await?;
                    info!(issue_number = number, "Issue created");
                    Ok(ActionStatus::Created { number })
                }
                Action::Update {
                    number,
                    location,
                    issue,
                } => {
                    info!(issue_number = number, %location, title = %issue.title, "Updating issue");
                    if self.dry_run {
                        return Ok(ActionStatus::Previewed);
                    }
                    self.tracker
                        .edit_issue(*number, &IssueEdit::rewrite(issue))
                        .await?;
                    Ok(ActionStatus::Updated { number: *number })
                }
                Action::Close { number, title } => {
                    info!(issue_number = number, %title, "Closing issue");
                    if self.dry_run {
                        return Ok(ActionStatus::Previewed);
                    }
                    self.tracker.edit_issue(*number, &IssueEdit::close()).await?;
                    Ok(ActionStatus::Closed { number: *number })
                }
            }
        }
        .instrument(span)
        .await
    }
}

/// Prints what a dry run would do.
pub fn print_dry_run_preview(plan: &ActionPlan) {
    println!("\n[DRY RUN] {} action(s) planned", plan.actions.len());

    for (i, action) in plan.actions.iter().enumerate() {
        let position = format!("[{}/{}]", i + 1, plan.actions.len());
        match action {
            Action::Create { location, issue } => {
                println!("  {position} Would create \"{}\" ({location})", issue.title);
                println!("    Labels: {}", issue.labels.join(", "));
                println!("    Assignee: @{}", issue.assignee);
                for line in issue.body.lines().take(PREVIEW_LINES) {
                    println!("    | {line}");
                }
                if issue.body.lines().count() > PREVIEW_LINES {
                    println!("    | ...");
                }
            }
            Action::Update {
                number,
                location,
                issue,
            } => {
                println!(
                    "  {position} Would update #{number} \"{}\" ({location})",
                    issue.title
                );
            }
            Action::Close { number, title } => {
                println!("  {position} Would close #{number} \"{title}\"");
            }
        }
    }

    println!();
}
