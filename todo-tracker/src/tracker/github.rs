//! GitHub implementation of [`IssueTracker`].

use super::{IssueEdit, IssueState, IssueTracker, RenderedIssue, TrackedIssue, TrackerError};
use crate::config::RepositorySlug;
use crate::rate_limit::ensure_core_rate_limit;
use async_trait::async_trait;
use octocrab::models::issues::Issue;
use octocrab::{models, params, Octocrab};
use tracing::{debug, info, info_span, Instrument};

/// Results per page for list calls.
const RESULTS_PER_PAGE: u8 = 100;

/// Issue tracker backed by a GitHub repository.
#[derive(Debug, Clone)]
pub struct GitHubTracker {
    octocrab: Octocrab,
    repository: RepositorySlug,
}

impl GitHubTracker {
    /// Creates a tracker for `repository` using an authenticated client.
    #[must_use]
    pub fn new(octocrab: Octocrab, repository: RepositorySlug) -> Self {
        Self {
            octocrab,
            repository,
        }
    }

    /// Creates a tracker authenticated with a personal access token.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] if the client cannot be built.
    pub fn with_token(token: String, repository: RepositorySlug) -> Result<Self, TrackerError> {
        let octocrab = Octocrab::builder().personal_token(token).build()?;
        Ok(Self::new(octocrab, repository))
    }

    /// Returns the repository this tracker writes to.
    #[must_use]
    pub fn repository(&self) -> &RepositorySlug {
        &self.repository
    }
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    async fn list_open_issues(&self, label: &str) -> Result<Vec<TrackedIssue>, TrackerError> {
        debug!(repo = %self.repository, label, "Listing tracked issues");

        let labels = [label.to_string()];
        let first_page = self
            .octocrab
            .issues(&self.repository.owner, &self.repository.name)
            .list()
            .state(params::State::Open)
            .labels(&labels)
            .per_page(RESULTS_PER_PAGE)
            .send()
            .await?;

        let mut issues: Vec<TrackedIssue> = self
            .octocrab
            .all_pages::<Issue>(first_page)
            .await?
            .into_iter()
            // The issues endpoint also returns pull requests.
            .filter(|issue| issue.pull_request.is_none())
            .map(tracked_issue)
            .collect();
        issues.sort_by_key(|issue| issue.number);

        Ok(issues)
    }

    async fn list_labels(&self) -> Result<Vec<String>, TrackerError> {
        let first_page = self
            .octocrab
            .issues(&self.repository.owner, &self.repository.name)
            .list_labels_for_repo()
            .per_page(RESULTS_PER_PAGE)
            .send()
            .await?;

        Ok(self
            .octocrab
            .all_pages::<models::Label>(first_page)
            .await?
            .into_iter()
            .map(|label| label.name)
            .collect())
    }

    async fn create_issue(&self, issue: &RenderedIssue) -> Result<u64, TrackerError> {
        let span = info_span!("create_issue", repo = %self.repository, title = %issue.title);

        async {
            ensure_core_rate_limit(&self.octocrab).await?;
            let created = self
                .octocrab
                .issues(&self.repository.owner, &self.repository.name)
                .create(&issue.title)
                .body(&issue.body)
                .labels(issue.labels.clone())
                .assignees(vec![issue.assignee.clone()])
                .send()
                .await?;

            info!(issue_number = created.number, "Issue created successfully");
            Ok(created.number)
        }
        .instrument(span)
        .await
    }

    async fn edit_issue(&self, number: u64, edit: &IssueEdit) -> Result<(), TrackerError> {
        let span = info_span!("edit_issue", repo = %self.repository, issue_number = number);

        async {
            ensure_core_rate_limit(&self.octocrab).await?;
            let handler = self
                .octocrab
                .issues(&self.repository.owner, &self.repository.name);

            let mut update = handler.update(number);
            if let Some(title) = &edit.title {
                update = update.title(title);
            }
            if let Some(body) = &edit.body {
                update = update.body(body);
            }
            if let Some(labels) = &edit.labels {
                update = update.labels(labels.as_slice());
            }
            if let Some(state) = edit.state {
                update = update.state(match state {
                    IssueState::Open => models::IssueState::Open,
                    IssueState::Closed => models::IssueState::Closed,
                });
            }
            update.send().await?;

            info!("Issue updated successfully");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

/// Converts an octocrab issue into the tracker's view of it.
fn tracked_issue(issue: Issue) -> TrackedIssue {
    TrackedIssue {
        number: issue.number,
        title: issue.title,
        body: issue.body,
        labels: issue.labels.into_iter().map(|label| label.name).collect(),
        state: match issue.state {
            models::IssueState::Closed => IssueState::Closed,
            _ => IssueState::Open,
        },
    }
}
