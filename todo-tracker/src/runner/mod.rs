//! Orchestrates a scan, reconciliation and tracker update.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::actions::{plan_actions, print_dry_run_preview, ActionExecutor};
use crate::config::{LabelScheme, RepositorySlug, TrackerConfig};
use crate::extract::{ExtractError, IssueExtractor};
use crate::provenance::{GitRepository, VersionControl};
use crate::scanner::MarkerLexicon;
use crate::snapshot::load_snapshot;
use crate::summary::RunSummary;
use crate::templates::{IssueRenderer, RepositoryContext};
use crate::tracker::{GitHubTracker, IssueTracker, TrackerError};
use tracing::{info, warn};

/// Orchestrates a full tracker run.
pub struct Runner {
    config: RunnerConfig,
    repository: RepositorySlug,
    tracker: Box<dyn IssueTracker>,
    vcs: Box<dyn VersionControl>,
}

impl Runner {
    /// Builds a runner talking to GitHub and to git in the configured root.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the repository URL cannot be parsed or the
    /// GitHub client cannot be built.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let repository = RepositorySlug::parse(config.repository_url())?;
        let tracker = GitHubTracker::with_token(config.token().to_string(), repository.clone())?;
        let vcs = GitRepository::new(config.root());

        Ok(Self {
            config,
            repository,
            tracker: Box::new(tracker),
            vcs: Box::new(vcs),
        })
    }

    /// Builds a runner with custom backends.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the repository URL cannot be parsed.
    pub fn with_backends(
        config: RunnerConfig,
        tracker: Box<dyn IssueTracker>,
        vcs: Box<dyn VersionControl>,
    ) -> Result<Self, RunnerError> {
        let repository = RepositorySlug::parse(config.repository_url())?;
        Ok(Self {
            config,
            repository,
            tracker,
            vcs,
        })
    }

    /// Executes the full flow: extract, load tracked issues, reconcile, apply.
    ///
    /// Every action is planned and rendered before the first mutation.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] on configuration, git, rendering or tracker
    /// failures. Tracker failures are not retried.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let settings = self.load_settings()?;
        let lexicon = MarkerLexicon::new(settings.marker_words()).map_err(ExtractError::from)?;
        let labels = settings.label_scheme();

        let head_commit = self.vcs.head_commit().await?;
        let dry_run = self.is_dry_run(&settings).await?;
        let mut summary = RunSummary::new(dry_run);
        info!(
            repo = %self.repository,
            head = %head_commit,
            dry_run,
            "Starting tracker run"
        );

        let extraction = IssueExtractor::new(self.config.root(), &lexicon, self.vcs.as_ref())
            .with_context_lines(settings.context_lines)
            .with_policy(settings.provenance_failure)
            .with_concurrency(self.config.concurrency())
            .extract_globs(&settings.include)
            .await?;
        summary.record_extraction(&extraction);

        self.check_labels(&labels).await?;
        let snapshot = load_snapshot(self.tracker.as_ref(), labels.sentinel()).await?;
        summary.record_snapshot(&snapshot);

        let context = RepositoryContext {
            repository: self.repository.clone(),
            head_commit,
        };
        let mut renderer = IssueRenderer::new(labels, settings.author_directory(), context)?;
        if let Some(template) = &settings.body_template {
            renderer = renderer.with_body_template(template)?;
        }

        let plan = plan_actions(
            &snapshot,
            &extraction,
            &renderer,
            settings.unknown_author,
        )?;
        summary.record_plan(&plan);
        info!(
            actions = plan.actions.len(),
            unchanged = plan.unchanged,
            skipped = plan.skipped,
            deferred = plan.deferred,
            "Planned tracker changes"
        );

        if dry_run && !plan.is_empty() {
            print_dry_run_preview(&plan);
        }

        let executor = ActionExecutor::new(self.tracker.as_ref(), dry_run);
        for action in &plan.actions {
            executor.execute(action).await?;
            summary.record_action(action);
        }

        Ok(summary)
    }

    fn load_settings(&self) -> Result<TrackerConfig, RunnerError> {
        let settings = match self.config.config_path() {
            Some(path) => TrackerConfig::load(path)?,
            None => TrackerConfig::load_or_default(self.config.root())?,
        };
        Ok(settings)
    }

    /// A run is dry if requested, or if a live branch is configured and not
    /// checked out.
    async fn is_dry_run(&self, settings: &TrackerConfig) -> Result<bool, RunnerError> {
        if self.config.dry_run() {
            return Ok(true);
        }

        let Some(live_branch) = &settings.live_branch else {
            return Ok(false);
        };

        let branch = self.vcs.current_branch().await?;
        if &branch == live_branch {
            Ok(false)
        } else {
            info!(%branch, %live_branch, "Not on the live branch, switching to dry run");
            Ok(true)
        }
    }

    /// Warns about labels GitHub will create implicitly on first use.
    async fn check_labels(&self, labels: &LabelScheme) -> Result<(), TrackerError> {
        let existing = self.tracker.list_labels().await?;
        for label in labels.all_labels() {
            if !existing.contains(&label) {
                warn!(%label, "Label does not exist in the repository yet");
            }
        }
        Ok(())
    }
}
