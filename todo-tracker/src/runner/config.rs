//! Runner configuration.

use std::path::{Path, PathBuf};

/// Configuration for a tracker run, as given on the command line.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Root of the working tree to scan.
    root: PathBuf,
    /// Explicit tracker config file; `todo-tracker.toml` under the root otherwise.
    config_path: Option<PathBuf>,
    /// Remote URL or `owner/repo` of the GitHub repository.
    repository_url: String,
    /// GitHub token used for API calls.
    token: String,
    /// Whether to preview changes without touching the tracker.
    dry_run: bool,
    /// Maximum files processed at once.
    concurrency: usize,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(
        root: PathBuf,
        repository_url: String,
        token: String,
        dry_run: bool,
        concurrency: usize,
    ) -> Self {
        Self {
            root,
            config_path: None,
            repository_url,
            token,
            dry_run,
            concurrency,
        }
    }

    /// Sets an explicit tracker config file.
    #[must_use]
    pub fn with_config_path(mut self, config_path: PathBuf) -> Self {
        self.config_path = Some(config_path);
        self
    }

    /// Returns the working tree root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the explicit tracker config file, if any.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Returns the repository URL.
    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns whether dry-run mode was requested.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the max files processed at once.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }
}
