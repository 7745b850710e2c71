//! Runner error types.

/// Errors that abort a tracker run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Tracker config or repository URL errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Source tree scanning errors.
    #[error(transparent)]
    Extract(#[from] crate::extract::ExtractError),

    /// git queries outside extraction (HEAD, branch).
    #[error(transparent)]
    Provenance(#[from] crate::provenance::ProvenanceError),

    /// Issue rendering errors, including unknown authors.
    #[error(transparent)]
    Render(#[from] crate::templates::RenderError),

    /// Remote tracker errors.
    #[error(transparent)]
    Tracker(#[from] crate::tracker::TrackerError),
}
