#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod actions;
pub mod config;
pub mod extract;
pub mod provenance;
pub mod rate_limit;
pub mod reconcile;
pub mod runner;
pub mod scanner;
pub mod snapshot;
pub mod summary;
pub mod templates;
pub mod tracker;

pub use actions::{plan_actions, Action, ActionExecutor, ActionPlan, ActionStatus};
pub use config::{
    AuthorDirectory, ConfigError, LabelScheme, ProvenancePolicy, RepositorySlug, TrackerConfig,
    UnknownAuthorPolicy,
};
pub use extract::{ExtractError, Extraction, IssueExtractor, IssueRecord, SourceIssue};
pub use provenance::{AuthorIdentity, GitRepository, Provenance, ProvenanceError, VersionControl};
pub use rate_limit::{check_core_rate_limit, ensure_core_rate_limit, wait_if_needed, RateLimitInfo};
pub use reconcile::{reconcile, Match, Reconciliation};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use scanner::{scan_source, CommentScanner, MarkerLexicon, RawIssue};
pub use snapshot::{decode_payload, encode_payload, load_snapshot, OpenIssue, PayloadError, Snapshot};
pub use summary::RunSummary;
pub use templates::{create_handlebars_registry, IssueRenderer, RenderError, RepositoryContext};
pub use tracker::{
    GitHubTracker, IssueEdit, IssueState, IssueTracker, RenderedIssue, TrackedIssue, TrackerError,
};
