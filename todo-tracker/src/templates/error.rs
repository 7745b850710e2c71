//! Issue rendering error types.

/// Issue rendering error.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The author has no configured GitHub login.
    #[error("No GitHub login configured for author {email}")]
    UnknownAuthor {
        /// Author e-mail as printed by git.
        email: String,
    },

    /// The marker has no configured category label.
    #[error("No label configured for marker {kind}")]
    UnknownMarker {
        /// The marker word.
        kind: String,
    },

    /// Handlebars rendering error.
    #[error("Template rendering error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Template registration error.
    #[error("Template registration error: {0}")]
    Registration(#[from] handlebars::TemplateError),

    /// The payload could not be serialized.
    #[error("Payload encoding error: {0}")]
    Payload(#[from] serde_json::Error),
}
