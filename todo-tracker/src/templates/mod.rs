//! Issue rendering using Handlebars.
//!
//! A [`SourceIssue`](crate::extract::SourceIssue) becomes a title, a body,
//! labels and an assignee. The human-readable part of the body comes from a
//! template (overridable per repository); the machine-readable payload is
//! always appended after it.

mod error;
mod renderer;

pub use error::RenderError;
pub use renderer::{create_handlebars_registry, IssueRenderer, RepositoryContext};

/// Default template for the human-readable part of an issue body.
///
/// Available variables: `kind`, `date`, `assignee`, `author`, `commit_hash`,
/// `short_hash`, `commit_url`, `summary`, `body`, `context`, `file`, `line`
/// (1-based) and `permalink`.
pub const DEFAULT_BODY_TEMPLATE: &str = "*On {{date}} @{{assignee}} wrote in [`{{short_hash}}`]({{commit_url}}) “{{summary}}”:*

{{body}}

```rust
{{context}}
```
*From [`{{file}}:{{line}}`]({{permalink}})*";

/// Length of abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 7;

/// Returns the abbreviated form of a commit hash.
#[must_use]
pub fn short_hash(hash: &str) -> &str {
    hash.get(..SHORT_HASH_LEN).unwrap_or(hash)
}
