//! GitHub repository identification.

use super::ConfigError;
use std::fmt;
use url::Url;

/// A GitHub repository in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,
}

impl RepositorySlug {
    /// Parses a repository from a remote URL.
    ///
    /// Accepts SSH remotes (`git@github.com:owner/repo.git`), HTTPS remotes
    /// (`https://github.com/owner/repo`, optionally ending in `.git`) and bare
    /// `owner/repo` slugs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRepository`] if no owner and name can be
    /// derived.
    pub fn parse(remote: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidRepository {
            url: remote.to_string(),
        };
        let remote = remote.trim();

        let path = if let Some(rest) = remote.strip_prefix("git@github.com:") {
            rest.to_string()
        } else if remote.contains("://") {
            let url = Url::parse(remote).map_err(|_| invalid())?;
            if url.host_str() != Some("github.com") {
                return Err(invalid());
            }
            url.path().trim_start_matches('/').to_string()
        } else {
            remote.to_string()
        };

        let path = path.trim_end_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        let mut parts = path.split('/');

        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if is_slug_part(owner) && is_slug_part(name) => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(invalid()),
        }
    }

    /// Returns the repository in `owner/name` form.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

fn is_slug_part(part: &str) -> bool {
    !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
