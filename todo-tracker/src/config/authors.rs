//! Author identity to GitHub login mapping.

use std::collections::BTreeMap;

/// Maps commit author e-mails to the GitHub logins issues are assigned to.
///
/// Lookups ignore case and the angle brackets `git blame` puts around
/// addresses, so `<Remco@0x.org>` and `remco@0x.org` are the same author.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorDirectory {
    handles: BTreeMap<String, String>,
}

impl AuthorDirectory {
    /// Builds a directory from an e-mail → login table.
    #[must_use]
    pub fn new(entries: &BTreeMap<String, String>) -> Self {
        let handles = entries
            .iter()
            .map(|(email, login)| (normalize_email(email), login.clone()))
            .collect();
        Self { handles }
    }

    /// Returns the GitHub login configured for an author e-mail.
    #[must_use]
    pub fn handle_for(&self, email: &str) -> Option<&str> {
        self.handles.get(&normalize_email(email)).map(String::as_str)
    }

    /// Returns the number of configured authors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns true if no authors are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

fn normalize_email(email: &str) -> String {
    email
        .trim()
        .trim_start_matches('<')
        .trim_end_matches('>')
        .to_lowercase()
}
