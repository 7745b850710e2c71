//! Blame record types.

use serde::{Deserialize, Serialize};

/// The person who wrote a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorIdentity {
    /// Author name, e.g. `Remco Bloemen`.
    pub name: String,

    /// Author e-mail as printed by git, e.g. `<remco@0x.org>`.
    pub email: String,
}

/// Version-control attribution of a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    /// Full hash of the commit that last touched the line.
    pub commit_hash: String,

    /// Author of that commit.
    pub author: AuthorIdentity,

    /// Author timestamp, seconds since the Unix epoch.
    pub author_time: i64,

    /// Committer timestamp, seconds since the Unix epoch.
    pub committer_time: i64,

    /// First line of the commit message.
    pub summary: String,
}
