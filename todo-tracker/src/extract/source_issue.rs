//! Extracted issue records.

use crate::provenance::Provenance;
use crate::scanner::RawIssue;
use serde::{Deserialize, Serialize};

/// Everything known about an annotated comment block except its context.
///
/// This is the part embedded in rendered issue bodies, so it must carry all
/// fields the matcher compares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IssueRecord {
    /// The marker word, e.g. `TODO`.
    pub kind: String,

    /// File path relative to the repository root, `/`-separated.
    pub file: String,

    /// 0-based line of the marker.
    pub line: usize,

    /// 0-based line following the block.
    pub line_end: usize,

    /// First line of `body`; the issue title.
    pub headline: String,

    /// Block text, lines joined with `\n`.
    pub body: String,

    /// Commit that last touched the marker line.
    pub commit_hash: String,

    /// Author name of that commit.
    pub author: String,

    /// Author e-mail of that commit, as printed by git.
    pub author_mail: String,

    /// Author timestamp, seconds since the Unix epoch.
    pub author_time: i64,

    /// Committer timestamp, seconds since the Unix epoch.
    pub committer_time: i64,

    /// First line of the commit message.
    #[serde(default)]
    pub summary: String,
}

impl IssueRecord {
    /// Combines a scanned block with its provenance.
    #[must_use]
    pub fn new(file: impl Into<String>, raw: &RawIssue, provenance: Provenance) -> Self {
        let body = raw.body();
        Self {
            kind: raw.kind.clone(),
            file: file.into(),
            line: raw.start_line,
            line_end: raw.end_line,
            headline: headline_of(&body).to_string(),
            body,
            commit_hash: provenance.commit_hash,
            author: provenance.author.name,
            author_mail: provenance.author.email,
            author_time: provenance.author_time,
            committer_time: provenance.committer_time,
            summary: provenance.summary,
        }
    }
}

/// Returns the first line of an issue body.
#[must_use]
pub fn headline_of(body: &str) -> &str {
    body.lines().next().unwrap_or_default()
}

/// An issue extracted from the source tree in this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIssue {
    /// Fields shared with tracked issues.
    pub record: IssueRecord,

    /// The block plus surrounding lines, verbatim.
    pub context: String,
}
