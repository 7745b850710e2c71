//! Parts of the tree left for a later run.

use super::IssueRecord;

/// A file or comment block whose issues could not be extracted this run.
///
/// Tracked issues it covers are neither matched, updated nor closed, so they
/// survive until the block can be read again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferral {
    /// Every issue of the file was dropped.
    File {
        /// File path relative to the root, `/`-separated.
        file: String,
    },

    /// A single comment block was dropped.
    Issue {
        /// File path relative to the root, `/`-separated.
        file: String,
        /// 0-based line of the marker.
        line: usize,
        /// First line of the block.
        headline: String,
    },
}

impl Deferral {
    /// Returns true if the tracked issue described by `record` must be left alone.
    ///
    /// A dropped block covers tracked issues in its file at the same line or
    /// with the same headline, so an edited (and therefore uncommitted) marker
    /// line keeps its issue even after moving.
    #[must_use]
    pub fn covers(&self, record: &IssueRecord) -> bool {
        match self {
            Self::File { file } => record.file == *file,
            Self::Issue {
                file,
                line,
                headline,
            } => record.file == *file && (record.line == *line || record.headline == *headline),
        }
    }
}
