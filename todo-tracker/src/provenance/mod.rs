//! Version-control provenance of source lines.
//!
//! Provenance is looked up with `git blame --line-porcelain`, one process per
//! marker line. The [`VersionControl`] trait is the seam the extractor and
//! runner talk to, so tests can substitute an in-memory history.

mod error;
mod record;

pub use error::ProvenanceError;
pub use record::{AuthorIdentity, Provenance};

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Hash git reports for lines that are not committed yet.
const UNCOMMITTED_HASH: &str = "0000000000000000000000000000000000000000";

/// Queries against the version-control backend.
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Returns the provenance of a 0-based line of `file` (relative to the root).
    async fn blame_line(&self, file: &Path, line: usize) -> Result<Provenance, ProvenanceError>;

    /// Returns the hash of the checked-out commit.
    async fn head_commit(&self) -> Result<String, ProvenanceError>;

    /// Returns the name of the checked-out branch.
    async fn current_branch(&self) -> Result<String, ProvenanceError>;
}

/// A git working tree queried through the `git` executable.
#[derive(Debug, Clone)]
pub struct GitRepository {
    root: PathBuf,
}

impl GitRepository {
    /// Creates a handle on the working tree at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the working tree root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Runs `git rev-parse <args>` and returns the trimmed output.
    async fn rev_parse(&self, args: &[&str]) -> Result<String, ProvenanceError> {
        let command = format!("rev-parse {}", args.join(" "));
        let output = Command::new("git")
            .arg("rev-parse")
            .args(args)
            .current_dir(&self.root)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ProvenanceError::CommandFailed {
                command: command.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(ProvenanceError::GitFailed {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl VersionControl for GitRepository {
    async fn blame_line(&self, file: &Path, line: usize) -> Result<Provenance, ProvenanceError> {
        // git blame addresses lines from one.
        let range = format!("{0},{0}", line + 1);
        debug!(file = %file.display(), line, "Running git blame");

        let output = Command::new("git")
            .args(["blame", "--line-porcelain", "-L", &range, "--"])
            .arg(file)
            .current_dir(&self.root)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ProvenanceError::CommandFailed {
                command: "blame".to_string(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(ProvenanceError::Unavailable {
                file: file.display().to_string(),
                line,
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_line_porcelain(file, line, &String::from_utf8_lossy(&output.stdout))
    }

    async fn head_commit(&self) -> Result<String, ProvenanceError> {
        self.rev_parse(&["HEAD"]).await
    }

    async fn current_branch(&self) -> Result<String, ProvenanceError> {
        self.rev_parse(&["--abbrev-ref", "HEAD"]).await
    }
}

/// Parses the output of `git blame --line-porcelain` for a single line.
///
/// # Errors
///
/// Returns [`ProvenanceError::Unavailable`] for uncommitted lines and
/// [`ProvenanceError::Malformed`] if a required field is missing.
pub fn parse_line_porcelain(
    file: &Path,
    line: usize,
    output: &str,
) -> Result<Provenance, ProvenanceError> {
    let malformed = |message: &str| ProvenanceError::Malformed {
        command: "blame".to_string(),
        message: format!("{message} ({}:{line})", file.display()),
    };

    let mut lines = output.lines();
    let commit_hash = lines
        .next()
        .and_then(|header| header.split(' ').next())
        .filter(|hash| !hash.is_empty())
        .ok_or_else(|| malformed("missing commit header"))?
        .to_string();

    if commit_hash == UNCOMMITTED_HASH {
        return Err(ProvenanceError::Unavailable {
            file: file.display().to_string(),
            line,
            reason: "line is not committed yet".to_string(),
        });
    }

    // Key/value records end at the tab-prefixed source line.
    let fields: HashMap<&str, &str> = lines
        .take_while(|record| !record.starts_with('\t'))
        .filter_map(|record| record.split_once(' '))
        .collect();

    let field = |key: &str| {
        fields
            .get(key)
            .copied()
            .ok_or_else(|| malformed(&format!("missing '{key}'")))
    };
    let timestamp = |key: &str| {
        field(key)?
            .parse::<i64>()
            .map_err(|_| malformed(&format!("'{key}' is not a timestamp")))
    };

    Ok(Provenance {
        commit_hash,
        author: AuthorIdentity {
            name: field("author")?.to_string(),
            email: field("author-mail")?.to_string(),
        },
        author_time: timestamp("author-time")?,
        committer_time: timestamp("committer-time")?,
        summary: fields.get("summary").copied().unwrap_or_default().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PORCELAIN: &str = "\
3f1c9a7e2b4d6f8091a2b3c4d5e6f708192a3b4c 12 13 1
author Remco Bloemen
author-mail <remco@0x.org>
author-time 1554112200
author-tz +0200
committer Remco Bloemen
committer-mail <remco@0x.org>
committer-time 1554115800
committer-tz +0200
summary Add lehmer gcd
previous 1a2b3c4d5e6f708192a3b4c5d6e7f8091a2b3c4d algebra/u256/src/gcd.rs
filename algebra/u256/src/gcd.rs
\t// TODO: Use a binary gcd for small inputs
";

    #[test]
    fn can_parse_line_porcelain() {
        let provenance =
            parse_line_porcelain(Path::new("algebra/u256/src/gcd.rs"), 12, PORCELAIN).unwrap();

        assert_eq!(
            provenance.commit_hash,
            "3f1c9a7e2b4d6f8091a2b3c4d5e6f708192a3b4c"
        );
        assert_eq!(provenance.author.name, "Remco Bloemen");
        assert_eq!(provenance.author.email, "<remco@0x.org>");
        assert_eq!(provenance.author_time, 1_554_112_200);
        assert_eq!(provenance.committer_time, 1_554_115_800);
        assert_eq!(provenance.summary, "Add lehmer gcd");
    }

    #[test]
    fn uncommitted_line_is_unavailable() {
        let output = format!(
            "{UNCOMMITTED_HASH} 1 1 1\nauthor Not Committed Yet\nauthor-mail <not.committed.yet>\n\
             author-time 1554112200\ncommitter-time 1554112200\nsummary Version of a.rs from a.rs\n\t// TODO: x\n"
        );

        let result = parse_line_porcelain(Path::new("a.rs"), 0, &output);
        assert!(matches!(result, Err(ProvenanceError::Unavailable { .. })));
        assert!(result.unwrap_err().is_unavailable());
    }

    #[test]
    fn missing_fields_are_malformed() {
        let result = parse_line_porcelain(
            Path::new("a.rs"),
            0,
            "3f1c9a7e2b4d6f8091a2b3c4d5e6f708192a3b4c 1 1 1\nauthor Someone\n",
        );
        assert!(matches!(result, Err(ProvenanceError::Malformed { .. })));

        let result = parse_line_porcelain(Path::new("a.rs"), 0, "");
        assert!(matches!(result, Err(ProvenanceError::Malformed { .. })));
    }

    #[test]
    fn source_line_is_not_read_as_field() {
        let output = "3f1c9a7e2b4d6f8091a2b3c4d5e6f708192a3b4c 1 1 1\n\
                      author A\nauthor-mail <a@b.c>\nauthor-time 1\ncommitter-time 2\n\
                      \tsummary fake\n";

        let provenance = parse_line_porcelain(Path::new("a.rs"), 0, output).unwrap();
        assert_eq!(provenance.summary, "");
    }
}
