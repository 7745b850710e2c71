//! Issue extraction over a source tree.
//!
//! Drives the [`scanner`](crate::scanner) over every selected file, attaches
//! provenance to each block and captures its surrounding context.

mod deferral;
mod error;
mod files;
mod source_issue;

pub use deferral::Deferral;
pub use error::ExtractError;
pub use files::{collect_files, display_path};
pub use source_issue::{headline_of, IssueRecord, SourceIssue};

use crate::config::ProvenancePolicy;
use crate::provenance::VersionControl;
use crate::scanner::{scan_source, MarkerLexicon, RawIssue};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn, Instrument};

/// Issues extracted from one run's file-set.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Extracted issues, in file order then line order.
    pub issues: Vec<SourceIssue>,

    /// Number of files scanned.
    pub files_scanned: usize,

    /// Number of files whose issues were dropped.
    pub files_skipped: usize,

    /// Number of individual issues dropped.
    pub issues_skipped: usize,

    /// Dropped files and issues, in file order.
    pub deferred: Vec<Deferral>,
}

impl Extraction {
    /// Returns true if the tracked issue described by `record` lies in a part
    /// of the tree that could not be extracted.
    #[must_use]
    pub fn defers(&self, record: &IssueRecord) -> bool {
        self.deferred.iter().any(|deferral| deferral.covers(record))
    }
}

/// Outcome of extracting a single file.
#[derive(Debug, Default)]
struct FileExtraction {
    issues: Vec<SourceIssue>,
    deferred: Vec<Deferral>,
}

impl FileExtraction {
    fn skipped(file: String) -> Self {
        Self {
            issues: Vec::new(),
            deferred: vec![Deferral::File { file }],
        }
    }
}

/// Extracts [`SourceIssue`]s from files under a root.
pub struct IssueExtractor<'a> {
    root: PathBuf,
    lexicon: &'a MarkerLexicon,
    vcs: &'a dyn VersionControl,
    context_lines: usize,
    policy: ProvenancePolicy,
    concurrency: usize,
}

impl<'a> IssueExtractor<'a> {
    /// Creates an extractor for the tree at `root`.
    pub fn new(
        root: impl Into<PathBuf>,
        lexicon: &'a MarkerLexicon,
        vcs: &'a dyn VersionControl,
    ) -> Self {
        Self {
            root: root.into(),
            lexicon,
            vcs,
            context_lines: crate::config::default_context_lines(),
            policy: ProvenancePolicy::default(),
            concurrency: 1,
        }
    }

    /// Sets the number of context lines captured on each side of a block.
    #[must_use]
    pub fn with_context_lines(mut self, context_lines: usize) -> Self {
        self.context_lines = context_lines;
        self
    }

    /// Sets the handling of lines without committed history.
    #[must_use]
    pub fn with_policy(mut self, policy: ProvenancePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets how many files are processed at once.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Extracts issues from every file matching `globs`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] if the tree cannot be walked, a file cannot be
    /// read, or git itself fails.
    pub async fn extract_globs(&self, globs: &[String]) -> Result<Extraction, ExtractError> {
        let files = collect_files(&self.root, globs)?;
        info!(count = files.len(), "Selected files to scan");
        self.extract_files(&files).await
    }

    /// Extracts issues from the given files, relative to the root.
    ///
    /// Files are processed concurrently but results keep the order of `files`.
    ///
    /// # Errors
    ///
    /// See [`Self::extract_globs`].
    pub async fn extract_files(&self, files: &[PathBuf]) -> Result<Extraction, ExtractError> {
        let results: Vec<FileExtraction> = stream::iter(files)
            .map(|file| self.extract_file(file))
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        let mut extraction = Extraction {
            files_scanned: files.len(),
            ..Extraction::default()
        };
        for result in results {
            extraction.issues.extend(result.issues);
            for deferral in result.deferred {
                match deferral {
                    Deferral::File { .. } => extraction.files_skipped += 1,
                    Deferral::Issue { .. } => extraction.issues_skipped += 1,
                }
                extraction.deferred.push(deferral);
            }
        }

        info!(
            issues = extraction.issues.len(),
            files = extraction.files_scanned,
            skipped_files = extraction.files_skipped,
            "Extraction complete"
        );
        Ok(extraction)
    }

    async fn extract_file(&self, file: &Path) -> Result<FileExtraction, ExtractError> {
        let span = info_span!("extract", file = %file.display());

        async {
            let path = self.root.join(file);
            let name = display_path(file);
            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                    warn!("File is not valid UTF-8, skipping");
                    return Ok(FileExtraction::skipped(name));
                }
                Err(e) => {
                    return Err(ExtractError::IoError {
                        path: path.display().to_string(),
                        source: e,
                    })
                }
            };

            let raw_issues = scan_source(self.lexicon, &content);
            if raw_issues.is_empty() {
                return Ok(FileExtraction::default());
            }
            debug!(count = raw_issues.len(), "Found marker comments");

            let lines: Vec<&str> = content.lines().collect();
            let mut result = FileExtraction::default();

            for raw in &raw_issues {
                let provenance = match self.vcs.blame_line(file, raw.start_line).await {
                    Ok(provenance) => provenance,
                    Err(e) if e.is_unavailable() => match self.policy {
                        ProvenancePolicy::SkipFile => {
                            warn!(error = %e, "Skipping file with uncommitted issue");
                            return Ok(FileExtraction::skipped(name));
                        }
                        ProvenancePolicy::SkipIssue => {
                            warn!(error = %e, line = raw.start_line, "Skipping uncommitted issue");
                            result.deferred.push(Deferral::Issue {
                                file: name.clone(),
                                line: raw.start_line,
                                headline: headline_of(&raw.body()).to_string(),
                            });
                            continue;
                        }
                    },
                    Err(e) => return Err(e.into()),
                };

                result.issues.push(SourceIssue {
                    record: IssueRecord::new(name.clone(), raw, provenance),
                    context: context_window(&lines, raw, self.context_lines),
                });
            }

            Ok(result)
        }
        .instrument(span)
        .await
    }
}

/// Returns the block plus up to `context_lines` lines on each side.
#[must_use]
pub fn context_window(lines: &[&str], raw: &RawIssue, context_lines: usize) -> String {
    let start = raw.start_line.saturating_sub(context_lines).min(lines.len());
    let end = raw
        .end_line
        .saturating_add(context_lines)
        .min(lines.len())
        .max(start);
    lines[start..end].join("\n")
}
