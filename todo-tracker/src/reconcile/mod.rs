//! Pairing of tracked issues with extracted ones.
//!
//! Every (open, source) pair gets an additive similarity score. Pairs are then
//! picked greedily, highest score first, each issue at most once, until no
//! remaining pair scores above [`MATCH_THRESHOLD`].
//!
//! | criterion                  | weight |
//! |----------------------------|--------|
//! | same headline              | 3      |
//! | same file and start line   | 3      |
//! | same commit hash           | 2      |
//!
//! A commit hash alone (2) is not enough to match; either strong key is.

use crate::extract::IssueRecord;

/// Weight of an exactly equal headline.
pub const HEADLINE_WEIGHT: u32 = 3;

/// Weight of an exactly equal file and start line.
pub const LOCATION_WEIGHT: u32 = 3;

/// Weight of an exactly equal commit hash.
pub const COMMIT_WEIGHT: u32 = 2;

/// Pairs must score strictly above this to match.
pub const MATCH_THRESHOLD: f64 = 2.5;

/// Similarity of a tracked record and an extracted record.
#[must_use]
pub fn score(open: &IssueRecord, source: &IssueRecord) -> u32 {
    let mut score = 0;
    if open.headline == source.headline {
        score += HEADLINE_WEIGHT;
    }
    if open.file == source.file && open.line == source.line {
        score += LOCATION_WEIGHT;
    }
    if open.commit_hash == source.commit_hash {
        score += COMMIT_WEIGHT;
    }
    score
}

/// Returns true if a pair with this score may be matched.
#[must_use]
pub fn is_match(score: u32) -> bool {
    f64::from(score) > MATCH_THRESHOLD
}

/// A matched pair of indices into the open and source slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Index of the tracked issue.
    pub open: usize,

    /// Index of the extracted issue.
    pub source: usize,

    /// Score of the pair.
    pub score: u32,
}

/// Result of reconciling tracked issues with extracted ones.
///
/// Every open index appears exactly once, in `matches` or `unmatched_open`;
/// likewise every source index in `matches` or `unmatched_source`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Pairs to update, in the order they were picked.
    pub matches: Vec<Match>,

    /// Tracked issues to close, ascending.
    pub unmatched_open: Vec<usize>,

    /// Extracted issues to create, ascending.
    pub unmatched_source: Vec<usize>,
}

/// Greedily matches `open` against `source`.
///
/// Ties go to the lowest open index, then the lowest source index.
#[must_use]
pub fn reconcile(open: &[&IssueRecord], source: &[&IssueRecord]) -> Reconciliation {
    let mut scores: Vec<Vec<u32>> = open
        .iter()
        .map(|o| source.iter().map(|s| score(o, s)).collect())
        .collect();

    let mut matches = Vec::new();
    while let Some(best) = best_cell(&scores) {
        if !is_match(best.score) {
            break;
        }
        matches.push(best);

        // Each issue is used at most once.
        scores[best.open].iter_mut().for_each(|cell| *cell = 0);
        for row in &mut scores {
            row[best.source] = 0;
        }
    }

    let unmatched_open = (0..open.len())
        .filter(|i| !matches.iter().any(|m| m.open == *i))
        .collect();
    let unmatched_source = (0..source.len())
        .filter(|j| !matches.iter().any(|m| m.source == *j))
        .collect();

    Reconciliation {
        matches,
        unmatched_open,
        unmatched_source,
    }
}

/// Finds the highest cell, scanning row-major so ties keep the first cell.
fn best_cell(scores: &[Vec<u32>]) -> Option<Match> {
    let mut best: Option<Match> = None;
    for (i, row) in scores.iter().enumerate() {
        for (j, &cell) in row.iter().enumerate() {
            if best.map_or(true, |b| cell > b.score) {
                best = Some(Match {
                    open: i,
                    source: j,
                    score: cell,
                });
            }
        }
    }
    best
}
