//! Line-oriented extraction of marker comment blocks.
//!
//! A block starts at a `// TODO ...` style line and extends over the comment
//! lines directly below it:
//!
//! ```text
//! // TODO: Use a constant-time comparison.   <- start_line, headline
//! // The current one leaks the prefix length. <- continuation
//! fn compare(a: &[u8], b: &[u8]) -> bool {   <- end_line (exclusive)
//! ```

mod lexicon;

pub use lexicon::{MarkerLexicon, MarkerLine};

/// A marker comment block as found in the source, before provenance lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawIssue {
    /// The marker word, e.g. `TODO`.
    pub kind: String,

    /// 0-based line of the marker.
    pub start_line: usize,

    /// 0-based line following the block.
    pub end_line: usize,

    /// Marker text followed by continuation lines.
    pub lines: Vec<String>,
}

impl RawIssue {
    /// Returns the block text, lines joined with `\n`.
    #[must_use]
    pub fn body(&self) -> String {
        self.lines.join("\n")
    }
}

/// Streams [`RawIssue`]s out of a sequence of lines.
///
/// Single pass; the scanner consumes its input and cannot be restarted.
pub struct CommentScanner<'l, I> {
    lexicon: &'l MarkerLexicon,
    lines: I,
    index: usize,
    pending: Option<RawIssue>,
    finished: bool,
}

impl<'l, I, S> CommentScanner<'l, I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    /// Creates a scanner over `lines`.
    pub fn new(lexicon: &'l MarkerLexicon, lines: I) -> Self {
        Self {
            lexicon,
            lines,
            index: 0,
            pending: None,
            finished: false,
        }
    }
}

fn open_block(marker: &MarkerLine<'_>, index: usize) -> RawIssue {
    RawIssue {
        kind: marker.kind.to_string(),
        start_line: index,
        end_line: index + 1,
        lines: vec![marker.text.to_string()],
    }
}

fn close_block(mut issue: RawIssue, index: usize) -> RawIssue {
    issue.end_line = index;
    issue
}

impl<I, S> Iterator for CommentScanner<'_, I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = RawIssue;

    fn next(&mut self) -> Option<RawIssue> {
        if self.finished {
            return None;
        }

        let lexicon = self.lexicon;
        for line in self.lines.by_ref() {
            let line = line.as_ref();
            let index = self.index;

            let emitted = match (self.pending.take(), lexicon.marker(line)) {
                (None, Some(marker)) => {
                    self.pending = Some(open_block(&marker, index));
                    None
                }
                (None, None) => None,
                (Some(mut issue), None) => match lexicon.continuation(line) {
                    Some(text) => {
                        issue.lines.push(text.to_string());
                        self.pending = Some(issue);
                        None
                    }
                    None => Some(close_block(issue, index)),
                },
                // A new marker ends the current block and opens the next one.
                (Some(issue), Some(marker)) => {
                    self.pending = Some(open_block(&marker, index));
                    Some(close_block(issue, index))
                }
            };

            self.index += 1;
            if emitted.is_some() {
                return emitted;
            }
        }

        self.finished = true;
        let index = self.index;
        self.pending.take().map(|issue| close_block(issue, index))
    }
}

/// Scans a whole file's contents.
#[must_use]
pub fn scan_source(lexicon: &MarkerLexicon, content: &str) -> Vec<RawIssue> {
    CommentScanner::new(lexicon, content.lines()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(content: &str) -> Vec<RawIssue> {
        scan_source(&MarkerLexicon::default(), content)
    }

    #[test]
    fn can_scan_block_with_continuations() {
        let issues = scan(
            "fn main() {}\n\
             // TODO: First line\n\
             // second line\n\
             //   third line\n\
             \n\
             fn other() {}\n",
        );

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, "TODO");
        assert_eq!(issues[0].start_line, 1);
        assert_eq!(issues[0].end_line, 4);
        assert_eq!(
            issues[0].lines,
            ["First line", "second line", "third line"]
        );
        assert_eq!(issues[0].body(), "First line\nsecond line\nthird line");
    }

    #[test]
    fn adjacent_markers_produce_separate_issues() {
        let issues = scan(
            "// TODO: one\n\
             // detail of one\n\
             // HACK: two\n\
             // detail of two\n\
             let x = 1;\n",
        );

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].kind, "TODO");
        assert_eq!(issues[0].lines, ["one", "detail of one"]);
        assert_eq!((issues[0].start_line, issues[0].end_line), (0, 2));
        assert_eq!(issues[1].kind, "HACK");
        assert_eq!(issues[1].lines, ["two", "detail of two"]);
        assert_eq!((issues[1].start_line, issues[1].end_line), (2, 4));
    }

    #[test]
    fn flushes_block_at_end_of_file() {
        let issues = scan("let x = 1;\n// OPT: vectorize\n// using simd");

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, "OPT");
        assert_eq!(issues[0].start_line, 1);
        assert_eq!(issues[0].end_line, 3);
        assert_eq!(issues[0].lines, ["vectorize", "using simd"]);
    }

    #[test]
    fn code_line_ends_block() {
        let issues = scan("// TODO: a\nlet x = 1;\n// not a continuation\n");

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].lines, ["a"]);
        assert_eq!(issues[0].end_line, 1);
    }

    #[test]
    fn single_line_marker_spans_one_line() {
        let issues = scan("// HACK: quick fix\n");

        assert_eq!(issues.len(), 1);
        assert_eq!((issues[0].start_line, issues[0].end_line), (0, 1));
        assert!(issues[0].start_line <= issues[0].end_line);
    }

    #[test]
    fn file_without_markers_yields_nothing() {
        assert!(scan("// just a comment\nfn main() {}\n").is_empty());
        assert!(scan("").is_empty());
    }

    #[test]
    fn scanner_is_lazy() {
        let lexicon = MarkerLexicon::default();
        let lines = ["// TODO: a", "", "// TODO: b", ""];
        let mut scanner = CommentScanner::new(&lexicon, lines.iter());

        assert_eq!(scanner.next().unwrap().lines, ["a"]);
        assert_eq!(scanner.next().unwrap().lines, ["b"]);
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }
}
