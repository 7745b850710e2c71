//! Marker word recognition.

use regex::Regex;
use std::sync::OnceLock;

/// Recognizes marker comments (`// TODO ...`) and their continuation lines.
#[derive(Debug, Clone)]
pub struct MarkerLexicon {
    marker: Regex,
}

/// A comment line that opens a new marker block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerLine<'a> {
    /// The marker word, e.g. `TODO`.
    pub kind: &'a str,
    /// Text following the marker.
    pub text: &'a str,
}

fn continuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"//\W*(.*?)\s*$").expect("continuation regex must compile"))
}

impl MarkerLexicon {
    /// Builds a lexicon recognizing the given marker words.
    ///
    /// # Errors
    ///
    /// Returns an error if the words do not form a valid pattern.
    pub fn new<'a>(words: impl IntoIterator<Item = &'a str>) -> Result<Self, regex::Error> {
        let alternation = words
            .into_iter()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");
        let marker = Regex::new(&format!(r"//\W*({alternation})\b\W*(.*?)\s*$"))?;
        Ok(Self { marker })
    }

    /// Matches a line that opens a marker block.
    #[must_use]
    pub fn marker<'a>(&self, line: &'a str) -> Option<MarkerLine<'a>> {
        let captures = self.marker.captures(line)?;
        Some(MarkerLine {
            kind: captures.get(1)?.as_str(),
            text: captures.get(2).map_or("", |m| m.as_str()),
        })
    }

    /// Matches a comment line that may continue a marker block.
    ///
    /// Callers must check [`Self::marker`] first; a marker line also matches here.
    #[must_use]
    pub fn continuation<'a>(&self, line: &'a str) -> Option<&'a str> {
        continuation_re()
            .captures(line)
            .map(|captures| captures.get(1).map_or("", |m| m.as_str()))
    }
}

impl Default for MarkerLexicon {
    fn default() -> Self {
        Self::new(["TODO", "HACK", "OPT"]).expect("default markers must compile")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_match_marker_variants() {
        let lexicon = MarkerLexicon::default();

        for line in [
            "// TODO: Fix the thing",
            "    //TODO Fix the thing",
            "let x = 1; // TODO - Fix the thing  ",
            "/// TODO: Fix the thing",
        ] {
            let marker = lexicon.marker(line).unwrap();
            assert_eq!(marker.kind, "TODO", "{line}");
            assert_eq!(marker.text, "Fix the thing", "{line}");
        }
    }

    #[test]
    fn marker_requires_word_boundary() {
        let lexicon = MarkerLexicon::default();
        assert!(lexicon.marker("// TODOS are listed below").is_none());
        assert!(lexicon.marker("// OPTIONAL argument").is_none());
        assert!(lexicon.marker("TODO without a comment").is_none());
    }

    #[test]
    fn can_match_configured_markers_only() {
        let lexicon = MarkerLexicon::new(["FIXME"]).unwrap();
        assert_eq!(lexicon.marker("// FIXME: broken").unwrap().kind, "FIXME");
        assert!(lexicon.marker("// TODO: later").is_none());
    }

    #[test]
    fn can_match_continuation() {
        let lexicon = MarkerLexicon::default();
        assert_eq!(lexicon.continuation("    // more detail "), Some("more detail"));
        assert_eq!(lexicon.continuation("//"), Some(""));
        assert_eq!(lexicon.continuation("let x = 1;"), None);
    }
}
