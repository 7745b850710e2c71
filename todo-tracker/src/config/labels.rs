//! Marker to label mapping.

use std::collections::BTreeMap;

/// Labels attached to tracked issues, per marker word.
///
/// Every tracked issue carries the sentinel label plus the category label of
/// its marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelScheme {
    sentinel: String,
    categories: BTreeMap<String, String>,
}

impl LabelScheme {
    /// Creates a scheme from the sentinel label and a marker → category table.
    #[must_use]
    pub fn new(sentinel: impl Into<String>, categories: BTreeMap<String, String>) -> Self {
        Self {
            sentinel: sentinel.into(),
            categories,
        }
    }

    /// Returns the label marking an issue as managed by the tracker.
    #[must_use]
    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Returns `[sentinel, category]` for a marker, or `None` for an unknown marker.
    #[must_use]
    pub fn labels_for(&self, kind: &str) -> Option<Vec<String>> {
        self.categories
            .get(kind)
            .map(|category| vec![self.sentinel.clone(), category.clone()])
    }

    /// Returns every label the scheme can produce, without duplicates.
    #[must_use]
    pub fn all_labels(&self) -> Vec<String> {
        let mut labels = vec![self.sentinel.clone()];
        for category in self.categories.values() {
            if !labels.contains(category) {
                labels.push(category.clone());
            }
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme() -> LabelScheme {
        LabelScheme::new(
            "tracker",
            BTreeMap::from([
                ("TODO".to_string(), "refactor".to_string()),
                ("OPT".to_string(), "performance".to_string()),
                ("HACK".to_string(), "hack".to_string()),
            ]),
        )
    }

    #[test]
    fn can_look_up_labels_for_marker() {
        let scheme = scheme();
        assert_eq!(
            scheme.labels_for("OPT"),
            Some(vec!["tracker".to_string(), "performance".to_string()])
        );
        assert_eq!(scheme.labels_for("FIXME"), None);
    }

    #[test]
    fn all_labels_starts_with_sentinel() {
        let labels = scheme().all_labels();
        assert_eq!(labels[0], "tracker");
        assert_eq!(labels.len(), 4);
    }
}
