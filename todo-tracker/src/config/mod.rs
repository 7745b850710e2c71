//! Tracker configuration loading.
//!
//! This module handles parsing the `todo-tracker.toml` file and turning it
//! into the immutable lookup structures used during a run.

mod authors;
mod error;
mod labels;
mod policy;
mod repository;

pub use authors::AuthorDirectory;
pub use error::ConfigError;
pub use labels::LabelScheme;
pub use policy::{ProvenancePolicy, UnknownAuthorPolicy};
pub use repository::RepositorySlug;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Default file name of the tracker config, relative to the scanned root.
pub const DEFAULT_CONFIG_FILE: &str = "todo-tracker.toml";

/// Parsed contents of a `todo-tracker.toml` file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TrackerConfig {
    /// Globs selecting the files to scan, relative to the root.
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// Lines of surrounding source captured before and after each comment block.
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,

    /// Label marking an issue as managed by the tracker.
    #[serde(default = "default_sentinel_label")]
    pub sentinel_label: String,

    /// Marker word → category label. Also defines which markers are scanned.
    #[serde(default = "default_markers")]
    pub markers: BTreeMap<String, String>,

    /// Author e-mail → GitHub login.
    #[serde(default)]
    pub authors: BTreeMap<String, String>,

    /// Handling of authors without a configured login.
    #[serde(default)]
    pub unknown_author: UnknownAuthorPolicy,

    /// Handling of marker lines without committed history.
    #[serde(default)]
    pub provenance_failure: ProvenancePolicy,

    /// When set, runs on any other branch are dry runs.
    #[serde(default)]
    pub live_branch: Option<String>,

    /// Handlebars template overriding the human-readable part of issue bodies.
    #[serde(default)]
    pub body_template: Option<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            include: default_include(),
            context_lines: default_context_lines(),
            sentinel_label: default_sentinel_label(),
            markers: default_markers(),
            authors: BTreeMap::new(),
            unknown_author: UnknownAuthorPolicy::default(),
            provenance_failure: ProvenancePolicy::default(),
            live_branch: None,
            body_template: None,
        }
    }
}

pub(crate) fn default_include() -> Vec<String> {
    vec!["**/*.rs".to_string()]
}

pub(crate) fn default_context_lines() -> usize {
    5
}

pub(crate) fn default_sentinel_label() -> String {
    "tracker".to_string()
}

pub(crate) fn default_markers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("TODO".to_string(), "refactor".to_string()),
        ("OPT".to_string(), "performance".to_string()),
        ("HACK".to_string(), "hack".to_string()),
    ])
}

impl TrackerConfig {
    /// Loads and validates a tracker config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, is not valid TOML, or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading tracker config");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        config.validate(path)?;
        Ok(config)
    }

    /// Loads `todo-tracker.toml` from `root` if present, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be loaded.
    pub fn load_or_default(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            debug!(path = %path.display(), "No tracker config found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validates the config.
    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let fail = |message: String| {
            Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                message,
            })
        };

        if self.include.is_empty() || self.include.iter().any(|g| g.trim().is_empty()) {
            return fail("include must list at least one non-empty glob".to_string());
        }

        if self.sentinel_label.trim().is_empty() {
            return fail("sentinel-label must not be empty".to_string());
        }

        if self.markers.is_empty() {
            return fail("markers must define at least one marker".to_string());
        }

        for (marker, label) in &self.markers {
            if !is_marker_word(marker) {
                return fail(format!(
                    "marker '{marker}' must be an upper-case word like TODO"
                ));
            }
            if label.trim().is_empty() {
                return fail(format!("marker '{marker}' has an empty label"));
            }
        }

        for (email, login) in &self.authors {
            if login.trim().is_empty() {
                return fail(format!("author '{email}' has an empty GitHub login"));
            }
        }

        Ok(())
    }

    /// Builds the label scheme described by this config.
    #[must_use]
    pub fn label_scheme(&self) -> LabelScheme {
        LabelScheme::new(self.sentinel_label.clone(), self.markers.clone())
    }

    /// Builds the author directory described by this config.
    #[must_use]
    pub fn author_directory(&self) -> AuthorDirectory {
        AuthorDirectory::new(&self.authors)
    }

    /// Returns the configured marker words.
    pub fn marker_words(&self) -> impl Iterator<Item = &str> {
        self.markers.keys().map(String::as_str)
    }
}

fn is_marker_word(word: &str) -> bool {
    let mut chars = word.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn can_load_full_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(
            &path,
            r#"
include = ["src/**/*.rs", "benches/**/*.rs"]
context-lines = 3
sentinel-label = "bot"
unknown-author = "skip"
provenance-failure = "skip-issue"
live-branch = "master"

[markers]
TODO = "refactor"
FIXME = "bug"

[authors]
"remco@0x.org" = "recmo"
"#,
        )
        .unwrap();

        let config = TrackerConfig::load(&path).unwrap();

        assert_eq!(config.include.len(), 2);
        assert_eq!(config.context_lines, 3);
        assert_eq!(config.sentinel_label, "bot");
        assert_eq!(config.unknown_author, UnknownAuthorPolicy::Skip);
        assert_eq!(config.provenance_failure, ProvenancePolicy::SkipIssue);
        assert_eq!(config.live_branch.as_deref(), Some("master"));
        assert_eq!(config.marker_words().collect::<Vec<_>>(), ["FIXME", "TODO"]);
        assert_eq!(
            config.author_directory().handle_for("<remco@0x.org>"),
            Some("recmo")
        );
    }

    #[test]
    fn empty_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "").unwrap();

        let config = TrackerConfig::load(&path).unwrap();

        assert_eq!(config.include, default_include());
        assert_eq!(config.context_lines, 5);
        assert_eq!(config.sentinel_label, "tracker");
        assert_eq!(
            config.label_scheme().labels_for("TODO"),
            Some(vec!["tracker".to_string(), "refactor".to_string()])
        );
        assert_eq!(config.unknown_author, UnknownAuthorPolicy::Abort);
        assert_eq!(config.provenance_failure, ProvenancePolicy::SkipFile);
    }

    #[test]
    fn load_rejects_lowercase_marker() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "[markers]\ntodo = \"refactor\"\n").unwrap();

        let result = TrackerConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn load_rejects_empty_include() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "include = []\n").unwrap();

        let result = TrackerConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn load_rejects_unknown_policy() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "unknown-author = \"ignore\"\n").unwrap();

        let result = TrackerConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }

    #[test]
    fn load_missing_file() {
        let temp = TempDir::new().unwrap();

        let result = TrackerConfig::load(&temp.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::MissingFile { .. })));
    }

    #[test]
    fn load_or_default_without_file() {
        let temp = TempDir::new().unwrap();

        let config = TrackerConfig::load_or_default(temp.path()).unwrap();
        assert_eq!(config.markers, default_markers());
    }
}
