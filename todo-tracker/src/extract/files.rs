//! File-set selection.

use super::ExtractError;
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Lists files under `root` matching any of `globs`, relative to `root`.
///
/// Globs use gitignore syntax (`**` matches any number of directories).
/// Files excluded by `.gitignore` and hidden files are skipped. The result is
/// ordered by path, which fixes the order of extracted issues.
///
/// # Errors
///
/// Returns [`ExtractError::WalkError`] if a glob is invalid or a directory
/// cannot be read.
pub fn collect_files(root: &Path, globs: &[String]) -> Result<Vec<PathBuf>, ExtractError> {
    let mut overrides = OverrideBuilder::new(root);
    for glob in globs {
        overrides.add(glob)?;
    }
    let overrides = overrides.build()?;

    let mut walker = WalkBuilder::new(root);
    walker
        .overrides(overrides)
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut files = Vec::new();
    for entry in walker.build() {
        let entry = entry?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        files.push(relative.to_path_buf());
    }

    Ok(files)
}

/// Formats a relative path with `/` separators for payloads and permalinks.
#[must_use]
pub fn display_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
