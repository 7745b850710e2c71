//! Issue renderer.

use super::{short_hash, RenderError, DEFAULT_BODY_TEMPLATE};
use crate::config::{AuthorDirectory, LabelScheme, RepositorySlug};
use crate::extract::{IssueRecord, SourceIssue};
use crate::snapshot::encode_payload;
use crate::tracker::RenderedIssue;
use chrono::DateTime;
use handlebars::{no_escape, Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde_json::{json, Value};

const BODY_TEMPLATE_NAME: &str = "body";

/// Creates a configured Handlebars registry with custom helpers.
///
/// The registry is configured with:
/// - No HTML escaping (for markdown output)
/// - Strict mode (catches missing variables)
/// - `eq` helper for equality comparisons
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs.register_helper("eq", Box::new(eq_helper));

    hbs
}

/// Equality comparison for templates.
///
/// Usage: `{{#if (eq kind "HACK")}}...{{/if}}`
fn eq_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param1 = h.param(0).and_then(|v| v.value().as_str());
    let param2 = h.param(1).and_then(|v| v.value().as_str());

    let result = match (param1, param2) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };

    out.write(if result { "true" } else { "" })?;
    Ok(())
}

/// Where rendered links point to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryContext {
    /// The GitHub repository.
    pub repository: RepositorySlug,

    /// Commit the permalinks are pinned to, usually `HEAD`.
    pub head_commit: String,
}

impl RepositoryContext {
    fn commit_url(&self, hash: &str) -> String {
        format!(
            "https://github.com/{}/commit/{hash}",
            self.repository.full_name()
        )
    }

    fn permalink(&self, file: &str, line: usize) -> String {
        format!(
            "https://github.com/{}/blob/{}/{file}#L{line}",
            self.repository.full_name(),
            self.head_commit
        )
    }
}

/// Turns extracted issues into tracker issues.
pub struct IssueRenderer {
    handlebars: Handlebars<'static>,
    labels: LabelScheme,
    authors: AuthorDirectory,
    context: RepositoryContext,
}

impl IssueRenderer {
    /// Creates a renderer using [`DEFAULT_BODY_TEMPLATE`].
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be registered.
    pub fn new(
        labels: LabelScheme,
        authors: AuthorDirectory,
        context: RepositoryContext,
    ) -> Result<Self, RenderError> {
        let mut handlebars = create_handlebars_registry();
        handlebars.register_template_string(BODY_TEMPLATE_NAME, DEFAULT_BODY_TEMPLATE)?;

        Ok(Self {
            handlebars,
            labels,
            authors,
            context,
        })
    }

    /// Replaces the body template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not parse.
    pub fn with_body_template(mut self, template: &str) -> Result<Self, RenderError> {
        self.handlebars
            .register_template_string(BODY_TEMPLATE_NAME, template)?;
        Ok(self)
    }

    /// Returns the label scheme used for rendered issues.
    #[must_use]
    pub fn labels(&self) -> &LabelScheme {
        &self.labels
    }

    /// Looks up the GitHub login of the record's author.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownAuthor`] if none is configured.
    pub fn assignee_for(&self, record: &IssueRecord) -> Result<String, RenderError> {
        self.authors
            .handle_for(&record.author_mail)
            .map(str::to_string)
            .ok_or_else(|| RenderError::UnknownAuthor {
                email: record.author_mail.clone(),
            })
    }

    /// Renders an extracted issue.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownAuthor`] or [`RenderError::UnknownMarker`]
    /// if the author or the marker are not configured, or an error if the
    /// template fails to render.
    pub fn render(&self, issue: &SourceIssue) -> Result<RenderedIssue, RenderError> {
        let record = &issue.record;
        let labels = self
            .labels
            .labels_for(&record.kind)
            .ok_or_else(|| RenderError::UnknownMarker {
                kind: record.kind.clone(),
            })?;
        let assignee = self.assignee_for(record)?;

        let data = self.template_data(issue, &assignee);
        let prose = self.handlebars.render(BODY_TEMPLATE_NAME, &data)?;
        let payload = encode_payload(record)?;

        Ok(RenderedIssue {
            title: issue_title(record),
            body: format!("{}\n\n{payload}", prose.trim_end()),
            labels,
            assignee,
        })
    }

    fn template_data(&self, issue: &SourceIssue, assignee: &str) -> Value {
        let record = &issue.record;
        let line = record.line + 1;

        json!({
            "kind": record.kind,
            "date": format_date(record.author_time),
            "assignee": assignee,
            "author": record.author,
            "commit_hash": record.commit_hash,
            "short_hash": short_hash(&record.commit_hash),
            "commit_url": self.context.commit_url(&record.commit_hash),
            "summary": record.summary,
            "body": record.body,
            "context": issue.context,
            "file": record.file,
            "line": line,
            "permalink": self.context.permalink(&record.file, line)
        })
    }
}

/// Returns the issue title: the headline, or the marker and location when
/// the marker line carries no text.
fn issue_title(record: &IssueRecord) -> String {
    if record.headline.trim().is_empty() {
        format!("{} at {}:{}", record.kind, record.file, record.line + 1)
    } else {
        record.headline.clone()
    }
}

/// Formats a Unix timestamp as a UTC `YYYY-MM-DD` date.
fn format_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
