//! Per-content-type normalisation applied before matching.

use std::ops::Deref;

use tagscope_types::{ContentType, MatchContent};

/// Normalise content according to its type.
///
/// Pure and total: returns a new value, never fails.
pub fn preprocess(content: &MatchContent) -> MatchContent {
    let text = &content.content;
    let processed = match content.content_type {
        ContentType::FilePath => normalize_path(text.trim()),
        ContentType::CommitMessage
        | ContentType::PrTitle
        | ContentType::PrDescription
        | ContentType::IssueTitle
        | ContentType::IssueBody
        | ContentType::Comment => text.trim().to_string(),
        ContentType::CodeContent => text.trim().replace("\r\n", "\n"),
        ContentType::Label => text.trim().to_lowercase(),
        ContentType::PrClosesIssue | ContentType::Reaction => return content.clone(),
    };
    content.with_content(processed)
}

/// Normalise a path: `\` becomes `/`, `.` segments and duplicate separators
/// are dropped, and `..` folds into its parent where one exists.
///
/// An empty relative result is `"."`; a trailing separator is kept.
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    if path.is_empty() {
        return ".".to_string();
    }

    let absolute = path.starts_with('/');
    let trailing = path.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), Some(&last) if last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let mut normalized = segments.join("/");
    if absolute {
        normalized.insert(0, '/');
    }
    if normalized.is_empty() {
        normalized.push('.');
    }
    if trailing && !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}

/// Content that has already been through [`preprocess`].
///
/// Only constructible by preprocessing, so matchers that take it can skip
/// the step and batch callers pay for it once per item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedContent(MatchContent);

impl PreparedContent {
    pub fn new(content: &MatchContent) -> Self {
        Self(preprocess(content))
    }

    pub fn text(&self) -> &str {
        &self.0.content
    }

    pub fn content_type(&self) -> ContentType {
        self.0.content_type
    }

    pub fn into_inner(self) -> MatchContent {
        self.0
    }
}

impl Deref for PreparedContent {
    type Target = MatchContent;

    fn deref(&self) -> &MatchContent {
        &self.0
    }
}

impl From<&MatchContent> for PreparedContent {
    fn from(content: &MatchContent) -> Self {
        Self::new(content)
    }
}
