use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic category of a text fragment being classified.
///
/// Decides which preprocessing applies to the fragment and which
/// patterns are eligible to match it at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    /// Path of a file touched by a change
    FilePath,
    /// Commit message
    CommitMessage,
    /// Source code content
    CodeContent,
    /// Pull request title
    PrTitle,
    /// Pull request description
    PrDescription,
    /// Marker for a pull request that closes an issue
    PrClosesIssue,
    /// Issue title
    IssueTitle,
    /// Issue body
    IssueBody,
    /// Review or discussion comment
    Comment,
    /// Issue or pull request label
    Label,
    /// Reaction content
    Reaction,
}

impl ContentType {
    pub const ALL: [ContentType; 11] = [
        ContentType::FilePath,
        ContentType::CommitMessage,
        ContentType::CodeContent,
        ContentType::PrTitle,
        ContentType::PrDescription,
        ContentType::PrClosesIssue,
        ContentType::IssueTitle,
        ContentType::IssueBody,
        ContentType::Comment,
        ContentType::Label,
        ContentType::Reaction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::FilePath => "FILE_PATH",
            ContentType::CommitMessage => "COMMIT_MESSAGE",
            ContentType::CodeContent => "CODE_CONTENT",
            ContentType::PrTitle => "PR_TITLE",
            ContentType::PrDescription => "PR_DESCRIPTION",
            ContentType::PrClosesIssue => "PR_CLOSES_ISSUE",
            ContentType::IssueTitle => "ISSUE_TITLE",
            ContentType::IssueBody => "ISSUE_BODY",
            ContentType::Comment => "COMMENT",
            ContentType::Label => "LABEL",
            ContentType::Reaction => "REACTION",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A piece of content to classify, tagged with its content type.
///
/// Immutable value: preprocessing produces a new instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchContent {
    pub content: String,
    pub content_type: ContentType,
}

impl MatchContent {
    pub fn new(content: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            content: content.into(),
            content_type,
        }
    }

    pub fn file_path(path: impl Into<String>) -> Self {
        Self::new(path, ContentType::FilePath)
    }

    pub fn pr_title(title: impl Into<String>) -> Self {
        Self::new(title, ContentType::PrTitle)
    }

    pub fn commit_message(message: impl Into<String>) -> Self {
        Self::new(message, ContentType::CommitMessage)
    }

    /// True when there is no text to match against.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Same content type, different text.
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self::new(content, self.content_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&ContentType::PrClosesIssue).unwrap();
        assert_eq!(json, "\"PR_CLOSES_ISSUE\"");

        let restored: ContentType = serde_json::from_str("\"FILE_PATH\"").unwrap();
        assert_eq!(restored, ContentType::FilePath);
    }

    #[test]
    fn display_matches_wire_name() {
        for content_type in ContentType::ALL {
            let json = serde_json::to_string(&content_type).unwrap();
            assert_eq!(json.trim_matches('"'), content_type.to_string());
        }
    }

    #[test]
    fn with_content_keeps_type() {
        let original = MatchContent::pr_title("  feat: add parser ");
        let trimmed = original.with_content("feat: add parser");
        assert_eq!(trimmed.content_type, ContentType::PrTitle);
        assert_eq!(original.content, "  feat: add parser ");
    }
}
