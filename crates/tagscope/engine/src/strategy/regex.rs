use regex::{Regex, RegexBuilder};
use tagscope_types::{ContentType, PatternOptions};

use super::PatternMatch;
use crate::error::{MatcherError, MatcherResult};

/// Regex source actually compiled for a pattern.
///
/// With `word_boundary`, the pattern is wrapped in `\b` unless it already
/// carries a boundary or an anchor at either end.
pub fn effective_regex(pattern: &str, word_boundary: bool) -> String {
    let explicit = pattern.starts_with(r"\b")
        || pattern.ends_with(r"\b")
        || pattern.starts_with('^')
        || pattern.ends_with('$');
    if word_boundary && !explicit {
        format!(r"\b(?:{pattern})\b")
    } else {
        pattern.to_string()
    }
}

/// Regular expression matching.
#[derive(Debug)]
pub struct RegexMatcher {
    regex: Regex,
    options: PatternOptions,
    target: ContentType,
}

impl RegexMatcher {
    pub fn new(
        pattern: &str,
        options: PatternOptions,
        target: ContentType,
        size_limit: usize,
    ) -> MatcherResult<Self> {
        let source = effective_regex(pattern, options.word_boundary);
        let regex = RegexBuilder::new(&source)
            .case_insensitive(!options.case_sensitive)
            .size_limit(size_limit)
            .build()
            .map_err(|e| MatcherError::InvalidRegex {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            regex,
            options,
            target,
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl PatternMatch for RegexMatcher {
    fn target(&self) -> ContentType {
        self.target
    }

    fn options(&self) -> &PatternOptions {
        &self.options
    }

    fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}
