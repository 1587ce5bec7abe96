use regex::{Regex, RegexBuilder};
use tagscope_types::{ContentType, PatternOptions};

use super::PatternMatch;
use crate::error::{MatcherError, MatcherResult};

/// Substring containment, optionally restricted to whole words.
#[derive(Debug)]
pub struct StringMatcher {
    /// Pattern, case-folded unless matching is case sensitive
    pattern: String,
    options: PatternOptions,
    target: ContentType,
    word_regex: Option<Regex>,
}

impl StringMatcher {
    pub fn new(
        pattern: &str,
        options: PatternOptions,
        target: ContentType,
        size_limit: usize,
    ) -> MatcherResult<Self> {
        let pattern = if options.case_sensitive {
            pattern.to_string()
        } else {
            pattern.to_lowercase()
        };

        let word_regex = if options.word_boundary {
            let source = format!(r"\b{}\b", regex::escape(&pattern));
            let compiled = RegexBuilder::new(&source)
                .case_insensitive(!options.case_sensitive)
                .size_limit(size_limit)
                .build()
                .map_err(|e| MatcherError::InvalidRegex {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
            Some(compiled)
        } else {
            None
        };

        Ok(Self {
            pattern,
            options,
            target,
            word_regex,
        })
    }
}

impl PatternMatch for StringMatcher {
    fn target(&self) -> ContentType {
        self.target
    }

    fn options(&self) -> &PatternOptions {
        &self.options
    }

    fn is_match(&self, text: &str) -> bool {
        if let Some(regex) = &self.word_regex {
            return regex.is_match(text);
        }
        if self.options.case_sensitive {
            text.contains(&self.pattern)
        } else {
            text.to_lowercase().contains(&self.pattern)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(pattern: &str, options: PatternOptions) -> StringMatcher {
        StringMatcher::new(pattern, options, ContentType::CommitMessage, 1 << 20).unwrap()
    }

    #[test]
    fn substring_is_case_insensitive_by_default() {
        let m = matcher("TEST", PatternOptions::default());
        assert!(m.is_match("a test"));
        assert!(m.is_match("testing"));
        assert!(!m.is_match("tset"));
    }

    #[test]
    fn case_sensitive_substring() {
        let m = matcher("TEST", PatternOptions::new().case_sensitive(true));
        assert!(!m.is_match("a test"));
        assert!(m.is_match("a TEST"));
    }

    #[test]
    fn word_boundary_rejects_partial_words() {
        let whole = matcher("test", PatternOptions::new().word_boundary(true));
        assert!(whole.is_match("run the test suite"));
        assert!(whole.is_match("Test: parser"));
        assert!(!whole.is_match("testing the parser"));

        let partial = matcher("tes", PatternOptions::new().word_boundary(true));
        assert!(!partial.is_match("run the test suite"));
    }

    #[test]
    fn word_boundary_escapes_metacharacters() {
        let m = matcher("c++", PatternOptions::new().word_boundary(true));
        assert!(!m.is_match("cxx compiler"));
        let m = matcher("v1.2", PatternOptions::new().word_boundary(true));
        assert!(m.is_match("bump to v1.2 now"));
        assert!(!m.is_match("bump to v1x2 now"));
    }

    #[test]
    fn case_sensitive_word_boundary() {
        let m = matcher(
            "Parser",
            PatternOptions::new().word_boundary(true).case_sensitive(true),
        );
        assert!(m.is_match("fix Parser crash"));
        assert!(!m.is_match("fix parser crash"));
    }
}
