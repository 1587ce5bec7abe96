//! Matching strategies.
//!
//! Each strategy answers the raw question "is the pattern present in this
//! text?". [`PatternMatch::test`] layers the content-type gate and negation
//! on top; the compiled matcher in [`crate::matcher`] does the same after
//! preprocessing.

mod glob;
mod regex;
mod string;

pub use self::glob::{expand_braces, normalize_glob, GlobMatcher};
pub use self::regex::{effective_regex, RegexMatcher};
pub use self::string::StringMatcher;

use tagscope_types::{
    ContentType, EngineConfig, MatchContent, PatternOptions, PatternStrategy, TagPattern,
};

use crate::error::{MatcherError, MatcherResult};

/// Behaviour shared by every strategy.
pub trait PatternMatch {
    /// Content type this matcher was built for.
    fn target(&self) -> ContentType;

    fn options(&self) -> &PatternOptions;

    /// Raw containment test, before negation.
    fn is_match(&self, text: &str) -> bool;

    /// Content-type gate, raw match, then negation.
    fn test(&self, content: &MatchContent) -> bool {
        if content.content_type != self.target() {
            return false;
        }
        self.is_match(&content.content) != self.options().negative
    }
}

/// A compiled strategy. Closed set: adding a kind means updating [`Strategy::compile`].
#[derive(Debug)]
pub enum Strategy {
    String(StringMatcher),
    Regex(RegexMatcher),
    Glob(GlobMatcher),
}

impl Strategy {
    /// Compile `pattern` with the strategy it names.
    pub fn compile(pattern: &TagPattern, config: &EngineConfig) -> MatcherResult<Self> {
        if !tagscope_types::validate_pattern_for_target(pattern.pattern_type, pattern.target) {
            return Err(MatcherError::IncompatibleTarget {
                pattern: pattern.pattern.clone(),
                strategy: pattern.pattern_type,
                target: pattern.target,
            });
        }

        let strategy = match pattern.pattern_type {
            PatternStrategy::String => Strategy::String(StringMatcher::new(
                &pattern.pattern,
                pattern.options,
                pattern.target,
                config.regex_size_limit,
            )?),
            PatternStrategy::Regex => Strategy::Regex(RegexMatcher::new(
                &pattern.pattern,
                pattern.options,
                pattern.target,
                config.regex_size_limit,
            )?),
            PatternStrategy::Glob => Strategy::Glob(GlobMatcher::new(
                &pattern.pattern,
                pattern.options,
                pattern.target,
            )?),
        };
        Ok(strategy)
    }

    pub fn kind(&self) -> PatternStrategy {
        match self {
            Strategy::String(_) => PatternStrategy::String,
            Strategy::Regex(_) => PatternStrategy::Regex,
            Strategy::Glob(_) => PatternStrategy::Glob,
        }
    }

    fn inner(&self) -> &dyn PatternMatch {
        match self {
            Strategy::String(m) => m,
            Strategy::Regex(m) => m,
            Strategy::Glob(m) => m,
        }
    }
}

impl PatternMatch for Strategy {
    fn target(&self) -> ContentType {
        self.inner().target()
    }

    fn options(&self) -> &PatternOptions {
        self.inner().options()
    }

    fn is_match(&self, text: &str) -> bool {
        self.inner().is_match(text)
    }
}
