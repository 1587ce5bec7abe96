//! Compiled matchers: a strategy plus content-type gate, preprocessing and negation.

use std::panic::{self, AssertUnwindSafe};

use tagscope_types::{
    ContentType, EngineConfig, MatchContent, PatternOptions, PatternStrategy, TagPattern,
};
use tracing::error;

use crate::error::{EvaluationError, MatcherError, MatcherResult};
use crate::preprocess::PreparedContent;
use crate::strategy::{PatternMatch, Strategy};

/// Cache identity of a pattern: every field that affects matching.
///
/// Options are a fixed-field struct, so two patterns whose options were
/// written in a different order hash identically.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MatcherKey {
    pub pattern: String,
    pub pattern_type: PatternStrategy,
    pub target: ContentType,
    pub options: PatternOptions,
}

impl From<&TagPattern> for MatcherKey {
    fn from(pattern: &TagPattern) -> Self {
        Self {
            pattern: pattern.pattern.clone(),
            pattern_type: pattern.pattern_type,
            target: pattern.target,
            options: pattern.options,
        }
    }
}

#[derive(Debug)]
enum MatcherState {
    Compiled(Strategy),
    /// Failed to compile; never matches
    Disabled(MatcherError),
    /// Panics on every evaluation
    #[cfg(test)]
    Panicking(String),
}

impl MatcherState {
    fn is_match(&self, text: &str) -> bool {
        match self {
            MatcherState::Compiled(strategy) => strategy.is_match(text),
            MatcherState::Disabled(_) => false,
            #[cfg(test)]
            MatcherState::Panicking(message) => panic!("{}", message),
        }
    }
}

/// A compiled pattern, ready to test content.
#[derive(Debug)]
pub struct Matcher {
    key: MatcherKey,
    state: MatcherState,
}

impl Matcher {
    pub fn compile(pattern: &TagPattern, config: &EngineConfig) -> MatcherResult<Self> {
        let strategy = Strategy::compile(pattern, config)?;
        Ok(Self {
            key: MatcherKey::from(pattern),
            state: MatcherState::Compiled(strategy),
        })
    }

    /// A matcher that always answers `false`, standing in for a broken configuration.
    pub fn disabled(key: MatcherKey, error: MatcherError) -> Self {
        Self {
            key,
            state: MatcherState::Disabled(error),
        }
    }

    /// A matcher whose every evaluation panics with `message`.
    #[cfg(test)]
    pub(crate) fn panicking(pattern: &TagPattern, message: &str) -> Self {
        Self {
            key: MatcherKey::from(pattern),
            state: MatcherState::Panicking(message.to_string()),
        }
    }

    pub fn key(&self) -> &MatcherKey {
        &self.key
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self.state, MatcherState::Disabled(_))
    }

    /// Compile error that disabled this matcher, if any.
    pub fn error(&self) -> Option<&MatcherError> {
        match &self.state {
            MatcherState::Disabled(error) => Some(error),
            _ => None,
        }
    }

    /// Whether the pattern text is present, before negation.
    ///
    /// `Ok(false)` for other content types and for disabled matchers.
    pub fn raw_match(&self, content: &PreparedContent) -> Result<bool, EvaluationError> {
        if content.content_type() != self.key.target || self.is_disabled() {
            return Ok(false);
        }

        panic::catch_unwind(AssertUnwindSafe(|| self.state.is_match(content.text()))).map_err(
            |payload| {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                EvaluationError::Panicked {
                    pattern: self.key.pattern.clone(),
                    strategy: self.key.pattern_type,
                    message,
                }
            },
        )
    }

    /// Full result on already-preprocessed content: gate, match, then negation.
    pub fn evaluate(&self, content: &PreparedContent) -> Result<bool, EvaluationError> {
        if content.content_type() != self.key.target || self.is_disabled() {
            return Ok(false);
        }
        Ok(self.raw_match(content)? != self.key.options.negative)
    }

    /// True when this is a negative pattern whose excluded text is present.
    pub fn excludes(&self, content: &PreparedContent) -> Result<bool, EvaluationError> {
        if !self.key.options.negative {
            return Ok(false);
        }
        self.raw_match(content)
    }

    /// Like [`Matcher::evaluate`], with failures logged and treated as no match.
    pub fn test_prepared(&self, content: &PreparedContent) -> bool {
        self.evaluate(content).unwrap_or_else(|err| {
            error!(pattern = %self.key.pattern, error = %err, "Matcher evaluation failed");
            false
        })
    }

    /// Test raw content: rejects other content types, preprocesses, matches, negates.
    pub fn test(&self, content: &MatchContent) -> bool {
        if content.content_type != self.key.target {
            return false;
        }
        self.test_prepared(&PreparedContent::new(content))
    }
}
