use std::fmt;

use serde::{Deserialize, Serialize};

use crate::content::ContentType;
use crate::error::{ConfigError, ConfigResult};

/// Matching algorithm used by a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatternStrategy {
    /// Plain substring containment
    String,
    /// Regular expression
    Regex,
    /// Glob over the whole file path
    Glob,
}

impl fmt::Display for PatternStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PatternStrategy::String => "STRING",
            PatternStrategy::Regex => "REGEX",
            PatternStrategy::Glob => "GLOB",
        })
    }
}

/// Orthogonal matching flags.
///
/// `word_boundary` has no meaning for globs and is ignored there.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternOptions {
    pub case_sensitive: bool,
    pub word_boundary: bool,
    /// Invert the final result; a match means exclusion
    pub negative: bool,
}

impl PatternOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case_sensitive(mut self, value: bool) -> Self {
        self.case_sensitive = value;
        self
    }

    pub fn word_boundary(mut self, value: bool) -> Self {
        self.word_boundary = value;
        self
    }

    pub fn negative(mut self, value: bool) -> Self {
        self.negative = value;
        self
    }
}

/// Whether a strategy may be used against a content type.
///
/// Globs only make sense for file paths; strings and regexes apply to any text.
pub fn validate_pattern_for_target(strategy: PatternStrategy, target: ContentType) -> bool {
    !(strategy == PatternStrategy::Glob && target != ContentType::FilePath)
}

fn default_enabled() -> bool {
    true
}

/// One matching rule: a pattern, how to match it, and which content it applies to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagPattern {
    pub pattern: String,
    pub pattern_type: PatternStrategy,
    pub target: ContentType,
    #[serde(default)]
    pub options: PatternOptions,
    /// Disabled patterns never match
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TagPattern {
    /// Build a pattern, rejecting strategy/target combinations that can never be compiled.
    pub fn new(
        pattern: impl Into<String>,
        pattern_type: PatternStrategy,
        target: ContentType,
        options: PatternOptions,
    ) -> ConfigResult<Self> {
        let pattern = Self::unchecked(pattern, pattern_type, target).with_options(options);
        pattern.validate()?;
        Ok(pattern)
    }

    fn unchecked(
        pattern: impl Into<String>,
        pattern_type: PatternStrategy,
        target: ContentType,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            pattern_type,
            target,
            options: PatternOptions::default(),
            enabled: true,
            description: None,
        }
    }

    pub fn string(pattern: impl Into<String>, target: ContentType) -> Self {
        Self::unchecked(pattern, PatternStrategy::String, target)
    }

    pub fn regex(pattern: impl Into<String>, target: ContentType) -> Self {
        Self::unchecked(pattern, PatternStrategy::Regex, target)
    }

    /// Glob pattern; always targets file paths.
    pub fn glob(pattern: impl Into<String>) -> Self {
        Self::unchecked(pattern, PatternStrategy::Glob, ContentType::FilePath)
    }

    pub fn with_options(mut self, options: PatternOptions) -> Self {
        self.options = options;
        self
    }

    pub fn case_sensitive(mut self) -> Self {
        self.options.case_sensitive = true;
        self
    }

    pub fn word_boundary(mut self) -> Self {
        self.options.word_boundary = true;
        self
    }

    pub fn negative(mut self) -> Self {
        self.options.negative = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_negative(&self) -> bool {
        self.options.negative
    }

    /// True when the pattern is enabled and targets `content_type`.
    pub fn applies_to(&self, content_type: ContentType) -> bool {
        self.enabled && self.target == content_type
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if validate_pattern_for_target(self.pattern_type, self.target) {
            Ok(())
        } else {
            Err(ConfigError::IncompatibleTarget {
                pattern: self.pattern.clone(),
                strategy: self.pattern_type,
                target: self.target,
            })
        }
    }
}
