use std::fmt;

use serde::{Deserialize, Serialize};

use crate::content::ContentType;
use crate::error::{ConfigError, ConfigResult};
use crate::pattern::TagPattern;

/// Top-level classification of a tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TagCategory {
    /// Part of the codebase: core, ui, docs, infra
    Area,
    /// Kind of contribution: architect, maintainer, bug-fixer
    Role,
    /// Technology: typescript, react, database
    Tech,
}

impl TagCategory {
    /// Content types a simple string tag of this category is scored against.
    pub fn default_targets(&self) -> &'static [ContentType] {
        match self {
            TagCategory::Area => &[ContentType::FilePath],
            TagCategory::Role => &[ContentType::PrTitle],
            TagCategory::Tech => &[ContentType::FilePath, ContentType::PrTitle],
        }
    }
}

impl fmt::Display for TagCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TagCategory::Area => "AREA",
            TagCategory::Role => "ROLE",
            TagCategory::Tech => "TECH",
        })
    }
}

fn default_weight() -> f64 {
    1.0
}

/// A named skill or area, with the patterns that earn it score.
///
/// Every match produced by any of the patterns adds `weight` to the tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagRule {
    pub name: String,
    pub category: TagCategory,
    #[serde(default)]
    pub patterns: Vec<TagPattern>,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TagRule {
    pub fn new(name: impl Into<String>, category: TagCategory) -> Self {
        Self {
            name: name.into(),
            category,
            patterns: Vec::new(),
            weight: default_weight(),
            description: None,
        }
    }

    pub fn with_pattern(mut self, pattern: TagPattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    pub fn with_patterns(mut self, patterns: impl IntoIterator<Item = TagPattern>) -> Self {
        self.patterns.extend(patterns);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check weight bounds and every pattern's strategy/target pairing.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(ConfigError::InvalidWeight {
                rule: self.name.clone(),
                weight: self.weight,
            });
        }
        self.patterns.iter().try_for_each(TagPattern::validate)
    }
}

/// Simple tag definition: plain strings scored by category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagConfig {
    pub name: String,
    pub category: TagCategory,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TagConfig {
    /// Expand into a rule of case-insensitive substring patterns, one per
    /// string and target of the category.
    pub fn into_rule(self) -> TagRule {
        let targets = self.category.default_targets();
        let patterns = targets
            .iter()
            .flat_map(|target| {
                self.patterns
                    .iter()
                    .map(move |p| TagPattern::string(p.clone(), *target))
            })
            .collect::<Vec<_>>();

        TagRule {
            name: self.name,
            category: self.category,
            patterns,
            weight: self.weight,
            description: self.description,
        }
    }
}

impl From<TagConfig> for TagRule {
    fn from(config: TagConfig) -> Self {
        config.into_rule()
    }
}
