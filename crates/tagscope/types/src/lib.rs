//! # tagscope-types
//!
//! Data model for classifying contribution artifacts against tag rules.
//!
//! - [`MatchContent`] / [`ContentType`]: a text fragment and its semantic category
//! - [`TagPattern`] / [`PatternStrategy`] / [`PatternOptions`]: one matching rule
//! - [`TagRule`] / [`TagCategory`]: named, weighted group of patterns
//! - [`TagScore`] / [`ExpertiseLevel`] / [`TagScoreRecord`]: computed results
//! - [`TaggingConfig`]: rule and engine configuration loaded from YAML or JSON
//!
//! Glob patterns are only valid against file paths. Loading through
//! [`TaggingConfig::rules`] rejects other pairings up front; patterns built by
//! hand are rejected lazily by the matcher compiler instead.

#![deny(unsafe_code)]

pub mod config;
pub mod content;
pub mod error;
pub mod pattern;
pub mod rule;
pub mod score;

pub use config::{validate_rules, EngineConfig, TagGroups, TaggingConfig};
pub use content::{ContentType, MatchContent};
pub use error::{ConfigError, ConfigResult};
pub use pattern::{validate_pattern_for_target, PatternOptions, PatternStrategy, TagPattern};
pub use rule::{TagCategory, TagConfig, TagRule};
pub use score::{ExpertiseLevel, ScoredTag, TagScore, TagScoreRecord};
