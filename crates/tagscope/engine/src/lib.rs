//! # tagscope-engine
//!
//! Matching and scoring engine for tag rules.
//!
//! Content flows through a fixed pipeline:
//!
//! 1. [`preprocess`] normalises each item once, by content type
//! 2. [`MatcherCache::get_matcher`] compiles each pattern once per configuration
//! 3. [`BatchEvaluator`] reports which patterns match an item, with negative
//!    patterns vetoing the whole item
//! 4. [`TagScoringEngine`] adds a rule's weight for every hit
//! 5. [`level_for`] maps scores onto a logarithmic level curve
//!
//! [`ContributorTagger`] runs the whole thing per contributor and stores the
//! results through a [`TagScoreSink`].
//!
//! Misconfigured patterns never fail a run: they compile to a matcher that
//! never matches, and the error is logged once.

#![deny(unsafe_code)]

pub mod batch;
pub mod cache;
pub mod error;
pub mod level;
pub mod matcher;
pub mod pipeline;
pub mod preprocess;
pub mod scoring;
pub mod strategy;

pub use batch::BatchEvaluator;
pub use cache::MatcherCache;
pub use error::{EvaluationError, MatcherError, MatcherResult, PipelineError, SinkError};
pub use level::{level_for, level_threshold};
pub use matcher::{Matcher, MatcherKey};
pub use pipeline::{
    ContributorActivity, ContributorTagReport, ContributorTagger, InMemoryTagScoreSink,
    PullRequestActivity, TagRunStats, TagScoreSink,
};
pub use preprocess::{normalize_path, preprocess, PreparedContent};
pub use scoring::TagScoringEngine;
pub use strategy::{GlobMatcher, PatternMatch, RegexMatcher, Strategy, StringMatcher};
