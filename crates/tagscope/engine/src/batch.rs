//! Evaluation of many patterns against one content item.

use std::sync::Arc;

use tagscope_types::{MatchContent, TagPattern};
use tracing::{debug, error};

use crate::cache::MatcherCache;
use crate::preprocess::PreparedContent;

/// Evaluates pattern lists against single content items.
///
/// Negative patterns act as a content-level veto: if any applicable negative
/// pattern finds its text, the item matches nothing at all.
#[derive(Clone, Debug)]
pub struct BatchEvaluator {
    cache: Arc<MatcherCache>,
}

impl BatchEvaluator {
    pub fn new(cache: Arc<MatcherCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<MatcherCache> {
        &self.cache
    }

    /// Indices of the positive patterns that match `content`.
    pub fn match_batch(&self, patterns: &[TagPattern], content: &MatchContent) -> Vec<usize> {
        if patterns.is_empty() || content.is_empty() {
            return Vec::new();
        }
        let prepared = PreparedContent::new(content);
        self.match_prepared(patterns, &prepared)
    }

    /// [`BatchEvaluator::match_batch`] for content that is already preprocessed.
    pub fn match_prepared(&self, patterns: &[TagPattern], content: &PreparedContent) -> Vec<usize> {
        let content_type = content.content_type();
        let applicable = || {
            patterns
                .iter()
                .enumerate()
                .filter(move |(_, pattern)| pattern.applies_to(content_type))
        };

        for (index, pattern) in applicable().filter(|(_, p)| p.is_negative()) {
            match self.cache.get_matcher(pattern).excludes(content) {
                Ok(true) => {
                    debug!(
                        rule_index = index,
                        pattern = %pattern.pattern,
                        "Negative pattern matched; rejecting content"
                    );
                    return Vec::new();
                }
                Ok(false) => {}
                Err(err) => {
                    error!(rule_index = index, error = %err, "Error matching negative pattern");
                }
            }
        }

        applicable()
            .filter(|(_, p)| !p.is_negative())
            .filter_map(|(index, pattern)| {
                match self.cache.get_matcher(pattern).evaluate(content) {
                    Ok(matched) => matched.then_some(index),
                    Err(err) => {
                        error!(rule_index = index, error = %err, "Error matching pattern");
                        None
                    }
                }
            })
            .collect()
    }

    /// Patterns, rather than indices, that match `content`.
    pub fn matching_patterns<'a>(
        &self,
        patterns: &'a [TagPattern],
        content: &MatchContent,
    ) -> Vec<&'a TagPattern> {
        self.match_batch(patterns, content)
            .into_iter()
            .map(|index| &patterns[index])
            .collect()
    }

    /// True when at least one positive pattern matches.
    pub fn match_any(&self, patterns: &[TagPattern], content: &MatchContent) -> bool {
        !self.match_batch(patterns, content).is_empty()
    }

    /// True when every applicable positive pattern matches.
    ///
    /// False when no positive pattern applies to the content type.
    pub fn match_all(&self, patterns: &[TagPattern], content: &MatchContent) -> bool {
        let applicable = patterns
            .iter()
            .filter(|p| p.applies_to(content.content_type) && !p.is_negative())
            .count();
        applicable > 0 && self.match_batch(patterns, content).len() == applicable
    }
}
