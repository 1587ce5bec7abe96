//! Weighted tag scoring over a set of content items.

use std::sync::Arc;

use tagscope_types::{MatchContent, ScoredTag, TagRule, TagScore};
use tracing::{error, trace};

use crate::cache::MatcherCache;
use crate::level::level_for;
use crate::preprocess::PreparedContent;

/// Accumulates per-tag scores from rule matches.
///
/// Every hit counts: a pattern that matches five file paths adds five times
/// the rule's weight. Each content item is preprocessed once per call.
#[derive(Clone, Debug)]
pub struct TagScoringEngine {
    cache: Arc<MatcherCache>,
}

impl TagScoringEngine {
    pub fn new(cache: Arc<MatcherCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<MatcherCache> {
        &self.cache
    }

    /// Score every rule against `contents`.
    ///
    /// Only tags with a positive score are returned, highest first. Ties keep
    /// rule order.
    pub fn score(&self, rules: &[TagRule], contents: &[MatchContent]) -> Vec<TagScore> {
        let prepared: Vec<PreparedContent> = contents
            .iter()
            .filter(|content| !content.is_empty())
            .map(PreparedContent::new)
            .filter(|content| !content.text().is_empty())
            .collect();

        let mut scores: Vec<TagScore> = rules
            .iter()
            .filter_map(|rule| {
                let score = self.score_rule(rule, &prepared);
                trace!(tag = %rule.name, category = %rule.category, score, "Scored tag");
                (score > 0.0).then(|| TagScore {
                    tag: rule.name.clone(),
                    category: rule.category,
                    score,
                })
            })
            .collect();

        scores.sort_by(|a, b| b.score.total_cmp(&a.score));
        scores
    }

    /// [`TagScoringEngine::score`] with the expertise level of each tag attached.
    pub fn score_with_levels(
        &self,
        rules: &[TagRule],
        contents: &[MatchContent],
    ) -> Vec<ScoredTag> {
        self.score(rules, contents)
            .into_iter()
            .map(|score| {
                let expertise = level_for(score.score);
                ScoredTag { score, expertise }
            })
            .collect()
    }

    fn score_rule(&self, rule: &TagRule, contents: &[PreparedContent]) -> f64 {
        let mut total = 0.0;
        for (pattern_index, pattern) in rule.patterns.iter().enumerate() {
            if !pattern.enabled {
                continue;
            }
            let matcher = self.cache.get_matcher(pattern);
            for content in contents.iter().filter(|c| pattern.applies_to(c.content_type())) {
                match matcher.evaluate(content) {
                    Ok(true) => total += rule.weight,
                    Ok(false) => {}
                    Err(err) => {
                        error!(
                            tag = %rule.name,
                            rule_index = pattern_index,
                            error = %err,
                            "Error matching pattern"
                        );
                    }
                }
            }
        }
        total
    }
}
