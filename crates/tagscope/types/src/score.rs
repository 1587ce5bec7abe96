use serde::{Deserialize, Serialize};

use crate::rule::TagCategory;

/// Accumulated score for one tag over a set of content items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagScore {
    pub tag: String,
    pub category: TagCategory,
    pub score: f64,
}

/// Discrete level derived from a score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpertiseLevel {
    pub level: u32,
    /// Fraction of the way from the current level threshold to the next, in [0, 1]
    pub progress: f64,
    /// Score threshold of the next level
    pub points_to_next: f64,
}

/// A tag score together with its level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredTag {
    #[serde(flatten)]
    pub score: TagScore,
    #[serde(flatten)]
    pub expertise: ExpertiseLevel,
}

/// Row handed to the persistence layer, keyed by subject and tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagScoreRecord {
    pub id: String,
    pub username: String,
    pub tag: String,
    pub category: TagCategory,
    pub score: f64,
    pub level: u32,
    pub progress: f64,
    pub points_to_next: f64,
}

impl TagScoreRecord {
    pub fn record_id(username: &str, tag: &str) -> String {
        format!("{username}_{tag}")
    }

    pub fn new(username: &str, scored: &ScoredTag) -> Self {
        Self {
            id: Self::record_id(username, &scored.score.tag),
            username: username.to_string(),
            tag: scored.score.tag.clone(),
            category: scored.score.category,
            score: scored.score.score,
            level: scored.expertise.level,
            progress: scored.expertise.progress,
            points_to_next: scored.expertise.points_to_next,
        }
    }
}
