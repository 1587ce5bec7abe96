//! Contributor tagging: score each contributor's pull requests and hand the
//! results to a [`TagScoreSink`].

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tagscope_types::{
    ConfigResult, EngineConfig, MatchContent, TagRule, TagScore, TagScoreRecord, TaggingConfig,
};
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::cache::MatcherCache;
use crate::error::{PipelineError, SinkError};
use crate::scoring::TagScoringEngine;

/// One pull request as seen by the tagger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestActivity {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub files: Vec<String>,
}

impl PullRequestActivity {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            files: Vec::new(),
        }
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(files.into_iter().map(Into::into));
        self
    }
}

/// Everything a contributor authored in the scoring window.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorActivity {
    pub username: String,
    #[serde(default)]
    pub pull_requests: Vec<PullRequestActivity>,
}

impl ContributorActivity {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            pull_requests: Vec::new(),
        }
    }

    pub fn with_pull_request(mut self, pull_request: PullRequestActivity) -> Self {
        self.pull_requests.push(pull_request);
        self
    }

    /// Touched file paths as `FILE_PATH` content, then non-empty titles as `PR_TITLE` content.
    pub fn content_items(&self) -> Vec<MatchContent> {
        let files = self
            .pull_requests
            .iter()
            .flat_map(|pr| pr.files.iter())
            .map(MatchContent::file_path);
        let titles = self.titles().map(MatchContent::pr_title);
        files.chain(titles).collect()
    }

    /// Non-empty pull request titles.
    pub fn titles(&self) -> impl Iterator<Item = &str> + '_ {
        self.pull_requests
            .iter()
            .filter_map(|pr| pr.title.as_deref())
            .filter(|title| !title.trim().is_empty())
    }
}

/// Summary of one contributor's run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TagRunStats {
    pub tag_count: usize,
    /// Pull requests whose title was scored
    pub prs_processed: usize,
    pub top_tags: Vec<TagScore>,
}

/// Scored tags of one contributor, ready to persist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContributorTagReport {
    pub username: String,
    /// Highest score first
    pub records: Vec<TagScoreRecord>,
    pub stats: TagRunStats,
}

/// Persistence boundary for tag scores.
///
/// Records are keyed by `id`; storing a record with an existing id replaces it.
#[async_trait]
pub trait TagScoreSink: Send + Sync {
    async fn upsert(&self, record: &TagScoreRecord) -> Result<(), SinkError>;
}

/// In-memory sink for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryTagScoreSink {
    records: DashMap<String, TagScoreRecord>,
}

impl InMemoryTagScoreSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<TagScoreRecord> {
        self.records.get(id).map(|record| record.value().clone())
    }

    /// Records of one user, highest score first.
    pub fn records_for(&self, username: &str) -> Vec<TagScoreRecord> {
        let mut records: Vec<TagScoreRecord> = self
            .records
            .iter()
            .filter(|entry| entry.value().username == username)
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.tag.cmp(&b.tag)));
        records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl TagScoreSink for InMemoryTagScoreSink {
    async fn upsert(&self, record: &TagScoreRecord) -> Result<(), SinkError> {
        self.records.insert(record.id.clone(), record.clone());
        Ok(())
    }
}

/// Scores contributors against a fixed rule set.
#[derive(Debug)]
pub struct ContributorTagger {
    scoring: TagScoringEngine,
    rules: Vec<TagRule>,
}

impl ContributorTagger {
    pub fn new(cache: Arc<MatcherCache>, rules: Vec<TagRule>) -> Self {
        Self {
            scoring: TagScoringEngine::new(cache),
            rules,
        }
    }

    /// Build a tagger from validated configuration with a fresh matcher cache.
    pub fn from_config(config: &TaggingConfig) -> ConfigResult<Self> {
        let rules = config.rules()?;
        let cache = Arc::new(MatcherCache::with_config(config.engine.clone()));
        Ok(Self::new(cache, rules))
    }

    pub fn rules(&self) -> &[TagRule] {
        &self.rules
    }

    pub fn cache(&self) -> &Arc<MatcherCache> {
        self.scoring.cache()
    }

    fn engine_config(&self) -> &EngineConfig {
        self.cache().config()
    }

    /// Score one contributor. `None` when they have no pull requests.
    pub fn tag_contributor(&self, activity: &ContributorActivity) -> Option<ContributorTagReport> {
        if activity.pull_requests.is_empty() {
            debug!(username = %activity.username, "No pull requests; skipping contributor");
            return None;
        }

        let scored = self
            .scoring
            .score_with_levels(&self.rules, &activity.content_items());
        let records: Vec<TagScoreRecord> = scored
            .iter()
            .map(|tag| TagScoreRecord::new(&activity.username, tag))
            .collect();
        let top_tags: Vec<TagScore> = scored
            .iter()
            .take(self.engine_config().summary_top_n)
            .map(|tag| tag.score.clone())
            .collect();

        let stats = TagRunStats {
            tag_count: records.len(),
            prs_processed: activity.titles().count(),
            top_tags,
        };
        info!(
            username = %activity.username,
            tag_count = stats.tag_count,
            prs_processed = stats.prs_processed,
            top_tags = %format_top_tags(&stats.top_tags),
            "Calculated contributor tags"
        );

        Some(ContributorTagReport {
            username: activity.username.clone(),
            records,
            stats,
        })
    }

    /// Score contributors concurrently and store every record in `sink`.
    ///
    /// At most `max_concurrency` contributors are scored at once. Results come
    /// back in input order, one per contributor.
    pub async fn run(
        self: &Arc<Self>,
        activities: Vec<ContributorActivity>,
        sink: Arc<dyn TagScoreSink>,
    ) -> Vec<(String, Result<Option<TagRunStats>, PipelineError>)> {
        let semaphore = Arc::new(Semaphore::new(self.engine_config().max_concurrency.max(1)));

        let runs = activities.into_iter().map(|activity| {
            let tagger = Arc::clone(self);
            let sink = Arc::clone(&sink);
            let semaphore = Arc::clone(&semaphore);
            async move {
                let username = activity.username.clone();
                let result = tagger.run_one(activity, sink.as_ref(), &semaphore).await;
                (username, result)
            }
        });

        join_all(runs).await
    }

    async fn run_one(
        self: Arc<Self>,
        activity: ContributorActivity,
        sink: &dyn TagScoreSink,
        semaphore: &Semaphore,
    ) -> Result<Option<TagRunStats>, PipelineError> {
        let username = activity.username.clone();
        let _permit = semaphore.acquire().await.map_err(|err| PipelineError::Task {
            username: username.clone(),
            message: err.to_string(),
        })?;

        let tagger = Arc::clone(&self);
        let report = tokio::task::spawn_blocking(move || tagger.tag_contributor(&activity))
            .await
            .map_err(|err| PipelineError::Task {
                username,
                message: err.to_string(),
            })?;

        let Some(report) = report else {
            return Ok(None);
        };
        for record in &report.records {
            sink.upsert(record)
                .await
                .map_err(|source| PipelineError::Sink {
                    record_id: record.id.clone(),
                    source,
                })?;
        }
        Ok(Some(report.stats))
    }
}

fn format_top_tags(tags: &[TagScore]) -> String {
    tags.iter()
        .map(|tag| format!("{} ({})", tag.tag, tag.score))
        .collect::<Vec<_>>()
        .join(", ")
}
