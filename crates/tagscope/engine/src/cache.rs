//! Shared, write-once cache of compiled matchers.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tagscope_types::{EngineConfig, TagPattern};
use tracing::{debug, error};

use crate::matcher::{Matcher, MatcherKey};

/// Compiled matchers keyed by full pattern configuration.
///
/// Reads are lock-free per shard. A miss compiles outside any lock and then
/// inserts if absent, so two threads racing on the same key may both compile
/// but only one result is kept. Compile failures are cached as disabled
/// matchers and logged once.
pub struct MatcherCache {
    matchers: DashMap<MatcherKey, Arc<Matcher>>,
    config: EngineConfig,
}

impl MatcherCache {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            matchers: DashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Matcher for `pattern`, compiling and caching it on first use.
    ///
    /// Never fails: an uncompilable pattern yields a disabled matcher.
    pub fn get_matcher(&self, pattern: &TagPattern) -> Arc<Matcher> {
        let key = MatcherKey::from(pattern);
        if let Some(existing) = self.matchers.get(&key) {
            return Arc::clone(existing.value());
        }

        let compiled = Matcher::compile(pattern, &self.config);

        match self.matchers.entry(key) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                let matcher = match compiled {
                    Ok(matcher) => {
                        debug!(
                            pattern = %pattern.pattern,
                            strategy = %pattern.pattern_type,
                            target = %pattern.target,
                            "Compiled matcher"
                        );
                        matcher
                    }
                    Err(err) => {
                        error!(
                            pattern = %pattern.pattern,
                            strategy = %pattern.pattern_type,
                            target = %pattern.target,
                            error = %err,
                            "Failed to create matcher; caching a matcher that never matches"
                        );
                        Matcher::disabled(entry.key().clone(), err)
                    }
                };
                Arc::clone(entry.insert(Arc::new(matcher)).value())
            }
        }
    }

    /// Put `matcher` in the cache under its own key, replacing any entry.
    #[cfg(test)]
    pub(crate) fn insert(&self, matcher: Matcher) {
        self.matchers.insert(matcher.key().clone(), Arc::new(matcher));
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn clear(&self) {
        self.matchers.clear();
    }
}

impl Default for MatcherCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MatcherCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatcherCache")
            .field("len", &self.matchers.len())
            .field("config", &self.config)
            .finish()
    }
}
