//! Rule and engine configuration, loadable from YAML or JSON.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::rule::{TagConfig, TagRule};

/// Tuning knobs for the matching engine and contributor pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on compiled regex size, in bytes
    pub regex_size_limit: usize,
    /// Contributors scored concurrently
    pub max_concurrency: usize,
    /// Tags listed in the per-contributor summary log
    pub summary_top_n: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            regex_size_limit: 1 << 20,
            max_concurrency: 5,
            summary_top_n: 3,
        }
    }
}

/// Simple tag definitions grouped by category.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagGroups {
    pub area: Vec<TagConfig>,
    pub role: Vec<TagConfig>,
    pub tech: Vec<TagConfig>,
}

impl TagGroups {
    pub fn is_empty(&self) -> bool {
        self.area.is_empty() && self.role.is_empty() && self.tech.is_empty()
    }
}

/// Complete tagging configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggingConfig {
    pub engine: EngineConfig,
    pub tags: TagGroups,
    pub rules: Vec<TagRule>,
}

impl TaggingConfig {
    /// Load configuration from a `.yaml`, `.yml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents)?,
            Some("json") => Self::from_json_str(&contents)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        debug!(
            path = %path.display(),
            simple_tags = config.tags.area.len() + config.tags.role.len() + config.tags.tech.len(),
            rules = config.rules.len(),
            "Loaded tagging config"
        );
        Ok(config)
    }

    pub fn from_yaml_str(contents: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn from_json_str(contents: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// All rules, simple tags first (area, role, tech) then explicit rules,
    /// validated eagerly.
    pub fn rules(&self) -> ConfigResult<Vec<TagRule>> {
        let rules = self
            .tags
            .area
            .iter()
            .chain(&self.tags.role)
            .chain(&self.tags.tech)
            .cloned()
            .map(TagRule::from)
            .chain(self.rules.iter().cloned())
            .collect::<Vec<_>>();

        validate_rules(&rules)?;
        Ok(rules)
    }
}

/// Reject duplicate names, bad weights and misplaced glob patterns.
pub fn validate_rules(rules: &[TagRule]) -> ConfigResult<()> {
    let mut seen = HashSet::new();
    for rule in rules {
        if !seen.insert(rule.name.as_str()) {
            return Err(ConfigError::DuplicateRule(rule.name.clone()));
        }
        rule.validate()?;
    }
    Ok(())
}
