use std::path::PathBuf;

use thiserror::Error;

use crate::content::ContentType;
use crate::pattern::PatternStrategy;

/// Errors raised while building or loading tag rule configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{strategy} pattern {pattern:?} is not compatible with target {target}")]
    IncompatibleTarget {
        pattern: String,
        strategy: PatternStrategy,
        target: ContentType,
    },

    #[error("rule {rule:?} has invalid weight {weight}: weights must be finite and >= 0")]
    InvalidWeight { rule: String, weight: f64 },

    #[error("duplicate rule name {0:?}")]
    DuplicateRule(String),

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported config format for {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incompatible_target_names_both_sides() {
        let err = ConfigError::IncompatibleTarget {
            pattern: "*.md".into(),
            strategy: PatternStrategy::Glob,
            target: ContentType::PrTitle,
        };
        let msg = err.to_string();
        assert!(msg.contains("GLOB"));
        assert!(msg.contains("PR_TITLE"));
    }
}
