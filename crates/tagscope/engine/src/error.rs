use tagscope_types::{ContentType, PatternStrategy};
use thiserror::Error;

/// Errors raised while compiling a pattern into a matcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatcherError {
    #[error("{strategy} pattern {pattern:?} is not compatible with target {target}")]
    IncompatibleTarget {
        pattern: String,
        strategy: PatternStrategy,
        target: ContentType,
    },

    #[error("invalid regex {pattern:?}: {message}")]
    InvalidRegex { pattern: String, message: String },

    #[error("invalid glob {pattern:?}: {message}")]
    InvalidGlob { pattern: String, message: String },
}

pub type MatcherResult<T> = Result<T, MatcherError>;

/// Errors raised while testing content against a compiled matcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("{strategy} matcher for {pattern:?} panicked: {message}")]
    Panicked {
        pattern: String,
        strategy: PatternStrategy,
        message: String,
    },
}

/// Errors from the contributor tagging pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("scoring task for {username} failed: {message}")]
    Task { username: String, message: String },

    #[error("failed to store tag score {record_id}: {source}")]
    Sink {
        record_id: String,
        #[source]
        source: SinkError,
    },
}

/// Errors reported by a tag score sink.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MatcherError::InvalidRegex {
            pattern: "(unclosed".into(),
            message: "unclosed group".into(),
        };
        assert!(err.to_string().contains("(unclosed"));

        let err = EvaluationError::Panicked {
            pattern: "x".into(),
            strategy: PatternStrategy::Regex,
            message: "boom".into(),
        };
        assert!(err.to_string().starts_with("REGEX matcher"));

        let err = PipelineError::Sink {
            record_id: "octocat_core".into(),
            source: SinkError::Storage("disk full".into()),
        };
        assert_eq!(
            err.to_string(),
            "failed to store tag score octocat_core: Storage error: disk full"
        );
    }
}
