//! Error types for the bibseek crate.

use thiserror::Error;

/// Errors that can occur when compiling or evaluating a search.
///
/// Parsing never fails, so the only failure a search can hit is a term
/// that does not compile as a regular expression.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Invalid regular expression pattern in a regex-mode search.
    #[error("invalid regex pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl SearchError {
    /// Create an invalid-pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// The pattern text that failed to compile.
    pub fn pattern(&self) -> &str {
        match self {
            Self::InvalidPattern { pattern, .. } => pattern,
        }
    }
}

/// Result type for bibseek operations.
pub type Result<T> = std::result::Result<T, SearchError>;
