//! Pipeline error types

use thiserror::Error;

/// Errors that can occur while preparing an event network
#[derive(Error, Debug)]
pub enum PipelineError {
    /// One or more required columns are absent from the input header.
    #[error("missing required column(s): {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    /// A required field holds a value that cannot be used.
    #[error("line {line}: invalid value {value:?} in column '{column}': {reason}")]
    Data {
        line: u64,
        column: String,
        value: String,
        reason: String,
    },

    /// A filter or partition produced no edges.
    #[error("empty result: {0}")]
    EmptyResult(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl PipelineError {
    /// Whether the error only signals an empty graph rather than a failure
    pub fn is_soft(&self) -> bool {
        matches!(self, PipelineError::EmptyResult(_))
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_lists_columns() {
        let err = PipelineError::Schema {
            missing: vec!["year".to_string(), "actor_b".to_string()],
        };
        assert_eq!(err.to_string(), "missing required column(s): year, actor_b");
    }

    #[test]
    fn test_only_empty_result_is_soft() {
        assert!(PipelineError::EmptyResult("pre".into()).is_soft());
        assert!(!PipelineError::Config("bad".into()).is_soft());
    }
}
