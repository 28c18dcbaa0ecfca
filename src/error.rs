//! Error types for a theme check run.

use std::path::PathBuf;

/// Errors produced while running the analyzer and reading its output.
///
/// Every variant is terminal for the run that produced it.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("invalid path: {0:?} does not exist or is not a directory")]
    InvalidPath(PathBuf),

    #[error("failed to launch analyzer: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("analyzer i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("analyzer reported an error: {0}")]
    Analyzer(String),

    #[error("analyzer exited with non-zero status{}", fmt_code(.code))]
    NonZeroExit { code: Option<i32> },

    #[error("analyzer output is not valid JSON: {0}")]
    MalformedOutput(#[source] serde_json::Error),

    #[error("failed to encode validation request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("theme check was cancelled")]
    Cancelled,
}

fn fmt_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" {code}"),
        None => " (terminated by signal)".to_string(),
    }
}

/// Result type for theme check operations.
pub type CheckResult<T> = std::result::Result<T, CheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_zero_exit_message() {
        let err = CheckError::NonZeroExit { code: Some(1) };
        assert_eq!(err.to_string(), "analyzer exited with non-zero status 1");

        let err = CheckError::NonZeroExit { code: None };
        assert_eq!(
            err.to_string(),
            "analyzer exited with non-zero status (terminated by signal)"
        );
    }

    #[test]
    fn test_analyzer_message_is_raw_text() {
        let err = CheckError::Analyzer("PHP Fatal error".to_string());
        assert!(err.to_string().ends_with("PHP Fatal error"));
    }
}
