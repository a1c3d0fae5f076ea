//! Error types for recblend-cli

use recblend::RecommendError;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// Target user is not in the dataset
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Malformed dataset, config or argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other library failure
    #[error("Recommender error: {0}")]
    Recommend(String),
}

impl CliError {
    /// Numeric process status for this error
    pub(crate) fn code(&self) -> u8 {
        match self {
            Self::UserNotFound(_) => 2,
            Self::FileNotFound(_) => 3,
            Self::InvalidInput(_) => 4,
            Self::Io(_) | Self::Recommend(_) => 1,
        }
    }

    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

impl From<RecommendError> for CliError {
    fn from(e: RecommendError) -> Self {
        match e {
            RecommendError::UserNotFound { user_id } => Self::UserNotFound(user_id),
            RecommendError::InvalidRating { .. }
            | RecommendError::InvalidHyperparameter { .. }
            | RecommendError::DimensionLimitExceeded { .. } => Self::InvalidInput(e.to_string()),
            RecommendError::DimensionMismatch { .. } | RecommendError::ConvergenceFailure { .. } => {
                Self::Recommend(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_not_found_keeps_id() {
        let err = CliError::from(RecommendError::user_not_found("zed"));
        assert!(matches!(&err, CliError::UserNotFound(id) if id == "zed"));
        assert_eq!(err.code(), 2);
    }

    #[test]
    fn test_bad_hyperparameter_is_invalid_input() {
        let err = CliError::from(RecommendError::invalid_hyperparameter("top_n", 0, "> 0"));
        assert!(matches!(err, CliError::InvalidInput(_)));
        assert_eq!(err.code(), 4);
    }

    #[test]
    fn test_convergence_failure_is_generic() {
        let err = CliError::from(RecommendError::ConvergenceFailure {
            sweeps: 100,
            residual: 1e-3,
        });
        assert_eq!(err.code(), 1);
    }

    #[test]
    fn test_file_not_found_message() {
        let err = CliError::FileNotFound(PathBuf::from("/nope.json"));
        assert_eq!(err.to_string(), "File not found: /nope.json");
        assert_eq!(err.code(), 3);
    }
}
