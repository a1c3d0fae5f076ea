//! Error types for recommendation operations.
//!
//! Every failure is local to one invocation; nothing here is retried or
//! cached.

use thiserror::Error;

/// Main error type for recblend operations.
///
/// # Examples
///
/// ```
/// use recblend::error::RecommendError;
///
/// let err = RecommendError::UserNotFound {
///     user_id: "ghost".to_string(),
/// };
/// assert!(err.to_string().contains("ghost"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    /// Target user id is absent from the supplied user collection.
    #[error("user {user_id} not found in rating index")]
    UserNotFound {
        /// The id that failed to resolve
        user_id: String,
    },

    /// Rating value outside the accepted `1..=5` scale.
    #[error("invalid rating {value}: expected an integer in 1..=5")]
    InvalidRating {
        /// Offending raw value
        value: i64,
    },

    /// Invalid configuration value.
    #[error("invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Rating matrix would exceed the configured size bound.
    #[error(
        "rating matrix {users}x{items} exceeds limit {max_users}x{max_items}"
    )]
    DimensionLimitExceeded {
        /// Number of users supplied
        users: usize,
        /// Number of items supplied
        items: usize,
        /// Configured user bound
        max_users: usize,
        /// Configured item bound
        max_items: usize,
    },

    /// Matrix/vector dimensions don't match for the operation.
    #[error("matrix dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Jacobi sweeps did not reach orthogonality.
    #[error("SVD did not converge after {sweeps} sweeps (max off-diagonal {residual:e})")]
    ConvergenceFailure {
        /// Number of sweeps attempted
        sweeps: usize,
        /// Largest remaining normalized column inner product
        residual: f64,
    },
}

impl RecommendError {
    /// Create an invalid hyperparameter error with descriptive context
    #[must_use]
    pub fn invalid_hyperparameter(
        param: &str,
        value: impl ToString,
        constraint: &str,
    ) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Create a user not found error
    #[must_use]
    pub fn user_not_found(user_id: &str) -> Self {
        Self::UserNotFound {
            user_id: user_id.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, RecommendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_not_found_display() {
        let err = RecommendError::user_not_found("u42");
        assert_eq!(err.to_string(), "user u42 not found in rating index");
    }

    #[test]
    fn test_invalid_rating_display() {
        let err = RecommendError::InvalidRating { value: 0 };
        assert!(err.to_string().contains("1..=5"));
    }

    #[test]
    fn test_invalid_hyperparameter_display() {
        let err = RecommendError::invalid_hyperparameter("top_n", 0, "> 0");
        assert_eq!(
            err.to_string(),
            "invalid hyperparameter: top_n = 0, expected > 0"
        );
    }

    #[test]
    fn test_dimension_limit_display() {
        let err = RecommendError::DimensionLimitExceeded {
            users: 20,
            items: 3,
            max_users: 10,
            max_items: 5,
        };
        assert!(err.to_string().contains("20x3"));
        assert!(err.to_string().contains("10x5"));
    }

    #[test]
    fn test_errors_are_std_errors() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&RecommendError::ConvergenceFailure {
            sweeps: 3,
            residual: 0.5,
        });
    }
}
