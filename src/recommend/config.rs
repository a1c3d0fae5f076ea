//! Recommender configuration.
//!
//! All knobs are plain values with serde support so a host can load them
//! from a file. [`RecommenderConfig::validate`] runs before any scoring.

use crate::error::{RecommendError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default weight of the low-rank prediction in the blended score.
pub const DEFAULT_PREDICTED_WEIGHT: f64 = 0.7;

/// Default weight of the neighborhood average in the blended score.
pub const DEFAULT_NEIGHBORHOOD_WEIGHT: f64 = 0.3;

/// Default number of recommendations returned.
pub const DEFAULT_TOP_N: usize = 10;

/// Default fraction of spectral energy kept by the approximator.
pub const DEFAULT_ENERGY: f64 = 0.9;

/// Similarity assigned when either item column is all zeros.
pub const DEFAULT_SIMILARITY_FALLBACK: f64 = 0.0;

/// Weights of the two signals in the hybrid score.
///
/// `score = predicted * base + neighborhood * neighborhood_average`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    /// Weight of the reconstructed rating
    pub predicted: f64,
    /// Weight of the similarity-weighted neighborhood average
    pub neighborhood: f64,
}

impl BlendWeights {
    /// Creates custom weights.
    #[must_use]
    pub const fn new(predicted: f64, neighborhood: f64) -> Self {
        Self {
            predicted,
            neighborhood,
        }
    }

    /// Blends the two signals.
    #[must_use]
    pub fn blend(&self, base: f64, neighborhood: f64) -> f64 {
        self.predicted * base + self.neighborhood * neighborhood
    }

    /// Checks both weights are finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::InvalidHyperparameter`] otherwise.
    pub fn validate(&self) -> Result<()> {
        for (param, value) in [
            ("blend.predicted", self.predicted),
            ("blend.neighborhood", self.neighborhood),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RecommendError::invalid_hyperparameter(
                    param,
                    value,
                    "a finite value >= 0",
                ));
            }
        }
        Ok(())
    }
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self::new(DEFAULT_PREDICTED_WEIGHT, DEFAULT_NEIGHBORHOOD_WEIGHT)
    }
}

/// How many singular components the approximator keeps.
///
/// Keeping every component reproduces the rating matrix, which makes the
/// prediction signal equal to the observed ratings (zero for every
/// candidate). Truncating lets unobserved cells pick up structure from
/// similar users.
///
/// # Examples
///
/// ```
/// use recblend::recommend::RankPolicy;
///
/// assert_eq!("full".parse::<RankPolicy>().expect("valid"), RankPolicy::Full);
/// assert_eq!("3".parse::<RankPolicy>().expect("valid"), RankPolicy::Fixed(3));
/// assert_eq!("energy:0.8".parse::<RankPolicy>().expect("valid"), RankPolicy::Energy(0.8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum RankPolicy {
    /// Every singular component
    Full,
    /// The leading `k` components, clamped to `min(users, items)`
    Fixed(usize),
    /// The fewest leading components holding this fraction of `Σσ²`
    Energy(f64),
}

impl RankPolicy {
    /// Checks the policy parameters.
    ///
    /// # Errors
    ///
    /// `Fixed(0)` and energies outside `(0, 1]` are rejected.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Full => Ok(()),
            Self::Fixed(0) => Err(RecommendError::invalid_hyperparameter(
                "rank",
                0,
                "k >= 1",
            )),
            Self::Fixed(_) => Ok(()),
            Self::Energy(f) if f.is_finite() && f > 0.0 && f <= 1.0 => Ok(()),
            Self::Energy(f) => Err(RecommendError::invalid_hyperparameter(
                "rank.energy",
                f,
                "a fraction in (0, 1]",
            )),
        }
    }
}

impl Default for RankPolicy {
    fn default() -> Self {
        Self::Energy(DEFAULT_ENERGY)
    }
}

impl fmt::Display for RankPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Fixed(k) => write!(f, "{k}"),
            Self::Energy(e) => write!(f, "energy:{e}"),
        }
    }
}

impl FromStr for RankPolicy {
    type Err = RecommendError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || {
            RecommendError::invalid_hyperparameter("rank", s, "full, <k> or energy:<fraction>")
        };

        let policy = if s.eq_ignore_ascii_case("full") {
            Self::Full
        } else if let Some(fraction) = s.strip_prefix("energy:") {
            Self::Energy(fraction.parse().map_err(|_| invalid())?)
        } else {
            Self::Fixed(s.parse().map_err(|_| invalid())?)
        };
        policy.validate()?;
        Ok(policy)
    }
}

/// Upper bound on the rating matrix size accepted before decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionLimits {
    /// Maximum number of users (matrix rows)
    pub max_users: usize,
    /// Maximum number of items (matrix columns)
    pub max_items: usize,
}

impl DimensionLimits {
    /// Creates custom limits.
    #[must_use]
    pub const fn new(max_users: usize, max_items: usize) -> Self {
        Self {
            max_users,
            max_items,
        }
    }

    /// Fails if a `users x items` matrix would exceed the limits.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::DimensionLimitExceeded`].
    pub fn check(&self, users: usize, items: usize) -> Result<()> {
        if users > self.max_users || items > self.max_items {
            return Err(RecommendError::DimensionLimitExceeded {
                users,
                items,
                max_users: self.max_users,
                max_items: self.max_items,
            });
        }
        Ok(())
    }
}

impl Default for DimensionLimits {
    fn default() -> Self {
        Self::new(10_000, 5_000)
    }
}

/// Full recommender configuration.
///
/// # Examples
///
/// ```
/// use recblend::recommend::{BlendWeights, RankPolicy, RecommenderConfig};
///
/// let config = RecommenderConfig::default()
///     .with_rank(RankPolicy::Fixed(2))
///     .with_blend(BlendWeights::new(0.5, 0.5))
///     .with_top_n(5);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.top_n, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Blend of prediction and neighborhood signals
    pub blend: BlendWeights,
    /// Truncation rank of the approximator
    pub rank: RankPolicy,
    /// Similarity for pairs involving a never-rated item
    pub similarity_fallback: f64,
    /// Number of recommendations returned by default
    pub top_n: usize,
    /// Matrix size guard
    pub limits: DimensionLimits,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            blend: BlendWeights::default(),
            rank: RankPolicy::default(),
            similarity_fallback: DEFAULT_SIMILARITY_FALLBACK,
            top_n: DEFAULT_TOP_N,
            limits: DimensionLimits::default(),
        }
    }
}

impl RecommenderConfig {
    /// Sets the blend weights.
    #[must_use]
    pub fn with_blend(mut self, blend: BlendWeights) -> Self {
        self.blend = blend;
        self
    }

    /// Sets the rank policy.
    #[must_use]
    pub fn with_rank(mut self, rank: RankPolicy) -> Self {
        self.rank = rank;
        self
    }

    /// Sets the zero-vector similarity fallback.
    #[must_use]
    pub fn with_similarity_fallback(mut self, fallback: f64) -> Self {
        self.similarity_fallback = fallback;
        self
    }

    /// Sets the default result size.
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Sets the matrix size guard.
    #[must_use]
    pub fn with_limits(mut self, limits: DimensionLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Validates every field.
    ///
    /// # Errors
    ///
    /// Returns the first [`RecommendError::InvalidHyperparameter`] found.
    pub fn validate(&self) -> Result<()> {
        self.blend.validate()?;
        self.rank.validate()?;
        validate_top_n(self.top_n)?;
        if !self.similarity_fallback.is_finite()
            || !(-1.0..=1.0).contains(&self.similarity_fallback)
        {
            return Err(RecommendError::invalid_hyperparameter(
                "similarity_fallback",
                self.similarity_fallback,
                "a value in [-1, 1]",
            ));
        }
        Ok(())
    }
}

pub(crate) fn validate_top_n(top_n: usize) -> Result<()> {
    if top_n == 0 {
        return Err(RecommendError::invalid_hyperparameter("top_n", 0, "> 0"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RecommenderConfig::default();
        assert_eq!(config.blend, BlendWeights::new(0.7, 0.3));
        assert_eq!(config.rank, RankPolicy::Energy(0.9));
        assert_eq!(config.top_n, 10);
        assert_eq!(config.similarity_fallback, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blend() {
        let w = BlendWeights::default();
        assert!((w.blend(4.0, 2.0) - (0.7 * 4.0 + 0.3 * 2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        assert!(BlendWeights::new(-0.1, 0.3).validate().is_err());
        assert!(BlendWeights::new(0.7, f64::NAN).validate().is_err());
        assert!(BlendWeights::new(1.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_invalid_rank_policies_rejected() {
        assert!(RankPolicy::Fixed(0).validate().is_err());
        assert!(RankPolicy::Energy(0.0).validate().is_err());
        assert!(RankPolicy::Energy(1.5).validate().is_err());
        assert!(RankPolicy::Energy(1.0).validate().is_ok());
        assert!(RankPolicy::Full.validate().is_ok());
    }

    #[test]
    fn test_rank_policy_parse_roundtrip_display() {
        for text in ["full", "4", "energy:0.75"] {
            let policy: RankPolicy = text.parse().expect("valid policy");
            assert_eq!(policy.to_string(), text);
        }
        assert!("energy:2".parse::<RankPolicy>().is_err());
        assert!("zero".parse::<RankPolicy>().is_err());
        assert!("0".parse::<RankPolicy>().is_err());
    }

    #[test]
    fn test_top_n_zero_rejected() {
        let config = RecommenderConfig::default().with_top_n(0);
        assert!(matches!(
            config.validate(),
            Err(RecommendError::InvalidHyperparameter { ref param, .. }) if param == "top_n"
        ));
    }

    #[test]
    fn test_fallback_range() {
        assert!(RecommenderConfig::default()
            .with_similarity_fallback(1.5)
            .validate()
            .is_err());
        assert!(RecommenderConfig::default()
            .with_similarity_fallback(-1.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_dimension_limits() {
        let limits = DimensionLimits::new(2, 3);
        assert!(limits.check(2, 3).is_ok());
        assert!(matches!(
            limits.check(3, 1),
            Err(RecommendError::DimensionLimitExceeded { users: 3, .. })
        ));
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: RecommenderConfig =
            serde_json::from_str(r#"{"top_n": 3, "rank": {"kind": "fixed", "value": 2}}"#)
                .expect("valid json");
        assert_eq!(config.top_n, 3);
        assert_eq!(config.rank, RankPolicy::Fixed(2));
        assert_eq!(config.blend, BlendWeights::default());
    }

    #[test]
    fn test_full_policy_json() {
        let json = serde_json::to_string(&RankPolicy::Full).expect("serializable");
        assert_eq!(json, r#"{"kind":"full"}"#);
    }
}
