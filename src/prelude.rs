//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use recblend::prelude::*;
//! ```

pub use crate::decomposition::Svd;
pub use crate::error::{RecommendError, Result};
pub use crate::primitives::{Matrix, Vector};
pub use crate::recommend::{
    BlendWeights, Dataset, HybridRecommender, Item, RankPolicy, Rating, Recommendation,
    RecommenderConfig, User,
};
