//! Input records and output values of the recommender.
//!
//! Records are validated when they are constructed or deserialized, so the
//! matrix builder never sees a rating outside `1..=5`.

use crate::error::{RecommendError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user known to the catalog. Only the id is used for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    /// Opaque unique identifier
    pub id: String,
}

impl User {
    /// Creates a user record.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A catalog item. `title` and `category` are display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    /// Opaque unique identifier
    pub id: String,
    /// Human-readable title
    pub title: String,
    /// Optional genre or grouping label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Item {
    /// Creates an item without a category.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: None,
        }
    }

    /// Attaches a category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// An explicit rating on the `1..=5` scale.
///
/// Zero means "unrated" inside the rating matrix, so it is rejected here.
///
/// # Examples
///
/// ```
/// use recblend::recommend::RatingValue;
///
/// assert_eq!(RatingValue::new(4).expect("in range").get(), 4);
/// assert!(RatingValue::new(0).is_err());
/// assert!(RatingValue::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct RatingValue(u8);

impl RatingValue {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Validates and wraps a raw rating.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::InvalidRating`] outside `1..=5`.
    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RecommendError::InvalidRating {
                value: i64::from(value),
            })
        }
    }

    /// The raw rating.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// The rating as a matrix entry.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl TryFrom<u8> for RatingValue {
    type Error = RecommendError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<i64> for RatingValue {
    type Error = RecommendError;

    fn try_from(value: i64) -> Result<Self> {
        u8::try_from(value)
            .map_err(|_| RecommendError::InvalidRating { value })
            .and_then(Self::new)
    }
}

impl From<RatingValue> for u8 {
    fn from(value: RatingValue) -> Self {
        value.0
    }
}

impl fmt::Display for RatingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One user's rating of one item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    /// Rating user
    pub user_id: String,
    /// Rated item
    pub item_id: String,
    /// Validated rating value
    pub rating: RatingValue,
}

impl Rating {
    /// Creates a rating, validating the value.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::InvalidRating`] outside `1..=5`.
    pub fn new(user_id: impl Into<String>, item_id: impl Into<String>, rating: u8) -> Result<Self> {
        Ok(Self {
            user_id: user_id.into(),
            item_id: item_id.into(),
            rating: RatingValue::new(rating)?,
        })
    }
}

/// A scored candidate item for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Recommended item
    pub item_id: String,
    /// Blended score; higher is better
    pub score: f64,
}
