//! Dense user × item rating matrix with id ↔ index maps.

use super::types::{Item, Rating, User};
use crate::primitives::Matrix;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Observed ratings laid out as a dense matrix (0.0 = unrated).
///
/// Rows follow the order of the user collection, columns the order of the
/// item collection.
///
/// # Examples
///
/// ```
/// use recblend::recommend::{Item, Rating, RatingMatrix, User};
///
/// let users = vec![User::new("u1"), User::new("u2")];
/// let items = vec![Item::new("i1", "Inception"), Item::new("i2", "Tenet")];
/// let ratings = vec![
///     Rating::new("u1", "i2", 4).expect("valid"),
///     Rating::new("u9", "i1", 5).expect("valid"), // unknown user, dropped
/// ];
///
/// let matrix = RatingMatrix::build(&users, &items, &ratings);
/// assert_eq!(matrix.matrix().shape(), (2, 2));
/// assert_eq!(matrix.matrix().get(0, 1), 4.0);
/// assert_eq!(matrix.dropped_ratings(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RatingMatrix {
    ratings: Matrix<f64>,
    user_index: HashMap<String, usize>,
    item_index: HashMap<String, usize>,
    item_ids: Vec<String>,
    dropped: usize,
}

impl RatingMatrix {
    /// Builds the matrix from the three input collections.
    ///
    /// Ratings naming an unknown user or item are skipped. A later rating
    /// for the same cell overwrites an earlier one. Repeated user or item
    /// ids keep the index of their first occurrence.
    #[must_use]
    #[instrument(
        level = "debug",
        skip_all,
        fields(users = users.len(), items = items.len(), ratings = ratings.len())
    )]
    pub fn build(users: &[User], items: &[Item], ratings: &[Rating]) -> Self {
        let (user_index, _) = index_ids(users.iter().map(|u| u.id.as_str()));
        let (item_index, item_ids) = index_ids(items.iter().map(|i| i.id.as_str()));

        let mut matrix = Matrix::zeros(user_index.len(), item_index.len());
        let mut dropped = 0;
        for rating in ratings {
            match (
                user_index.get(&rating.user_id),
                item_index.get(&rating.item_id),
            ) {
                (Some(&row), Some(&col)) => matrix.set(row, col, rating.rating.as_f64()),
                _ => dropped += 1,
            }
        }

        if dropped > 0 {
            debug!(dropped, "skipped ratings referencing unknown users or items");
        }

        Self {
            ratings: matrix,
            user_index,
            item_index,
            item_ids,
            dropped,
        }
    }

    /// The rating matrix `R`.
    #[must_use]
    pub fn matrix(&self) -> &Matrix<f64> {
        &self.ratings
    }

    /// Row index of a user.
    #[must_use]
    pub fn user_row(&self, user_id: &str) -> Option<usize> {
        self.user_index.get(user_id).copied()
    }

    /// Column index of an item.
    #[must_use]
    pub fn item_column(&self, item_id: &str) -> Option<usize> {
        self.item_index.get(item_id).copied()
    }

    /// Item ids in column order.
    #[must_use]
    pub fn item_ids(&self) -> &[String] {
        &self.item_ids
    }

    /// Number of distinct users (rows).
    #[must_use]
    pub fn n_users(&self) -> usize {
        self.ratings.n_rows()
    }

    /// Number of distinct items (columns).
    #[must_use]
    pub fn n_items(&self) -> usize {
        self.ratings.n_cols()
    }

    /// Ratings skipped because an id did not resolve.
    #[must_use]
    pub fn dropped_ratings(&self) -> usize {
        self.dropped
    }
}

/// Assigns dense indices in first-seen order.
fn index_ids<'a>(ids: impl Iterator<Item = &'a str>) -> (HashMap<String, usize>, Vec<String>) {
    let mut index = HashMap::new();
    let mut ordered = Vec::new();
    for id in ids {
        if index.contains_key(id) {
            debug!(id, "ignoring duplicate id");
            continue;
        }
        index.insert(id.to_string(), ordered.len());
        ordered.push(id.to_string());
    }
    (index, ordered)
}
