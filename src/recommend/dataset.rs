//! In-memory datasets and a seeded movie-catalog generator.

use super::types::{Item, Rating, RatingValue, User};
use crate::error::{RecommendError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Default probability that a synthetic user rated a given movie.
pub const DEFAULT_RATING_DENSITY: f64 = 0.8;

const USER_NAMES: [&str; 10] = [
    "alice", "bob", "charlie", "david", "eve", "frank", "grace", "heidi", "ivan", "judy",
];

const MOVIES: [(&str, &str); 20] = [
    ("The Matrix", "Sci-Fi"),
    ("Inception", "Sci-Fi"),
    ("Interstellar", "Sci-Fi"),
    ("The Dark Knight", "Action"),
    ("Avengers", "Action"),
    ("Iron Man", "Action"),
    ("Thor", "Fantasy"),
    ("Doctor Strange", "Fantasy"),
    ("Black Panther", "Action"),
    ("Captain America", "Action"),
    ("Guardians of the Galaxy", "Sci-Fi"),
    ("Spider-Man: Homecoming", "Action"),
    ("Shutter Island", "Thriller"),
    ("Memento", "Thriller"),
    ("Dunkirk", "War"),
    ("Tenet", "Sci-Fi"),
    ("The Prestige", "Drama"),
    ("Joker", "Drama"),
    ("Logan", "Action"),
    ("Deadpool", "Comedy"),
];

/// The three input collections, as a host would load them from storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// All known users
    pub users: Vec<User>,
    /// The catalog
    pub items: Vec<Item>,
    /// Observed ratings
    pub ratings: Vec<Rating>,
}

impl Dataset {
    /// Bundles existing collections.
    #[must_use]
    pub fn new(users: Vec<User>, items: Vec<Item>, ratings: Vec<Rating>) -> Self {
        Self {
            users,
            items,
            ratings,
        }
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Generates 10 users and 20 movies; each (user, movie) pair is rated
    /// with probability `density`, uniformly on `1..=5`.
    ///
    /// The same `seed` always produces the same dataset.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::InvalidHyperparameter`] if `density` is not
    /// in `[0, 1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use recblend::recommend::Dataset;
    ///
    /// let data = Dataset::synthetic_movies(42, 0.8).expect("valid density");
    /// assert_eq!(data.users.len(), 10);
    /// assert_eq!(data.items.len(), 20);
    /// assert_eq!(data, Dataset::synthetic_movies(42, 0.8).expect("valid density"));
    /// ```
    pub fn synthetic_movies(seed: u64, density: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&density) {
            return Err(RecommendError::invalid_hyperparameter(
                "density",
                density,
                "a probability in [0, 1]",
            ));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let users: Vec<User> = USER_NAMES.iter().map(|name| User::new(*name)).collect();
        let items: Vec<Item> = MOVIES
            .iter()
            .enumerate()
            .map(|(i, (title, category))| {
                Item::new(format!("m{:02}", i + 1), *title).with_category(*category)
            })
            .collect();

        let mut ratings = Vec::new();
        for user in &users {
            for item in &items {
                if rng.gen_bool(density) {
                    let value = rng.gen_range(RatingValue::MIN..=RatingValue::MAX);
                    ratings.push(Rating {
                        user_id: user.id.clone(),
                        item_id: item.id.clone(),
                        rating: RatingValue::new(value)?,
                    });
                }
            }
        }

        Ok(Self::new(users, items, ratings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = Dataset::synthetic_movies(7, 0.8).expect("valid");
        let b = Dataset::synthetic_movies(7, 0.8).expect("valid");
        assert_eq!(a, b);
    }

    #[test]
    fn test_density_bounds() {
        assert!(Dataset::synthetic_movies(1, 1.5).is_err());
        assert!(Dataset::synthetic_movies(1, -0.1).is_err());

        let full = Dataset::synthetic_movies(1, 1.0).expect("valid");
        assert_eq!(full.ratings.len(), 200);

        let empty = Dataset::synthetic_movies(1, 0.0).expect("valid");
        assert!(empty.ratings.is_empty());
    }

    #[test]
    fn test_ratings_reference_known_ids() {
        let data = Dataset::synthetic_movies(3, 0.5).expect("valid");
        for r in &data.ratings {
            assert!(data.users.iter().any(|u| u.id == r.user_id));
            assert!(data.item(&r.item_id).is_some());
            assert!((1..=5).contains(&r.rating.get()));
        }
    }

    #[test]
    fn test_items_carry_categories() {
        let data = Dataset::synthetic_movies(0, 0.8).expect("valid");
        let matrix = data.item("m01").expect("first movie");
        assert_eq!(matrix.title, "The Matrix");
        assert_eq!(matrix.category.as_deref(), Some("Sci-Fi"));
    }

    #[test]
    fn test_json_roundtrip_of_dataset() {
        let data = Dataset::synthetic_movies(5, 0.3).expect("valid");
        let json = serde_json::to_string(&data).expect("serializable");
        let back: Dataset = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back, data);
    }
}
