//! Recblend: hybrid recommendation in pure Rust.
//!
//! Blends a global low-rank structural prediction (truncated SVD of the
//! rating matrix) with a local item-item neighborhood signal (cosine
//! similarity of rating columns), and ranks a user's unrated items.
//!
//! # Quick Start
//!
//! ```
//! use recblend::prelude::*;
//!
//! let users = vec![User::new("u1"), User::new("u2")];
//! let items = vec![Item::new("i1", "Memento"), Item::new("i2", "Tenet"), Item::new("i3", "Dunkirk")];
//! let ratings = vec![
//!     Rating::new("u1", "i1", 5).unwrap(),
//!     Rating::new("u1", "i2", 4).unwrap(),
//!     Rating::new("u2", "i1", 4).unwrap(),
//!     Rating::new("u2", "i3", 5).unwrap(),
//! ];
//!
//! let recs = HybridRecommender::default()
//!     .recommend("u1", &users, &items, &ratings)
//!     .unwrap();
//! assert_eq!(recs[0].item_id, "i3");
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`decomposition`]: Deterministic singular value decomposition
//! - [`recommend`]: Rating matrix, low-rank prediction, item similarity, hybrid ranking
//! - [`error`]: Error type shared by all stages

pub mod decomposition;
pub mod error;
pub mod prelude;
pub mod primitives;
pub mod recommend;

pub use error::{RecommendError, Result};
pub use primitives::{Matrix, Vector};
