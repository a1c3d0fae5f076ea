//! Matrix decomposition.
//!
//! - [`Svd`]: deterministic singular value decomposition (one-sided Jacobi)

mod svd;

pub use svd::Svd;
