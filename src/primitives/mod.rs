//! Core compute primitives (Vector, Matrix).
//!
//! Dense row-major storage backing the rating, prediction and
//! similarity matrices.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
