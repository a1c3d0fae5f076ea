//! Singular value decomposition by one-sided Jacobi rotations.
//!
//! Hestenes' method orthogonalizes the columns of the (tall) input by
//! plane rotations until every pair is orthogonal to working precision.
//! Column norms are then the singular values. The sweep order is fixed,
//! so identical input always yields bit-identical factors.
//!
//! # References
//!
//! - Hestenes (1958). "Inversion of Matrices by Biorthogonalization and
//!   Related Results." J. SIAM 6(1).
//! - Demmel & Veselić (1992). "Jacobi's Method is More Accurate than QR."
//!   SIAM J. Matrix Anal. Appl. 13(4).

use crate::error::{RecommendError, Result};
use crate::primitives::Matrix;
use tracing::{debug, instrument};

/// Upper bound on full sweeps over all column pairs.
const MAX_SWEEPS: usize = 100;

/// Pairs with normalized inner product below this are treated as orthogonal.
const ORTHOGONALITY_TOL: f64 = 1e-12;

/// Thin SVD `A = U · diag(σ) · Vᵗ` of an `m × n` matrix.
///
/// With `r = min(m, n)`, `U` is `m × r`, `σ` has `r` non-negative entries in
/// non-increasing order and `Vᵗ` is `r × n`. Left vectors belonging to a
/// zero singular value are stored as zero columns.
///
/// # Examples
///
/// ```
/// use recblend::decomposition::Svd;
/// use recblend::primitives::Matrix;
///
/// let a = Matrix::from_vec(2, 2, vec![3.0, 0.0, 0.0, 4.0]).expect("2x2");
/// let svd = Svd::compute(&a).expect("converges");
/// assert!((svd.singular_values()[0] - 4.0).abs() < 1e-12);
/// assert!((svd.singular_values()[1] - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Svd {
    u: Matrix<f64>,
    singular_values: Vec<f64>,
    vt: Matrix<f64>,
    sweeps: usize,
}

impl Svd {
    /// Decomposes `a`.
    ///
    /// Wide inputs (`m < n`) are decomposed through their transpose so the
    /// rotations always act on the shorter side.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::ConvergenceFailure`] if the columns are not
    /// orthogonal after the sweep cap.
    #[instrument(level = "debug", skip(a), fields(rows = a.n_rows(), cols = a.n_cols()))]
    pub fn compute(a: &Matrix<f64>) -> Result<Self> {
        let (m, n) = a.shape();
        let transposed = m < n;
        let work = if transposed { a.transpose() } else { a.clone() };
        let (rows, cols) = work.shape();

        let mut w: Vec<Vec<f64>> = (0..cols)
            .map(|j| work.column(j).as_slice().to_vec())
            .collect();
        let mut v: Vec<Vec<f64>> = (0..cols)
            .map(|j| {
                let mut e = vec![0.0; cols];
                e[j] = 1.0;
                e
            })
            .collect();

        let sweeps = orthogonalize(&mut w, &mut v)?;

        let norms: Vec<f64> = w.iter().map(|col| dot(col, col).sqrt()).collect();
        let mut order: Vec<usize> = (0..cols).collect();
        order.sort_by(|&a, &b| norms[b].total_cmp(&norms[a]));

        let singular_values: Vec<f64> = order.iter().map(|&j| norms[j]).collect();
        let left_cols: Vec<Vec<f64>> = order
            .iter()
            .map(|&j| {
                let sigma = norms[j];
                if sigma > 0.0 {
                    w[j].iter().map(|x| x / sigma).collect()
                } else {
                    vec![0.0; rows]
                }
            })
            .collect();
        let right_cols: Vec<Vec<f64>> = order.iter().map(|&j| v[j].clone()).collect();

        let left = from_columns(rows, &left_cols);
        let right = from_columns(cols, &right_cols);

        // A = Wᵗ = (L Σ Rᵗ)ᵗ = R Σ Lᵗ for the transposed case.
        let (u, vt) = if transposed {
            (right, left.transpose())
        } else {
            (left, right.transpose())
        };

        debug!(sweeps, rank = singular_values.len(), "svd converged");

        Ok(Self {
            u,
            singular_values,
            vt,
            sweeps,
        })
    }

    /// Left singular vectors (`m × r`).
    #[must_use]
    pub fn u(&self) -> &Matrix<f64> {
        &self.u
    }

    /// Singular values, non-increasing.
    #[must_use]
    pub fn singular_values(&self) -> &[f64] {
        &self.singular_values
    }

    /// Transposed right singular vectors (`r × n`).
    #[must_use]
    pub fn vt(&self) -> &Matrix<f64> {
        &self.vt
    }

    /// Number of Jacobi sweeps used.
    #[must_use]
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }

    /// Smallest `k` whose leading squared singular values hold at least
    /// `fraction` of the total energy. Zero for an all-zero input.
    #[must_use]
    pub fn rank_for_energy(&self, fraction: f64) -> usize {
        let total: f64 = self.singular_values.iter().map(|s| s * s).sum();
        if total == 0.0 {
            return 0;
        }
        let target = fraction * total;
        let mut acc = 0.0;
        for (k, s) in self.singular_values.iter().enumerate() {
            acc += s * s;
            if acc >= target * (1.0 - f64::EPSILON) {
                return k + 1;
            }
        }
        self.singular_values.len()
    }

    /// Rebuilds `U_k · diag(σ_k) · V_kᵗ` from the leading `k` components.
    ///
    /// `k` is clamped to the number of singular values; `k = 0` gives zeros.
    #[must_use]
    pub fn reconstruct(&self, k: usize) -> Matrix<f64> {
        let (m, n) = (self.u.n_rows(), self.vt.n_cols());
        let k = k.min(self.singular_values.len());
        let mut out = vec![0.0; m * n];

        for (t, &sigma) in self.singular_values.iter().take(k).enumerate() {
            if sigma == 0.0 {
                continue;
            }
            let right = self.vt.row_slice(t);
            for i in 0..m {
                let scale = self.u.get(i, t) * sigma;
                if scale == 0.0 {
                    continue;
                }
                for (o, &r) in out[i * n..(i + 1) * n].iter_mut().zip(right) {
                    *o += scale * r;
                }
            }
        }

        Matrix::from_vec(m, n, out).unwrap_or_else(|_| Matrix::zeros(m, n))
    }
}

/// Runs cyclic sweeps until no pair needs rotating; returns the sweep count.
fn orthogonalize(w: &mut [Vec<f64>], v: &mut [Vec<f64>]) -> Result<usize> {
    let n = w.len();
    let mut residual = 0.0_f64;
    // Rotations preserve the Frobenius norm; columns below eps·‖A‖ are numerically zero.
    let frobenius_sq: f64 = w.iter().map(|col| dot(col, col)).sum();
    let negligible = f64::EPSILON * f64::EPSILON * frobenius_sq;

    for sweep in 1..=MAX_SWEEPS {
        let mut rotated = false;
        residual = 0.0;

        for p in 0..n {
            for q in (p + 1)..n {
                let alpha = dot(&w[p], &w[p]);
                let beta = dot(&w[q], &w[q]);
                if alpha <= negligible || beta <= negligible {
                    continue;
                }
                let gamma = dot(&w[p], &w[q]);
                let off = gamma.abs() / (alpha * beta).sqrt();
                residual = residual.max(off);
                if off <= ORTHOGONALITY_TOL {
                    continue;
                }

                rotated = true;
                let zeta = (beta - alpha) / (2.0 * gamma);
                let t = zeta.signum() / (zeta.abs() + zeta.hypot(1.0));
                let c = 1.0 / t.hypot(1.0);
                let s = c * t;
                rotate(w, p, q, c, s);
                rotate(v, p, q, c, s);
            }
        }

        if !rotated {
            return Ok(sweep);
        }
    }

    Err(RecommendError::ConvergenceFailure {
        sweeps: MAX_SWEEPS,
        residual,
    })
}

fn rotate(cols: &mut [Vec<f64>], p: usize, q: usize, c: f64, s: f64) {
    let (head, tail) = cols.split_at_mut(q);
    for (x, y) in head[p].iter_mut().zip(tail[0].iter_mut()) {
        let (xp, yq) = (*x, *y);
        *x = c * xp - s * yq;
        *y = s * xp + c * yq;
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn from_columns(rows: usize, cols: &[Vec<f64>]) -> Matrix<f64> {
    let r = cols.len();
    let mut out = Matrix::zeros(rows, r);
    for (t, col) in cols.iter().enumerate() {
        for (i, &value) in col.iter().enumerate() {
            out.set(i, t, value);
        }
    }
    out
}

#[cfg(test)]
#[path = "svd_tests.rs"]
mod tests;
