//! Singular value decomposition behind a swappable backend.

use crate::{LsiError, Result};
use nalgebra::{DMatrix, DVector};

/// `M ≈ U·Σ·Vᵗ` with r = min(#terms, #documents).
///
/// Row i of `u` is term position i, row i of `v` is document position i.
/// The diagonal of `sigma` is non-negative and descending.
#[derive(Debug, Clone)]
pub struct Factorization {
    /// terms × r
    pub u: DMatrix<f64>,
    /// r × r, diagonal
    pub sigma: DMatrix<f64>,
    /// documents × r
    pub v: DMatrix<f64>,
}

impl Factorization {
    pub fn rank(&self) -> usize { self.sigma.nrows() }

    pub fn singular_values(&self) -> DVector<f64> { self.sigma.diagonal() }

    /// `U·Σ·Vᵗ`
    pub fn reconstruct(&self) -> DMatrix<f64> { &self.u * &self.sigma * self.v.transpose() }
}

pub trait Factorizer {
    fn decompose(&self, matrix: &DMatrix<f64>) -> Result<Factorization>;
}

/// nalgebra's thin SVD.
#[derive(Debug, Clone, Copy)]
pub struct SvdFactorizer {
    pub eps: f64,
    /// 0 iterates until convergence
    pub max_iterations: usize,
}

impl Default for SvdFactorizer {
    fn default() -> Self { Self { eps: f64::EPSILON, max_iterations: 0 } }
}

impl Factorizer for SvdFactorizer {
    fn decompose(&self, matrix: &DMatrix<f64>) -> Result<Factorization> {
        if matrix.is_empty() {
            return Err(LsiError::EmptyCorpus);
        }
        let svd = matrix
            .clone()
            .try_svd(true, true, self.eps, self.max_iterations)
            .ok_or_else(|| LsiError::Decomposition("svd did not converge".into()))?;
        let u = svd.u.ok_or_else(|| LsiError::Decomposition("left singular vectors missing".into()))?;
        let v_t = svd.v_t.ok_or_else(|| LsiError::Decomposition("right singular vectors missing".into()))?;
        let values = svd.singular_values;
        if values.iter().any(|s| !s.is_finite()) {
            return Err(LsiError::Decomposition("non-finite singular value".into()));
        }

        // stable sort keeps backend order among equal values
        let r = values.len();
        let mut order: Vec<usize> = (0..r).collect();
        order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

        let u = DMatrix::from_fn(u.nrows(), r, |i, j| u[(i, order[j])]);
        let v = DMatrix::from_fn(v_t.ncols(), r, |i, j| v_t[(order[j], i)]);
        let sigma = DMatrix::from_fn(r, r, |i, j| if i == j { values[order[i]] } else { 0.0 });
        tracing::debug!(rank = r, largest = values.max(), "decomposed term-document matrix");
        Ok(Factorization { u, sigma, v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_follow_min_dimension() {
        let wide = DMatrix::from_row_slice(2, 3, &[1.0, 0.0, 2.0, 0.0, 3.0, 1.0]);
        let f = SvdFactorizer::default().decompose(&wide).unwrap();
        assert_eq!(f.u.shape(), (2, 2));
        assert_eq!(f.sigma.shape(), (2, 2));
        assert_eq!(f.v.shape(), (3, 2));

        let tall = wide.transpose();
        let f = SvdFactorizer::default().decompose(&tall).unwrap();
        assert_eq!(f.u.shape(), (3, 2));
        assert_eq!(f.v.shape(), (2, 2));
    }

    #[test]
    fn singular_values_descend_and_reconstruct() {
        let m = DMatrix::from_row_slice(3, 3, &[1.0, 0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 3.0]);
        let f = SvdFactorizer::default().decompose(&m).unwrap();
        let s = f.singular_values();
        assert!((s[0] - 5.0).abs() < 1e-9);
        assert!((s[1] - 3.0).abs() < 1e-9);
        assert!((s[2] - 1.0).abs() < 1e-9);
        assert!((f.reconstruct() - m).amax() < 1e-9);
    }

    #[test]
    fn empty_matrix_is_rejected() {
        let m = DMatrix::<f64>::zeros(0, 3);
        assert!(matches!(SvdFactorizer::default().decompose(&m), Err(LsiError::EmptyCorpus)));
    }
}
