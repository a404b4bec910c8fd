//! Cyclic Jacobi eigen-decomposition for real symmetric matrices.

use ndarray::{Array1, Array2};
use tracing::trace;

use crate::error::{OperatorError, OperatorResult};

/// Sweep budget; Jacobi converges quadratically, real inputs need < 15.
const MAX_SWEEPS: usize = 100;

/// Relative off-diagonal threshold for convergence.
const TOLERANCE: f64 = 1e-14;

/// Eigen-decomposition `A = V · diag(λ) · Vᵀ`.
#[derive(Debug, Clone)]
pub struct SymmetricEigen {
    /// Eigenvalues in ascending order.
    pub eigenvalues: Array1<f64>,
    /// Orthonormal eigenvectors, one per column, matching `eigenvalues`.
    pub eigenvectors: Array2<f64>,
}

impl SymmetricEigen {
    /// Apply `f(A)` to `x` via the decomposition: `V · diag(f(λ)) · Vᵀ · x`.
    pub fn apply_fn(&self, x: &Array1<f64>, f: impl Fn(f64) -> f64) -> Array1<f64> {
        let mut y = self.eigenvectors.t().dot(x);
        for (yi, &lambda) in y.iter_mut().zip(self.eigenvalues.iter()) {
            *yi *= f(lambda);
        }
        self.eigenvectors.dot(&y)
    }
}

/// Decompose a real symmetric matrix.
///
/// Only the symmetric part of `a` is meaningful; callers validate symmetry.
pub fn symmetric_eigen(a: &Array2<f64>) -> OperatorResult<SymmetricEigen> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(OperatorError::NotSquare { rows, cols });
    }
    let n = rows;
    let mut m = a.clone();
    let mut v = Array2::<f64>::eye(n);

    let scale = m.iter().map(|x| x * x).sum::<f64>().sqrt().max(1.0);

    for sweep in 0..MAX_SWEEPS {
        let off = off_diagonal_norm(&m);
        if off <= TOLERANCE * scale {
            trace!(sweep, off, "jacobi converged");
            return Ok(sorted(m, v));
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = m[[p, q]];
                if apq == 0.0 {
                    continue;
                }
                let theta = (m[[q, q]] - m[[p, p]]) / (2.0 * apq);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let mkp = m[[k, p]];
                    let mkq = m[[k, q]];
                    m[[k, p]] = c * mkp - s * mkq;
                    m[[k, q]] = s * mkp + c * mkq;
                }
                for k in 0..n {
                    let mpk = m[[p, k]];
                    let mqk = m[[q, k]];
                    m[[p, k]] = c * mpk - s * mqk;
                    m[[q, k]] = s * mpk + c * mqk;
                }
                for k in 0..n {
                    let vkp = v[[k, p]];
                    let vkq = v[[k, q]];
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }

    if off_diagonal_norm(&m) <= TOLERANCE * scale {
        return Ok(sorted(m, v));
    }
    Err(OperatorError::NoConvergence { sweeps: MAX_SWEEPS })
}

fn off_diagonal_norm(m: &Array2<f64>) -> f64 {
    m.indexed_iter()
        .filter(|((i, j), _)| i != j)
        .map(|(_, x)| x * x)
        .sum::<f64>()
        .sqrt()
}

fn sorted(m: Array2<f64>, v: Array2<f64>) -> SymmetricEigen {
    let n = m.nrows();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| m[[i, i]].total_cmp(&m[[j, j]]));

    let eigenvalues = Array1::from_iter(order.iter().map(|&i| m[[i, i]]));
    let mut eigenvectors = Array2::<f64>::zeros((n, n));
    for (dst, &src) in order.iter().enumerate() {
        eigenvectors.column_mut(dst).assign(&v.column(src));
    }
    SymmetricEigen {
        eigenvalues,
        eigenvectors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_diagonal_matrix() {
        let a = array![[3.0, 0.0], [0.0, -1.0]];
        let eig = symmetric_eigen(&a).unwrap();
        assert_eq!(eig.eigenvalues.to_vec(), vec![-1.0, 3.0]);
    }

    #[test]
    fn test_two_by_two() {
        // Eigenvalues of [[2,1],[1,2]] are 1 and 3.
        let a = array![[2.0, 1.0], [1.0, 2.0]];
        let eig = symmetric_eigen(&a).unwrap();
        assert!((eig.eigenvalues[0] - 1.0).abs() < 1e-12);
        assert!((eig.eigenvalues[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_reconstruction() {
        let a = array![
            [4.0, 1.0, -2.0, 0.5],
            [1.0, 2.0, 0.0, 1.0],
            [-2.0, 0.0, 3.0, -1.5],
            [0.5, 1.0, -1.5, -1.0]
        ];
        let eig = symmetric_eigen(&a).unwrap();
        let d = Array2::from_diag(&eig.eigenvalues);
        let rebuilt = eig.eigenvectors.dot(&d).dot(&eig.eigenvectors.t());
        for (x, y) in rebuilt.iter().zip(a.iter()) {
            assert!((x - y).abs() < 1e-10);
        }

        let vtv = eig.eigenvectors.t().dot(&eig.eigenvectors);
        for ((i, j), x) in vtv.indexed_iter() {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert!((x - expected).abs() < 1e-10);
        }
    }

    #[test]
    fn test_apply_fn_identity() {
        let a = array![[1.0, 0.3], [0.3, -0.5]];
        let eig = symmetric_eigen(&a).unwrap();
        let x = array![0.2, -0.7];
        let y = eig.apply_fn(&x, |lambda| lambda);
        let expected = a.dot(&x);
        for (p, q) in y.iter().zip(expected.iter()) {
            assert!((p - q).abs() < 1e-12);
        }
    }

    #[test]
    fn test_non_square_rejected() {
        let a = Array2::<f64>::zeros((2, 3));
        assert!(matches!(
            symmetric_eigen(&a),
            Err(OperatorError::NotSquare { .. })
        ));
    }
}
