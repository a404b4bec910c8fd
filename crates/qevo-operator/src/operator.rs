//! Hermitian matrix operator and its time evolution.

use ndarray::{Array1, Array2, s};
use num_complex::Complex64;
use tracing::debug;

use crate::eigen::{SymmetricEigen, symmetric_eigen};
use crate::error::{OperatorError, OperatorResult};
use crate::expm::expm;

/// Relative tolerance for the Hermiticity check.
const HERMITIAN_TOLERANCE: f64 = 1e-10;

/// A dense Hermitian operator on `n` qubits.
///
/// Basis index `k` encodes qubit `q` in bit `q` of `k`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixOperator {
    matrix: Array2<Complex64>,
    num_qubits: u32,
}

impl MatrixOperator {
    /// Wrap a complex matrix, validating shape and Hermiticity.
    pub fn from_matrix(matrix: Array2<Complex64>) -> OperatorResult<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(OperatorError::NotSquare { rows, cols });
        }
        if rows < 2 || !rows.is_power_of_two() {
            return Err(OperatorError::NotPowerOfTwo(rows));
        }

        let scale = matrix.iter().map(|z| z.norm()).fold(1.0, f64::max);
        let mut max_deviation: f64 = 0.0;
        for i in 0..rows {
            for j in i..cols {
                let d = (matrix[[i, j]] - matrix[[j, i]].conj()).norm();
                max_deviation = max_deviation.max(d);
            }
        }
        if max_deviation > HERMITIAN_TOLERANCE * scale {
            return Err(OperatorError::NotHermitian { max_deviation });
        }

        Ok(Self {
            num_qubits: rows.trailing_zeros(),
            matrix,
        })
    }

    /// Wrap a real symmetric matrix.
    pub fn from_real(matrix: &Array2<f64>) -> OperatorResult<Self> {
        Self::from_matrix(matrix.mapv(|x| Complex64::new(x, 0.0)))
    }

    pub fn matrix(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    /// Dimension `2^n`.
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// `H·ψ`.
    pub fn apply(&self, state: &[Complex64]) -> OperatorResult<Vec<Complex64>> {
        self.check_state(state)?;
        let psi = Array1::from_vec(state.to_vec());
        Ok(self.matrix.dot(&psi).to_vec())
    }

    /// The propagator `exp(-i·t·H)`.
    pub fn unitary(&self, time: f64) -> OperatorResult<Array2<Complex64>> {
        let generator = self.matrix.mapv(|z| z * Complex64::new(0.0, -time));
        expm(&generator)
    }

    /// `exp(-i·t·H)·ψ` by direct matrix exponentiation.
    pub fn evolve_exact(&self, state: &[Complex64], time: f64) -> OperatorResult<Vec<Complex64>> {
        self.check_state(state)?;
        let u = self.unitary(time)?;
        let psi = Array1::from_vec(state.to_vec());
        Ok(u.dot(&psi).to_vec())
    }

    /// `exp(-i·t·H)·ψ` through the spectral decomposition of the real
    /// embedding `M = [[Re H, −Im H], [Im H, Re H]]`.
    ///
    /// With `ψ = u + iv` and `x = [u; v]`, `M` represents `H`, so
    /// `exp(-iHt)ψ = cos(Ht)ψ − i·sin(Ht)ψ` maps to
    /// `[c_u + s_v; c_v − s_u]` where `c = cos(Mt)x` and `s = sin(Mt)x`.
    pub fn evolve(&self, state: &[Complex64], time: f64) -> OperatorResult<Vec<Complex64>> {
        self.check_state(state)?;
        let d = self.dim();
        let eig = self.embedding_eigen()?;

        let mut x = Array1::<f64>::zeros(2 * d);
        for (k, z) in state.iter().enumerate() {
            x[k] = z.re;
            x[d + k] = z.im;
        }

        let c = eig.apply_fn(&x, |lambda| (lambda * time).cos());
        let s = eig.apply_fn(&x, |lambda| (lambda * time).sin());

        let evolved = (0..d)
            .map(|k| Complex64::new(c[k] + s[d + k], c[d + k] - s[k]))
            .collect();
        Ok(evolved)
    }

    /// Eigenvalues of `H` in ascending order.
    pub fn eigenvalues(&self) -> OperatorResult<Vec<f64>> {
        // Each eigenvalue of H appears twice in the embedding spectrum.
        let eig = self.embedding_eigen()?;
        Ok(eig.eigenvalues.iter().step_by(2).copied().collect())
    }

    fn embedding_eigen(&self) -> OperatorResult<SymmetricEigen> {
        let d = self.dim();
        let re = self.matrix.mapv(|z| z.re);
        let im = self.matrix.mapv(|z| z.im);

        let mut m = Array2::<f64>::zeros((2 * d, 2 * d));
        m.slice_mut(s![..d, ..d]).assign(&re);
        m.slice_mut(s![..d, d..]).assign(&im.mapv(|x| -x));
        m.slice_mut(s![d.., ..d]).assign(&im);
        m.slice_mut(s![d.., d..]).assign(&re);

        let eig = symmetric_eigen(&m)?;
        debug!(dim = d, "spectral decomposition of real embedding");
        Ok(eig)
    }

    fn check_state(&self, state: &[Complex64]) -> OperatorResult<()> {
        if state.len() == self.dim() {
            Ok(())
        } else {
            Err(OperatorError::DimensionMismatch {
                expected: self.dim(),
                got: state.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn pauli_y() -> Array2<Complex64> {
        array![[c(0.0, 0.0), c(0.0, -1.0)], [c(0.0, 1.0), c(0.0, 0.0)]]
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        let m = Array2::<Complex64>::eye(3);
        assert!(matches!(
            MatrixOperator::from_matrix(m),
            Err(OperatorError::NotPowerOfTwo(3))
        ));
        let one = Array2::<Complex64>::eye(1);
        assert!(matches!(
            MatrixOperator::from_matrix(one),
            Err(OperatorError::NotPowerOfTwo(1))
        ));
    }

    #[test]
    fn test_rejects_non_hermitian() {
        let m = array![[c(0.0, 0.0), c(1.0, 0.0)], [c(0.0, 0.0), c(0.0, 0.0)]];
        assert!(matches!(
            MatrixOperator::from_matrix(m),
            Err(OperatorError::NotHermitian { .. })
        ));
    }

    #[test]
    fn test_num_qubits() {
        let op = MatrixOperator::from_matrix(Array2::eye(8)).unwrap();
        assert_eq!(op.num_qubits(), 3);
        assert_eq!(op.dim(), 8);
    }

    #[test]
    fn test_evolve_matches_exact_for_complex_hermitian() {
        let op = MatrixOperator::from_matrix(pauli_y()).unwrap();
        let psi = vec![c(0.6, 0.0), c(0.0, 0.8)];
        let t = 0.7;
        let exact = op.evolve_exact(&psi, t).unwrap();
        let spectral = op.evolve(&psi, t).unwrap();
        for (a, b) in exact.iter().zip(&spectral) {
            assert!((a - b).norm() < 1e-12, "{a} vs {b}");
        }
    }

    #[test]
    fn test_evolve_y_rotation_closed_form() {
        // exp(-iθY)|0⟩ = cos θ|0⟩ + sin θ|1⟩
        let op = MatrixOperator::from_matrix(pauli_y()).unwrap();
        let theta: f64 = 0.3;
        let out = op.evolve(&[c(1.0, 0.0), c(0.0, 0.0)], theta).unwrap();
        assert!((out[0] - c(theta.cos(), 0.0)).norm() < 1e-12);
        assert!((out[1] - c(theta.sin(), 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_eigenvalues_of_pauli_y() {
        let op = MatrixOperator::from_matrix(pauli_y()).unwrap();
        let ev = op.eigenvalues().unwrap();
        assert_eq!(ev.len(), 2);
        assert!((ev[0] + 1.0).abs() < 1e-12);
        assert!((ev[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unitary_is_unitary() {
        let h = array![[1.0, 0.5], [0.5, -0.25]];
        let op = MatrixOperator::from_real(&h).unwrap();
        let u = op.unitary(2.0).unwrap();
        let udu = u.t().mapv(|z| z.conj()).dot(&u);
        for ((i, j), z) in udu.indexed_iter() {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert!((z - c(expected, 0.0)).norm() < 1e-12);
        }
    }

    #[test]
    fn test_state_length_mismatch() {
        let op = MatrixOperator::from_matrix(Array2::eye(4)).unwrap();
        let psi = vec![c(1.0, 0.0), c(0.0, 0.0)];
        assert!(matches!(
            op.evolve(&psi, 1.0),
            Err(OperatorError::DimensionMismatch {
                expected: 4,
                got: 2
            })
        ));
    }
}
