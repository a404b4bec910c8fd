//! Statevector helpers.

use num_complex::Complex64;

use crate::error::{OperatorError, OperatorResult};

/// Euclidean norm `‖ψ‖`.
pub fn norm(state: &[Complex64]) -> f64 {
    state.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt()
}

/// Return `ψ / ‖ψ‖`.
pub fn normalize(state: &[Complex64]) -> OperatorResult<Vec<Complex64>> {
    let n = norm(state);
    if n == 0.0 || !n.is_finite() {
        return Err(OperatorError::ZeroNorm);
    }
    Ok(state.iter().map(|z| z / n).collect())
}

/// Inner product `⟨a|b⟩ = Σ conj(aᵢ)·bᵢ`.
pub fn inner_product(a: &[Complex64], b: &[Complex64]) -> OperatorResult<Complex64> {
    check_same_len(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x.conj() * y).sum())
}

/// Largest element-wise distance `maxᵢ |aᵢ − bᵢ|`.
pub fn max_deviation(a: &[Complex64], b: &[Complex64]) -> OperatorResult<f64> {
    check_same_len(a, b)?;
    Ok(a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max))
}

/// Number of qubits `n` for a length-`2^n` vector, `None` otherwise.
pub fn num_qubits_for_len(len: usize) -> Option<u32> {
    (len >= 2 && len.is_power_of_two()).then(|| len.trailing_zeros())
}

pub(crate) fn check_same_len(a: &[Complex64], b: &[Complex64]) -> OperatorResult<()> {
    if a.len() == b.len() {
        Ok(())
    } else {
        Err(OperatorError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        })
    }
}
