//! State fidelity between pure states.

use num_complex::Complex64;

use crate::error::{OperatorError, OperatorResult};
use crate::state::{check_same_len, inner_product};

/// Fidelity `|⟨a|b⟩|² / (‖a‖²·‖b‖²)` of two pure states.
///
/// Inputs need not be normalised. The result is clamped to `[0, 1]` to absorb
/// rounding. Vectors of different length are an upstream construction error
/// and are reported as [`OperatorError::DimensionMismatch`].
pub fn state_fidelity(a: &[Complex64], b: &[Complex64]) -> OperatorResult<f64> {
    check_same_len(a, b)?;

    let norm_a: f64 = a.iter().map(Complex64::norm_sqr).sum();
    let norm_b: f64 = b.iter().map(Complex64::norm_sqr).sum();
    let denom = norm_a * norm_b;
    if denom == 0.0 || !denom.is_finite() {
        return Err(OperatorError::ZeroNorm);
    }

    let overlap = inner_product(a, b)?.norm_sqr();
    Ok((overlap / denom).clamp(0.0, 1.0))
}
