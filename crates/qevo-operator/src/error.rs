//! Error types for the operator crate.

use thiserror::Error;

/// Errors produced by operator construction and dense linear algebra.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OperatorError {
    /// Matrix is not square.
    #[error("Matrix must be square, got {rows}×{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Dimension is not a power of two (or is 1).
    #[error("Dimension {0} is not 2^n for n ≥ 1")]
    NotPowerOfTwo(usize),

    /// Matrix is not Hermitian within tolerance.
    #[error("Matrix is not Hermitian: max |H_ij - conj(H_ji)| = {max_deviation:e}")]
    NotHermitian {
        /// Largest deviation from Hermiticity.
        max_deviation: f64,
    },

    /// Vector or matrix dimensions disagree.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// A state vector has zero (or non-finite) norm.
    #[error("State vector has zero or non-finite norm")]
    ZeroNorm,

    /// Linear solve hit a zero pivot.
    #[error("Matrix is singular to working precision")]
    SingularMatrix,

    /// Jacobi eigenvalue iteration did not converge.
    #[error("Eigen-decomposition did not converge after {sweeps} sweeps")]
    NoConvergence {
        /// Number of sweeps performed.
        sweeps: usize,
    },
}

/// Result type for operator operations.
pub type OperatorResult<T> = Result<T, OperatorError>;
