//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced by Hamiltonian time-evolution synthesis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Hamiltonian contains no terms.
    #[error("Hamiltonian is empty, no terms to synthesise")]
    EmptyHamiltonian,

    /// A Pauli string references a qubit index that is out of range.
    #[error("Pauli string references qubit {qubit} but circuit only has {n_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: u32,
        /// Number of qubits in the target circuit.
        n_qubits: u32,
    },

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qevo_ir::IrError),

    /// Operator numerics returned an error.
    #[error("Operator error: {0}")]
    Operator(#[from] qevo_operator::OperatorError),

    /// time_slices must be ≥ 1.
    #[error("time_slices must be at least 1, got {0}")]
    InvalidSlices(usize),

    /// Suzuki expansion order must be ≥ 1.
    #[error("expansion order must be at least 1, got {0}")]
    InvalidOrder(u32),

    /// Amplitude vector length is not 2^n with n ≥ 1.
    #[error("state vector length {0} is not 2^n for n ≥ 1")]
    InvalidStateLength(usize),
}

/// Result type for simulation synthesis operations.
pub type SimResult<T> = Result<T, SimError>;
