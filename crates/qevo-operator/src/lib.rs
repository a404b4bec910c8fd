//! Dense operator numerics for Hamiltonian time evolution.
//!
//! This crate provides the reference side of an evolution experiment:
//!
//! - [`MatrixOperator`]: a validated Hermitian matrix on `n` qubits with
//!   exact evolution via [`expm`] and an independent spectral route
//! - [`expm()`]: Padé-13 scaling-and-squaring matrix exponential
//! - [`state_fidelity`]: overlap between two pure states
//! - [`random`]: random symmetric Hamiltonians and initial amplitudes
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use num_complex::Complex64;
//! use qevo_operator::{MatrixOperator, state_fidelity};
//!
//! let h = MatrixOperator::from_real(&array![[1.0, 0.5], [0.5, -1.0]]).unwrap();
//! let psi = vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)];
//!
//! let exact = h.evolve_exact(&psi, 1.0).unwrap();
//! let spectral = h.evolve(&psi, 1.0).unwrap();
//! assert!(state_fidelity(&exact, &spectral).unwrap() > 1.0 - 1e-12);
//! ```

pub mod eigen;
pub mod error;
pub mod expm;
pub mod fidelity;
pub mod operator;
pub mod random;
pub mod state;

pub use eigen::{SymmetricEigen, symmetric_eigen};
pub use error::{OperatorError, OperatorResult};
pub use expm::expm;
pub use fidelity::state_fidelity;
pub use operator::MatrixOperator;
