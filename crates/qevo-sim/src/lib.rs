//! `qevo-sim`: Hamiltonian time-evolution circuit synthesis.
//!
//! Converts a sum-of-Paulis Hamiltonian into a `qevo_ir::Circuit` that
//! approximates `exp(-i H t)` with Trotter or recursive Suzuki product
//! formulas, and builds preparation circuits for arbitrary initial states.
//!
//! Dense operators from `qevo-operator` are brought into Pauli form with
//! [`Hamiltonian::from_operator`].
//!
//! # Quick start
//!
//! ```rust
//! use qevo_sim::expansion::{EvolutionSynthesis, ExpansionMode};
//! use qevo_sim::hamiltonian::{Hamiltonian, HamiltonianTerm};
//!
//! // Transverse-field Ising model: H = -J·ZZ - h·X
//! let h = Hamiltonian::from_terms(vec![
//!     HamiltonianTerm::zz(0, 1, -1.0),
//!     HamiltonianTerm::x(0, -0.5),
//!     HamiltonianTerm::x(1, -0.5),
//! ]);
//!
//! let circuit = EvolutionSynthesis::new(h, 1.0)
//!     .with_mode(ExpansionMode::Suzuki)
//!     .with_order(2)
//!     .with_time_slices(4)
//!     .circuit()
//!     .unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! ```

pub mod error;
pub mod expansion;
pub mod hamiltonian;
pub mod state_prep;
pub mod synthesis;

pub use error::{SimError, SimResult};
pub use expansion::{EvolutionSynthesis, ExpansionMode, SliceStep};
pub use hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};
pub use state_prep::{Amplitudes, InitialState};
