//! Qevo Circuit Intermediate Representation
//!
//! Core data structures for the gate-level circuits that Qevo synthesises
//! from Hamiltonians and hands to execution backends.
//!
//! # Overview
//!
//! Circuits are stored as a DAG (Directed Acyclic Graph) whose edges are
//! qubit wires. The high-level [`Circuit`] API provides a builder for
//! appending gates and for concatenating sub-circuits, which is how a
//! state-preparation circuit and an evolution circuit are joined.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] addresses a wire
//! - **Gates**: [`StandardGate`] with concrete rotation angles
//! - **Instructions**: [`Instruction`] combining a gate with its operands
//! - **DAG**: [`CircuitDag`] for the internal graph representation
//! - **Circuit**: [`Circuit`] high-level builder API
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qevo_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 2);
//! ```
//!
//! # Example: Concatenating Circuits
//!
//! ```rust
//! use qevo_ir::{Circuit, QubitId};
//!
//! let mut prep = Circuit::with_size("prep", 2);
//! prep.ry(0.3, QubitId(1)).unwrap();
//!
//! let mut evolution = Circuit::with_size("evolution", 2);
//! evolution.rz(0.1, QubitId(0)).unwrap();
//!
//! prep.compose(&evolution).unwrap();
//! assert_eq!(prep.num_ops(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg`, `T`, `Tdg` | 1 | Phase gates |
//! | `SX`, `SXdg` | 1 | sqrt(X) gates |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | Rotation and phase gates |
//! | `U` | 1 | Universal single-qubit gate U(θ,φ,λ) |
//! | `CX`, `CY`, `CZ` | 2 | Controlled Paulis |
//! | `Swap` | 2 | SWAP gate |
//! | `CRz`, `CP` | 2 | Controlled rotation / phase |

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::QubitId;
