//! Pauli-string exponentiation.
//!
//! Implements the standard gate synthesis for
//!
//!   exp(-i · coeff · t · P)
//!
//! where P is a tensor product of Pauli operators, using the circuit identity:
//!
//!   exp(-i θ/2 · Z⊗Z⊗...⊗Z) = CNOT_ladder · Rz(θ) · CNOT_ladder†
//!
//! with basis rotations applied before/after to handle X and Y factors:
//!   X → H · Z · H
//!   Y → Sdg · H · Z · H · S
//!   Z → identity
//!
//! Gate count per term: 2·(k-1) CX + 2·k basis gates + 1 Rz,
//! where k = number of non-identity qubits.

use qevo_ir::{Circuit, QubitId};

use crate::error::{SimError, SimResult};
use crate::hamiltonian::{HamiltonianTerm, PauliOp};

/// Append the circuit for `exp(-i · coeff · t · P)` to `circuit`.
///
/// `n_qubits` is the total width of the circuit, used for bounds checking.
/// An identity string is a global phase and appends nothing.
pub fn append_exp_pauli(
    circuit: &mut Circuit,
    term: &HamiltonianTerm,
    t: f64,
    n_qubits: u32,
) -> SimResult<()> {
    let ops = term.pauli.ops();
    let Some(&(last, _)) = ops.last() else {
        return Ok(());
    };

    for &(q, _) in ops {
        if q >= n_qubits {
            return Err(SimError::QubitOutOfRange { qubit: q, n_qubits });
        }
    }

    // Rz(θ) implements exp(-i θ/2 Z)
    let theta = 2.0 * term.coeff * t;
    let qubits: Vec<u32> = ops.iter().map(|(q, _)| *q).collect();

    basis_change(circuit, ops, false)?;
    cnot_ladder(circuit, &qubits, false)?;
    circuit.rz(theta, QubitId(last))?;
    cnot_ladder(circuit, &qubits, true)?;
    basis_change(circuit, ops, true)?;

    Ok(())
}

/// Basis-change gates mapping each factor onto Z (or back, with `undo`).
///
///   X → H           (undo: H)
///   Y → Sdg · H     (undo: H · S)
fn basis_change(circuit: &mut Circuit, ops: &[(u32, PauliOp)], undo: bool) -> SimResult<()> {
    for &(q, op) in ops {
        let qid = QubitId(q);
        match (op, undo) {
            (PauliOp::X, _) => {
                circuit.h(qid)?;
            }
            (PauliOp::Y, false) => {
                circuit.sdg(qid)?;
                circuit.h(qid)?;
            }
            (PauliOp::Y, true) => {
                circuit.h(qid)?;
                circuit.s(qid)?;
            }
            (PauliOp::Z | PauliOp::I, _) => {}
        }
    }
    Ok(())
}

/// CX(q[0],q[1]), CX(q[1],q[2]), …; collects the parity on the last qubit.
/// With `reverse` the same gates are emitted in the opposite order.
fn cnot_ladder(circuit: &mut Circuit, qubits: &[u32], reverse: bool) -> SimResult<()> {
    let mut pairs: Vec<&[u32]> = qubits.windows(2).collect();
    if reverse {
        pairs.reverse();
    }
    for window in pairs {
        circuit.cx(QubitId(window[0]), QubitId(window[1]))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hamiltonian::PauliString;

    #[test]
    fn test_identity_term_is_noop() {
        let mut circuit = Circuit::with_size("t", 2);
        let term = HamiltonianTerm::new(0.7, PauliString::identity());
        append_exp_pauli(&mut circuit, &term, 1.0, 2).unwrap();
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_gate_count_for_xyz() {
        let mut circuit = Circuit::with_size("t", 3);
        let term = HamiltonianTerm::new(
            1.0,
            PauliString::from_ops([(0, PauliOp::X), (1, PauliOp::Y), (2, PauliOp::Z)]),
        );
        append_exp_pauli(&mut circuit, &term, 0.5, 3).unwrap();
        let counts = circuit.count_ops();
        assert_eq!(counts.get("cx"), Some(&4));
        assert_eq!(counts.get("rz"), Some(&1));
        assert_eq!(counts.get("h"), Some(&4));
        assert_eq!(counts.get("sdg"), Some(&1));
        assert_eq!(counts.get("s"), Some(&1));
    }

    #[test]
    fn test_out_of_range_qubit() {
        let mut circuit = Circuit::with_size("t", 2);
        let term = HamiltonianTerm::z(5, 1.0);
        assert!(matches!(
            append_exp_pauli(&mut circuit, &term, 1.0, 2),
            Err(SimError::QubitOutOfRange {
                qubit: 5,
                n_qubits: 2
            })
        ));
    }
}
