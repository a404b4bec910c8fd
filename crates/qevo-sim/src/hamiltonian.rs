//! Hamiltonian data structures.
//!
//! A Hamiltonian is a sum of weighted Pauli strings:
//!
//!   H = Σ_k  c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators
//! (I, X, Y, Z) and c_k ∈ ℝ.
//!
//! Qubit `q` acts on bit `q` of the basis-state index, so a dense matrix
//! produced by [`Hamiltonian::to_matrix`] (or consumed by
//! [`Hamiltonian::from_operator`]) uses qubit 0 as the least-significant bit.
//!
//! # Example
//!
//! ```rust
//! use qevo_sim::hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};
//!
//! // H = -1.0·Z₀Z₁  +  0.5·X₀
//! let h = Hamiltonian::from_terms(vec![
//!     HamiltonianTerm::new(-1.0, PauliString::from_ops(vec![(0, PauliOp::Z), (1, PauliOp::Z)])),
//!     HamiltonianTerm::new( 0.5, PauliString::from_ops(vec![(0, PauliOp::X)])),
//! ]);
//! assert_eq!(h.n_terms(), 2);
//! ```

use ndarray::Array2;
use num_complex::Complex64;
use qevo_operator::MatrixOperator;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Coefficients at or below this magnitude are dropped by the decomposition.
const COEFF_CUTOFF: f64 = 1e-12;

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity; contributes a global phase and is omitted from synthesis.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    const ALL: [PauliOp; 4] = [PauliOp::I, PauliOp::X, PauliOp::Y, PauliOp::Z];
}

/// A tensor product of Pauli operators on named qubits.
///
/// Stored as a sorted `Vec<(qubit_index, PauliOp)>` with Identity terms
/// omitted.  Qubits not listed are implicitly I.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauliString {
    /// Non-identity terms, sorted by qubit index ascending.
    ops: Vec<(u32, PauliOp)>,
}

impl PauliString {
    /// Construct a PauliString from an iterator of (qubit, op) pairs.
    ///
    /// Identity operators are dropped; the remaining ops are sorted by qubit.
    pub fn from_ops(ops: impl IntoIterator<Item = (u32, PauliOp)>) -> Self {
        let mut v: Vec<(u32, PauliOp)> = ops
            .into_iter()
            .filter(|(_, op)| *op != PauliOp::I)
            .collect();
        v.sort_by_key(|(q, _)| *q);
        Self { ops: v }
    }

    /// The all-identity string.
    pub fn identity() -> Self {
        Self { ops: Vec::new() }
    }

    /// Return the non-identity (qubit, op) pairs, sorted by qubit index.
    pub fn ops(&self) -> &[(u32, PauliOp)] {
        &self.ops
    }

    /// True if there are no non-identity operators (pure global phase).
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// The highest qubit index referenced, or `None` for an identity string.
    pub fn max_qubit(&self) -> Option<u32> {
        self.ops.last().map(|(q, _)| *q)
    }

    /// Bits flipped by the string: set for every X or Y factor.
    pub fn flip_mask(&self) -> usize {
        self.ops
            .iter()
            .filter(|(_, op)| matches!(op, PauliOp::X | PauliOp::Y))
            .fold(0, |mask, (q, _)| mask | (1usize << q))
    }

    /// Phase picked up by basis state `|y⟩`: `P|y⟩ = phase · |y ⊕ flip_mask⟩`.
    pub fn phase(&self, basis: usize) -> Complex64 {
        let mut phase = Complex64::new(1.0, 0.0);
        for &(q, op) in &self.ops {
            let bit = (basis >> q) & 1;
            match (op, bit) {
                (PauliOp::Y, 0) => phase *= Complex64::i(),
                (PauliOp::Y, _) => phase *= -Complex64::i(),
                (PauliOp::Z, 1) => phase = -phase,
                _ => {}
            }
        }
        phase
    }

    /// Compact label, qubit 0 rightmost (e.g. `XIZ` for Z₀X₂ on 3 qubits).
    pub fn label(&self, n_qubits: u32) -> String {
        (0..n_qubits)
            .rev()
            .map(|q| {
                match self.ops.iter().find(|(qq, _)| *qq == q).map(|(_, op)| *op) {
                    Some(PauliOp::X) => 'X',
                    Some(PauliOp::Y) => 'Y',
                    Some(PauliOp::Z) => 'Z',
                    Some(PauliOp::I) | None => 'I',
                }
            })
            .collect()
    }
}

/// A single weighted Pauli term: `coeff · pauli`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HamiltonianTerm {
    /// Real coefficient.
    pub coeff: f64,
    /// The Pauli string.
    pub pauli: PauliString,
}

impl HamiltonianTerm {
    /// Create a new term.
    pub fn new(coeff: f64, pauli: PauliString) -> Self {
        Self { coeff, pauli }
    }

    /// Shorthand: single-qubit Z term.
    pub fn z(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::Z)]))
    }

    /// Shorthand: ZZ coupling term.
    pub fn zz(q0: u32, q1: u32, coeff: f64) -> Self {
        Self::new(
            coeff,
            PauliString::from_ops([(q0, PauliOp::Z), (q1, PauliOp::Z)]),
        )
    }

    /// Shorthand: single-qubit X term.
    pub fn x(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::X)]))
    }

    /// Shorthand: single-qubit Y term.
    pub fn y(qubit: u32, coeff: f64) -> Self {
        Self::new(coeff, PauliString::from_ops([(qubit, PauliOp::Y)]))
    }
}

/// A sum-of-Pauli-strings Hamiltonian.
///
/// H = Σ_k  c_k · P_k
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hamiltonian {
    terms: Vec<HamiltonianTerm>,
}

impl Hamiltonian {
    /// Create from a list of terms.
    pub fn from_terms(terms: Vec<HamiltonianTerm>) -> Self {
        Self { terms }
    }

    /// Decompose a dense Hermitian operator in the Pauli basis.
    ///
    /// `c_P = Re Tr(P·H) / 2ⁿ` for each of the `4ⁿ` strings; terms with
    /// `|c_P| ≤ 1e-12` are dropped. The identity term is kept.
    pub fn from_operator(op: &MatrixOperator) -> Self {
        let n = op.num_qubits();
        let dim = op.dim();
        let h = op.matrix();

        let mut terms = Vec::new();
        for code in 0..(1usize << (2 * n)) {
            let pauli = PauliString::from_ops(
                (0..n).map(|q| (q, PauliOp::ALL[(code >> (2 * q)) & 3])),
            );
            let flip = pauli.flip_mask();
            let trace: Complex64 = (0..dim).map(|y| pauli.phase(y) * h[[y, y ^ flip]]).sum();
            let coeff = trace.re / dim as f64;
            if coeff.abs() > COEFF_CUTOFF {
                terms.push(HamiltonianTerm::new(coeff, pauli));
            }
        }

        debug!(
            n_qubits = n,
            n_terms = terms.len(),
            "decomposed operator into Pauli basis"
        );
        Self { terms }
    }

    /// Dense `2ⁿ × 2ⁿ` matrix of the Hamiltonian.
    pub fn to_matrix(&self, n_qubits: u32) -> Array2<Complex64> {
        let dim = 1usize << n_qubits;
        let mut m = Array2::<Complex64>::zeros((dim, dim));
        for term in &self.terms {
            let flip = term.pauli.flip_mask();
            for y in 0..dim {
                m[[y ^ flip, y]] += term.pauli.phase(y) * term.coeff;
            }
        }
        m
    }

    /// All terms.
    pub fn terms(&self) -> &[HamiltonianTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// Coefficient of the identity string (global energy offset).
    pub fn identity_coefficient(&self) -> f64 {
        self.terms
            .iter()
            .filter(|t| t.pauli.is_identity())
            .map(|t| t.coeff)
            .sum()
    }

    /// Spectral norm upper bound: Σ |c_k|.
    pub fn lambda(&self) -> f64 {
        self.terms.iter().map(|t| t.coeff.abs()).sum()
    }

    /// The minimum number of qubits required to represent this Hamiltonian.
    ///
    /// Returns 0 if the Hamiltonian is empty or purely identity.
    pub fn min_qubits(&self) -> u32 {
        self.terms
            .iter()
            .filter_map(|t| t.pauli.max_qubit())
            .max()
            .map_or(0, |q| q + 1)
    }
}

impl FromIterator<HamiltonianTerm> for Hamiltonian {
    fn from_iter<T: IntoIterator<Item = HamiltonianTerm>>(iter: T) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}
