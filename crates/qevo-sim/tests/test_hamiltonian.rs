//! Tests for Hamiltonian construction and Pauli decomposition.

use ndarray::array;
use num_complex::Complex64;
use qevo_operator::MatrixOperator;
use qevo_operator::random::random_symmetric;
use qevo_sim::hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

// ---------------------------------------------------------------------------
// PauliString
// ---------------------------------------------------------------------------

#[test]
fn identity_ops_are_dropped_and_sorted() {
    let p = PauliString::from_ops([(2, PauliOp::Z), (0, PauliOp::I), (1, PauliOp::X)]);
    assert_eq!(p.ops(), &[(1, PauliOp::X), (2, PauliOp::Z)]);
    assert_eq!(p.max_qubit(), Some(2));
    assert_eq!(p.label(3), "ZXI");
}

#[test]
fn flip_mask_and_phase() {
    let p = PauliString::from_ops([(0, PauliOp::Y), (1, PauliOp::Z)]);
    assert_eq!(p.flip_mask(), 0b01);
    // Y|0⟩ = i|1⟩, Z|1⟩ = -|1⟩
    assert_eq!(p.phase(0b10), c(0.0, -1.0));
    assert_eq!(p.phase(0b00), c(0.0, 1.0));
}

// ---------------------------------------------------------------------------
// Decomposition
// ---------------------------------------------------------------------------

#[test]
fn decomposes_single_qubit_paulis() {
    // H = 0.5·I + 0.25·X − 0.75·Y + 2·Z
    let m = array![
        [c(2.5, 0.0), c(0.25, 0.75)],
        [c(0.25, -0.75), c(-1.5, 0.0)]
    ];
    let op = MatrixOperator::from_matrix(m).unwrap();
    let h = Hamiltonian::from_operator(&op);

    assert_eq!(h.n_terms(), 4);
    let coeff = |target: PauliOp| {
        h.terms()
            .iter()
            .find(|t| t.pauli.ops().first().map(|(_, op)| *op) == Some(target))
            .map(|t| t.coeff)
            .unwrap()
    };
    assert!((h.identity_coefficient() - 0.5).abs() < 1e-14);
    assert!((coeff(PauliOp::X) - 0.25).abs() < 1e-14);
    assert!((coeff(PauliOp::Y) + 0.75).abs() < 1e-14);
    assert!((coeff(PauliOp::Z) - 2.0).abs() < 1e-14);
}

#[test]
fn qubit_zero_is_least_significant_bit() {
    // Z on qubit 0 is diag(1, -1, 1, -1) in the 2-qubit basis.
    let h = Hamiltonian::from_terms(vec![HamiltonianTerm::z(0, 1.0)]);
    let m = h.to_matrix(2);
    let diag: Vec<f64> = (0..4).map(|k| m[[k, k]].re).collect();
    assert_eq!(diag, vec![1.0, -1.0, 1.0, -1.0]);
}

#[test]
fn decomposition_reconstructs_random_operator() {
    let mut rng = StdRng::seed_from_u64(2024);
    for n in 1..=3 {
        let op = MatrixOperator::from_real(&random_symmetric(n, &mut rng)).unwrap();
        let h = Hamiltonian::from_operator(&op);
        let rebuilt = h.to_matrix(n);
        for (a, b) in rebuilt.iter().zip(op.matrix().iter()) {
            assert!((a - b).norm() < 1e-12);
        }
    }
}

#[test]
fn real_symmetric_operator_has_even_y_count() {
    // Terms with an odd number of Y factors are imaginary-antisymmetric and vanish.
    let mut rng = StdRng::seed_from_u64(5);
    let op = MatrixOperator::from_real(&random_symmetric(2, &mut rng)).unwrap();
    let h = Hamiltonian::from_operator(&op);
    for term in h.terms() {
        let ys = term
            .pauli
            .ops()
            .iter()
            .filter(|(_, op)| *op == PauliOp::Y)
            .count();
        assert_eq!(ys % 2, 0);
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

#[test]
fn lambda_and_min_qubits() {
    let h = Hamiltonian::from_terms(vec![
        HamiltonianTerm::zz(0, 3, -1.5),
        HamiltonianTerm::x(1, 0.5),
        HamiltonianTerm::new(2.0, PauliString::identity()),
    ]);
    assert!((h.lambda() - 4.0).abs() < 1e-15);
    assert_eq!(h.min_qubits(), 4);
    assert!((h.identity_coefficient() - 2.0).abs() < 1e-15);
}

#[test]
fn from_iterator_collects_terms() {
    let h: Hamiltonian = (0..3).map(|q| HamiltonianTerm::y(q, 0.1)).collect();
    assert_eq!(h.n_terms(), 3);
}
