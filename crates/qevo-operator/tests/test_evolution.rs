//! Tests for the two evolution routes of `MatrixOperator`.

use ndarray::Array2;
use num_complex::Complex64;
use qevo_operator::random::{random_amplitudes, random_symmetric};
use qevo_operator::state::{max_deviation, norm, normalize};
use qevo_operator::{MatrixOperator, OperatorError, state_fidelity};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn random_problem(num_qubits: u32, seed: u64) -> (MatrixOperator, Vec<Complex64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let h = random_symmetric(num_qubits, &mut rng);
    let psi = normalize(&random_amplitudes(num_qubits, &mut rng)).unwrap();
    (MatrixOperator::from_real(&h).unwrap(), psi)
}

#[test]
fn test_routes_agree_on_random_problems() {
    for (n, seed) in [(1, 1), (2, 42), (3, 7), (4, 1234)] {
        let (op, psi) = random_problem(n, seed);
        let exact = op.evolve_exact(&psi, 1.0).unwrap();
        let spectral = op.evolve(&psi, 1.0).unwrap();
        let dev = max_deviation(&exact, &spectral).unwrap();
        assert!(dev < 1e-9, "n={n}: deviation {dev:e}");
    }
}

#[test]
fn test_evolution_preserves_norm() {
    let (op, psi) = random_problem(3, 99);
    let out = op.evolve_exact(&psi, 5.0).unwrap();
    assert!((norm(&out) - 1.0).abs() < 1e-10);
}

#[test]
fn test_evolution_composes_in_time() {
    let (op, psi) = random_problem(2, 5);
    let half = op.evolve(&psi, 0.4).unwrap();
    let twice = op.evolve(&half, 0.4).unwrap();
    let once = op.evolve(&psi, 0.8).unwrap();
    assert!(max_deviation(&twice, &once).unwrap() < 1e-10);
}

#[test]
fn test_zero_time_is_identity() {
    let (op, psi) = random_problem(2, 3);
    let out = op.evolve_exact(&psi, 0.0).unwrap();
    assert!((state_fidelity(&psi, &out).unwrap() - 1.0).abs() < 1e-14);
}

#[test]
fn test_eigenstate_only_acquires_phase() {
    // diag(1, 2, 3, 4): |2⟩ picks up exp(-3it).
    let mut h = Array2::<f64>::zeros((4, 4));
    for k in 0..4 {
        h[[k, k]] = (k + 1) as f64;
    }
    let op = MatrixOperator::from_real(&h).unwrap();
    let mut psi = vec![Complex64::new(0.0, 0.0); 4];
    psi[2] = Complex64::new(1.0, 0.0);

    let t = 0.5;
    let out = op.evolve(&psi, t).unwrap();
    let expected = Complex64::from_polar(1.0, -3.0 * t);
    assert!((out[2] - expected).norm() < 1e-12);
    assert_eq!(op.eigenvalues().unwrap().len(), 4);
}

#[test]
fn test_complex_hermitian_operator() {
    let i = Complex64::i();
    let one = Complex64::new(1.0, 0.0);
    let zero = Complex64::new(0.0, 0.0);
    let h = ndarray::array![
        [one, i, zero, zero],
        [-i, -one, one, zero],
        [zero, one, 2.0 * one, -i],
        [zero, zero, i, zero]
    ];
    let op = MatrixOperator::from_matrix(h).unwrap();
    let psi = normalize(&[one, i, -one, 0.5 * one]).unwrap();
    let exact = op.evolve_exact(&psi, 1.3).unwrap();
    let spectral = op.evolve(&psi, 1.3).unwrap();
    assert!(max_deviation(&exact, &spectral).unwrap() < 1e-10);
}

#[test]
fn test_rejects_non_square() {
    let m = Array2::<f64>::zeros((2, 4));
    assert!(matches!(
        MatrixOperator::from_real(&m),
        Err(OperatorError::NotSquare { rows: 2, cols: 4 })
    ));
}
