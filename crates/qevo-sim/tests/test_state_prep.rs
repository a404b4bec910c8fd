//! Tests for initial-state preparation circuits.

use num_complex::Complex64;
use qevo_adapter_sim::StatevectorSimulator;
use qevo_hal::Backend;
use qevo_operator::state_fidelity;
use qevo_sim::state_prep::InitialState;
use rand::SeedableRng;
use rand::rngs::StdRng;

async fn prepared(state: &InitialState) -> Vec<Complex64> {
    let circuit = state.circuit().unwrap();
    let backend = StatevectorSimulator::new();
    backend.run(&circuit, 0).await.unwrap().statevector.unwrap()
}

#[tokio::test]
async fn random_states_are_prepared_exactly() {
    let mut rng = StdRng::seed_from_u64(17);
    for n in 1..=5 {
        let state = InitialState::random(n, &mut rng).unwrap();
        let out = prepared(&state).await;
        let f = state_fidelity(&state.statevector(), &out).unwrap();
        assert!((f - 1.0).abs() < 1e-10, "n={n}: fidelity {f}");
    }
}

#[tokio::test]
async fn basis_state_is_prepared() {
    let mut amps = vec![Complex64::new(0.0, 0.0); 8];
    amps[5] = Complex64::new(0.0, -1.0);
    let state = InitialState::custom(amps).unwrap();
    let out = prepared(&state).await;
    assert!((out[5].norm() - 1.0).abs() < 1e-12);
}

#[tokio::test]
async fn relative_phases_are_reproduced() {
    // (|00⟩ + i|01⟩ − |10⟩ − i|11⟩) / 2
    let amps = vec![
        Complex64::new(1.0, 0.0),
        Complex64::new(0.0, 1.0),
        Complex64::new(-1.0, 0.0),
        Complex64::new(0.0, -1.0),
    ];
    let state = InitialState::custom(amps).unwrap();
    let out = prepared(&state).await;
    let f = state_fidelity(&state.statevector(), &out).unwrap();
    assert!((f - 1.0).abs() < 1e-12);
}

#[tokio::test]
async fn sparse_state_with_zero_blocks() {
    let mut amps = vec![Complex64::new(0.0, 0.0); 16];
    amps[3] = Complex64::new(0.6, 0.0);
    amps[12] = Complex64::new(0.0, 0.8);
    let state = InitialState::custom(amps).unwrap();
    let out = prepared(&state).await;
    let f = state_fidelity(&state.statevector(), &out).unwrap();
    assert!((f - 1.0).abs() < 1e-12);
}

#[test]
fn random_state_is_normalised_and_seeded() {
    let a = InitialState::random(3, &mut StdRng::seed_from_u64(1)).unwrap();
    let b = InitialState::random(3, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(a, b);
    let norm: f64 = a.statevector().iter().map(Complex64::norm_sqr).sum();
    assert!((norm - 1.0).abs() < 1e-14);
}
