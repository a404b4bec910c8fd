//! Initial states and their preparation circuits.
//!
//! Arbitrary states are prepared from `|0…0⟩` with uniformly controlled
//! rotations (Möttönen et al., "Transformation of quantum states using
//! uniformly controlled rotations", QIC 5, 2005):
//!
//! 1. Magnitudes, most-significant qubit first: `Ry` on qubit `j`
//!    multiplexed over the already-prepared qubits `j+1..n`.
//! 2. Phases, least-significant qubit first: `Rz` on qubit `j` multiplexed
//!    over qubits `j+1..n`, halving the phase vector at each stage.
//!
//! The leftover scalar phase is global and is not emitted, so the circuit
//! reproduces the state up to a global phase.

use num_complex::Complex64;
use qevo_ir::{Circuit, QubitId};
use qevo_operator::random::random_amplitudes;
use qevo_operator::state::{normalize, num_qubits_for_len};
use rand::Rng;
use tracing::debug;

use crate::error::{SimError, SimResult};

/// Rotations below this magnitude are not emitted.
const ANGLE_EPS: f64 = 1e-14;

/// A normalised amplitude vector of length `2^n`.
///
/// Only [`InitialState::custom`] and [`InitialState::random`] build one, so
/// the length always matches the qubit count.
#[derive(Debug, Clone, PartialEq)]
pub struct Amplitudes {
    num_qubits: u32,
    amplitudes: Vec<Complex64>,
}

impl Amplitudes {
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    pub fn as_slice(&self) -> &[Complex64] {
        &self.amplitudes
    }
}

/// An initial state for an evolution circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum InitialState {
    /// `|0…0⟩` on `n` qubits.
    Zero(u32),
    /// A normalised arbitrary state.
    Custom(Amplitudes),
}

impl InitialState {
    /// Validate and normalise an amplitude vector of length `2^n`.
    pub fn custom(amplitudes: Vec<Complex64>) -> SimResult<Self> {
        let num_qubits = num_qubits_for_len(amplitudes.len())
            .ok_or(SimError::InvalidStateLength(amplitudes.len()))?;
        let amplitudes = normalize(&amplitudes)?;
        Ok(InitialState::Custom(Amplitudes {
            num_qubits,
            amplitudes,
        }))
    }

    /// A random state with amplitude components uniform in `[-1, 1)` before
    /// normalisation.
    pub fn random<R: Rng + ?Sized>(num_qubits: u32, rng: &mut R) -> SimResult<Self> {
        Self::custom(random_amplitudes(num_qubits, rng))
    }

    pub fn num_qubits(&self) -> u32 {
        match self {
            InitialState::Zero(n) => *n,
            InitialState::Custom(state) => state.num_qubits,
        }
    }

    /// The normalised statevector.
    pub fn statevector(&self) -> Vec<Complex64> {
        match self {
            InitialState::Zero(n) => {
                let mut v = vec![Complex64::new(0.0, 0.0); 1usize << n];
                v[0] = Complex64::new(1.0, 0.0);
                v
            }
            InitialState::Custom(state) => state.amplitudes.clone(),
        }
    }

    /// Circuit preparing this state from `|0…0⟩`.
    pub fn circuit(&self) -> SimResult<Circuit> {
        let n = self.num_qubits();
        let mut circuit = Circuit::with_size("initial_state", n);
        let InitialState::Custom(state) = self else {
            return Ok(circuit);
        };
        let amplitudes = &state.amplitudes;

        let magnitudes: Vec<f64> = amplitudes.iter().map(|z| z.norm()).collect();
        for target in (0..n).rev() {
            let angles = magnitude_angles(&magnitudes, target);
            uniformly_controlled(&mut circuit, Axis::Y, target, n, &angles)?;
        }

        let mut phases: Vec<f64> = amplitudes.iter().map(|z| z.arg()).collect();
        for target in 0..n {
            let (angles, rest) = phase_angles(&phases);
            uniformly_controlled(&mut circuit, Axis::Z, target, n, &angles)?;
            phases = rest;
        }

        debug!(
            n_qubits = n,
            n_ops = circuit.num_ops(),
            depth = circuit.depth(),
            "built state preparation circuit"
        );
        Ok(circuit)
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Y,
    Z,
}

/// `Ry` angles for `target`, one per pattern `b` of the qubits above it.
fn magnitude_angles(magnitudes: &[f64], target: u32) -> Vec<f64> {
    let n_patterns = magnitudes.len() >> (target + 1);
    let block = 1usize << target;
    (0..n_patterns)
        .map(|b| {
            let base = b << (target + 1);
            let norm_of = |offset: usize| {
                magnitudes[base + offset..base + offset + block]
                    .iter()
                    .map(|m| m * m)
                    .sum::<f64>()
                    .sqrt()
            };
            2.0 * norm_of(block).atan2(norm_of(0))
        })
        .collect()
}

/// Split `φ` into `Rz` angles `φ[2c+1] − φ[2c]` and the residual phases
/// `(φ[2c] + φ[2c+1]) / 2`.
fn phase_angles(phases: &[f64]) -> (Vec<f64>, Vec<f64>) {
    phases
        .chunks_exact(2)
        .map(|pair| (pair[1] - pair[0], (pair[0] + pair[1]) / 2.0))
        .unzip()
}

/// Multiplexed rotation on `target`, controlled by qubits `target+1..n`.
///
/// `alphas[b]` is the angle applied when the controls read `b` (bit `m` of
/// `b` is qubit `target+1+m`). Decomposed into `2^k` rotations interleaved
/// with CX gates whose controls follow a Gray code.
fn uniformly_controlled(
    circuit: &mut Circuit,
    axis: Axis,
    target: u32,
    n_qubits: u32,
    alphas: &[f64],
) -> SimResult<()> {
    if alphas.iter().all(|a| a.abs() < ANGLE_EPS) {
        return Ok(());
    }

    let controls: Vec<u32> = (target + 1..n_qubits).collect();
    let n = alphas.len();
    let gray = |i: usize| i ^ (i >> 1);

    let thetas: Vec<f64> = (0..n)
        .map(|i| {
            let g = gray(i);
            alphas
                .iter()
                .enumerate()
                .map(|(b, a)| {
                    if (b & g).count_ones() % 2 == 0 { *a } else { -*a }
                })
                .sum::<f64>()
                / n as f64
        })
        .collect();

    let tq = QubitId(target);
    for (i, theta) in thetas.iter().enumerate() {
        match axis {
            Axis::Y => circuit.ry(*theta, tq)?,
            Axis::Z => circuit.rz(*theta, tq)?,
        };
        if controls.is_empty() {
            continue;
        }
        let changed = gray(i) ^ gray((i + 1) % n);
        let control = controls[changed.trailing_zeros() as usize];
        circuit.cx(QubitId(control), tq)?;
    }
    Ok(())
}
