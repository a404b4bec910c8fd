//! Random Hamiltonian evolution problems.

use qevo_operator::MatrixOperator;
use qevo_operator::random::random_symmetric;
use qevo_sim::InitialState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::EvolutionConfig;
use crate::error::{DemoError, DemoResult};

/// A Hamiltonian, an initial state and an evolution time.
///
/// The operator and the initial state always act on the same number of
/// qubits.
#[derive(Debug, Clone)]
pub struct EvolutionProblem {
    operator: MatrixOperator,
    initial: InitialState,
    time: f64,
}

impl EvolutionProblem {
    /// Draw a random problem as described by `config`.
    ///
    /// `H = A + Aᵀ` with `A` uniform in `[0, 1)`; the initial amplitudes have
    /// real and imaginary parts uniform in `[-1, 1)` before normalisation.
    /// The same seed always yields the same problem.
    pub fn random(config: &EvolutionConfig) -> DemoResult<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::random_with_rng(config.num_qubits, config.time, &mut rng)
    }

    /// Draw a random problem from an explicit RNG.
    pub fn random_with_rng<R: Rng + ?Sized>(
        num_qubits: u32,
        time: f64,
        rng: &mut R,
    ) -> DemoResult<Self> {
        let operator = MatrixOperator::from_real(&random_symmetric(num_qubits, rng))?;
        let initial = InitialState::random(num_qubits, rng)?;
        info!(num_qubits, time, "generated random evolution problem");
        Ok(Self {
            operator,
            initial,
            time,
        })
    }

    /// Assemble a problem from existing parts.
    pub fn new(operator: MatrixOperator, initial: InitialState, time: f64) -> DemoResult<Self> {
        if operator.num_qubits() != initial.num_qubits() {
            return Err(DemoError::Config(format!(
                "operator acts on {} qubits but the initial state has {}",
                operator.num_qubits(),
                initial.num_qubits()
            )));
        }
        Ok(Self {
            operator,
            initial,
            time,
        })
    }

    /// The Hermitian operator `H`.
    pub fn operator(&self) -> &MatrixOperator {
        &self.operator
    }

    /// The normalised initial state `|ψ₀⟩`.
    pub fn initial(&self) -> &InitialState {
        &self.initial
    }

    /// Evolution time `t`.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn num_qubits(&self) -> u32 {
        self.operator.num_qubits()
    }
}
