//! Exact-versus-circuit evolution runner.
//!
//! The runner computes the reference evolution of an [`EvolutionProblem`]
//! two ways, synthesises the product-formula circuit, executes it on a
//! [`Backend`] and scores the result by state fidelity.

use num_complex::Complex64;
use qevo_hal::{Backend, Counts, HalError, ValidationResult};
use qevo_ir::Circuit;
use qevo_operator::state::max_deviation;
use qevo_operator::state_fidelity;
use qevo_sim::{EvolutionSynthesis, ExpansionMode, Hamiltonian};
use tracing::{debug, info, warn};

use crate::config::EvolutionConfig;
use crate::error::{DemoError, DemoResult};
use crate::problems::EvolutionProblem;

/// The two reference evolutions and how far apart they are.
#[derive(Debug, Clone)]
pub struct ReferenceEvolution {
    /// `expm(-iHt)·ψ₀` by Padé scaling and squaring.
    pub exact: Vec<Complex64>,
    /// The operator's built-in spectral evolution.
    pub builtin: Vec<Complex64>,
    /// `maxᵢ |exactᵢ − builtinᵢ|`.
    pub deviation: f64,
}

/// Result of one evolution experiment.
#[derive(Debug, Clone)]
pub struct EvolutionReport {
    /// Reference states.
    pub reference: ReferenceEvolution,
    /// Statevector returned by the backend.
    pub simulated: Vec<Complex64>,
    /// `|⟨exact|simulated⟩|²`.
    pub fidelity: f64,
    /// The executed circuit (state preparation followed by evolution).
    pub circuit: Circuit,
    /// Number of Pauli terms in the decomposition of `H`.
    pub n_terms: usize,
    /// Measurement counts, empty unless shots were requested.
    pub counts: Counts,
}

impl EvolutionReport {
    pub fn circuit_depth(&self) -> usize {
        self.circuit.depth()
    }

    pub fn circuit_ops(&self) -> usize {
        self.circuit.num_ops()
    }
}

/// Runs the evolution pipeline with a fixed synthesis configuration.
#[derive(Debug, Clone)]
pub struct EvolutionRunner {
    /// Product-formula family.
    pub mode: ExpansionMode,
    /// Suzuki order.
    pub order: u32,
    /// Repetitions of the slice formula.
    pub time_slices: usize,
    /// Shots to sample alongside the statevector.
    pub shots: u32,
    /// Allowed deviation between the two reference evolutions.
    pub reference_tolerance: f64,
}

impl Default for EvolutionRunner {
    fn default() -> Self {
        Self::from_config(&EvolutionConfig::default())
    }
}

impl EvolutionRunner {
    /// Create a runner from the synthesis fields of a config.
    pub fn from_config(config: &EvolutionConfig) -> Self {
        Self {
            mode: config.mode,
            order: config.order,
            time_slices: config.time_slices,
            shots: config.shots,
            reference_tolerance: config.reference_tolerance,
        }
    }

    /// Set the expansion mode.
    pub fn with_mode(mut self, mode: ExpansionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the Suzuki order.
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// Set the number of time slices.
    pub fn with_time_slices(mut self, time_slices: usize) -> Self {
        self.time_slices = time_slices;
        self
    }

    /// Set the number of shots.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Evolve the initial state exactly, by both routes, and cross-check.
    pub fn reference(&self, problem: &EvolutionProblem) -> DemoResult<ReferenceEvolution> {
        let psi0 = problem.initial().statevector();
        let exact = problem.operator().evolve_exact(&psi0, problem.time())?;
        let builtin = problem.operator().evolve(&psi0, problem.time())?;
        let deviation = max_deviation(&exact, &builtin)?;

        if deviation > self.reference_tolerance {
            warn!(
                deviation,
                tolerance = self.reference_tolerance,
                "reference evolutions disagree"
            );
            return Err(DemoError::ReferenceMismatch {
                deviation,
                tolerance: self.reference_tolerance,
            });
        }
        debug!(deviation, "reference evolutions agree");

        Ok(ReferenceEvolution {
            exact,
            builtin,
            deviation,
        })
    }

    /// Build state preparation followed by the evolution circuit.
    pub fn build_circuit(&self, problem: &EvolutionProblem) -> DemoResult<(Circuit, usize)> {
        let hamiltonian = Hamiltonian::from_operator(problem.operator());
        let n_terms = hamiltonian.n_terms();
        let evolution = EvolutionSynthesis::new(hamiltonian, problem.time())
            .with_mode(self.mode)
            .with_order(self.order)
            .with_time_slices(self.time_slices)
            .with_n_qubits(problem.num_qubits())
            .circuit()?;

        let mut circuit = problem.initial().circuit()?;
        circuit.compose(&evolution)?;
        Ok((circuit, n_terms))
    }

    /// Execute `circuit` and return the backend's statevector and counts.
    pub async fn execute<B: Backend + ?Sized>(
        &self,
        circuit: &Circuit,
        backend: &B,
    ) -> DemoResult<(Vec<Complex64>, Counts)> {
        if let ValidationResult::Invalid { reasons } = backend.validate(circuit).await? {
            return Err(HalError::InvalidCircuit(reasons.join("; ")).into());
        }
        let result = backend.run(circuit, self.shots).await?;
        let statevector = result
            .statevector
            .ok_or_else(|| DemoError::MissingStatevector(backend.name().to_string()))?;
        Ok((statevector, result.counts))
    }

    /// Run the full pipeline on `backend`.
    pub async fn run<B: Backend + ?Sized>(
        &self,
        problem: &EvolutionProblem,
        backend: &B,
    ) -> DemoResult<EvolutionReport> {
        let reference = self.reference(problem)?;
        let (circuit, n_terms) = self.build_circuit(problem)?;
        let (simulated, counts) = self.execute(&circuit, backend).await?;
        let fidelity = state_fidelity(&reference.exact, &simulated)?;

        info!(
            mode = %self.mode,
            order = self.order,
            time_slices = self.time_slices,
            depth = circuit.depth(),
            ops = circuit.num_ops(),
            fidelity,
            "evolution run complete"
        );

        Ok(EvolutionReport {
            reference,
            simulated,
            fidelity,
            circuit,
            n_terms,
            counts,
        })
    }
}
