//! Statevector simulator backend.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use async_trait::async_trait;
use qevo_hal::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, Capabilities, Counts,
    ExecutionResult, HalError, HalResult, Job, JobId, JobStatus, ValidationResult,
};
use qevo_ir::Circuit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::statevector::Statevector;

const DEFAULT_MAX_QUBITS: u32 = 20;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Local statevector simulator.
///
/// Jobs run to completion inside [`submit`](Backend::submit). Every result
/// carries the final statevector; with `shots > 0` measurement counts are
/// sampled from it as well.
pub struct StatevectorSimulator {
    config: BackendConfig,
    capabilities: Capabilities,
    jobs: Arc<Mutex<FxHashMap<String, SimJob>>>,
    rng: Mutex<StdRng>,
}

impl StatevectorSimulator {
    /// Create a new simulator with default settings.
    pub fn new() -> Self {
        Self::build(BackendConfig::new("statevector"), DEFAULT_MAX_QUBITS, None)
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self::build(BackendConfig::new("statevector"), max_qubits, None)
    }

    /// Seed the measurement sampler for reproducible counts.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    fn build(config: BackendConfig, max_qubits: u32, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            config,
            capabilities: Capabilities::simulator(max_qubits),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            rng: Mutex::new(rng),
        }
    }

    fn check_limits(&self, circuit: &Circuit, shots: u32) -> HalResult<()> {
        let caps = &self.capabilities;
        if circuit.num_qubits() > caps.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                caps.num_qubits
            )));
        }
        if shots > caps.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} exceeds the maximum of {}",
                caps.max_shots
            )));
        }
        Ok(())
    }

    /// Run simulation synchronously.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> ExecutionResult {
        let start = Instant::now();
        debug!(
            qubits = circuit.num_qubits(),
            ops = circuit.num_ops(),
            shots,
            "starting simulation"
        );

        let sv = Statevector::from_circuit(circuit);

        let mut counts = Counts::new();
        if shots > 0 {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            for outcome in sv.sample(shots, &mut *rng) {
                counts.insert(sv.outcome_to_bitstring(outcome), 1);
            }
        }

        let elapsed = start.elapsed();
        debug!(?elapsed, "simulation completed");

        #[allow(clippy::cast_possible_truncation)]
        let elapsed_ms = elapsed.as_millis() as u64;
        ExecutionResult::new(counts, shots)
            .with_statevector(sv.into_amplitudes())
            .with_execution_time(elapsed_ms)
    }

    fn lock_jobs(&self) -> std::sync::MutexGuard<'_, FxHashMap<String, SimJob>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StatevectorSimulator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for StatevectorSimulator {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        let mut reasons = Vec::new();
        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            reasons.push(format!(
                "{} qubits exceed the limit of {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            ));
        }
        for (_, inst) in circuit.dag().topological_ops() {
            if inst.is_gate() && !self.capabilities.gate_set.contains(inst.name()) {
                reasons.push(format!("unsupported gate '{}'", inst.name()));
            }
        }
        if reasons.is_empty() {
            Ok(ValidationResult::Valid)
        } else {
            Ok(ValidationResult::Invalid { reasons })
        }
    }

    #[instrument(skip(self, circuit))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        self.check_limits(circuit, shots)?;

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let job = Job::new(job_id.clone(), shots).with_backend(self.name());
        self.lock_jobs().insert(
            job_id.0.clone(),
            SimJob { job, result: None },
        );
        debug!(job = %job_id, "submitted job");

        if let Some(sim_job) = self.lock_jobs().get_mut(&job_id.0) {
            sim_job.job.transition(JobStatus::Running);
        }

        let result = self.run_simulation(circuit, shots);

        if let Some(sim_job) = self.lock_jobs().get_mut(&job_id.0) {
            if sim_job.job.transition(JobStatus::Completed) {
                sim_job.result = Some(result);
            }
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        self.lock_jobs()
            .get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self.lock_jobs();
        let sim_job = jobs
            .get(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        match (&sim_job.job.status, &sim_job.result) {
            (JobStatus::Completed, Some(result)) => Ok(result.clone()),
            (JobStatus::Cancelled, _) => Err(HalError::JobCancelled),
            (JobStatus::Failed(msg), _) => Err(HalError::JobFailed(msg.clone())),
            _ => Err(HalError::ResultNotReady(job_id.0.clone())),
        }
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self.lock_jobs();
        let sim_job = jobs
            .get_mut(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        if sim_job.job.transition(JobStatus::Cancelled) {
            Ok(())
        } else {
            Err(HalError::Backend(format!(
                "job {job_id} already {}",
                sim_job.job.status
            )))
        }
    }
}

impl BackendFactory for StatevectorSimulator {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = match config.get_u64("max_qubits") {
            Some(v) => u32::try_from(v).map_err(|_| {
                HalError::Configuration(format!("max_qubits {v} is out of range"))
            })?,
            None => DEFAULT_MAX_QUBITS,
        };
        let seed = config.get_u64("seed");
        Ok(Self::build(config, max_qubits, seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qevo_ir::QubitId;

    #[tokio::test]
    async fn test_simulator_capabilities() {
        let backend = StatevectorSimulator::new();
        let caps = backend.capabilities();

        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, 20);
        assert!(backend.availability().await.unwrap().is_available);
    }

    #[tokio::test]
    async fn test_simulator_bell_state() {
        let backend = StatevectorSimulator::new().with_seed(7);

        let circuit = Circuit::bell().unwrap();
        let job_id = backend.submit(&circuit, 1000).await.unwrap();

        let status = backend.status(&job_id).await.unwrap();
        assert!(status.is_success());

        let result = backend.result(&job_id).await.unwrap();
        assert_eq!(result.shots, 1000);

        let counts = &result.counts;
        assert_eq!(counts.get("00") + counts.get("11"), 1000);
        assert_eq!(counts.get("01") + counts.get("10"), 0);
        assert_eq!(result.statevector.map(|v| v.len()), Some(4));
    }

    #[tokio::test]
    async fn test_zero_shots_returns_statevector_only() {
        let backend = StatevectorSimulator::new();
        let mut circuit = Circuit::with_size("x", 2);
        circuit.x(QubitId(1)).unwrap();

        let result = backend.run(&circuit, 0).await.unwrap();
        assert!(result.counts.is_empty());
        let sv = result.statevector.unwrap();
        assert!((sv[2].re - 1.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_seeded_counts_are_reproducible() {
        let circuit = Circuit::ghz(3).unwrap();
        let a = StatevectorSimulator::new().with_seed(11).run(&circuit, 200).await.unwrap();
        let b = StatevectorSimulator::new().with_seed(11).run(&circuit, 200).await.unwrap();
        assert_eq!(a.counts, b.counts);
        assert_eq!(a.counts.get("000") + a.counts.get("111"), 200);
    }

    #[tokio::test]
    async fn test_simulator_too_many_qubits() {
        let backend = StatevectorSimulator::with_max_qubits(5);

        let circuit = Circuit::with_size("test", 10);
        let result = backend.submit(&circuit, 100).await;
        assert!(matches!(result, Err(HalError::CircuitTooLarge(_))));

        let validation = backend.validate(&circuit).await.unwrap();
        assert!(!validation.is_valid());
    }

    #[tokio::test]
    async fn test_too_many_shots() {
        let backend = StatevectorSimulator::new();
        let circuit = Circuit::bell().unwrap();
        let result = backend.submit(&circuit, 1_000_000).await;
        assert!(matches!(result, Err(HalError::InvalidShots(_))));
    }

    #[tokio::test]
    async fn test_cancel_completed_job_is_rejected() {
        let backend = StatevectorSimulator::new();
        let job_id = backend.submit(&Circuit::bell().unwrap(), 0).await.unwrap();
        assert!(backend.cancel(&job_id).await.is_err());
        assert!(backend.status(&job_id).await.unwrap().is_success());
    }

    #[tokio::test]
    async fn test_unknown_job() {
        let backend = StatevectorSimulator::new();
        let missing = JobId::new("nope");
        assert!(matches!(
            backend.status(&missing).await,
            Err(HalError::JobNotFound(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let config = BackendConfig::new("sim")
            .with_extra("max_qubits", serde_json::json!(6))
            .with_extra("seed", serde_json::json!(3));
        let backend = StatevectorSimulator::from_config(config).unwrap();
        assert_eq!(backend.name(), "sim");
        assert_eq!(backend.capabilities().num_qubits, 6);
    }
}
