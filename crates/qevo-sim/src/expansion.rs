//! Trotter-Suzuki product-formula synthesis.
//!
//! Approximates `exp(-i H t)` by splitting the evolution into `s` time
//! slices of length `τ = t/s`, each built from exact exponentials of the
//! individual Pauli terms.
//!
//! # Trotter (Lie-Trotter)
//!
//!   exp(-i H t) ≈ [∏_k exp(-i c_k P_k τ)]^s
//!
//! # Suzuki (recursive symmetric product)
//!
//!   S₁(λ) = ∏_k exp(-i c_k P_k λτ/2) · ∏_{k reversed} exp(-i c_k P_k λτ/2)
//!   S_k(λ) = S_{k-1}(p_k λ)² · S_{k-1}((1 − 4p_k) λ) · S_{k-1}(p_k λ)²
//!   p_k = 1 / (4 − 4^{1/(2k−1)})
//!
//! Order `k` yields a formula of order `2k`; the number of term
//! exponentials per slice grows as `2·5^{k−1}·n_terms`.

use std::fmt;
use std::str::FromStr;

use qevo_ir::Circuit;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::hamiltonian::{Hamiltonian, HamiltonianTerm};
use crate::synthesis::append_exp_pauli;

/// Product-formula family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpansionMode {
    /// First-order Lie-Trotter; the order setting is ignored.
    #[default]
    Trotter,
    /// Recursive Suzuki expansion of the configured order.
    Suzuki,
}

impl fmt::Display for ExpansionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpansionMode::Trotter => write!(f, "trotter"),
            ExpansionMode::Suzuki => write!(f, "suzuki"),
        }
    }
}

impl FromStr for ExpansionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trotter" => Ok(ExpansionMode::Trotter),
            "suzuki" => Ok(ExpansionMode::Suzuki),
            other => Err(format!(
                "unknown expansion mode '{other}', expected 'trotter' or 'suzuki'"
            )),
        }
    }
}

/// One entry of a slice: evolve `terms[index]` for `weight · τ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceStep {
    /// Index into the Hamiltonian's term list.
    pub index: usize,
    /// Fraction of the slice duration.
    pub weight: f64,
}

/// Product-formula time-evolution synthesiser.
#[derive(Debug, Clone)]
pub struct EvolutionSynthesis {
    hamiltonian: Hamiltonian,
    /// Total evolution time t.
    t: f64,
    mode: ExpansionMode,
    order: u32,
    time_slices: usize,
    /// Number of qubits; if None, inferred from the Hamiltonian.
    n_qubits: Option<u32>,
}

impl EvolutionSynthesis {
    /// First-order Trotter, one slice.
    pub fn new(hamiltonian: Hamiltonian, t: f64) -> Self {
        Self {
            hamiltonian,
            t,
            mode: ExpansionMode::Trotter,
            order: 1,
            time_slices: 1,
            n_qubits: None,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ExpansionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Suzuki expansion order (≥ 1).
    #[must_use]
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// Number of repetitions of the slice formula (≥ 1).
    #[must_use]
    pub fn with_time_slices(mut self, slices: usize) -> Self {
        self.time_slices = slices;
        self
    }

    /// Override the circuit width (number of qubits).
    ///
    /// By default the width is inferred from the highest qubit index in the
    /// Hamiltonian.
    #[must_use]
    pub fn with_n_qubits(mut self, n: u32) -> Self {
        self.n_qubits = Some(n);
        self
    }

    pub fn mode(&self) -> ExpansionMode {
        self.mode
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn time_slices(&self) -> usize {
        self.time_slices
    }

    /// The term sequence of a single slice.
    pub fn slice_steps(&self) -> SimResult<Vec<SliceStep>> {
        self.validate()?;
        let n_terms = self.hamiltonian.n_terms();
        let steps = match self.mode {
            ExpansionMode::Trotter => (0..n_terms)
                .map(|index| SliceStep { index, weight: 1.0 })
                .collect(),
            ExpansionMode::Suzuki => suzuki_slice(n_terms, 1.0, self.order),
        };
        Ok(steps)
    }

    /// Like [`slice_steps`](Self::slice_steps) but resolved to terms.
    pub fn slice_terms(&self) -> SimResult<Vec<(f64, &HamiltonianTerm)>> {
        let terms = self.hamiltonian.terms();
        Ok(self
            .slice_steps()?
            .into_iter()
            .map(|step| (step.weight, &terms[step.index]))
            .collect())
    }

    /// Synthesise the evolution circuit.
    pub fn circuit(&self) -> SimResult<Circuit> {
        let slice = self.slice_terms()?;
        let n_qubits = self.effective_n_qubits();
        let tau = self.t / self.time_slices as f64;

        let name = match self.mode {
            ExpansionMode::Trotter => "trotter".to_string(),
            ExpansionMode::Suzuki => format!("suzuki{}", self.order),
        };
        let mut circuit = Circuit::with_size(name, n_qubits);
        debug!(
            mode = %self.mode,
            order = self.order,
            n_terms = self.hamiltonian.n_terms(),
            slice_len = slice.len(),
            time_slices = self.time_slices,
            n_qubits,
            "synthesising evolution circuit"
        );

        for _ in 0..self.time_slices {
            for &(weight, term) in &slice {
                append_exp_pauli(&mut circuit, term, weight * tau, n_qubits)?;
            }
        }

        Ok(circuit)
    }

    fn validate(&self) -> SimResult<()> {
        if self.hamiltonian.n_terms() == 0 {
            return Err(SimError::EmptyHamiltonian);
        }
        if self.time_slices == 0 {
            return Err(SimError::InvalidSlices(0));
        }
        if self.mode == ExpansionMode::Suzuki && self.order == 0 {
            return Err(SimError::InvalidOrder(0));
        }
        Ok(())
    }

    fn effective_n_qubits(&self) -> u32 {
        self.n_qubits
            .unwrap_or_else(|| self.hamiltonian.min_qubits())
    }
}

fn suzuki_slice(n_terms: usize, lambda: f64, order: u32) -> Vec<SliceStep> {
    if order <= 1 {
        let half: Vec<SliceStep> = (0..n_terms)
            .map(|index| SliceStep {
                index,
                weight: lambda / 2.0,
            })
            .collect();
        return half.iter().chain(half.iter().rev()).copied().collect();
    }

    let p = 1.0 / (4.0 - 4f64.powf(1.0 / f64::from(2 * order - 1)));
    let side_base = suzuki_slice(n_terms, p * lambda, order - 1);
    let middle = suzuki_slice(n_terms, (1.0 - 4.0 * p) * lambda, order - 1);

    let mut out = Vec::with_capacity(4 * side_base.len() + middle.len());
    for _ in 0..2 {
        out.extend_from_slice(&side_base);
    }
    out.extend_from_slice(&middle);
    for _ in 0..2 {
        out.extend_from_slice(&side_base);
    }
    out
}
