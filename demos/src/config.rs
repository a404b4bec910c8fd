//! Demo configuration.
//!
//! Values come from [`EvolutionConfig::default`], optionally replaced by a
//! YAML file and then by command-line flags (or their `QEVO_*` environment
//! variables) in the binaries.
//!
//! ```yaml
//! num_qubits: 3
//! time: 0.5
//! mode: suzuki
//! order: 2
//! time_slices: 4
//! seed: 42
//! ```

use std::path::Path;

use qevo_sim::ExpansionMode;
use serde::{Deserialize, Serialize};

use crate::error::{DemoError, DemoResult};

/// Largest register the demo will build a dense `2^n × 2^n` operator for.
pub const MAX_QUBITS: u32 = 8;

/// Upper bound on Pauli exponentials in one synthesised circuit.
pub const MAX_EXPONENTIALS: u64 = 250_000;

/// Parameters of one evolution experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Number of qubits; the Hamiltonian is `2^n × 2^n`.
    pub num_qubits: u32,
    /// Evolution time `t`.
    pub time: f64,
    /// Product-formula family.
    pub mode: ExpansionMode,
    /// Suzuki order (ignored for Trotter).
    pub order: u32,
    /// Repetitions of the slice formula.
    pub time_slices: usize,
    /// RNG seed for the random problem; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Measurement shots sampled alongside the statevector.
    pub shots: u32,
    /// Maximum allowed deviation between the two reference evolutions.
    pub reference_tolerance: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            num_qubits: 2,
            time: 1.0,
            mode: ExpansionMode::Suzuki,
            order: 3,
            time_slices: 1,
            seed: None,
            shots: 0,
            reference_tolerance: 1e-9,
        }
    }
}

impl EvolutionConfig {
    /// Load and validate a configuration from a YAML file.
    ///
    /// Missing keys take their default values.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> DemoResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(contents: &str) -> DemoResult<Self> {
        let config: EvolutionConfig = serde_yaml_ng::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration describes a runnable experiment.
    pub fn validate(&self) -> DemoResult<()> {
        if self.num_qubits == 0 {
            return Err(DemoError::Config("num_qubits must be at least 1".into()));
        }
        if self.num_qubits > MAX_QUBITS {
            return Err(DemoError::Config(format!(
                "num_qubits {} exceeds the maximum of {MAX_QUBITS}",
                self.num_qubits
            )));
        }
        if !self.time.is_finite() {
            return Err(DemoError::Config(format!(
                "time must be finite, got {}",
                self.time
            )));
        }
        if self.order == 0 {
            return Err(DemoError::Config("order must be at least 1".into()));
        }
        if self.time_slices == 0 {
            return Err(DemoError::Config("time_slices must be at least 1".into()));
        }
        let exponentials = self.estimated_exponentials();
        if exponentials > MAX_EXPONENTIALS {
            return Err(DemoError::Config(format!(
                "about {exponentials} Pauli exponentials needed, more than the limit of \
                 {MAX_EXPONENTIALS}; lower num_qubits, order or time_slices"
            )));
        }
        if !self.reference_tolerance.is_finite() || self.reference_tolerance < 0.0 {
            return Err(DemoError::Config(format!(
                "reference_tolerance must be a non-negative number, got {}",
                self.reference_tolerance
            )));
        }
        Ok(())
    }

    /// Pauli exponentials in the evolution circuit of a random problem.
    ///
    /// A real symmetric `H` has at most `(4^n + 2^n) / 2` Pauli terms; one
    /// Suzuki slice of order `k` visits each term `2·5^(k-1)` times.
    pub fn estimated_exponentials(&self) -> u64 {
        let n = self.num_qubits.min(31);
        let terms = ((1u64 << (2 * n)) + (1u64 << n)) / 2;
        let per_slice = match self.mode {
            ExpansionMode::Trotter => 1,
            ExpansionMode::Suzuki => {
                let exp = self.order.saturating_sub(1);
                5u64.checked_pow(exp).map_or(u64::MAX, |p| p.saturating_mul(2))
            }
        };
        terms
            .saturating_mul(per_slice)
            .saturating_mul(self.time_slices as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EvolutionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.mode, ExpansionMode::Suzuki);
        assert_eq!(config.order, 3);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = EvolutionConfig::from_yaml_str("num_qubits: 3\nmode: trotter\n").unwrap();
        assert_eq!(config.num_qubits, 3);
        assert_eq!(config.mode, ExpansionMode::Trotter);
        assert!((config.time - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.time_slices, 1);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let cases = [
            EvolutionConfig {
                num_qubits: 0,
                ..Default::default()
            },
            EvolutionConfig {
                num_qubits: MAX_QUBITS + 1,
                ..Default::default()
            },
            EvolutionConfig {
                time: f64::NAN,
                ..Default::default()
            },
            EvolutionConfig {
                order: 0,
                ..Default::default()
            },
            EvolutionConfig {
                time_slices: 0,
                ..Default::default()
            },
            EvolutionConfig {
                reference_tolerance: -1.0,
                ..Default::default()
            },
        ];
        for config in cases {
            assert!(matches!(config.validate(), Err(DemoError::Config(_))));
        }
    }

    #[test]
    fn test_qubit_cap_boundary() {
        let at_cap = EvolutionConfig {
            num_qubits: MAX_QUBITS,
            mode: ExpansionMode::Trotter,
            ..Default::default()
        };
        assert!(at_cap.validate().is_ok());

        let above_cap = EvolutionConfig {
            num_qubits: MAX_QUBITS + 1,
            mode: ExpansionMode::Trotter,
            ..Default::default()
        };
        assert!(matches!(above_cap.validate(), Err(DemoError::Config(_))));
    }

    #[test]
    fn test_circuit_size_limit() {
        // 8256 terms × 50 visits per third-order slice.
        let too_big = EvolutionConfig {
            num_qubits: 7,
            ..Default::default()
        };
        assert_eq!(too_big.estimated_exponentials(), 412_800);
        assert!(matches!(too_big.validate(), Err(DemoError::Config(_))));

        let fits = EvolutionConfig {
            num_qubits: 6,
            ..Default::default()
        };
        assert!(fits.validate().is_ok());

        let huge_order = EvolutionConfig {
            order: 100,
            ..Default::default()
        };
        assert_eq!(huge_order.estimated_exponentials(), u64::MAX);
        assert!(huge_order.validate().is_err());
    }

    #[test]
    fn test_unknown_mode_is_a_parse_error() {
        let err = EvolutionConfig::from_yaml_str("mode: qdrift\n").unwrap_err();
        assert!(matches!(err, DemoError::Yaml(_)));
    }
}
