//! Error types for the demo pipeline.

use qevo_hal::HalError;
use qevo_ir::IrError;
use qevo_operator::OperatorError;
use qevo_sim::SimError;
use thiserror::Error;

/// Errors that can occur while running an evolution demo.
#[derive(Debug, Error)]
pub enum DemoError {
    /// Invalid demo configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Failed to read a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a configuration file.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error(transparent)]
    Operator(#[from] OperatorError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error(transparent)]
    Ir(#[from] IrError),

    #[error(transparent)]
    Hal(#[from] HalError),

    /// The backend returned a result without a statevector.
    #[error("Backend '{0}' did not return a statevector")]
    MissingStatevector(String),

    /// The two reference evolutions disagree.
    #[error("Reference evolutions differ by {deviation:.3e} (tolerance {tolerance:.1e})")]
    ReferenceMismatch { deviation: f64, tolerance: f64 },
}

/// Result type for demo operations.
pub type DemoResult<T> = Result<T, DemoError>;
