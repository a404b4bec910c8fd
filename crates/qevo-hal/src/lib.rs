//! Qevo backend abstraction layer.
//!
//! A common async [`Backend`] trait for circuit execution, with
//! [`Capabilities`] describing backend limits and [`ExecutionResult`]
//! carrying counts and, for simulators, the final statevector.
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use qevo_hal::Backend;
//! use qevo_adapter_sim::StatevectorSimulator;
//! use qevo_ir::Circuit;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = StatevectorSimulator::new();
//!     let result = backend.run(&Circuit::bell()?, 1000).await?;
//!
//!     if let Some((bitstring, count)) = result.counts.most_frequent() {
//!         println!("Most frequent: {bitstring} ({count} times)");
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{Backend, BackendAvailability, BackendConfig, BackendFactory, ValidationResult};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
