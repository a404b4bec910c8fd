//! Qevo Local Statevector Simulator
//!
//! Exact statevector simulation for evolution circuits. Results always
//! include the final statevector, which is what fidelity comparisons
//! against a reference evolution consume; measurement counts are sampled
//! on request.
//!
//! # Performance
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//!
//! # Example
//!
//! ```ignore
//! use qevo_adapter_sim::StatevectorSimulator;
//! use qevo_hal::Backend;
//! use qevo_ir::Circuit;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = StatevectorSimulator::new().with_seed(42);
//!     let result = backend.run(&Circuit::bell()?, 1000).await?;
//!
//!     println!("Results: {:?}", result.counts);
//!     println!("Amplitudes: {:?}", result.statevector);
//!     Ok(())
//! }
//! ```

mod simulator;
mod statevector;

pub use simulator::StatevectorSimulator;
pub use statevector::Statevector;
