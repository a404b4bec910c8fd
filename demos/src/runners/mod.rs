//! Demo runners for the evolution pipeline.

pub mod evolution;
pub mod sweep;

pub use evolution::{EvolutionReport, EvolutionRunner, ReferenceEvolution};
pub use sweep::{SweepPoint, order_sweep};
