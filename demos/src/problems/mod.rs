//! Problem instances for the evolution demos.

pub mod evolution;

pub use evolution::EvolutionProblem;
