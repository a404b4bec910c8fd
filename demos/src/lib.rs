//! Qevo Demo Suite
//!
//! End-to-end comparison of exact Hamiltonian time evolution against
//! Trotter-Suzuki circuits executed on the local statevector simulator:
//!
//! 1. draw a random Hermitian `H` and initial state `|ψ₀⟩`
//! 2. compute `exp(-iHt)|ψ₀⟩` twice (Padé `expm` and spectral evolution)
//! 3. Pauli-decompose `H` and synthesise the evolution circuit
//! 4. run state preparation + evolution on a [`qevo_hal::Backend`]
//! 5. score the simulated state against the reference by fidelity
//!
//! ```ignore
//! use qevo_adapter_sim::StatevectorSimulator;
//! use qevo_demos::config::EvolutionConfig;
//! use qevo_demos::problems::EvolutionProblem;
//! use qevo_demos::runners::EvolutionRunner;
//!
//! let config = EvolutionConfig::default();
//! let problem = EvolutionProblem::random(&config)?;
//! let report = EvolutionRunner::from_config(&config)
//!     .run(&problem, &StatevectorSimulator::new())
//!     .await?;
//! println!("fidelity = {:.6}", report.fidelity);
//! ```

pub mod config;
pub mod error;
pub mod problems;
pub mod runners;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use num_complex::Complex64;

pub use error::{DemoError, DemoResult};

/// Create a progress bar for demo operations.
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("⚠").yellow().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

/// Print a state vector, one amplitude per line with its basis label.
pub fn print_vector(label: &str, state: &[Complex64]) {
    println!("  {}", style(format!("{label}:")).dim());
    let width = state.len().max(2).trailing_zeros() as usize;
    for (k, amp) in state.iter().enumerate() {
        println!(
            "    |{k:0width$b}⟩  {:>+.6} {:>+.6}i",
            amp.re,
            amp.im,
            width = width
        );
    }
}
