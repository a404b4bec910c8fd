//! Suzuki Order Sweep Demo
//!
//! Runs one random evolution problem at increasing Suzuki orders and shows
//! how fidelity and circuit size grow together.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use console::style;
use qevo_adapter_sim::StatevectorSimulator;
use qevo_demos::config::EvolutionConfig;
use qevo_demos::problems::EvolutionProblem;
use qevo_demos::runners::{EvolutionRunner, order_sweep};
use qevo_demos::{create_progress_bar, print_header, print_result, print_section};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "demo-order-sweep")]
#[command(about = "Fidelity of Trotter-Suzuki circuits versus expansion order")]
struct Args {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of qubits
    #[arg(short = 'n', long, default_value = "2", env = "QEVO_QUBITS")]
    qubits: u32,

    /// Evolution time
    #[arg(short, long, default_value = "1.0", env = "QEVO_TIME")]
    time: f64,

    /// Highest Suzuki order to run
    #[arg(long, default_value = "4")]
    max_order: u32,

    /// Number of time slices
    #[arg(long, default_value = "1", env = "QEVO_SLICES")]
    slices: usize,

    /// RNG seed for the random problem
    #[arg(long, default_value = "42", env = "QEVO_SEED")]
    seed: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let config = EvolutionConfig {
        num_qubits: args.qubits,
        time: args.time,
        order: args.max_order,
        time_slices: args.slices,
        seed: Some(args.seed),
        ..Default::default()
    };
    config.validate()?;

    print_header("Suzuki Order Sweep");
    print_section("Problem Setup");
    print_result("Qubits", config.num_qubits);
    print_result("Evolution time", config.time);
    print_result("Time slices", config.time_slices);
    print_result("Seed", args.seed);

    let problem = EvolutionProblem::random(&config)?;
    let runner = EvolutionRunner::from_config(&config);
    let backend = StatevectorSimulator::new();

    print_section("Sweeping");
    let pb = create_progress_bar(u64::from(args.max_order), "Suzuki orders");
    let points = order_sweep(&runner, &problem, &backend, args.max_order, |p| {
        pb.set_message(format!("order {}", p.order));
        pb.inc(1);
    })
    .await?;
    pb.finish_with_message("Sweep complete");

    print_section("Results");
    println!(
        "  {:>5}  {:>14}  {:>10}  {:>8}",
        style("order").bold(),
        style("fidelity").bold(),
        style("ops").bold(),
        style("depth").bold()
    );
    for p in &points {
        println!(
            "  {:>5}  {:>14.10}  {:>10}  {:>8}",
            p.order, p.fidelity, p.ops, p.depth
        );
    }

    Ok(())
}
