//! Fidelity as a function of Suzuki order.

use qevo_hal::Backend;
use qevo_operator::state_fidelity;
use qevo_sim::ExpansionMode;
use tracing::info;

use crate::error::{DemoError, DemoResult};
use crate::problems::EvolutionProblem;
use crate::runners::EvolutionRunner;

/// One point of an order sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub order: u32,
    pub fidelity: f64,
    pub depth: usize,
    pub ops: usize,
}

/// Run the Suzuki expansion at orders `1..=max_order` on the same problem.
///
/// The reference evolution is computed once. `on_point` is called after
/// each order finishes.
pub async fn order_sweep<B: Backend + ?Sized>(
    runner: &EvolutionRunner,
    problem: &EvolutionProblem,
    backend: &B,
    max_order: u32,
    mut on_point: impl FnMut(&SweepPoint),
) -> DemoResult<Vec<SweepPoint>> {
    if max_order == 0 {
        return Err(DemoError::Config("max_order must be at least 1".into()));
    }
    let reference = runner.reference(problem)?;

    let mut points = Vec::with_capacity(max_order as usize);
    for order in 1..=max_order {
        let runner = runner
            .clone()
            .with_mode(ExpansionMode::Suzuki)
            .with_order(order);
        let (circuit, _) = runner.build_circuit(problem)?;
        let (simulated, _) = runner.execute(&circuit, backend).await?;
        let point = SweepPoint {
            order,
            fidelity: state_fidelity(&reference.exact, &simulated)?,
            depth: circuit.depth(),
            ops: circuit.num_ops(),
        };
        info!(order, fidelity = point.fidelity, ops = point.ops, "sweep point");
        on_point(&point);
        points.push(point);
    }
    Ok(points)
}
