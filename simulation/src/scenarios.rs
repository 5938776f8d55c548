//! Pre-defined simulation scenarios for meshfault
//!
//! Each scenario prints what it does and returns the run for inspection.

use meshfault_core::NodeId;
use tracing::info;

use crate::error::SimulationResult;
use crate::simulation::{RunOutcome, SimConfig, Simulation};
use crate::topology::{from_edges, sample_mesh};

fn node(label: &str) -> SimulationResult<NodeId> {
    Ok(NodeId::new(label)?)
}

/// Route A -> N across the sample mesh at the given failure probability
pub fn run_sample_scenario(probability: f64, seed: Option<u64>) -> SimulationResult<RunOutcome> {
    info!("=== Running sample mesh scenario ===");
    let mesh = sample_mesh();
    println!("{}", mesh.visualize());

    let config = SimConfig {
        failure_probability: probability,
        seed,
        ..Default::default()
    };
    let outcome = Simulation::new(mesh, config).run(&node("A")?, &node("N")?)?;

    println!("{}", outcome.broken_links_report());
    println!("{}", outcome.render());
    Ok(outcome)
}

/// Two islands with no link between them: A -> F can never be routed
///
/// ```text
/// A - B        D - E
///  \ /          \ /
///   C            F
/// ```
pub fn run_partition_scenario() -> SimulationResult<RunOutcome> {
    info!("=== Running partition scenario ===");
    let mesh = from_edges(&[
        ("A", "B"),
        ("B", "C"),
        ("A", "C"),
        ("D", "E"),
        ("E", "F"),
        ("D", "F"),
    ])?;
    println!("{}", mesh.visualize());

    // No failures: the partition alone makes F unreachable
    let outcome = Simulation::new(mesh, SimConfig::default()).run(&node("A")?, &node("F")?)?;

    println!("{}", outcome.render());
    Ok(outcome)
}

/// Every link fails; each node keeps only its forced restoration
pub fn run_total_failure_scenario(seed: Option<u64>) -> SimulationResult<RunOutcome> {
    info!("=== Running total failure scenario ===");
    run_sample_scenario(1.0, seed)
}
