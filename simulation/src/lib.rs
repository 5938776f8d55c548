//! # Meshfault
//!
//! Models a small mesh network whose links fail at random, then recomputes
//! hop-count shortest paths over whatever survived.
//!
//! ## Overview
//!
//! A run has two stages:
//!
//! 1. **Failure injection**: every direction of every link is dropped with
//!    a given probability. A node that loses all of its own links gets one
//!    back, and every kept direction is mirrored, so the degraded mesh is
//!    symmetric and has no isolated nodes.
//! 2. **Rerouting**: a Dijkstra-style search with unit link weights finds
//!    the fewest-hop path from the start node to every other node.
//!
//! ## Architecture
//!
//! - **Topology** (`topology.rs`): Sample mesh, regular builders, JSON files
//! - **Failure** (`failure.rs`): Probabilistic link failure injection
//! - **Simulation** (`simulation.rs`): Orchestrates one failure pass + one query
//! - **Scenarios** (`scenarios.rs`): Pre-built demonstrations
//!
//! ## Example
//!
//! ```rust,ignore
//! use meshfault_simulation::*;
//!
//! let sim = Simulation::new(sample_mesh(), SimConfig::default().with_probability(0.3));
//! let outcome = sim.run(&"A".parse()?, &"N".parse()?)?;
//! println!("{}", outcome.render()); // "Shortest path: ..." or "No path found."
//! ```

pub mod error;
pub mod failure;
pub mod scenarios;
pub mod simulation;
pub mod topology;

#[cfg(test)]
mod integration_scenarios;

// Re-export main types
pub use error::{SimulationError, SimulationResult};

pub use failure::{FailureSimulator, simulate};

pub use simulation::{NO_PATH_FOUND, RunOutcome, SimConfig, Simulation, parse_probability};

pub use topology::{MeshBuilder, TopologyFile, from_adjacency_labels, from_edges, sample_mesh};

// Re-export core types for integration
pub use meshfault_core::{NodeId, PerturbedTopology, RandomSource, RngSource, ScriptedSource, Topology};
pub use meshfault_routing::{DistanceTable, PathStatus, shortest_paths};
