//! Simulation orchestrator
//!
//! One run = one failure pass over the ideal topology followed by one path
//! query on what survived. Runs share nothing: each builds its own
//! perturbed topology and distance table.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use meshfault_core::{NetworkTopology, NodeId, PerturbedTopology, RandomSource, RngSource, Topology};
use meshfault_logging::spans;
use meshfault_routing::{DistanceTable, PathStatus, RoutingError, shortest_paths};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span};
use uuid::Uuid;

use crate::error::{SimulationError, SimulationResult};
use crate::failure::FailureSimulator;

/// Message rendered when the end node cannot be reached
pub const NO_PATH_FOUND: &str = "No path found.";

/// Configuration for the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Probability each direction of each link fails
    pub failure_probability: f64,
    /// Seed for reproducible runs (None = fresh entropy per run)
    pub seed: Option<u64>,
    /// Log every link draw at debug level
    pub trace_routing: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            failure_probability: 0.0,
            seed: None,
            trace_routing: true,
        }
    }
}

impl SimConfig {
    /// Load a configuration from a JSON file; missing fields use defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> SimulationResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| SimulationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SimulationError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.failure_probability = probability;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Parse a probability typed by a user
///
/// Out-of-range values are accepted; only non-numbers are rejected.
pub fn parse_probability(input: &str) -> SimulationResult<f64> {
    let trimmed = input.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|p| !p.is_nan())
        .ok_or_else(|| SimulationError::InvalidProbability(trimmed.to_string()))
}

/// Drives failure simulation and path finding over a fixed topology
#[derive(Debug, Clone)]
pub struct Simulation {
    topology: Topology,
    config: SimConfig,
}

impl Simulation {
    /// Create a new simulation with the given topology and configuration
    pub fn new(topology: Topology, config: SimConfig) -> Self {
        Self { topology, config }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Run once with randomness from the configured seed, or fresh entropy
    pub fn run(&self, start: &NodeId, end: &NodeId) -> SimulationResult<RunOutcome> {
        match self.config.seed {
            Some(seed) => self.run_with(start, end, &mut RngSource::seeded(seed)),
            None => self.run_with(start, end, &mut RngSource::from_os()),
        }
    }

    /// Run once drawing from `rng`
    ///
    /// Both endpoints must be nodes of the topology. The probability is
    /// passed through unchecked.
    pub fn run_with<R>(&self, start: &NodeId, end: &NodeId, rng: &mut R) -> SimulationResult<RunOutcome>
    where
        R: RandomSource + ?Sized,
    {
        for node in [start, end] {
            if !self.topology.contains(node) {
                return Err(RoutingError::InvalidInput { node: node.clone() }.into());
            }
        }

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let span = info_span!(
            spans::SIMULATION_RUN,
            run_id = %run_id,
            start = %start,
            end = %end,
            probability = self.config.failure_probability
        );
        let _enter = span.enter();

        let perturbed = FailureSimulator::new(self.config.failure_probability)
            .with_link_tracing(self.config.trace_routing)
            .simulate(&self.topology, rng);

        let table = {
            let _query = info_span!(spans::PATH_QUERY).entered();
            shortest_paths(&perturbed, start)?
        };
        let route = table
            .status(end)
            .cloned()
            .unwrap_or(PathStatus::Unreachable);

        info!(
            hop_count = ?route.hop_count(),
            reachable = table.reachable_count(),
            "run complete"
        );

        Ok(RunOutcome {
            run_id,
            started_at,
            start: start.clone(),
            end: end.clone(),
            perturbed,
            table,
            route,
        })
    }
}

/// Everything one run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub start: NodeId,
    pub end: NodeId,
    pub perturbed: PerturbedTopology,
    pub table: DistanceTable,
    /// Status of `end` in `table`
    pub route: PathStatus,
}

impl RunOutcome {
    pub fn hop_count(&self) -> Option<usize> {
        self.route.hop_count()
    }

    /// Either the full route or exactly [`NO_PATH_FOUND`]
    pub fn render(&self) -> String {
        match &self.route {
            PathStatus::Known(path) => {
                let mut hops = vec![self.start.as_str()];
                hops.extend(path.iter().map(NodeId::as_str));
                let unit = if path.len() == 1 { "hop" } else { "hops" };
                format!("Shortest path: {} ({} {unit})", hops.join(" -> "), path.len())
            }
            PathStatus::Unreachable => NO_PATH_FOUND.to_string(),
        }
    }

    /// Which links broke and which were forced back up
    pub fn broken_links_report(&self) -> String {
        let failed = self.perturbed.failed_links();
        let restored = self.perturbed.restored_links();

        let mut output = format!(
            "Failure pass (p = {}): {} link direction(s) failed, {} restored\n",
            self.perturbed.failure_probability(),
            failed.len(),
            restored.len()
        );
        for link in failed {
            output.push_str(&format!("  broken:   {link}\n"));
        }
        for link in restored {
            output.push_str(&format!("  restored: {link}\n"));
        }
        output
    }
}
