//! Simulation error types

use std::io;
use std::path::PathBuf;

use meshfault_core::{IdentityError, MeshError, TopologyError};
use meshfault_routing::RoutingError;
use thiserror::Error;

/// Errors surfaced by the orchestrator and the topology source
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid probability {0:?}: expected a decimal number")]
    InvalidProbability(String),
}

impl From<IdentityError> for SimulationError {
    fn from(err: IdentityError) -> Self {
        Self::Mesh(MeshError::Identity(err))
    }
}

impl From<TopologyError> for SimulationError {
    fn from(err: TopologyError) -> Self {
        Self::Mesh(MeshError::Topology(err))
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
