//! Routing error types

use meshfault_core::NodeId;
use thiserror::Error;

/// Errors raised by path queries
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoutingError {
    /// A queried node is not part of the topology
    #[error("Invalid input: node {node} is not present in the topology")]
    InvalidInput { node: NodeId },
}

/// Result type for routing operations
pub type RoutingResult<T> = Result<T, RoutingError>;
