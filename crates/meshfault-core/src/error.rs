//! Error types for meshfault

use thiserror::Error;

use crate::identity::NodeId;

/// Top-level error type for meshfault
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),
}

/// Errors related to node labels
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Node label must not be empty")]
    EmptyLabel,

    #[error("Invalid node label {0:?}: labels may not contain whitespace")]
    InvalidLabel(String),
}

/// Errors related to topology construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("Topology has no nodes")]
    Empty,

    #[error("Node {0} links to itself")]
    SelfLoop(NodeId),

    #[error("Node {0} is listed more than once")]
    DuplicateNode(NodeId),

    #[error("Requested {requested} nodes, but at most {max} are supported")]
    TooManyNodes { requested: usize, max: usize },
}
