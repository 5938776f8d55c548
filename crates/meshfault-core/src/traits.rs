//! Core traits for meshfault
//!
//! ## Key Traits
//!
//! - [`NetworkTopology`]: Abstraction over an adjacency model, so path
//!   finding works on ideal and perturbed topologies alike

use crate::identity::NodeId;

/// Abstraction over network topology
///
/// Neighbor lists are multisets: the same neighbor may appear more than
/// once and consumers must tolerate repeats.
pub trait NetworkTopology {
    /// All nodes, in the model's stable order
    fn node_ids(&self) -> &[NodeId];

    /// Neighbors of a node (empty for unknown nodes)
    fn neighbors(&self, node: &NodeId) -> &[NodeId];

    /// Check whether the node is part of this model
    fn contains(&self, node: &NodeId) -> bool;

    /// Check if `a` lists `b` as a neighbor
    fn are_connected(&self, a: &NodeId, b: &NodeId) -> bool {
        self.neighbors(a).contains(b)
    }

    /// Number of nodes in the model
    fn node_count(&self) -> usize {
        self.node_ids().len()
    }
}
