//! Adjacency models
//!
//! [`Topology`] is the ideal network: an ordered mapping from each node to
//! its ordered neighbor list. [`PerturbedTopology`] is what one failure
//! pass leaves behind, together with a record of which directed links
//! failed and which were forcibly restored.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TopologyError;
use crate::identity::NodeId;
use crate::traits::NetworkTopology;

/// Ordered node -> neighbor list mapping
///
/// Node order is insertion order and is what path finding uses to break
/// ties. Each direction of a link is stored separately; nothing forces the
/// model to be symmetric.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    order: Vec<NodeId>,
    adjacency: HashMap<NodeId, Vec<NodeId>>,
}

impl Topology {
    /// Create an empty topology
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an ordered adjacency listing
    ///
    /// Neighbors that are not listed as keys themselves are appended as
    /// nodes with no neighbors of their own.
    pub fn from_adjacency<I>(entries: I) -> Result<Self, TopologyError>
    where
        I: IntoIterator<Item = (NodeId, Vec<NodeId>)>,
    {
        let mut topology = Self::new();
        let mut pending = Vec::new();

        for (node, neighbors) in entries {
            if !topology.add_node(node.clone()) {
                return Err(TopologyError::DuplicateNode(node));
            }
            if neighbors.contains(&node) {
                return Err(TopologyError::SelfLoop(node));
            }
            pending.push((node, neighbors));
        }

        if topology.order.is_empty() {
            return Err(TopologyError::Empty);
        }

        for (node, neighbors) in pending {
            for neighbor in neighbors {
                topology.add_link(&node, neighbor);
            }
        }

        Ok(topology)
    }

    /// Add a node; returns false if it was already present
    pub fn add_node(&mut self, id: NodeId) -> bool {
        if self.adjacency.contains_key(&id) {
            return false;
        }
        self.adjacency.insert(id.clone(), Vec::new());
        self.order.push(id);
        true
    }

    /// Append `to` to the neighbor list of `from`
    ///
    /// Both nodes are created if missing. Repeats are kept.
    pub fn add_link(&mut self, from: &NodeId, to: NodeId) {
        self.add_node(from.clone());
        self.add_node(to.clone());
        if let Some(neighbors) = self.adjacency.get_mut(from) {
            neighbors.push(to);
        }
    }

    /// Add a bidirectional connection between two nodes
    ///
    /// Self-loops and already-present directions are ignored.
    pub fn connect(&mut self, a: &NodeId, b: &NodeId) {
        if a == b {
            return;
        }
        if !self.are_connected(a, b) {
            self.add_link(a, b.clone());
        }
        if !self.are_connected(b, a) {
            self.add_link(b, a.clone());
        }
    }

    /// Get neighbors of a node
    pub fn neighbors_of(&self, node: &NodeId) -> Option<&[NodeId]> {
        self.adjacency.get(node).map(Vec::as_slice)
    }

    /// Number of directed neighbor entries
    pub fn link_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Check that every directed entry has its reverse
    pub fn is_symmetric(&self) -> bool {
        self.order.iter().all(|a| {
            self.neighbors(a)
                .iter()
                .all(|b| self.neighbors(b).contains(a))
        })
    }

    /// Iterate nodes with their neighbor lists, in node order
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &[NodeId])> {
        self.order
            .iter()
            .map(move |id| (id, self.neighbors(id)))
    }

    /// Print a simple ASCII visualization of the topology
    pub fn visualize(&self) -> String {
        let mut output = String::new();
        output.push_str("Mesh Topology:\n");
        output.push_str(&format!("  Nodes: {}\n", self.order.len()));
        output.push_str(&format!("  Links: {}\n\n", self.link_count()));

        for (node, neighbors) in self.iter() {
            let neighbor_str: Vec<&str> = neighbors.iter().map(NodeId::as_str).collect();
            output.push_str(&format!("  {} -> [{}]\n", node, neighbor_str.join(", ")));
        }
        output
    }
}

impl NetworkTopology for Topology {
    fn node_ids(&self) -> &[NodeId] {
        &self.order
    }

    fn neighbors(&self, node: &NodeId) -> &[NodeId] {
        self.neighbors_of(node).unwrap_or(&[])
    }

    fn contains(&self, node: &NodeId) -> bool {
        self.adjacency.contains_key(node)
    }
}

/// One direction of a link
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub from: NodeId,
    pub to: NodeId,
}

impl Link {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Adjacency left after one failure pass
///
/// Created and owned by a single simulation run. Every surviving
/// direction is mirrored, so a node's list may name the same neighbor
/// more than once.
#[derive(Debug, Clone)]
pub struct PerturbedTopology {
    adjacency: Topology,
    failure_probability: f64,
    failed_links: Vec<Link>,
    restored_links: Vec<Link>,
}

impl PerturbedTopology {
    /// Start from the nodes of `original` with no links
    pub fn empty_like(original: &Topology, failure_probability: f64) -> Self {
        let mut adjacency = Topology::new();
        for id in original.node_ids() {
            adjacency.add_node(id.clone());
        }
        Self {
            adjacency,
            failure_probability,
            failed_links: Vec::new(),
            restored_links: Vec::new(),
        }
    }

    /// Record a surviving direction and mirror it
    pub fn link_both_ways(&mut self, a: &NodeId, b: &NodeId) {
        self.adjacency.add_link(a, b.clone());
        self.adjacency.add_link(b, a.clone());
    }

    /// Record a direction whose draw failed
    pub fn record_failure(&mut self, from: &NodeId, to: &NodeId) {
        self.failed_links.push(Link::new(from.clone(), to.clone()));
    }

    /// Record a forced restoration
    pub fn record_restore(&mut self, from: &NodeId, to: &NodeId) {
        self.restored_links.push(Link::new(from.clone(), to.clone()));
    }

    /// Probability this topology was produced with
    pub fn failure_probability(&self) -> f64 {
        self.failure_probability
    }

    /// Directions whose draw failed, in evaluation order
    pub fn failed_links(&self) -> &[Link] {
        &self.failed_links
    }

    /// Links re-added because a node would have been isolated
    pub fn restored_links(&self) -> &[Link] {
        &self.restored_links
    }

    /// Borrow the surviving adjacency
    pub fn as_topology(&self) -> &Topology {
        &self.adjacency
    }

    /// Take the surviving adjacency
    pub fn into_topology(self) -> Topology {
        self.adjacency
    }
}

impl NetworkTopology for PerturbedTopology {
    fn node_ids(&self) -> &[NodeId] {
        self.adjacency.node_ids()
    }

    fn neighbors(&self, node: &NodeId) -> &[NodeId] {
        self.adjacency.neighbors(node)
    }

    fn contains(&self, node: &NodeId) -> bool {
        self.adjacency.contains(node)
    }
}
