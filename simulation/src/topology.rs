//! Topology sources for meshfault
//!
//! Provides the ideal networks a simulation starts from:
//! - Sample: the fixed 14-node mesh (A..N)
//! - Ring, line, star, full mesh over single-letter labels
//! - Custom: built from an edge list
//! - File: JSON adjacency listing loaded from disk

use std::fs;
use std::path::Path;

use meshfault_core::{MeshError, NetworkTopology, NodeId, Topology, TopologyError};
use serde::{Deserialize, Serialize};

use crate::error::{SimulationError, SimulationResult};

/// Adjacency of the sample mesh, in the order nodes are evaluated
pub const SAMPLE_MESH: &[(&str, &[&str])] = &[
    ("A", &["B", "C"]),
    ("B", &["A", "D"]),
    ("C", &["A", "D"]),
    ("D", &["B", "C", "E", "F"]),
    ("E", &["D", "G"]),
    ("F", &["D", "G", "H"]),
    ("G", &["E", "F"]),
    ("H", &["F", "I"]),
    ("I", &["H", "J", "K"]),
    ("J", &["I", "K", "L"]),
    ("K", &["I", "J", "L", "M", "N"]),
    ("L", &["J", "K", "N"]),
    ("M", &["K", "N"]),
    ("N", &["K", "L", "M"]),
];

/// Maximum nodes [`MeshBuilder`] can label (A-Z)
pub const MAX_BUILDER_NODES: usize = 26;

/// The fixed 14-node sample mesh
pub fn sample_mesh() -> Topology {
    from_adjacency_labels(SAMPLE_MESH).expect("sample mesh is well-formed")
}

/// Build a topology from a label adjacency listing, preserving order
pub fn from_adjacency_labels(entries: &[(&str, &[&str])]) -> Result<Topology, MeshError> {
    let mut parsed = Vec::with_capacity(entries.len());
    for (node, neighbors) in entries {
        let neighbors = neighbors
            .iter()
            .map(|label| NodeId::new(*label))
            .collect::<Result<Vec<_>, _>>()?;
        parsed.push((NodeId::new(*node)?, neighbors));
    }
    Ok(Topology::from_adjacency(parsed)?)
}

/// Create an undirected topology from an edge list
pub fn from_edges(edges: &[(&str, &str)]) -> Result<Topology, MeshError> {
    let mut topology = Topology::new();
    for (a, b) in edges {
        let a = NodeId::new(*a)?;
        let b = NodeId::new(*b)?;
        if a == b {
            return Err(TopologyError::SelfLoop(a).into());
        }
        topology.connect(&a, &b);
    }
    if topology.node_ids().is_empty() {
        return Err(TopologyError::Empty.into());
    }
    Ok(topology)
}

/// Builder for regular topologies over labels A, B, C, ...
pub struct MeshBuilder {
    nodes: Vec<NodeId>,
}

impl MeshBuilder {
    /// Create a builder with the given number of nodes (max 26)
    pub fn new(node_count: usize) -> Result<Self, TopologyError> {
        if node_count > MAX_BUILDER_NODES {
            return Err(TopologyError::TooManyNodes {
                requested: node_count,
                max: MAX_BUILDER_NODES,
            });
        }
        let nodes = NodeId::range_to('Z').into_iter().take(node_count).collect();
        Ok(Self { nodes })
    }

    fn isolated(&self) -> Topology {
        let mut topology = Topology::new();
        for node in &self.nodes {
            topology.add_node(node.clone());
        }
        topology
    }

    /// Build a ring topology where each node is connected to its neighbors
    ///
    /// A - B - C - D - ... - A
    pub fn ring(self) -> Topology {
        let mut topology = self.isolated();
        let n = self.nodes.len();
        for i in 0..n {
            topology.connect(&self.nodes[i], &self.nodes[(i + 1) % n]);
        }
        topology
    }

    /// Build a line topology: A - B - C - D - ...
    pub fn line(self) -> Topology {
        let mut topology = self.isolated();
        for pair in self.nodes.windows(2) {
            topology.connect(&pair[0], &pair[1]);
        }
        topology
    }

    /// Build a star topology: A in center, connected to all others
    pub fn star(self) -> Topology {
        let mut topology = self.isolated();
        if let Some((center, rest)) = self.nodes.split_first() {
            for node in rest {
                topology.connect(center, node);
            }
        }
        topology
    }

    /// Build a full mesh where every node is connected to every other
    pub fn full_mesh(self) -> Topology {
        let mut topology = self.isolated();
        for (i, a) in self.nodes.iter().enumerate() {
            for b in &self.nodes[i + 1..] {
                topology.connect(a, b);
            }
        }
        topology
    }
}

/// On-disk topology description
///
/// ```json
/// { "nodes": [ { "id": "A", "neighbors": ["B", "C"] } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyFile {
    pub nodes: Vec<NodeEntry>,
}

/// One node and its ordered neighbor list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEntry {
    pub id: NodeId,
    #[serde(default)]
    pub neighbors: Vec<NodeId>,
}

impl TopologyFile {
    /// Load and validate a topology from a JSON file
    pub fn load(path: impl AsRef<Path>) -> SimulationResult<Topology> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| SimulationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: Self = serde_json::from_str(&raw).map_err(|source| SimulationError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(file.into_topology()?)
    }

    /// Describe an existing topology
    pub fn from_topology(topology: &Topology) -> Self {
        let nodes = topology
            .iter()
            .map(|(id, neighbors)| NodeEntry {
                id: id.clone(),
                neighbors: neighbors.to_vec(),
            })
            .collect();
        Self { nodes }
    }

    /// Validate into a [`Topology`]
    pub fn into_topology(self) -> Result<Topology, TopologyError> {
        Topology::from_adjacency(self.nodes.into_iter().map(|n| (n.id, n.neighbors)))
    }
}
