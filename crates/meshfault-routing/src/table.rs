//! Distance table produced by a path query
//!
//! The [`DistanceTable`] is built once per query and is read-only
//! afterwards. Entries follow the topology's node order.

use std::collections::HashMap;

use meshfault_core::NodeId;
use serde::{Deserialize, Serialize};

/// Best known route to a node
///
/// A known path lists the hops after the start node, so the start itself
/// maps to an empty path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathStatus {
    Known(Vec<NodeId>),
    Unreachable,
}

impl PathStatus {
    /// Number of hops, or `None` if unreachable
    pub fn hop_count(&self) -> Option<usize> {
        match self {
            Self::Known(path) => Some(path.len()),
            Self::Unreachable => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// The hop sequence, if known
    pub fn path(&self) -> Option<&[NodeId]> {
        match self {
            Self::Known(path) => Some(path),
            Self::Unreachable => None,
        }
    }

    /// Strictly fewer hops than `other`; unreachable counts as infinite
    pub(crate) fn is_shorter_than(&self, other: &Self) -> bool {
        match (self.hop_count(), other.hop_count()) {
            (Some(a), Some(b)) => a < b,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

/// Finalized paths from one start node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceTable {
    start: NodeId,
    entries: Vec<(NodeId, PathStatus)>,
    index: HashMap<NodeId, usize>,
}

impl DistanceTable {
    pub(crate) fn new(start: NodeId, entries: Vec<(NodeId, PathStatus)>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (id, _))| (id.clone(), i))
            .collect();
        Self {
            start,
            entries,
            index,
        }
    }

    /// The node every path starts from
    pub fn start(&self) -> &NodeId {
        &self.start
    }

    /// Status for a node, or `None` if the node was not in the topology
    pub fn status(&self, node: &NodeId) -> Option<&PathStatus> {
        self.index.get(node).map(|&i| &self.entries[i].1)
    }

    /// Hops from the start to `node`, if a path exists
    pub fn path_to(&self, node: &NodeId) -> Option<&[NodeId]> {
        self.status(node).and_then(PathStatus::path)
    }

    pub fn hop_count(&self, node: &NodeId) -> Option<usize> {
        self.status(node).and_then(PathStatus::hop_count)
    }

    pub fn is_reachable(&self, node: &NodeId) -> bool {
        self.status(node).is_some_and(PathStatus::is_known)
    }

    /// Iterate entries in topology node order
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &PathStatus)> {
        self.entries.iter().map(|(id, status)| (id, status))
    }

    /// Number of nodes with a known path (the start included)
    pub fn reachable_count(&self) -> usize {
        self.entries.iter().filter(|(_, s)| s.is_known()).count()
    }

    /// Nodes no surviving path reaches
    pub fn unreachable(&self) -> Vec<&NodeId> {
        self.entries
            .iter()
            .filter(|(_, s)| !s.is_known())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(label: &str) -> NodeId {
        NodeId::new(label).unwrap()
    }

    #[test]
    fn test_unreachable_sorts_after_every_path() {
        let long = PathStatus::Known(vec![id("B"); 40]);
        assert!(long.is_shorter_than(&PathStatus::Unreachable));
        assert!(!PathStatus::Unreachable.is_shorter_than(&long));
        assert!(!PathStatus::Unreachable.is_shorter_than(&PathStatus::Unreachable));
        assert!(!long.is_shorter_than(&long.clone()));
    }

    #[test]
    fn test_table_lookups() {
        let table = DistanceTable::new(
            id("A"),
            vec![
                (id("A"), PathStatus::Known(vec![])),
                (id("B"), PathStatus::Known(vec![id("B")])),
                (id("C"), PathStatus::Unreachable),
            ],
        );

        assert_eq!(table.start(), &id("A"));
        assert_eq!(table.hop_count(&id("A")), Some(0));
        assert_eq!(table.path_to(&id("B")), Some(&[id("B")][..]));
        assert_eq!(table.status(&id("C")), Some(&PathStatus::Unreachable));
        assert!(table.status(&id("Z")).is_none());
        assert!(!table.is_reachable(&id("C")));
        assert_eq!(table.reachable_count(), 2);
        assert_eq!(table.unreachable(), vec![&id("C")]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_status_serializes_as_tagged_variant() {
        let json = serde_json::to_string(&PathStatus::Unreachable).unwrap();
        assert_eq!(json, "\"Unreachable\"");
        let known = serde_json::to_string(&PathStatus::Known(vec![id("D")])).unwrap();
        assert_eq!(known, "{\"Known\":[\"D\"]}");
    }
}
