//! Hop-count shortest paths
//!
//! A Dijkstra-style relaxation where every link weighs one hop, which makes
//! it equivalent to breadth-first search. Distances are explicit paths and
//! path length is the comparison key.

use std::collections::HashMap;

use meshfault_core::{NetworkTopology, NodeId};
use tracing::{debug, trace};

use crate::error::{RoutingError, RoutingResult};
use crate::table::{DistanceTable, PathStatus};

/// Compute the shortest path from `start` to every node of `topology`
///
/// Each round finalizes the unvisited node with the shortest known path,
/// preferring the earliest one in node order on ties, then relaxes its
/// unvisited neighbors. Repeated neighbor entries are harmless because a
/// path is only replaced by a strictly shorter one. Nodes the search never
/// reaches stay [`PathStatus::Unreachable`].
///
/// # Errors
///
/// Returns [`RoutingError::InvalidInput`] if `start` is not in `topology`.
pub fn shortest_paths<T>(topology: &T, start: &NodeId) -> RoutingResult<DistanceTable>
where
    T: NetworkTopology + ?Sized,
{
    if !topology.contains(start) {
        return Err(RoutingError::InvalidInput {
            node: start.clone(),
        });
    }

    let order = topology.node_ids();
    let index: HashMap<&NodeId, usize> = order.iter().enumerate().map(|(i, id)| (id, i)).collect();

    let mut paths = vec![PathStatus::Unreachable; order.len()];
    let mut finalized = vec![false; order.len()];
    let mut unvisited: Vec<usize> = (0..order.len()).collect();
    if let Some(&i) = index.get(start) {
        paths[i] = PathStatus::Known(Vec::new());
    }

    while !unvisited.is_empty() {
        let mut best = 0;
        for (slot, &node) in unvisited.iter().enumerate().skip(1) {
            if paths[node].is_shorter_than(&paths[unvisited[best]]) {
                best = slot;
            }
        }

        let current = unvisited.remove(best);
        finalized[current] = true;

        // Everything still unvisited is at least as far as this node
        let current_path = match &paths[current] {
            PathStatus::Known(path) => path.clone(),
            PathStatus::Unreachable => {
                trace!(remaining = unvisited.len() + 1, "no further nodes reachable");
                break;
            }
        };
        trace!(node = %order[current], hops = current_path.len(), "finalized");

        for neighbor in topology.neighbors(&order[current]) {
            let Some(&n) = index.get(neighbor) else {
                continue;
            };
            if finalized[n] {
                continue;
            }

            let improves = match &paths[n] {
                PathStatus::Unreachable => true,
                PathStatus::Known(existing) => current_path.len() + 1 < existing.len(),
            };
            if improves {
                let mut candidate = current_path.clone();
                candidate.push(neighbor.clone());
                paths[n] = PathStatus::Known(candidate);
            }
        }
    }

    let entries: Vec<(NodeId, PathStatus)> = order.iter().cloned().zip(paths).collect();
    let table = DistanceTable::new(start.clone(), entries);
    debug!(
        start = %start,
        nodes = table.len(),
        reachable = table.reachable_count(),
        "computed shortest paths"
    );

    Ok(table)
}
