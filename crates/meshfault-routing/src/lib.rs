//! # Meshfault Routing
//!
//! Unweighted shortest paths over a (possibly degraded) mesh.
//!
//! ## Core Components
//!
//! - [`shortest_paths`]: Dijkstra-style search where every link costs one hop
//! - [`DistanceTable`]: Finalized path (or [`PathStatus::Unreachable`]) per node
//!
//! ## Algorithm
//!
//! Distances are carried as explicit paths rather than scalars, and the
//! path length is the comparison key. Each round finalizes the unvisited
//! node with the shortest known path; ties go to whichever comes first in
//! the topology's node order. Unreachable nodes never acquire a path and
//! are reported as [`PathStatus::Unreachable`], never as a magic number.
//!
//! ## Example
//!
//! ```rust,ignore
//! use meshfault_routing::{shortest_paths, PathStatus};
//!
//! let table = shortest_paths(&perturbed, &start)?;
//! match table.status(&end) {
//!     Some(PathStatus::Known(path)) => println!("{} hops", path.len()),
//!     _ => println!("No path found."),
//! }
//! ```

pub mod error;
pub mod pathfinder;
pub mod table;

// Re-export main types
pub use error::{RoutingError, RoutingResult};
pub use pathfinder::shortest_paths;
pub use table::{DistanceTable, PathStatus};
