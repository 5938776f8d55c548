//! # Meshfault Core
//!
//! Core types, traits, and errors shared by the meshfault crates.
//!
//! A simulation run starts from an ideal [`Topology`], degrades it into a
//! [`PerturbedTopology`] by failing links at random, and then asks the
//! routing crate for hop-count shortest paths over what survived.
//!
//! ## Key Traits
//!
//! - [`NetworkTopology`]: Read-only adjacency view consumed by path finding
//! - [`RandomSource`]: Injected randomness for failure draws
//!
//! ## Key Types
//!
//! - [`NodeId`]: Opaque string label of a mesh node
//! - [`Topology`]: Ordered node -> neighbor list mapping (the ideal network)
//! - [`PerturbedTopology`]: Surviving links after one failure pass

pub mod error;
pub mod identity;
pub mod random;
pub mod topology;
pub mod traits;

// Re-export main types
pub use error::*;
pub use identity::*;
pub use random::*;
pub use topology::*;
pub use traits::*;
