//! Link failure injection
//!
//! Turns an ideal [`Topology`] into a [`PerturbedTopology`]:
//! - Every direction of every link draws once; it survives iff the draw
//!   is strictly greater than the failure probability
//! - A node whose own draws all failed gets one original neighbor back,
//!   chosen uniformly at random
//! - Every kept direction is mirrored so no link is one-way
//!
//! The probability is not range-checked. Anything at or below 0 keeps every
//! link and anything at or above 1 fails every link.

use meshfault_core::{NodeId, PerturbedTopology, RandomSource, Topology};
use meshfault_logging::spans;
use tracing::{debug, info, info_span, warn};

/// Applies independent per-direction link failures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FailureSimulator {
    probability: f64,
    trace_links: bool,
}

impl FailureSimulator {
    pub fn new(probability: f64) -> Self {
        Self {
            probability,
            trace_links: false,
        }
    }

    /// Log every individual survive/fail decision at debug level
    pub fn with_link_tracing(mut self, enabled: bool) -> Self {
        self.trace_links = enabled;
        self
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Run one failure pass over `topology`
    ///
    /// Consumes one draw per neighbor entry, in node order then neighbor
    /// order, plus one pick for every node that had to be restored.
    pub fn simulate<R>(&self, topology: &Topology, rng: &mut R) -> PerturbedTopology
    where
        R: RandomSource + ?Sized,
    {
        let span = info_span!(spans::FAILURE_PASS, probability = self.probability);
        let _enter = span.enter();

        let mut perturbed = PerturbedTopology::empty_like(topology, self.probability);

        for (node, neighbors) in topology.iter() {
            let mut survivors: Vec<&NodeId> = Vec::with_capacity(neighbors.len());

            for neighbor in neighbors {
                let draw = rng.next_unit();
                if draw > self.probability {
                    survivors.push(neighbor);
                } else {
                    perturbed.record_failure(node, neighbor);
                }
                if self.trace_links {
                    debug!(
                        from = %node,
                        to = %neighbor,
                        draw,
                        survived = draw > self.probability,
                        "link draw"
                    );
                }
            }

            // Nodes with no original neighbors have nothing to restore
            if survivors.is_empty() && !neighbors.is_empty() {
                let pick = rng.pick_index(neighbors.len());
                if let Some(restored) = neighbors.get(pick) {
                    warn!(node = %node, neighbor = %restored, "every link failed, restoring one");
                    perturbed.record_restore(node, restored);
                    survivors.push(restored);
                }
            }

            for survivor in survivors {
                perturbed.link_both_ways(node, survivor);
            }
        }

        info!(
            failed = perturbed.failed_links().len(),
            restored = perturbed.restored_links().len(),
            "failure pass complete"
        );
        perturbed
    }
}

/// Run one failure pass; shorthand for [`FailureSimulator::simulate`]
pub fn simulate<R>(topology: &Topology, probability: f64, rng: &mut R) -> PerturbedTopology
where
    R: RandomSource + ?Sized,
{
    FailureSimulator::new(probability).simulate(topology, rng)
}
