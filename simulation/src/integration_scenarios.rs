//! Integration scenarios testing the full meshfault stack
//!
//! These scenarios exercise:
//! - meshfault-core (Topology, PerturbedTopology, RandomSource)
//! - the failure pass (FailureSimulator)
//! - meshfault-routing (shortest_paths, DistanceTable)
//! - the orchestrator (Simulation, RunOutcome rendering)

use meshfault_core::{NetworkTopology, NodeId, RngSource, ScriptedSource};
use meshfault_routing::{PathStatus, shortest_paths};

use crate::failure::FailureSimulator;
use crate::scenarios::{run_partition_scenario, run_total_failure_scenario};
use crate::simulation::{NO_PATH_FOUND, SimConfig, Simulation};
use crate::topology::{MeshBuilder, from_edges, sample_mesh};

fn id(label: &str) -> NodeId {
    NodeId::new(label).unwrap()
}

/// Every node with an original neighbor keeps at least one after the pass
#[test]
fn test_connectivity_invariant() {
    let mesh = sample_mesh();
    for seed in 0..100 {
        for probability in [0.25, 0.5, 0.9, 1.0, 3.0] {
            let perturbed =
                FailureSimulator::new(probability).simulate(&mesh, &mut RngSource::seeded(seed));
            for node in mesh.node_ids() {
                assert!(
                    !perturbed.neighbors(node).is_empty(),
                    "{node} isolated at p={probability}, seed={seed}"
                );
            }
        }
    }
}

/// Every surviving direction has its reverse
#[test]
fn test_symmetry_invariant() {
    let mesh = MeshBuilder::new(10).unwrap().full_mesh();
    for seed in 0..50 {
        let perturbed = FailureSimulator::new(0.7).simulate(&mesh, &mut RngSource::seeded(seed));
        for node in perturbed.node_ids() {
            for neighbor in perturbed.neighbors(node) {
                assert!(perturbed.are_connected(neighbor, node));
            }
        }
    }
}

/// Probability 0 keeps the whole mesh; probability 1 keeps one restored link per node
#[test]
fn test_probability_extremes() {
    let mesh = sample_mesh();

    let intact = FailureSimulator::new(0.0).simulate(&mesh, &mut RngSource::seeded(3));
    for (node, neighbors) in mesh.iter() {
        for neighbor in neighbors {
            assert!(intact.are_connected(node, neighbor));
            assert!(intact.are_connected(neighbor, node));
        }
    }

    let shattered = FailureSimulator::new(1.0).simulate(&mesh, &mut RngSource::seeded(3));
    assert_eq!(shattered.restored_links().len(), mesh.node_count());
    for node in mesh.node_ids() {
        let own: Vec<_> = shattered
            .restored_links()
            .iter()
            .filter(|link| &link.from == node)
            .collect();
        assert_eq!(own.len(), 1, "{node}");
        assert!(!shattered.neighbors(node).is_empty());
    }
}

/// Hop counts never jump by more than one across a surviving link
#[test]
fn test_path_length_monotonicity() {
    let mesh = sample_mesh();
    for seed in 0..60 {
        let perturbed = FailureSimulator::new(0.5).simulate(&mesh, &mut RngSource::seeded(seed));
        let table = shortest_paths(&perturbed, &id("A")).unwrap();

        for node in perturbed.node_ids() {
            let Some(here) = table.hop_count(node) else {
                continue;
            };
            for neighbor in perturbed.neighbors(node) {
                let there = table
                    .hop_count(neighbor)
                    .expect("a neighbor of a reachable node is reachable");
                assert!(there <= here + 1);
                assert!(here <= there + 1);
            }
        }
    }
}

/// With no failures, A -> N on the sample mesh takes the undegraded distance
#[test]
fn test_sample_reachability_matches_ideal_distance() {
    let mesh = sample_mesh();
    let ideal = shortest_paths(&mesh, &id("A")).unwrap();

    let sim = Simulation::new(mesh, SimConfig::default().with_seed(8));
    let outcome = sim.run(&id("A"), &id("N")).unwrap();

    assert_eq!(outcome.hop_count(), ideal.hop_count(&id("N")));
    assert_eq!(outcome.hop_count(), Some(7));
}

/// Degradation can only lengthen routes, never shorten them
#[test]
fn test_failures_never_shorten_routes() {
    let mesh = sample_mesh();
    let ideal = shortest_paths(&mesh, &id("A")).unwrap();

    for seed in 0..40 {
        let sim = Simulation::new(
            mesh.clone(),
            SimConfig::default().with_probability(0.4).with_seed(seed),
        );
        let outcome = sim.run(&id("A"), &id("N")).unwrap();
        if let Some(hops) = outcome.hop_count() {
            assert!(hops >= 7, "seed {seed} found {hops} hops");
        }
    }
    assert!(ideal.is_reachable(&id("N")));
}

/// Disjoint components leave the end node unknown
#[test]
fn test_unreachable_case() {
    let outcome = run_partition_scenario().unwrap();
    assert_eq!(outcome.table.status(&id("F")), Some(&PathStatus::Unreachable));
    assert_eq!(outcome.render(), NO_PATH_FOUND);
    assert_eq!(outcome.render(), "No path found.");
}

/// The same perturbed topology and start give the same table twice
#[test]
fn test_idempotent_requery() {
    let mesh = sample_mesh();
    let perturbed = FailureSimulator::new(0.5).simulate(&mesh, &mut RngSource::seeded(17));

    let first = shortest_paths(&perturbed, &id("C")).unwrap();
    let second = shortest_paths(&perturbed, &id("C")).unwrap();
    assert_eq!(first, second);
}

/// A scripted failure pattern cuts the only bridge between two halves
#[test]
fn test_scripted_bridge_failure_reroutes() {
    // Square A-B-D-C-A: killing both directions of A-B forces A -> C -> D -> B
    let mesh = from_edges(&[("A", "B"), ("B", "D"), ("D", "C"), ("C", "A")]).unwrap();
    // Draw order follows node order A, B, D, C and each node's neighbor list:
    // A: [B, C]  B: [A, D]  D: [B, C]  C: [D, A]
    let draws = [0.1, 0.9, 0.1, 0.9, 0.9, 0.9, 0.9, 0.9];
    let sim = Simulation::new(mesh, SimConfig::default().with_probability(0.5));
    let outcome = sim
        .run_with(&id("A"), &id("B"), &mut ScriptedSource::new(draws, []))
        .unwrap();

    assert_eq!(outcome.perturbed.failed_links().len(), 2);
    assert!(!outcome.perturbed.are_connected(&id("A"), &id("B")));
    assert_eq!(
        outcome.render(),
        "Shortest path: A -> C -> D -> B (3 hops)"
    );
}

/// Independent runs never share state
#[test]
fn test_runs_are_independent() {
    let sim = Simulation::new(sample_mesh(), SimConfig::default().with_probability(0.5));
    for seed in 0..20 {
        let first = sim
            .run_with(&id("A"), &id("N"), &mut RngSource::seeded(seed))
            .unwrap();
        // An unrelated run in between must not leak into the next one
        sim.run_with(&id("C"), &id("K"), &mut RngSource::seeded(seed + 1000))
            .unwrap();
        let second = sim
            .run_with(&id("A"), &id("N"), &mut RngSource::seeded(seed))
            .unwrap();

        assert_eq!(first.route, second.route, "seed {seed}");
        assert_eq!(first.table, second.table, "seed {seed}");
        assert_eq!(first.perturbed.as_topology(), second.perturbed.as_topology());
        assert_eq!(first.perturbed.failed_links(), second.perturbed.failed_links());
    }
    // The ideal topology is untouched by any run
    assert_eq!(sim.topology(), &sample_mesh());
}

/// Forced restoration keeps every node routable from somewhere
#[test]
fn test_total_failure_scenario() {
    let outcome = run_total_failure_scenario(Some(4)).unwrap();
    assert_eq!(outcome.perturbed.restored_links().len(), 14);
    assert!(outcome.table.reachable_count() >= 2);
}
