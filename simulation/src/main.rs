//! Meshfault - mesh link failure and rerouting simulator
//!
//! Breaks links of a mesh at random, keeps every node attached to at least
//! one neighbor, then finds the fewest-hop route between two nodes.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use meshfault_logging::{FileConfig, MeshSubscriberBuilder, RotationStrategy};
use meshfault_simulation::{
    MeshBuilder, NodeId, SimConfig, Simulation, Topology, TopologyFile, parse_probability,
    sample_mesh, scenarios,
};

#[derive(Parser)]
#[command(
    name = "meshfault",
    about = "Mesh network simulation with random link failures and hop-count rerouting",
    version
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines instead of human-readable text
    #[arg(long, global = true)]
    json_logs: bool,

    /// Also write JSONL logs into this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for start, end and failure probability, then route once
    Interactive {
        /// JSON topology file (defaults to the sample mesh)
        #[arg(short, long)]
        topology: Option<PathBuf>,
    },

    /// Route between two nodes without prompting
    Route {
        #[arg(short, long)]
        start: NodeId,

        #[arg(short, long)]
        end: NodeId,

        /// Probability each link direction breaks (not range-checked)
        #[arg(short, long, default_value = "0.0", allow_negative_numbers = true)]
        probability: f64,

        /// Seed for a reproducible failure pass
        #[arg(long)]
        seed: Option<u64>,

        /// JSON topology file (defaults to the sample mesh)
        #[arg(short, long)]
        topology: Option<PathBuf>,

        /// JSON simulation config; command line flags override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// List broken and restored links
        #[arg(long)]
        show_failures: bool,
    },

    /// Create and visualize a topology
    Topology {
        #[arg(short, long, value_enum, default_value = "sample")]
        kind: TopologyKind,

        /// Number of nodes for generated kinds (max 26)
        #[arg(short, long, default_value = "6")]
        nodes: usize,
    },

    /// Run the network partition scenario
    Partition,
}

#[derive(Clone, Copy, ValueEnum)]
enum TopologyKind {
    Sample,
    Ring,
    Line,
    Star,
    Full,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logging = MeshSubscriberBuilder::new()
        .with_level(if cli.verbose { "debug" } else { "info" })
        .with_json(cli.json_logs);
    if let Some(directory) = cli.log_dir {
        logging = logging.with_file_output(FileConfig {
            directory,
            prefix: "meshfault".to_string(),
            rotation: RotationStrategy::Never,
        });
    }
    let _guard = logging.init().context("failed to initialize logging")?;

    match cli.command.unwrap_or(Commands::Interactive { topology: None }) {
        Commands::Interactive { topology } => {
            let stdin = io::stdin();
            run_interactive(load_topology(topology)?, &mut stdin.lock(), &mut io::stdout())?;
        }
        Commands::Route {
            start,
            end,
            probability,
            seed,
            topology,
            config,
            show_failures,
        } => {
            let mut sim_config = match config {
                Some(path) => SimConfig::from_json_file(path)?,
                None => SimConfig::default(),
            };
            sim_config.failure_probability = probability;
            if let Some(seed) = seed {
                sim_config = sim_config.with_seed(seed);
            }

            let sim = Simulation::new(load_topology(topology)?, sim_config);
            let outcome = sim.run(&start, &end)?;
            if show_failures {
                print!("{}", outcome.broken_links_report());
            }
            println!("{}", outcome.render());
        }
        Commands::Topology { kind, nodes } => {
            let mesh = match kind {
                TopologyKind::Sample => sample_mesh(),
                TopologyKind::Ring => MeshBuilder::new(nodes)?.ring(),
                TopologyKind::Line => MeshBuilder::new(nodes)?.line(),
                TopologyKind::Star => MeshBuilder::new(nodes)?.star(),
                TopologyKind::Full => MeshBuilder::new(nodes)?.full_mesh(),
            };
            println!("{}", mesh.visualize());
        }
        Commands::Partition => {
            scenarios::run_partition_scenario()?;
        }
    }

    Ok(())
}

fn load_topology(path: Option<PathBuf>) -> anyhow::Result<Topology> {
    match path {
        Some(path) => {
            let topology = TopologyFile::load(&path)?;
            info!(path = %path.display(), "loaded topology");
            Ok(topology)
        }
        None => Ok(sample_mesh()),
    }
}

fn prompt(input: &mut impl BufRead, output: &mut impl Write, message: &str) -> anyhow::Result<String> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        anyhow::bail!("input closed before an answer was given");
    }
    Ok(line.trim().to_string())
}

fn run_interactive(
    topology: Topology,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<()> {
    let start: NodeId = prompt(input, output, "Input the start node: ")?.parse()?;
    let end: NodeId = prompt(input, output, "Input the end node: ")?.parse()?;
    let probability = parse_probability(&prompt(
        input,
        output,
        "Input the probability of a node/link breaking: ",
    )?)?;

    let sim = Simulation::new(topology, SimConfig::default().with_probability(probability));
    let outcome = sim.run(&start, &end)?;
    writeln!(output, "{}", outcome.render())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use meshfault_simulation::{NO_PATH_FOUND, SimulationError, from_edges};

    fn interact(topology: Topology, answers: &str) -> (anyhow::Result<()>, String) {
        let mut output = Vec::new();
        let result = run_interactive(topology, &mut Cursor::new(answers), &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_route_accepts_negative_probability() {
        let cli = Cli::try_parse_from(["meshfault", "route", "-s", "A", "-e", "N", "-p", "-0.5"])
            .unwrap();
        match cli.command {
            Some(Commands::Route {
                start,
                end,
                probability,
                ..
            }) => {
                assert_eq!(start.as_str(), "A");
                assert_eq!(end.as_str(), "N");
                assert_eq!(probability, -0.5);
            }
            _ => panic!("expected the route subcommand"),
        }
    }

    #[test]
    fn test_route_probability_defaults_to_zero() {
        let cli = Cli::try_parse_from(["meshfault", "route", "--start", "A", "--end", "B"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Route { probability, .. }) if probability == 0.0
        ));
    }

    #[test]
    fn test_interactive_prompts_and_routes() {
        let (result, output) = interact(sample_mesh(), "A\nN\n0\n");
        result.unwrap();
        assert_eq!(
            output,
            "Input the start node: Input the end node: \
             Input the probability of a node/link breaking: \
             Shortest path: A -> B -> D -> F -> H -> I -> K -> N (7 hops)\n"
        );
    }

    #[test]
    fn test_interactive_reports_unreachable_end() {
        let mesh = from_edges(&[("A", "B"), ("C", "D")]).unwrap();
        let (result, output) = interact(mesh, " A \nD\n-0.5\n");
        result.unwrap();
        assert!(output.ends_with(&format!("{NO_PATH_FOUND}\n")));
    }

    #[test]
    fn test_interactive_rejects_unparsable_probability() {
        let (result, output) = interact(sample_mesh(), "A\nN\noften\n");
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SimulationError>(),
            Some(SimulationError::InvalidProbability(input)) if input == "often"
        ));
        assert!(!output.contains("Shortest path"));
    }

    #[test]
    fn test_interactive_errors_when_input_ends_early() {
        let (result, output) = interact(sample_mesh(), "A\n");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("input closed"));
        assert!(output.ends_with("Input the end node: "));
    }

    #[test]
    fn test_interactive_rejects_unknown_node() {
        let (result, _) = interact(sample_mesh(), "A\nQ\n0.1\n");
        assert!(result.unwrap_err().to_string().contains("node Q"));
    }
}
