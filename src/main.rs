//! # Graph Drill - CLI Entry Point
//!
//! Command-line interface for the graph theory drill.
//!
//! Commands:
//! - `play`        - Run the interactive drill loop until mastery
//! - `generate`    - Generate one random graph and print it
//! - `init-config` - Generate a default configuration file

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use graph_drill::graph::generator::{GraphGenerator, Topology};
use graph_drill::mastery::Correctness;
use graph_drill::session::{HostSink, ParamValue, Session};
use graph_drill::{DrillConfig, DrillResult, Verdict};

/// Graph Drill - mastery-based graph theory practice.
///
/// Generates a random graph each round, asks a structural question about
/// it, and tracks a rolling window of correct answers until mastery.
#[derive(Parser, Debug)]
#[command(name = "graph-drill")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, default_value = "graph-drill.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the interactive drill loop until mastery (or EOF).
    Play,

    /// Generate one random graph and print it.
    Generate {
        /// Override the rng seed for this graph.
        #[arg(long)]
        seed: Option<u64>,

        /// Print the graph as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Generate a default configuration file.
    InitConfig,
}

fn main() -> DrillResult<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play => cmd_play(&cli.config),
        Commands::Generate { seed, json } => cmd_generate(&cli.config, seed, json),
        Commands::InitConfig => cmd_init_config(&cli.config),
    }
}

/// Load the config file if present, else fall back to defaults.
fn load_config(path: &Path) -> DrillResult<DrillConfig> {
    if path.exists() {
        info!("Loading configuration from: {}", path.display());
        DrillConfig::from_file(path)
    } else {
        info!("No config file found, using defaults. Run 'init-config' to generate one.");
        Ok(DrillConfig::default())
    }
}

/// Host adapter that forwards published parameters to the log. Stands in
/// for the external grading/telemetry collaborator.
struct LogSink;

impl HostSink for LogSink {
    fn publish(&mut self, name: &str, value: ParamValue) {
        debug!("host param: {} = {}", name, value);
    }
}

/// The interactive drill loop: draw the history and graph, ask, grade,
/// repeat until mastery is reached or input runs out.
fn cmd_play(config_path: &Path) -> DrillResult<()> {
    let config = load_config(config_path)?;
    let mut session = Session::new(&config)?;

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = std::io::stdout();

    println!(
        "Answer {} of the last {} questions correctly to reach mastery.",
        session.tracker().numerator(),
        session.tracker().denominator()
    );

    loop {
        session.next_round()?;

        println!();
        println!("history: {}", render_history(&session));
        print!("{}", session.store());
        println!("{}", session.current_question().map(|q| q.text.as_str()).unwrap_or(""));
        print!("> ");
        stdout.flush()?;

        let submission = match lines.next() {
            Some(line) => line?,
            None => {
                println!();
                info!("input closed, ending session");
                break;
            }
        };

        if let Some(outcome) = session.submit_answer(&submission) {
            match outcome.verdict {
                Verdict::Correct => println!("Correct!"),
                Verdict::Incorrect => {
                    let expected = outcome
                        .expected
                        .iter()
                        .map(|a| a.to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    println!("Incorrect. The correct answer is {}.", expected);
                }
            }
            session.publish_params(&mut LogSink);

            if outcome.mastery_reached {
                println!();
                println!("history: {}", render_history(&session));
                println!("Mastery reached. Well done!");
                break;
            }
        }
    }

    Ok(())
}

/// Render the answer history as one square per window slot.
fn render_history(session: &Session) -> String {
    session
        .tracker()
        .history()
        .entries()
        .map(|entry| match entry {
            Correctness::Unanswered => "[ ]",
            Correctness::Correct => "[+]",
            Correctness::Incorrect => "[x]",
        })
        .collect()
}

/// Generate a single graph and print it, for eyeballing topologies and
/// seeds without starting a session.
fn cmd_generate(config_path: &Path, seed: Option<u64>, json: bool) -> DrillResult<()> {
    let config = load_config(config_path)?;

    let topology = match &config.topology {
        Some(entries) => Topology::from_entries(entries.clone()),
        None => Topology::base(),
    };
    let generator = GraphGenerator::new(topology, config.graph.undirected, config.graph.max_cost);

    let mut rng = match seed.or(config.graph.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let graph = generator.generate(&mut rng);

    if json {
        println!("{}", serde_json::to_string_pretty(&graph)?);
    } else {
        print!("{}", graph);
        println!(
            "connected nodes: {}, cardinality: {}",
            graph.connected_vertices().len(),
            graph.cardinality()
        );
    }
    Ok(())
}

/// Write the default configuration file.
fn cmd_init_config(config_path: &Path) -> DrillResult<()> {
    if config_path.exists() {
        println!(
            "Config file already exists at {}, not overwriting.",
            config_path.display()
        );
        return Ok(());
    }
    DrillConfig::write_default(config_path)?;
    println!("Default configuration written to {}", config_path.display());
    Ok(())
}
