//! Connect Four move selection and tournaments.
//!
//! `c4 play` reads a position file and prints the chosen move.
//! `c4 tournament` runs a round robin between algorithm configurations.

mod config;
mod report;
mod tournament;

use anyhow::{Context, Result};
use c4_board::parse_request;
use c4_mcts::{Algorithm, Mcts, MctsConfig, DEFAULT_EXPLORATION};
use clap::{Parser, Subcommand};
use config::load_config;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use report::{render, ReportMode};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Connect Four Monte Carlo player.
#[derive(Parser)]
#[command(name = "c4")]
#[command(about = "Pick Connect Four moves with UR, PMCGS or UCT")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose a move for the position in a request file.
    Play {
        /// Request file: algorithm, player to move, six board rows.
        input: PathBuf,

        /// Output detail.
        #[arg(value_enum)]
        mode: ReportMode,

        /// Simulations per move (0 for UR).
        parameter: usize,

        /// Random seed; drawn from the OS when omitted.
        #[arg(long)]
        seed: Option<u64>,

        /// UCB1 exploration constant for UCT.
        #[arg(long, default_value_t = DEFAULT_EXPLORATION)]
        exploration: f64,
    },

    /// Run a round-robin tournament.
    Tournament {
        /// TOML lineup; otherwise $C4_CONFIG, then ./c4.toml, then defaults.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Games per ordered pair of entrants.
        #[arg(short, long)]
        games: Option<usize>,

        /// Base random seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Also write results as JSON.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Plain-text event formatter; colour only when `ansi` is set.
fn build_subscriber<W>(filter: EnvFilter, ansi: bool, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .without_time()
        .finish()
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let subscriber = build_subscriber(filter, std::io::stdout().is_terminal(), std::io::stdout);
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Logging was already initialised");
    }
}

/// Run the play command.
fn cmd_play(
    input: PathBuf,
    mode: ReportMode,
    parameter: usize,
    seed: Option<u64>,
    exploration: f64,
) -> Result<()> {
    if !(exploration.is_finite() && exploration >= 0.0) {
        anyhow::bail!("Exploration must be a non-negative number, got {}", exploration);
    }

    let text = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read request file {}", input.display()))?;
    let request =
        parse_request(&text).with_context(|| format!("Invalid request file {}", input.display()))?;
    let algorithm: Algorithm = request.algorithm.parse()?;

    let simulations = match algorithm {
        Algorithm::UniformRandom => {
            if parameter != 0 {
                warn!("Parameter should be 0 for UR, ignoring {}", parameter);
            }
            0
        }
        Algorithm::Pmcgs | Algorithm::Uct => {
            if parameter == 0 {
                anyhow::bail!("Parameter must be positive for {}", algorithm);
            }
            parameter
        }
    };

    let rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let config = MctsConfig::with_simulations(simulations).exploration(exploration);
    let mut mcts = Mcts::new(config, rng);

    let decision = mcts
        .select_move(&request.state, algorithm)
        .context("Move selection failed")?;

    for line in render(&decision, mode) {
        println!("{}", line);
    }
    Ok(())
}

/// Run the tournament command.
fn cmd_tournament(
    config_path: Option<PathBuf>,
    games: Option<usize>,
    seed: Option<u64>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config(config_path.as_deref())?;
    if let Some(games) = games {
        config.games_per_pairing = games;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }

    let start = Instant::now();
    let results = tournament::run_tournament(&config)?;
    info!(elapsed_secs = start.elapsed().as_secs_f64(), "tournament finished");

    println!("{}", "=".repeat(80));
    println!("TOURNAMENT RESULTS");
    println!("{}", "=".repeat(80));
    println!("\nWin percentages (row vs column):\n");
    print!("{}", results.table());
    println!("\nCompleted in {:.2}s", start.elapsed().as_secs_f64());

    if let Some(path) = output {
        results.write_json(&path)?;
        println!("Results saved to: {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            input,
            mode,
            parameter,
            seed,
            exploration,
        } => {
            init_tracing(mode.default_filter());
            cmd_play(input, mode, parameter, seed, exploration)
        }
        Commands::Tournament {
            config,
            games,
            seed,
            output,
        } => {
            init_tracing("info");
            cmd_tournament(config, games, seed, output)
        }
    }
}
