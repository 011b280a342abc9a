//! Round-robin tournaments between algorithm configurations.
//!
//! Every ordered pair of entrants plays `games_per_pairing` games. The
//! first entrant of a pair is Red, the second Yellow, and Red moves first
//! in even-numbered games. Games of one pairing run in parallel; each game
//! is seeded on its own so the outcome never depends on scheduling.

use crate::config::{Entrant, TournamentConfig};
use anyhow::{Context, Result};
use c4_board::GameState;
use c4_core::{GameStatus, Player};
use c4_mcts::{apply_move, check_terminal, Mcts, MctsConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::{debug, info};

/// Seed stride between pairings.
const PAIRING_SEED_STRIDE: u64 = 1_000_000;

/// Tallies for one ordered pair of entrants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairingResult {
    pub red: Entrant,
    pub yellow: Entrant,
    pub red_wins: usize,
    pub yellow_wins: usize,
    pub draws: usize,
}

impl PairingResult {
    pub fn games(&self) -> usize {
        self.red_wins + self.yellow_wins + self.draws
    }

    /// Percentage of games won by the Red entrant.
    pub fn red_win_percentage(&self) -> f64 {
        match self.games() {
            0 => 0.0,
            n => self.red_wins as f64 * 100.0 / n as f64,
        }
    }
}

/// Outcome of a whole tournament.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentResults {
    pub config: TournamentConfig,

    /// Row-major over `config.entrants`: pairing `i * n + j` has entrant
    /// `i` as Red and entrant `j` as Yellow.
    pub pairings: Vec<PairingResult>,
}

impl TournamentResults {
    pub fn pairing(&self, red: usize, yellow: usize) -> &PairingResult {
        &self.pairings[red * self.config.entrants.len() + yellow]
    }

    /// Win-percentage table, row entrant against column entrant.
    pub fn table(&self) -> String {
        let entrants = &self.config.entrants;
        let mut out = String::new();

        let _ = write!(out, "{:<20}", "Algorithm");
        for entrant in entrants {
            let _ = write!(out, "{:<15}", entrant.to_string());
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "-".repeat(20 + 15 * entrants.len()));

        for (i, entrant) in entrants.iter().enumerate() {
            let _ = write!(out, "{:<20}", entrant.to_string());
            for j in 0..entrants.len() {
                let cell = if i == j {
                    "N/A".to_string()
                } else {
                    format!("{:.1}%", self.pairing(i, j).red_win_percentage())
                };
                let _ = write!(out, "{:<15}", cell);
            }
            let _ = writeln!(out);
        }
        out
    }

    /// Write results as pretty JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("Failed to write results to {}", path.display()))?;
        Ok(())
    }
}

/// Seed for one game, unique across the tournament.
pub fn game_seed(base: u64, pairing_index: usize, game_index: usize) -> u64 {
    base.wrapping_add((pairing_index as u64).wrapping_mul(PAIRING_SEED_STRIDE))
        .wrapping_add(game_index as u64)
}

/// Play one game to the end and return its final status.
pub fn play_game(
    red: Entrant,
    yellow: Entrant,
    first: Player,
    exploration: f64,
    seed: u64,
) -> Result<GameStatus> {
    let rng = ChaCha8Rng::seed_from_u64(seed);
    let mut mcts = Mcts::new(MctsConfig::default().exploration(exploration), rng);
    let mut state = GameState::new(first);

    loop {
        let status = check_terminal(&state);
        if status.is_terminal() {
            return Ok(status);
        }

        let entrant = match state.current_player() {
            Player::Red => red,
            Player::Yellow => yellow,
        };
        // One engine serves both sides; only the budget changes per move
        mcts.set_simulations(entrant.simulations);
        let decision = mcts.select_move(&state, entrant.algorithm)?;
        state = apply_move(&state, decision.column)?;
    }
}

/// Play all games of one pairing in parallel.
pub fn run_pairing(
    red: Entrant,
    yellow: Entrant,
    pairing_index: usize,
    config: &TournamentConfig,
) -> Result<PairingResult> {
    let statuses = (0..config.games_per_pairing)
        .into_par_iter()
        .map(|game_index| {
            let first = if game_index % 2 == 0 {
                Player::Red
            } else {
                Player::Yellow
            };
            let seed = game_seed(config.seed, pairing_index, game_index);
            let status = play_game(red, yellow, first, config.exploration, seed)?;
            debug!(game = game_index, ?first, ?status, "game finished");
            Ok(status)
        })
        .collect::<Result<Vec<GameStatus>>>()?;

    let mut result = PairingResult {
        red,
        yellow,
        red_wins: 0,
        yellow_wins: 0,
        draws: 0,
    };
    for status in statuses {
        match status {
            GameStatus::Win(Player::Red) => result.red_wins += 1,
            GameStatus::Win(Player::Yellow) => result.yellow_wins += 1,
            _ => result.draws += 1,
        }
    }
    Ok(result)
}

/// Run the full round robin, printing progress as pairings finish.
pub fn run_tournament(config: &TournamentConfig) -> Result<TournamentResults> {
    config.validate()?;
    let entrants = &config.entrants;
    let total = entrants.len() * entrants.len();

    info!(
        entrants = entrants.len(),
        games = config.games_per_pairing,
        seed = config.seed,
        "starting tournament"
    );
    println!("Playing {} games between each pair\n", config.games_per_pairing);

    let mut pairings = Vec::with_capacity(total);
    for (i, &red) in entrants.iter().enumerate() {
        for (j, &yellow) in entrants.iter().enumerate() {
            let pairing_index = i * entrants.len() + j;
            println!(
                "Combination {}/{}: {} vs {}",
                pairing_index + 1,
                total,
                red,
                yellow
            );
            let result = run_pairing(red, yellow, pairing_index, config)
                .with_context(|| format!("Pairing {} vs {} failed", red, yellow))?;
            println!(
                "  {} wins: {}, {} wins: {}, Draws: {}\n",
                red, result.red_wins, yellow, result.yellow_wins, result.draws
            );
            pairings.push(result);
        }
    }

    Ok(TournamentResults {
        config: config.clone(),
        pairings,
    })
}
