//! Move decisions and per-column statistics.
//!
//! Values are reported from the point of view of the player who is to move
//! at the root, so a positive value is always good for the decider.

use crate::policy::Algorithm;
use crate::tree::Tree;
use c4_core::Player;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Statistics for one legal root move.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    /// Simulations that started with this move.
    pub visits: u32,

    /// Mean reward for the root mover, in [-1, 1]. 0 when unvisited.
    pub mean_value: f64,

    /// Fraction of root visits (uniform for UR).
    pub share: f64,
}

/// Result of a move-selection call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveDecision {
    /// Chosen column, 0-based.
    pub column: usize,

    pub algorithm: Algorithm,

    /// Player the decision was made for.
    pub player: Player,

    /// Simulations actually run (always 0 for UR).
    pub simulations: usize,

    /// Every legal root column, ascending.
    pub stats: BTreeMap<usize, ColumnStats>,
}

impl MoveDecision {
    /// Decision for UR: the sampled column plus uniform placeholder statistics.
    pub(crate) fn uniform<R: Rng>(legal: &[usize], player: Player, rng: &mut R) -> Self {
        let share = 1.0 / legal.len() as f64;
        let stats = legal
            .iter()
            .map(|&col| {
                (
                    col,
                    ColumnStats {
                        visits: 0,
                        mean_value: 0.0,
                        share,
                    },
                )
            })
            .collect();

        Self {
            column: legal[rng.gen_range(0..legal.len())],
            algorithm: Algorithm::UniformRandom,
            player,
            simulations: 0,
            stats,
        }
    }

    /// Read the root children of a finished search.
    ///
    /// UCT takes the most visited column. PMCGS spreads root visits evenly,
    /// so it takes the visited column with the best value for the root
    /// mover. Ties go to the lowest column either way. With no simulations
    /// at all a uniformly random legal column is chosen instead.
    pub(crate) fn from_tree<R: Rng>(
        tree: &Tree,
        algorithm: Algorithm,
        simulations: usize,
        rng: &mut R,
    ) -> Self {
        let root = tree.root();
        let player = root.to_move;
        let total = root.stats.visits;

        let stats: BTreeMap<usize, ColumnStats> = root
            .legal
            .iter()
            .map(|&col| {
                let child = root.child(col).map(|id| &tree.get(id).stats);
                let visits = child.map_or(0, |s| s.visits);
                let column_stats = ColumnStats {
                    visits,
                    mean_value: child.map_or(0.0, |s| s.value_for(player)),
                    share: if total == 0 {
                        0.0
                    } else {
                        visits as f64 / total as f64
                    },
                };
                (col, column_stats)
            })
            .collect();

        let column = if simulations == 0 {
            root.legal[rng.gen_range(0..root.legal.len())]
        } else {
            let best = match algorithm {
                Algorithm::Pmcgs => best_valued(&stats),
                Algorithm::UniformRandom | Algorithm::Uct => most_visited(&stats),
            };
            best.unwrap_or(root.legal[0])
        };

        Self {
            column,
            algorithm,
            player,
            simulations,
            stats,
        }
    }

    /// Statistics for a column, `None` if it was not a legal move.
    pub fn column_stats(&self, column: usize) -> Option<&ColumnStats> {
        self.stats.get(&column)
    }

    /// Mean value of the chosen column for the deciding player.
    pub fn value(&self) -> f64 {
        self.stats.get(&self.column).map_or(0.0, |s| s.mean_value)
    }

    /// Visits summed over root columns; equals `simulations` for PMCGS/UCT.
    pub fn total_visits(&self) -> u32 {
        self.stats.values().map(|s| s.visits).sum()
    }
}

/// Highest visit count, first (lowest) column on ties.
fn most_visited(stats: &BTreeMap<usize, ColumnStats>) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (&col, s) in stats {
        if best.map_or(true, |(_, visits)| s.visits > visits) {
            best = Some((col, s.visits));
        }
    }
    best.map(|(col, _)| col)
}

/// Highest mean value among visited columns, first (lowest) column on ties.
fn best_valued(stats: &BTreeMap<usize, ColumnStats>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (&col, s) in stats.iter().filter(|(_, s)| s.visits > 0) {
        if best.map_or(true, |(_, value)| s.mean_value > value) {
            best = Some((col, s.mean_value));
        }
    }
    best.map(|(col, _)| col)
}
