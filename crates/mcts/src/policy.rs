//! Move-selection algorithms and their tree-descent rules.
//!
//! - **UR** picks a legal root move uniformly at random and never builds a tree.
//! - **PMCGS** descends by uniformly random legal moves, expanding the chosen move if it has no child.
//! - **UCT** expands a random missing child while any remain, then follows UCB1.

use crate::node::NodeId;
use crate::tree::Tree;
use c4_core::C4Error;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{trace, Level};

/// Algorithm requested for a move decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "UR")]
    UniformRandom,
    #[serde(rename = "PMCGS")]
    Pmcgs,
    #[serde(rename = "UCT")]
    Uct,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::UniformRandom, Algorithm::Pmcgs, Algorithm::Uct];

    /// Tag used in request files and on the command line.
    pub fn tag(self) -> &'static str {
        match self {
            Algorithm::UniformRandom => "UR",
            Algorithm::Pmcgs => "PMCGS",
            Algorithm::Uct => "UCT",
        }
    }

    /// Descent rule for tree-building algorithms, `None` for UR.
    pub fn tree_policy(self, exploration: f64) -> Option<TreePolicy> {
        match self {
            Algorithm::UniformRandom => None,
            Algorithm::Pmcgs => Some(TreePolicy::Random),
            Algorithm::Uct => Some(TreePolicy::Ucb { exploration }),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Algorithm {
    type Err = C4Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Algorithm::ALL
            .into_iter()
            .find(|a| a.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| C4Error::Parse {
                line: 1,
                message: format!("unknown algorithm '{}', expected UR, PMCGS or UCT", s),
            })
    }
}

/// One step of tree descent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Descent {
    /// Move into an existing child.
    Follow(usize, NodeId),
    /// Create the child for this column and stop descending.
    Expand(usize),
}

/// How a simulation chooses its move at each tree node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TreePolicy {
    /// Uniformly random legal move (PMCGS).
    Random,
    /// Expansion first, then UCB1 with the given exploration constant (UCT).
    Ucb { exploration: f64 },
}

impl TreePolicy {
    /// Choose the next step at `id`. Returns `None` for nodes without legal moves.
    pub fn choose<R: Rng>(&self, tree: &Tree, id: NodeId, rng: &mut R) -> Option<Descent> {
        let node = tree.get(id);
        if node.legal.is_empty() {
            return None;
        }
        trace!(wi = node.stats.reward_sum, ni = node.stats.visits, "descent");

        match *self {
            TreePolicy::Random => {
                if node.is_fully_expanded() {
                    return tree
                        .select_random_child(id, rng)
                        .map(|(col, child)| Descent::Follow(col, child));
                }
                let col = node.legal[rng.gen_range(0..node.legal.len())];
                Some(match node.child(col) {
                    Some(child) => Descent::Follow(col, child),
                    None => Descent::Expand(col),
                })
            }
            TreePolicy::Ucb { exploration } => {
                let unexpanded = node.unexpanded();
                if !unexpanded.is_empty() {
                    return Some(Descent::Expand(unexpanded[rng.gen_range(0..unexpanded.len())]));
                }
                if tracing::enabled!(Level::TRACE) {
                    for (col, score) in tree.ucb_scores(id, exploration) {
                        trace!(column = col + 1, ucb = score, "V");
                    }
                }
                tree.select_uct_child(id, exploration)
                    .map(|(col, child)| Descent::Follow(col, child))
            }
        }
    }
}
