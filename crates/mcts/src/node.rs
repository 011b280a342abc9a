//! MCTS node types for tree storage.
//!
//! Uses arena allocation with indices for cache locality and simpler memory management.
//! A node never stores a board, only statistics and the facts about its
//! position that descent needs (mover, legal moves, terminal flag).

use c4_board::{GameState, COLS};
use c4_core::{perspective, Player, Reward};

/// Index into the node arena.
///
/// This is a lightweight handle that references a node in the tree.
/// Using indices instead of pointers avoids Rc/RefCell overhead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// Statistics for a single MCTS node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeStats {
    /// Number of simulations that passed through this node.
    pub visits: u32,

    /// Sum of terminal rewards on the fixed scale (Yellow win = +1).
    pub reward_sum: f64,
}

impl NodeStats {
    /// Mean reward on the fixed scale.
    ///
    /// Returns 0.0 if the node has never been visited.
    pub fn mean_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward_sum / self.visits as f64
        }
    }

    /// Mean reward as seen by `player`.
    pub fn value_for(&self, player: Player) -> f64 {
        perspective(self.mean_value(), player)
    }

    pub(crate) fn record(&mut self, reward: Reward) {
        self.visits += 1;
        self.reward_sum += reward.get();
    }
}

/// A node in the MCTS tree.
#[derive(Clone, Debug)]
pub struct Node {
    pub stats: NodeStats,

    /// Player to move in this node's position.
    pub to_move: Player,

    /// Legal columns at this position, ascending. Empty when terminal.
    pub legal: Vec<usize>,

    /// Child per column; `None` means not yet expanded.
    pub children: [Option<NodeId>; COLS],

    /// Whether this node's position is a finished game.
    pub terminal: bool,
}

impl Node {
    /// Create an unvisited node for the given position.
    pub fn new(state: &GameState) -> Self {
        let terminal = state.is_terminal();
        Self {
            stats: NodeStats::default(),
            to_move: state.current_player(),
            legal: if terminal { Vec::new() } else { state.legal_moves() },
            children: [None; COLS],
            terminal,
        }
    }

    pub fn child(&self, column: usize) -> Option<NodeId> {
        self.children.get(column).copied().flatten()
    }

    /// True iff every legal move has a child.
    pub fn is_fully_expanded(&self) -> bool {
        self.legal.iter().all(|&col| self.children[col].is_some())
    }

    /// Legal columns without a child yet, ascending.
    pub fn unexpanded(&self) -> Vec<usize> {
        self.legal
            .iter()
            .copied()
            .filter(|&col| self.children[col].is_none())
            .collect()
    }

    /// Expanded (column, child) pairs in ascending column order.
    pub fn expanded(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(col, child)| child.map(|id| (col, id)))
    }
}
