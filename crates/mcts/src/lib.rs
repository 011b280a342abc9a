//! Monte Carlo move selection for Connect Four.
//!
//! This crate chooses a move for the side to move with one of three
//! algorithms that share the same tree and board machinery:
//!
//! # Features
//!
//! - **UR**: uniformly random legal move, no search
//! - **PMCGS**: pure Monte Carlo game search, random tree descent
//! - **UCT**: UCB1-guided descent with expansion priority
//! - **Seedable**: every random choice draws from a caller-supplied `Rng`
//! - **Undo-based**: one scratch board per call, restored after each simulation
//!
//! # Example
//!
//! ```
//! use c4_board::GameState;
//! use c4_core::Player;
//! use c4_mcts::{Algorithm, Mcts, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let state = GameState::new(Player::Yellow);
//! let config = MctsConfig::with_simulations(200);
//! let mut mcts = Mcts::new(config, ChaCha8Rng::seed_from_u64(42));
//!
//! let decision = mcts.select_move(&state, Algorithm::Uct).unwrap();
//! assert!(decision.column < 7);
//! assert_eq!(decision.total_visits(), 200);
//! ```

pub mod config;
pub mod decision;
mod node;
pub mod policy;
pub mod rollout;
pub mod search;
mod tree;

pub use c4_board::{apply_move, check_terminal};
pub use config::{MctsConfig, DEFAULT_EXPLORATION};
pub use decision::{ColumnStats, MoveDecision};
pub use node::{Node, NodeId, NodeStats};
pub use policy::{Algorithm, Descent, TreePolicy};
pub use rollout::{random_playout, Playout};
pub use search::{select_move, Mcts};
pub use tree::Tree;
