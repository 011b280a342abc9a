//! Connect Four core - players, game status and the reward convention
//!
//! This crate holds the vocabulary shared by the board, the search engine
//! and the command-line tools.
//!
//! # Types
//!
//! - [`Player`] - Red (min player) or Yellow (max player)
//! - [`GameStatus`] - ongoing, won by a player, or drawn
//! - [`Reward`] - terminal value on the fixed Yellow = +1 / Red = -1 scale

mod error;
mod game;
mod types;

pub use error::{C4Error, Result};
pub use game::{GameStatus, Player};
pub use types::{perspective, Reward};
