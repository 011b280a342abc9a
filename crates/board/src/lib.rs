//! Connect Four board
//!
//! A 6x7 board that is mutated in place: `apply` drops a piece and
//! returns its `Placement`, `undo` takes it back. Win detection after a
//! move only inspects the lines through the last placement.

mod parse;
mod state;

pub use parse::{parse_request, Request};
pub use state::{apply_move, check_terminal, GameState, Placement, COLS, CONNECT, ROWS};
