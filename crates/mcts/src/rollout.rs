//! Random playouts from a frontier position.
//!
//! A playout applies uniformly random legal moves to the shared board until
//! the game ends, reads the result, then undoes every move it made so the
//! board is exactly as it was on entry.

use c4_board::GameState;
use c4_core::{GameStatus, Result};
use rand::Rng;
use tracing::trace;

/// Outcome of a single playout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Playout {
    /// Terminal status reached.
    pub status: GameStatus,

    /// Number of random moves played.
    pub plies: usize,
}

/// Play random moves from `state` to the end of the game.
///
/// `state` is restored before returning. If it is already terminal no
/// moves are played.
pub fn random_playout<R: Rng>(state: &mut GameState, rng: &mut R) -> Result<Playout> {
    let mut placements = Vec::new();
    let mut status = state.status();

    while !status.is_terminal() {
        let legal = state.legal_moves();
        let column = legal[rng.gen_range(0..legal.len())];
        trace!(column = column + 1, "rollout move");
        placements.push(state.apply(column)?);
        status = state.status();
    }

    let plies = placements.len();
    for placement in placements.into_iter().rev() {
        state.undo(placement)?;
    }

    Ok(Playout { status, plies })
}
