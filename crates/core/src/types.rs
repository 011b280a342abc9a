//! Reward convention shared by the board and the search.
//!
//! Rewards are always written on one fixed scale:
//! - `+1` means Yellow (the max player) won
//! - `-1` means Red (the min player) won
//! - `0` means a draw
//!
//! They are never flipped while being accumulated. A reader that wants the
//! value for a particular player calls [`perspective`], which negates for Red.

use crate::Player;
use serde::{Deserialize, Serialize};

/// A terminal reward on the fixed max/min scale.
///
/// Invariant: the value is in range [-1, 1].
///
/// # Example
/// ```
/// use c4_core::{perspective, Player, Reward};
///
/// let reward = Reward::win_for(Player::Red);
/// assert_eq!(reward.get(), -1.0);
/// assert_eq!(perspective(reward.get(), Player::Red), 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reward(f64);

impl Reward {
    /// Reward for a Yellow win.
    pub const MAX_WIN: Self = Self(1.0);

    /// Reward for a Red win.
    pub const MIN_WIN: Self = Self(-1.0);

    /// Reward for a draw.
    pub const DRAW: Self = Self(0.0);

    /// Reward for a win by `player`.
    pub fn win_for(player: Player) -> Self {
        if player.is_max() {
            Self::MAX_WIN
        } else {
            Self::MIN_WIN
        }
    }

    /// Get the underlying value on the fixed scale.
    pub fn get(self) -> f64 {
        self.0
    }
}

/// Convert a value on the fixed scale into `player`'s point of view.
#[inline]
pub fn perspective(value: f64, player: Player) -> f64 {
    if player.is_max() {
        value
    } else {
        -value
    }
}
