use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::C4Error;

/// One of the two Connect Four sides.
///
/// Yellow is the max player and Red is the min player: every reward in
/// the engine is expressed on that fixed scale, whoever is to move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Player {
    Red,
    Yellow,
}

impl Player {
    /// Get the opposing player.
    pub fn opposite(self) -> Self {
        match self {
            Player::Red => Player::Yellow,
            Player::Yellow => Player::Red,
        }
    }

    /// True for the player whose wins count as +1.
    pub fn is_max(self) -> bool {
        self == Player::Yellow
    }

    /// Board symbol used in the text format.
    pub fn symbol(self) -> char {
        match self {
            Player::Red => 'R',
            Player::Yellow => 'Y',
        }
    }

    /// Parse a board symbol (`R` or `Y`).
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'R' => Some(Player::Red),
            'Y' => Some(Player::Yellow),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Player {
    type Err = C4Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next().and_then(Player::from_symbol), chars.next()) {
            (Some(player), None) => Ok(player),
            _ => Err(C4Error::Parse {
                line: 0,
                message: format!("unknown player '{}', expected 'R' or 'Y'", s.trim()),
            }),
        }
    }
}

/// Whether a game has finished, and how.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    Win(Player),
    Draw,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Ongoing
    }

    /// Terminal reward on the fixed max/min scale, `None` while ongoing.
    pub fn reward(self) -> Option<crate::Reward> {
        match self {
            GameStatus::Ongoing => None,
            GameStatus::Win(player) => Some(crate::Reward::win_for(player)),
            GameStatus::Draw => Some(crate::Reward::DRAW),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        assert_eq!(Player::Red.opposite(), Player::Yellow);
        assert_eq!(Player::Yellow.opposite(), Player::Red);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(Player::from_symbol('R'), Some(Player::Red));
        assert_eq!(Player::from_symbol('Y'), Some(Player::Yellow));
        assert_eq!(Player::from_symbol('O'), None);
        assert_eq!("Y".parse::<Player>().unwrap(), Player::Yellow);
        assert!("RY".parse::<Player>().is_err());
        assert!("".parse::<Player>().is_err());
    }

    #[test]
    fn test_status_reward() {
        assert_eq!(GameStatus::Ongoing.reward(), None);
        assert_eq!(GameStatus::Draw.reward().unwrap().get(), 0.0);
        assert_eq!(GameStatus::Win(Player::Yellow).reward().unwrap().get(), 1.0);
        assert_eq!(GameStatus::Win(Player::Red).reward().unwrap().get(), -1.0);
    }
}
