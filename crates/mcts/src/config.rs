//! Search budget and exploration settings.
//!
//! UR ignores both values; PMCGS uses only the budget.

use serde::{Deserialize, Serialize};

/// Default UCB1 exploration constant, sqrt(2).
pub const DEFAULT_EXPLORATION: f64 = std::f64::consts::SQRT_2;

/// Settings for one [`crate::Mcts`] engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// Number of simulations per move decision. Ignored by UR.
    pub simulations: usize,

    /// UCB1 exploration constant `C` in `Q + C * sqrt(ln(N_parent) / N_child)`.
    /// Only used by UCT.
    pub exploration: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            simulations: 1000,
            exploration: DEFAULT_EXPLORATION,
        }
    }
}

impl MctsConfig {
    /// Create a new config with the specified number of simulations.
    pub fn with_simulations(simulations: usize) -> Self {
        Self {
            simulations,
            ..Default::default()
        }
    }

    /// Replace the exploration constant.
    pub fn exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }
}
