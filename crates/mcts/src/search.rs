//! Monte Carlo Tree Search implementation.
//!
//! One simulation is selection, expansion of at most one node, a random
//! playout, and backpropagation. All of it runs on a single scratch board
//! that is restored by undoing moves in reverse order after every simulation.
//!
//! Rewards are accumulated on the fixed Yellow = +1 / Red = -1 scale at
//! every node and only converted to a player's point of view when read.

use crate::{
    config::MctsConfig,
    decision::MoveDecision,
    node::{Node, NodeId},
    policy::{Algorithm, Descent, TreePolicy},
    rollout::random_playout,
    tree::Tree,
};
use c4_board::{GameState, Placement};
use c4_core::{C4Error, Player, Reward, Result};
use rand::Rng;
use tracing::{debug, trace};

/// Monte Carlo Tree Search over Connect Four positions.
///
/// Generic over the random number generator `R`, which drives every random
/// choice (UR pick, PMCGS descent, UCT expansion, playouts). Seeding it makes
/// a search exactly reproducible.
pub struct Mcts<R: Rng> {
    config: MctsConfig,
    rng: R,
    tree: Tree,
}

impl<R: Rng> Mcts<R> {
    /// Create a new MCTS instance.
    pub fn new(config: MctsConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            tree: Tree::new(Node::new(&GameState::new(Player::Yellow))),
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Change the budget for later calls, keeping the rng stream.
    pub fn set_simulations(&mut self, simulations: usize) {
        self.config.simulations = simulations;
    }

    /// Tree left by the most recent search.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Choose a move for the player to move in `state`.
    ///
    /// The tree is rebuilt from scratch on every call. `state` itself is not
    /// modified; the search works on one private copy.
    ///
    /// # Errors
    /// - `C4Error::NoLegalMoves` if `state` is already won or full
    /// - `C4Error::InvalidState` if the piece counts are impossible
    pub fn select_move(&mut self, state: &GameState, algorithm: Algorithm) -> Result<MoveDecision> {
        state.validate()?;
        if state.is_terminal() {
            return Err(C4Error::NoLegalMoves);
        }
        let legal = state.legal_moves();
        if legal.is_empty() {
            return Err(C4Error::NoLegalMoves);
        }

        let decision = match algorithm.tree_policy(self.config.exploration) {
            None => MoveDecision::uniform(&legal, state.current_player(), &mut self.rng),
            Some(policy) => {
                let mut scratch = state.clone();
                self.search(&mut scratch, policy)?;
                debug_assert!(scratch == *state, "scratch board not restored");
                MoveDecision::from_tree(&self.tree, algorithm, self.config.simulations, &mut self.rng)
            }
        };

        debug!(
            algorithm = %algorithm,
            simulations = decision.simulations,
            column = decision.column + 1,
            value = decision.value(),
            "move selected"
        );
        Ok(decision)
    }

    /// Run the configured number of simulations from `scratch`.
    fn search(&mut self, scratch: &mut GameState, policy: TreePolicy) -> Result<()> {
        self.tree.reset(Node::new(scratch));

        for _ in 0..self.config.simulations {
            self.simulate(scratch, policy)?;
        }
        Ok(())
    }

    /// Run a single simulation: select -> expand -> rollout -> backpropagate.
    fn simulate(&mut self, scratch: &mut GameState, policy: TreePolicy) -> Result<()> {
        let mut path: Vec<NodeId> = vec![NodeId::ROOT];
        let mut placements: Vec<Placement> = Vec::new();
        let mut current = NodeId::ROOT;

        // SELECT / EXPAND: stop at a terminal node or a freshly added one
        while let Some(step) = policy.choose(&self.tree, current, &mut self.rng) {
            match step {
                Descent::Follow(column, child) => {
                    trace!(column = column + 1, "move selected");
                    placements.push(scratch.apply(column)?);
                    path.push(child);
                    current = child;
                }
                Descent::Expand(column) => {
                    trace!(column = column + 1, "move selected");
                    placements.push(scratch.apply(column)?);
                    let child = self.tree.expand(current, column, Node::new(scratch));
                    trace!("node added");
                    path.push(child);
                    break;
                }
            }
        }

        // ROLLOUT: leaves the board as it found it
        let playout = random_playout(scratch, &mut self.rng)?;
        let reward = playout.status.reward().unwrap_or(Reward::DRAW);
        trace!(value = reward.get(), plies = playout.plies, "terminal node value");

        self.backpropagate(&path, reward);

        for placement in placements.into_iter().rev() {
            scratch.undo(placement)?;
        }
        Ok(())
    }

    /// Add one visit and the fixed-scale `reward` to every node on `path`.
    ///
    /// The reward is never negated per depth; readers convert it with the
    /// parent's mover when computing Q.
    fn backpropagate(&mut self, path: &[NodeId], reward: Reward) {
        for &node_id in path.iter().rev() {
            let stats = &mut self.tree.get_mut(node_id).stats;
            stats.record(reward);
            trace!(wi = stats.reward_sum, ni = stats.visits, "updated values");
        }
    }
}

/// Select a move with a fresh tree and the default exploration constant.
///
/// Convenience wrapper for drivers that make one call per turn.
pub fn select_move<R: Rng>(
    state: &GameState,
    algorithm: Algorithm,
    simulations: usize,
    rng: &mut R,
) -> Result<MoveDecision> {
    Mcts::new(MctsConfig::with_simulations(simulations), rng).select_move(state, algorithm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn yellow_three_stacked() -> GameState {
        let rows = [
            "OOOOOOO", "OOOOOOO", "OOOOOOO", "OOOYOOO", "OOOYOOO", "RROYOOR",
        ];
        GameState::from_rows(&rows, Player::Yellow).unwrap()
    }

    fn mcts(simulations: usize, seed: u64) -> Mcts<ChaCha8Rng> {
        Mcts::new(
            MctsConfig::with_simulations(simulations),
            ChaCha8Rng::seed_from_u64(seed),
        )
    }

    #[test]
    fn test_root_visits_equal_budget() {
        let state = GameState::new(Player::Yellow);
        for algorithm in [Algorithm::Pmcgs, Algorithm::Uct] {
            let mut search = mcts(250, 42);
            let decision = search.select_move(&state, algorithm).unwrap();
            assert_eq!(search.tree().root().stats.visits, 250);
            assert_eq!(decision.total_visits(), 250);
            assert_eq!(decision.simulations, 250);
        }
    }

    #[test]
    fn test_tree_grows_at_most_one_node_per_simulation() {
        let state = GameState::new(Player::Red);
        let mut search = mcts(100, 1);
        search.select_move(&state, Algorithm::Uct).unwrap();
        assert!(search.tree().len() <= 101);
        // UCT expands every root move before going deeper
        assert!(search.tree().root().is_fully_expanded());
    }

    #[test]
    fn test_state_untouched() {
        let state = yellow_three_stacked();
        let before = state.clone();
        let mut search = mcts(200, 9);
        search.select_move(&state, Algorithm::Pmcgs).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_uct_finds_immediate_vertical_win() {
        let state = yellow_three_stacked();
        for seed in 0..5 {
            let mut search = mcts(2000, seed);
            let decision = search.select_move(&state, Algorithm::Uct).unwrap();
            assert_eq!(decision.column, 3, "seed {}", seed);
            assert!(decision.value() > 0.9);
        }
    }

    #[test]
    fn test_pmcgs_rates_immediate_win_highest() {
        let state = yellow_three_stacked();
        let mut search = mcts(2000, 5);
        let decision = search.select_move(&state, Algorithm::Pmcgs).unwrap();
        let win = decision.column_stats(3).unwrap();
        assert_eq!(decision.column, 3);
        assert_eq!(win.mean_value, 1.0);
        for (&col, stats) in &decision.stats {
            if col != 3 {
                assert!(stats.mean_value < win.mean_value);
            }
        }
    }

    #[test]
    fn test_winning_child_backs_up_exact_reward() {
        let state = yellow_three_stacked();
        let mut search = mcts(500, 3);
        let decision = search.select_move(&state, Algorithm::Uct).unwrap();
        // Column 3 ends the game at once, so every visit scored a Yellow win
        let stats = decision.column_stats(3).unwrap();
        assert!(stats.visits > 0);
        assert_eq!(stats.mean_value, 1.0);
    }

    #[test]
    fn test_zero_budget_picks_legal_move() {
        let state = GameState::new(Player::Yellow);
        let mut search = mcts(0, 11);
        let decision = search.select_move(&state, Algorithm::Uct).unwrap();
        assert!(state.legal_moves().contains(&decision.column));
        assert_eq!(decision.total_visits(), 0);
        assert!(decision.stats.values().all(|s| s.mean_value == 0.0));
    }

    #[test]
    fn test_uniform_random_builds_no_tree() {
        let state = GameState::new(Player::Yellow);
        let mut search = mcts(500, 4);
        let decision = search.select_move(&state, Algorithm::UniformRandom).unwrap();
        assert_eq!(decision.simulations, 0);
        assert_eq!(decision.stats.len(), 7);
        assert_eq!(search.tree().len(), 1);
    }

    #[test]
    fn test_terminal_root_rejected() {
        let mut state = GameState::new(Player::Yellow);
        for col in [3, 0, 3, 0, 3, 0, 3] {
            state.apply(col).unwrap();
        }
        let mut search = mcts(10, 0);
        for algorithm in Algorithm::ALL {
            assert_eq!(
                search.select_move(&state, algorithm).unwrap_err(),
                C4Error::NoLegalMoves
            );
        }
    }

    #[test]
    fn test_full_board_rejected() {
        let mut state = GameState::new(Player::Red);
        for col in [
            5, 3, 2, 3, 1, 5, 3, 1, 0, 1, 4, 1, 2, 5, 0, 5, 6, 6, 2, 0, 6, 0, 4, 2, 3, 0, 3, 4,
            2, 3, 2, 6, 0, 4, 1, 1, 5, 4, 4, 5, 6, 6,
        ] {
            state.apply(col).unwrap();
        }
        assert!(state.is_full());
        let mut search = mcts(10, 0);
        assert_eq!(
            search.select_move(&state, Algorithm::Uct).unwrap_err(),
            C4Error::NoLegalMoves
        );
    }

    #[test]
    fn test_free_function_matches_struct() {
        let state = yellow_three_stacked();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let a = select_move(&state, Algorithm::Uct, 300, &mut rng).unwrap();
        let b = mcts(300, 8).select_move(&state, Algorithm::Uct).unwrap();
        assert_eq!(a, b);
    }
}
