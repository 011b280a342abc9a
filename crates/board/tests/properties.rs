//! Property-based tests for the board.
//!
//! Positions are generated by random legal play from the empty board, so
//! only reachable states are tested.

use c4_board::{GameState, COLS, ROWS};
use c4_core::{GameStatus, Player};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn arb_player() -> impl Strategy<Value = Player> {
    prop_oneof![Just(Player::Red), Just(Player::Yellow)]
}

/// Play up to `max_moves` random legal moves, stopping at the first terminal state.
fn random_position(seed: u64, max_moves: usize, first: Player) -> GameState {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = GameState::new(first);
    for _ in 0..max_moves {
        if state.is_terminal() {
            break;
        }
        let moves = state.legal_moves();
        let col = moves[rng.gen_range(0..moves.len())];
        state.apply(col).unwrap();
    }
    state
}

fn arb_position() -> impl Strategy<Value = GameState> {
    (any::<u64>(), 0usize..ROWS * COLS, arb_player())
        .prop_map(|(seed, moves, first)| random_position(seed, moves, first))
}

/// Brute-force four-in-a-row search over every cell and direction.
fn has_four(state: &GameState, player: Player) -> bool {
    let dirs: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];
    for row in 0..ROWS as isize {
        for col in 0..COLS as isize {
            for (dr, dc) in dirs {
                let all = (0..4).all(|k| {
                    let (r, c) = (row + dr * k, col + dc * k);
                    (0..ROWS as isize).contains(&r)
                        && (0..COLS as isize).contains(&c)
                        && state.cell(r as usize, c as usize) == Some(player)
                });
                if all {
                    return true;
                }
            }
        }
    }
    false
}

proptest! {
    /// Undoing an apply restores every cell, the mover and the last placement.
    #[test]
    fn prop_apply_undo_roundtrip(state in arb_position()) {
        prop_assume!(!state.is_terminal());

        for col in state.legal_moves() {
            let mut scratch = state.clone();
            let placement = scratch.apply(col).unwrap();
            prop_assert_eq!(placement.column, col);
            prop_assert_eq!(placement.row, state.height(col));
            scratch.undo(placement).unwrap();
            prop_assert_eq!(&scratch, &state);
        }
    }

    /// Legal moves are exactly the non-full columns, ascending.
    #[test]
    fn prop_legal_moves_are_open_columns(state in arb_position()) {
        let expected: Vec<usize> = (0..COLS).filter(|&c| state.height(c) < ROWS).collect();
        prop_assert_eq!(state.legal_moves(), expected);
    }

    /// Turn alternates strictly and counts stay balanced.
    #[test]
    fn prop_turn_alternates(state in arb_position()) {
        let red = state.pieces_of(Player::Red);
        let yellow = state.pieces_of(Player::Yellow);
        prop_assert!(red.abs_diff(yellow) <= 1);
        prop_assert_eq!(red + yellow, state.piece_count());
        prop_assert!(state.validate().is_ok());
    }

    /// The localized check agrees with a brute-force scan.
    #[test]
    fn prop_status_matches_full_scan(state in arb_position()) {
        let red = has_four(&state, Player::Red);
        let yellow = has_four(&state, Player::Yellow);
        match state.status() {
            GameStatus::Win(player) => {
                prop_assert!(has_four(&state, player));
                prop_assert_eq!(Some(player), state.last_placement().and_then(|p| state.cell(p.row, p.column)));
            }
            GameStatus::Draw => {
                prop_assert!(!red && !yellow);
                prop_assert!(state.is_full());
            }
            GameStatus::Ongoing => {
                prop_assert!(!red && !yellow);
                prop_assert!(!state.is_full());
            }
        }
    }

    /// Reloading the rendered text yields the same board.
    #[test]
    fn prop_text_roundtrip(state in arb_position()) {
        let text = state.to_string();
        let rows: Vec<&str> = text.lines().collect();
        let reloaded = GameState::from_rows(&rows, state.current_player()).unwrap();
        prop_assert_eq!(reloaded.to_string(), text);
        prop_assert_eq!(reloaded.status(), state.status());
    }
}
