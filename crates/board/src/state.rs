//! Mutable Connect Four position with in-place apply/undo.
//!
//! The search keeps one `GameState` as a scratch board for a whole
//! move-selection call, so every placement must be reversible exactly.

use c4_core::{C4Error, GameStatus, Player, Result};
use std::fmt;

/// Number of rows on the board.
pub const ROWS: usize = 6;

/// Number of columns on the board.
pub const COLS: usize = 7;

/// Pieces in a row needed to win.
pub const CONNECT: usize = 4;

/// Line directions as (row step, column step): horizontal, vertical, diagonal /, diagonal \.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Where a piece landed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Placement {
    pub column: usize,
    pub row: usize,
}

/// Connect Four board state.
///
/// Rows are indexed from the bottom:
/// ```text
/// row 5  . . . . . . .   <- top
/// ...
/// row 0  . . . . . . .   <- bottom
///        0 1 2 3 4 5 6   column
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    cells: [[Option<Player>; COLS]; ROWS],

    /// Number of pieces in each column.
    heights: [u8; COLS],

    to_move: Player,

    /// Placements made through `apply`, most recent last.
    history: Vec<Placement>,
}

impl GameState {
    /// Create an empty board with `to_move` to play first.
    pub fn new(to_move: Player) -> Self {
        Self {
            cells: [[None; COLS]; ROWS],
            heights: [0; COLS],
            to_move,
            history: Vec::with_capacity(ROWS * COLS),
        }
    }

    /// Build a state from bottom-first rows. Heights are derived from the cells;
    /// gravity and parity are checked by [`GameState::validate`], not here.
    pub(crate) fn from_cells(cells: [[Option<Player>; COLS]; ROWS], to_move: Player) -> Self {
        let mut heights = [0u8; COLS];
        for (col, height) in heights.iter_mut().enumerate() {
            *height = (0..ROWS).take_while(|&row| cells[row][col].is_some()).count() as u8;
        }
        Self {
            cells,
            heights,
            to_move,
            history: Vec::with_capacity(ROWS * COLS),
        }
    }

    /// Get the piece at (row, column), row 0 being the bottom.
    pub fn cell(&self, row: usize, column: usize) -> Option<Player> {
        self.cells.get(row).and_then(|r| r.get(column)).copied().flatten()
    }

    /// Number of pieces in a column.
    pub fn height(&self, column: usize) -> usize {
        self.heights[column] as usize
    }

    pub fn current_player(&self) -> Player {
        self.to_move
    }

    pub fn other_player(&self) -> Player {
        self.to_move.opposite()
    }

    /// The most recent placement made through `apply`, if any.
    pub fn last_placement(&self) -> Option<Placement> {
        self.history.last().copied()
    }

    /// Total pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.heights.iter().map(|&h| h as usize).sum()
    }

    /// Pieces belonging to `player`.
    pub fn pieces_of(&self, player: Player) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Some(player))
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h as usize >= ROWS)
    }

    pub fn is_legal(&self, column: usize) -> bool {
        column < COLS && (self.heights[column] as usize) < ROWS
    }

    /// Columns that are not full, in ascending order.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| self.is_legal(col)).collect()
    }

    /// Drop a piece for the player to move into `column`.
    ///
    /// # Errors
    /// Returns `C4Error::InvalidMove` if the column is out of range or full.
    pub fn apply(&mut self, column: usize) -> Result<Placement> {
        if column >= COLS {
            return Err(C4Error::InvalidMove {
                column,
                reason: "column out of range",
            });
        }
        let row = self.heights[column] as usize;
        if row >= ROWS {
            return Err(C4Error::InvalidMove {
                column,
                reason: "column is full",
            });
        }

        self.cells[row][column] = Some(self.to_move);
        self.heights[column] += 1;
        self.to_move = self.to_move.opposite();

        let placement = Placement { column, row };
        self.history.push(placement);
        Ok(placement)
    }

    /// Reverse the most recent `apply`.
    ///
    /// # Errors
    /// Returns `C4Error::InvalidMove` if `placement` is not the most recent
    /// placement; the state is left untouched in that case.
    pub fn undo(&mut self, placement: Placement) -> Result<()> {
        if self.history.last() != Some(&placement) {
            return Err(C4Error::InvalidMove {
                column: placement.column,
                reason: "not the most recent placement",
            });
        }
        self.history.pop();
        self.cells[placement.row][placement.column] = None;
        self.heights[placement.column] -= 1;
        self.to_move = self.to_move.opposite();
        Ok(())
    }

    /// Whether the game has ended.
    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    /// Win, draw, or ongoing.
    ///
    /// After an `apply`, only the four lines through the last placement are
    /// examined. A state loaded from text has no last placement, so the whole
    /// board is scanned instead.
    pub fn status(&self) -> GameStatus {
        let winner = match self.last_placement() {
            Some(p) => self.winner_through(p.row, p.column),
            None => self.scan_for_winner(),
        };

        match winner {
            Some(player) => GameStatus::Win(player),
            None if self.is_full() => GameStatus::Draw,
            None => GameStatus::Ongoing,
        }
    }

    /// Check the four lines through (row, column) for `CONNECT` in a row.
    fn winner_through(&self, row: usize, column: usize) -> Option<Player> {
        let player = self.cells[row][column]?;

        for (dr, dc) in DIRECTIONS {
            let count = 1
                + self.run_length(row, column, dr, dc, player)
                + self.run_length(row, column, -dr, -dc, player);
            if count >= CONNECT {
                return Some(player);
            }
        }
        None
    }

    /// Count same-colored pieces walking away from (row, column), at most `CONNECT - 1`.
    fn run_length(&self, row: usize, column: usize, dr: isize, dc: isize, player: Player) -> usize {
        let mut count = 0;
        let (mut r, mut c) = (row as isize + dr, column as isize + dc);
        while count < CONNECT - 1
            && (0..ROWS as isize).contains(&r)
            && (0..COLS as isize).contains(&c)
            && self.cells[r as usize][c as usize] == Some(player)
        {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    fn scan_for_winner(&self) -> Option<Player> {
        (0..ROWS)
            .flat_map(|row| (0..COLS).map(move |col| (row, col)))
            .find_map(|(row, col)| self.winner_through(row, col))
    }

    /// Check that the position could arise in play.
    ///
    /// # Errors
    /// Returns `C4Error::InvalidState` if a piece floats above an empty cell
    /// or the players' piece counts differ by more than one.
    pub fn validate(&self) -> Result<()> {
        for col in 0..COLS {
            let height = self.heights[col] as usize;
            if let Some(row) = (height..ROWS).find(|&row| self.cells[row][col].is_some()) {
                return Err(C4Error::InvalidState(format!(
                    "floating piece at row {} column {}",
                    row, col
                )));
            }
        }

        let red = self.pieces_of(Player::Red);
        let yellow = self.pieces_of(Player::Yellow);
        if red.abs_diff(yellow) > 1 {
            return Err(C4Error::InvalidState(format!(
                "piece counts differ by more than one (R={}, Y={})",
                red, yellow
            )));
        }
        Ok(())
    }
}

impl fmt::Display for GameState {
    /// Renders seven-character rows, top row first, using `O` for empty cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            for col in 0..COLS {
                let symbol = self.cells[row][col].map_or('O', Player::symbol);
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GameState (to move: {})", self.to_move)?;
        write!(f, "{}", self)
    }
}

/// Return a new state with `column` played, leaving `state` untouched.
pub fn apply_move(state: &GameState, column: usize) -> Result<GameState> {
    let mut next = state.clone();
    next.apply(column)?;
    Ok(next)
}

/// Terminal check for drivers that hold a state between moves.
pub fn check_terminal(state: &GameState) -> GameStatus {
    state.status()
}
