//! Text format for boards and move-selection requests.
//!
//! A request file looks like:
//! ```text
//! UCT
//! Y
//! OOOOOOO
//! OOOOOOO
//! OOOOOOO
//! OOYOOOO
//! OOYRROO
//! OOYRROO
//! ```
//! Line 1 is the algorithm tag, line 2 the player to move, and lines 3-8
//! the rows from top to bottom (`O` empty, `R` red, `Y` yellow).

use crate::state::{GameState, COLS, ROWS};
use c4_core::{C4Error, Player, Result};

/// Lines before the first board row.
const HEADER_LINES: usize = 2;

/// A parsed move-selection request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    /// Algorithm tag exactly as written (`UR`, `PMCGS`, `UCT`).
    /// Interpreted by the search crate.
    pub algorithm: String,

    /// Board with the requested player to move.
    pub state: GameState,
}

fn parse_error(line: usize, message: impl Into<String>) -> C4Error {
    C4Error::Parse {
        line,
        message: message.into(),
    }
}

impl GameState {
    /// Build a state from six rows listed top row first.
    ///
    /// # Errors
    /// - `C4Error::Parse` for a wrong row count, row width or unknown symbol
    ///   (line numbers count from 1 within `rows`)
    /// - `C4Error::InvalidState` for floating pieces or unbalanced piece counts
    pub fn from_rows<S: AsRef<str>>(rows: &[S], to_move: Player) -> Result<Self> {
        if rows.len() != ROWS {
            return Err(parse_error(
                rows.len(),
                format!("expected {} board rows, got {}", ROWS, rows.len()),
            ));
        }

        let mut cells = [[None; COLS]; ROWS];
        for (i, line) in rows.iter().enumerate() {
            let line = line.as_ref().trim();
            let width = line.chars().count();
            if width != COLS {
                return Err(parse_error(
                    i + 1,
                    format!("board row must have exactly {} characters, got {}", COLS, width),
                ));
            }

            // Text is top row first, storage is bottom row first
            let row = ROWS - 1 - i;
            for (col, symbol) in line.chars().enumerate() {
                cells[row][col] = match symbol {
                    'O' => None,
                    other => Some(Player::from_symbol(other).ok_or_else(|| {
                        parse_error(i + 1, format!("invalid symbol '{}' in column {}", other, col + 1))
                    })?),
                };
            }
        }

        let state = GameState::from_cells(cells, to_move);
        state.validate()?;
        Ok(state)
    }
}

/// Parse a full request: algorithm tag, mover, then six board rows.
///
/// Blank trailing lines are ignored; any other extra line is an error.
pub fn parse_request(text: &str) -> Result<Request> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let used = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .map_or(0, |last| last + 1);

    let expected = HEADER_LINES + ROWS;
    if used < expected {
        return Err(parse_error(
            used,
            format!(
                "expected {} lines (algorithm, player, {} board rows), got {}",
                expected, ROWS, used
            ),
        ));
    }
    if used > expected {
        return Err(parse_error(expected + 1, "unexpected content after the board"));
    }

    let algorithm = lines[0].to_string();
    if algorithm.is_empty() {
        return Err(parse_error(1, "missing algorithm tag"));
    }

    let to_move = lines[1].parse::<Player>().map_err(|_| {
        parse_error(2, format!("invalid player '{}', expected 'R' or 'Y'", lines[1]))
    })?;

    let state = GameState::from_rows(&lines[HEADER_LINES..expected], to_move).map_err(|e| match e {
        C4Error::Parse { line, message } => parse_error(line + HEADER_LINES, message),
        other => other,
    })?;

    Ok(Request { algorithm, state })
}
