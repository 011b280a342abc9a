//! Human-readable output for `c4 play`.

use c4_board::COLS;
use c4_mcts::MoveDecision;
use clap::ValueEnum;

/// How much `c4 play` prints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "PascalCase")]
pub enum ReportMode {
    /// Per-simulation trace, then column values and the move.
    Verbose,
    /// Column values and the move.
    Brief,
    /// Only the move.
    None,
}

impl ReportMode {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_filter(self) -> &'static str {
        match self {
            ReportMode::Verbose => "warn,c4_mcts=trace",
            ReportMode::Brief | ReportMode::None => "warn",
        }
    }
}

/// Lines printed after a decision, columns numbered from 1.
pub fn render(decision: &MoveDecision, mode: ReportMode) -> Vec<String> {
    let mut lines = Vec::with_capacity(COLS + 1);
    if mode != ReportMode::None {
        for col in 0..COLS {
            lines.push(match decision.column_stats(col) {
                Some(stats) => format!("Column {}: {:.2}", col + 1, stats.mean_value),
                None => format!("Column {}: Null", col + 1),
            });
        }
    }
    lines.push(format!("FINAL Move selected: {}", decision.column + 1));
    lines
}
