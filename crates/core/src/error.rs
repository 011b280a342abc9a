use thiserror::Error;

/// Errors that can occur while playing or searching Connect Four positions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum C4Error {
    #[error("Invalid move in column {column}: {reason}")]
    InvalidMove { column: usize, reason: &'static str },

    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Convenience Result type for Connect Four operations
pub type Result<T> = std::result::Result<T, C4Error>;
