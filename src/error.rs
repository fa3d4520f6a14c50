//! Error types for the menace-bot crate

use thiserror::Error;

/// Main error type for the menace-bot crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("position ({row}, {col}) is out of bounds (board is 3x3)")]
    InvalidPosition { row: usize, col: usize },

    #[error("invalid move: cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[error("game already over")]
    GameOver,

    #[error("board string has wrong length: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("board rank {rank} is outside the canonical table (ranks 0..{ranks})")]
    RankOutOfRange { rank: usize, ranks: usize },

    #[error("no canonical state matches board '{board}' at rank {rank}")]
    NoMatchingState { board: String, rank: usize },

    #[error("matchbox for state '{board}' has no seeds left to pick from")]
    DepletedMatchbox { board: String },

    #[error("game log line {line}: {message}")]
    GameLogParse { line: usize, message: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

