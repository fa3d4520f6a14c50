//! Tic-Tac-Toe board, rules and symmetries

pub mod board;
pub mod game;
pub mod lines;
pub mod symmetry;

pub use board::{Board, CELLS, COLS, Cell, GameState, Player, Position, ROWS};
pub use game::{GameOutcome, Move};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use symmetry::{Symmetry, SymmetryRelation, are_equivalent};
