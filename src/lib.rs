//! MENACE (Matchbox Educable Noughts And Crosses Engine) implementation
//!
//! This crate provides:
//! - Tic-Tac-Toe board with win/draw detection and symmetry classification
//! - Canonical state-space enumeration, one matchbox per position
//! - A learning agent that reinforces the moves of won and drawn games
//! - Plain-text game logs and replay of recorded games
//! - A command-line front end for training and playing

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod history;
pub mod menace;
pub mod ports;
pub mod tictactoe;

pub use error::{Error, Result};
pub use history::GameRecord;
pub use menace::{
    AgentStats, InitialSeedSchedule, Matchbox, MatchboxId, MatchboxTable, MenaceAgent,
    MenaceAgentBuilder, StateSpace, TrailEntry,
};
pub use tictactoe::{
    Board, Cell, GameOutcome, GameState, Move, Player, Position, Symmetry, SymmetryRelation,
};
