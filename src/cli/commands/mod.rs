//! Command implementations for the CLI

pub mod play;
pub mod replay;
pub mod states;
pub mod train;
