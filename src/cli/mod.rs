//! Command-line interface for the MENACE bot
//!
//! This module provides the commands for inspecting the state space, training
//! against a random opponent, playing interactively, and replaying game logs.

pub mod commands;
pub mod config;
pub mod output;
