//! MENACE learning system
//!
//! This module provides the matchbox table, the learning agent, and training
//! utilities.

pub mod agent;
pub mod builder;
pub mod matchbox;
pub mod schedule;
pub mod state_space;
pub mod table;
pub mod training;

// Re-export main types
pub use agent::{AgentStats, Adjustment, GamePhase, LearningSummary, MenaceAgent, TrailEntry};
pub use builder::MenaceAgentBuilder;
pub use matchbox::Matchbox;
pub use schedule::InitialSeedSchedule;
pub use state_space::StateSpace;
pub use table::{MatchboxId, MatchboxTable};
pub use training::{
    OpponentType, TrainingBlockConfig, TrainingConfig, TrainingResults, TrainingSession,
};
