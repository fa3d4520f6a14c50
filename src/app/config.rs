//! Configuration types for agent creation.

use crate::{menace::InitialSeedSchedule, tictactoe::Player};

/// Configuration for creating a MENACE agent.
///
/// # Examples
///
/// ```
/// use menace_bot::app::AgentConfig;
/// use menace_bot::{InitialSeedSchedule, Player};
///
/// let config = AgentConfig::default()
///     .with_seed(42)
///     .with_agent_player(Player::X)
///     .with_initial_seeds(InitialSeedSchedule::menace());
/// ```
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Mark played by the agent
    pub agent_player: Player,
    /// Mark that opens every game
    pub first_player: Player,
    /// Initial seeds per empty cell, by rank
    pub initial_seeds: InitialSeedSchedule,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Create a configuration for an agent playing `agent_player`.
    ///
    /// Uses default values for other parameters:
    /// - First player: X
    /// - Initial seeds: 4 per cell at every rank
    /// - Seed: None (non-deterministic)
    pub fn new(agent_player: Player) -> Self {
        Self {
            agent_player,
            first_player: Player::X,
            initial_seeds: InitialSeedSchedule::default(),
            seed: None,
        }
    }

    pub fn with_agent_player(mut self, player: Player) -> Self {
        self.agent_player = player;
        self
    }

    pub fn with_first_player(mut self, player: Player) -> Self {
        self.first_player = player;
        self
    }

    /// Set the initial seed schedule.
    pub fn with_initial_seeds(mut self, schedule: InitialSeedSchedule) -> Self {
        self.initial_seeds = schedule;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for AgentConfig {
    /// The agent plays O against an opponent who opens with X.
    fn default() -> Self {
        Self::new(Player::O)
    }
}
