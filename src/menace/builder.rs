//! Builder pattern for MenaceAgent construction
//!
//! Provides a fluent API for configuring and creating MENACE agents,
//! following the builder pattern commonly used in Rust (e.g., std::thread::Builder).

use rand::{SeedableRng, rngs::StdRng};
use tracing::debug;

use super::{
    agent::{GamePhase, MenaceAgent},
    schedule::InitialSeedSchedule,
    state_space::StateSpace,
    table::MatchboxTable,
};
use crate::{app::AgentConfig, tictactoe::Player};

/// Builder for constructing MenaceAgent instances with custom configuration.
///
/// # Examples
///
/// ```
/// use menace_bot::{InitialSeedSchedule, MenaceAgentBuilder, Player};
///
/// // Defaults: the agent plays O and X opens
/// let agent = MenaceAgentBuilder::new().build();
/// assert_eq!(agent.agent_player(), Player::O);
///
/// // Custom configuration
/// let agent = MenaceAgentBuilder::new()
///     .seed(42)
///     .agent_player(Player::X)
///     .initial_seeds(InitialSeedSchedule::menace())
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct MenaceAgentBuilder {
    seed: Option<u64>,
    agent_player: Player,
    first_player: Player,
    initial_seeds: InitialSeedSchedule,
}

impl MenaceAgentBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an [`AgentConfig`].
    pub fn config(mut self, config: AgentConfig) -> Self {
        self.seed = config.seed;
        self.agent_player = config.agent_player;
        self.first_player = config.first_player;
        self.initial_seeds = config.initial_seeds;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set which mark the agent plays.
    pub fn agent_player(mut self, player: Player) -> Self {
        self.agent_player = player;
        self
    }

    /// Set which mark opens every game.
    pub fn first_player(mut self, player: Player) -> Self {
        self.first_player = player;
        self
    }

    /// Set the initial seed schedule for matchboxes.
    pub fn initial_seeds(mut self, schedule: InitialSeedSchedule) -> Self {
        self.initial_seeds = schedule;
        self
    }

    /// Build the MenaceAgent with the configured parameters.
    ///
    /// Enumerates the full canonical state space and seeds every matchbox.
    pub fn build(self) -> MenaceAgent {
        let space = StateSpace::enumerate(self.first_player);
        let table = MatchboxTable::from_state_space(space, &self.initial_seeds);

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        };
        debug!(
            seed = ?self.seed,
            agent_player = %self.agent_player,
            first_player = %self.first_player,
            initial_seeds = %self.initial_seeds,
            "built MENACE agent"
        );

        MenaceAgent {
            table,
            trail: Vec::new(),
            rng,
            agent_player: self.agent_player,
            first_player: self.first_player,
            initial_seeds: self.initial_seeds,
            phase: GamePhase::Idle,
        }
    }
}

impl Default for MenaceAgentBuilder {
    fn default() -> Self {
        let config = AgentConfig::default();
        Self {
            seed: config.seed,
            agent_player: config.agent_player,
            first_player: config.first_player,
            initial_seeds: config.initial_seeds,
        }
    }
}
