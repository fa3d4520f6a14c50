//! Shared argument groups for CLI commands

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Args;

use crate::{
    app::{AgentConfig, container::DEFAULT_LOG_DIR},
    menace::InitialSeedSchedule,
    tictactoe::Player,
};

/// Options describing the agent every command builds
#[derive(Args, Debug, Clone)]
pub struct AgentArgs {
    /// Which token the agent controls (`x` or `o`)
    #[arg(long, default_value = "o")]
    pub agent_player: String,

    /// Which token makes the first move (`x` or `o`)
    #[arg(long, default_value = "x")]
    pub first_player: String,

    /// Initial seeds per cell: one count, or four counts for successive decisions
    #[arg(long, default_value = "4")]
    pub initial_seeds: String,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

impl AgentArgs {
    pub fn to_agent_config(&self) -> Result<AgentConfig> {
        let agent_player = parse_player_token(&self.agent_player, "--agent-player")?;
        let first_player = parse_player_token(&self.first_player, "--first-player")?;
        let initial_seeds: InitialSeedSchedule = self.initial_seeds.parse()?;

        let mut config = AgentConfig::new(agent_player)
            .with_first_player(first_player)
            .with_initial_seeds(initial_seeds);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config)
    }
}

/// Options for commands that read or write game logs
#[derive(Args, Debug, Clone)]
pub struct LogArgs {
    /// Directory holding `GameLog_<time>.log` files
    #[arg(long, default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,
}

pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "cross" | "first" | "p1" => Ok(Player::X),
        "o" | "nought" | "second" | "p2" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}
