//! Train command - Train the agent against a scripted or learning opponent

use std::{cell::RefCell, rc::Rc};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::{
    app::App,
    cli::{
        config::{AgentArgs, LogArgs},
        output::{
            create_training_progress, format_percent, print_agent_stats, print_section,
            print_training_results,
        },
    },
    menace::{AgentStats, OpponentType, TrainingConfig, TrainingResults, TrainingSession},
};

/// Opponent to train against
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OpponentKind {
    /// Uniformly random legal moves
    Random,
    /// A second learning agent on the other mark
    Menace,
}

#[derive(Parser, Debug)]
#[command(about = "Train the agent", allow_negative_numbers = true)]
pub struct TrainArgs {
    #[command(flatten)]
    pub agent: AgentArgs,

    #[command(flatten)]
    pub logs: LogArgs,

    /// Number of training games
    #[arg(long, short = 'g', default_value_t = 500)]
    pub games: usize,

    /// Opponent to train against
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentKind::Random)]
    pub opponent: OpponentKind,

    /// Seed for the opponent's random moves
    #[arg(long)]
    pub opponent_seed: Option<u64>,

    /// Learn from existing game logs before training
    #[arg(long)]
    pub replay_logs: bool,

    /// Write a game log for every training game
    #[arg(long)]
    pub save_logs: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Emit JSON instead of a summary table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct TrainingSummary<'a> {
    games: usize,
    results: &'a TrainingResults,
    agent: AgentStats,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.agent.to_agent_config()?;
    let app = App::new(&args.logs.log_dir);

    let agent = if args.replay_logs {
        app.load_agent(config.clone())
            .with_context(|| format!("replaying logs from {}", args.logs.log_dir.display()))?
    } else {
        app.create_agent(config.clone())
    };

    let opponent = match args.opponent {
        OpponentKind::Random => OpponentType::Random,
        OpponentKind::Menace => {
            let mut opponent_config = config
                .clone()
                .with_agent_player(config.agent_player.opponent());
            opponent_config.seed = config.seed.map(|seed| seed.wrapping_add(1));
            OpponentType::Menace(Rc::new(RefCell::new(app.create_agent(opponent_config))))
        }
    };

    let mut training = TrainingConfig::new(args.games, opponent);
    if let Some(seed) = args.opponent_seed.or(config.seed) {
        training = training.with_seed(seed);
    }
    let mut session = TrainingSession::new(agent, training)?;

    let progress = (!args.no_progress && !args.json)
        .then(|| create_training_progress(args.games as u64));
    let agent_player = session.agent.agent_player();
    let (mut played, mut wins) = (0usize, 0usize);
    session
        .train_with(|record| {
            if args.save_logs {
                app.record_game(record)?;
            }
            played += 1;
            if record.outcome.winner() == Some(agent_player) {
                wins += 1;
            }
            if let Some(pb) = &progress {
                pb.set_message(format!("win rate {}", format_percent(wins, played)));
                pb.inc(1);
            }
            Ok(())
        })
        .context("training failed")?;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let stats = session.agent.stats();
    if args.json {
        let summary = TrainingSummary {
            games: session.games_played,
            results: &session.results,
            agent: stats,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_section(&format!(
        "Training results ({} as {})",
        match args.opponent {
            OpponentKind::Random => "vs random",
            OpponentKind::Menace => "vs MENACE",
        },
        session.agent.agent_player()
    ));
    print_training_results(&session.results);
    print_section("Agent");
    print_agent_stats(&stats);
    Ok(())
}
