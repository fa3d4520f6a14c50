//! Replay command - Rebuild the agent from game logs and inspect it

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    adapters::DirectoryGameLogRepository,
    cli::{
        config::{AgentArgs, LogArgs},
        output::{create_spinner, print_agent_stats, print_kv, print_section},
    },
    menace::{AgentStats, MenaceAgent},
    ports::GameLogRepository,
    tictactoe::{Board, Symmetry},
};

#[derive(Parser, Debug)]
#[command(about = "Replay game logs into a fresh agent")]
pub struct ReplayArgs {
    #[command(flatten)]
    pub agent: AgentArgs,

    #[command(flatten)]
    pub logs: LogArgs,

    /// Show the matchbox for a board, e.g. `X...O....`
    #[arg(long)]
    pub inspect: Vec<String>,

    /// Emit JSON instead of a summary table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct MatchboxView {
    board: String,
    canonical_board: String,
    symmetry: Symmetry,
    /// (row, col, seeds) in the queried board's frame
    seeds: Vec<(usize, usize, u32)>,
}

#[derive(Debug, Serialize)]
struct ReplaySummary {
    records: usize,
    applied: usize,
    agent: AgentStats,
    matchboxes: Vec<MatchboxView>,
}

pub fn execute(args: ReplayArgs) -> Result<()> {
    let config = args.agent.to_agent_config()?;
    let repo = DirectoryGameLogRepository::new(&args.logs.log_dir);

    let spinner = (!args.json).then(|| create_spinner("Building state space"));
    let mut agent = MenaceAgent::builder().config(config).build();
    if let Some(pb) = &spinner {
        pb.set_message("Replaying game logs");
    }
    let records = repo
        .load_all()
        .with_context(|| format!("loading logs from {}", args.logs.log_dir.display()))?;
    let applied = agent.learn_from_records(&records);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let matchboxes = args
        .inspect
        .iter()
        .map(|text| inspect(&agent, text))
        .collect::<Result<Vec<_>>>()?;

    let summary = ReplaySummary {
        records: records.len(),
        applied,
        agent: agent.stats(),
        matchboxes,
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_section(&format!("Replayed {}", args.logs.log_dir.display()));
    print_kv("Game logs", &summary.records.to_string());
    print_kv("Applied", &summary.applied.to_string());
    print_agent_stats(&summary.agent);
    for view in &summary.matchboxes {
        print_section(&format!("Matchbox for {}", view.board));
        print_kv("Canonical board", &view.canonical_board);
        print_kv("Symmetry", &format!("{:?}", view.symmetry));
        for (row, col, seeds) in &view.seeds {
            print_kv(&format!("({row}, {col})"), &seeds.to_string());
        }
    }
    Ok(())
}

fn inspect(agent: &MenaceAgent, text: &str) -> Result<MatchboxView> {
    let board: Board = text
        .parse::<Board>()
        .with_context(|| format!("invalid board '{text}'"))?
        .with_first_player(agent.first_player());
    let (id, symmetry) = agent.find_matchbox(&board)?;
    let matchbox = &agent.table()[id];

    let mut seeds: Vec<(usize, usize, u32)> = matchbox
        .entries()
        .map(|(pos, count)| {
            let live = symmetry.apply(pos);
            (live.row(), live.col(), count)
        })
        .collect();
    seeds.sort_unstable();

    Ok(MatchboxView {
        board: board.encode(),
        canonical_board: matchbox.board().encode(),
        symmetry,
        seeds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Player;

    #[test]
    fn inspect_reports_seeds_in_live_frame() {
        let agent = MenaceAgent::builder().agent_player(Player::X).build();
        let view = inspect(&agent, "........X").unwrap();
        assert_eq!(view.canonical_board, "X........");
        assert_eq!(view.seeds.len(), 8);
        assert!(view.seeds.iter().all(|&(row, col, seeds)| (row, col) != (2, 2) && seeds == 4));
    }

    #[test]
    fn inspect_rejects_bad_board() {
        let agent = MenaceAgent::builder().build();
        assert!(inspect(&agent, "XX").is_err());
        assert!(inspect(&agent, "OOO OOO OOO").is_err());
    }
}
