//! States command - Enumerate the canonical state space

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::{
        config::parse_player_token,
        output::{format_number, print_kv, print_section},
    },
    menace::StateSpace,
};

#[derive(Parser, Debug)]
#[command(about = "Show the canonical state space by rank")]
pub struct StatesArgs {
    /// Which token makes the first move (`x` or `o`)
    #[arg(long, default_value = "x")]
    pub first_player: String,

    /// Print every canonical board
    #[arg(long)]
    pub boards: bool,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct StateSpaceSummary {
    first_player: String,
    counts: Vec<usize>,
    total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    boards: Option<Vec<Vec<String>>>,
}

pub fn execute(args: StatesArgs) -> Result<()> {
    let first_player = parse_player_token(&args.first_player, "--first-player")?;
    let space = StateSpace::enumerate(first_player);
    let counts = space.counts();

    if args.json {
        let summary = StateSpaceSummary {
            first_player: first_player.to_string(),
            counts,
            total: space.len(),
            boards: args.boards.then(|| {
                (0..space.counts().len())
                    .map(|rank| space.boards_at(rank).iter().map(|b| b.encode()).collect())
                    .collect()
            }),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_section(&format!("Canonical states ({first_player} moves first)"));
    for (rank, count) in counts.iter().enumerate() {
        print_kv(&format!("Rank {rank}"), &format_number(*count));
        if args.boards {
            for board in space.boards_at(rank) {
                println!("      {}", board.encode());
            }
        }
    }
    print_kv("Total", &format_number(space.len()));
    Ok(())
}
