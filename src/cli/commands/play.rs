//! Play command - Text-mode games between a human and the agent

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

use crate::{
    app::App,
    cli::{
        config::{AgentArgs, LogArgs},
        output::{print_kv, print_section, render_board},
    },
    history::GameRecord,
    menace::MenaceAgent,
    tictactoe::{Board, GameOutcome, Move, Position},
};

#[derive(Parser, Debug)]
#[command(about = "Play against the agent on the terminal")]
pub struct PlayArgs {
    #[command(flatten)]
    pub agent: AgentArgs,

    #[command(flatten)]
    pub logs: LogArgs,

    /// Do not write a game log after each game
    #[arg(long)]
    pub no_save: bool,
}

/// Tally of an interactive session, from the human's point of view
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionTally {
    pub human_wins: usize,
    pub draws: usize,
    pub agent_wins: usize,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = args.agent.to_agent_config()?;
    let app = App::new(&args.logs.log_dir);
    let mut agent = app
        .load_agent(config)
        .with_context(|| format!("replaying logs from {}", args.logs.log_dir.display()))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let tally = run_session(
        &mut agent,
        stdin.lock(),
        stdout.lock(),
        |record| {
            if args.no_save {
                return Ok(());
            }
            let name = app.record_game(record)?;
            println!("Saved {name}");
            Ok(())
        },
    )?;

    print_section("Session");
    print_kv("You won", &tally.human_wins.to_string());
    print_kv("Draws", &tally.draws.to_string());
    print_kv("MENACE won", &tally.agent_wins.to_string());
    Ok(())
}

/// Play games until the human declines another one or input ends.
///
/// Every finished game is learned from and passed to `on_game`.
pub fn run_session<R: BufRead, W: Write>(
    agent: &mut MenaceAgent,
    mut input: R,
    mut out: W,
    mut on_game: impl FnMut(&GameRecord) -> Result<()>,
) -> Result<SessionTally> {
    let mut tally = SessionTally::default();

    loop {
        let Some(record) = play_game(agent, &mut input, &mut out)? else {
            writeln!(out, "Game abandoned.")?;
            break;
        };
        agent.finish_game(record.outcome);
        on_game(&record)?;

        match record.outcome {
            GameOutcome::Draw => tally.draws += 1,
            GameOutcome::Win(winner) if winner == agent.agent_player() => tally.agent_wins += 1,
            GameOutcome::Win(_) => tally.human_wins += 1,
        }

        write!(out, "Play again? [y/N] ")?;
        out.flush()?;
        match read_line(&mut input)? {
            Some(answer) if answer.trim().eq_ignore_ascii_case("y") => continue,
            _ => break,
        }
    }
    Ok(tally)
}

/// One game; `None` when input ends before the game does.
fn play_game<R: BufRead, W: Write>(
    agent: &mut MenaceAgent,
    input: &mut R,
    out: &mut W,
) -> Result<Option<GameRecord>> {
    agent.start_game();
    let agent_player = agent.agent_player();
    let human = agent_player.opponent();
    let mut board = agent.new_board();
    let mut moves = Vec::new();

    writeln!(out, "You play {human}. Enter moves as: row col")?;
    let outcome = loop {
        if let Some(outcome) = board.state().outcome() {
            break outcome;
        }

        let to_move = board.player_on_turn();
        let position = if to_move == agent_player {
            match agent.next_move(&board) {
                Ok(position) => {
                    writeln!(out, "MENACE plays {position}")?;
                    position
                }
                Err(err) => {
                    warn!(%err, "agent could not move");
                    writeln!(out, "MENACE resigns: {err}")?;
                    break GameOutcome::Win(human);
                }
            }
        } else {
            write!(out, "{}", render_board(&board))?;
            match prompt_move(&board, input, out)? {
                Some(position) => position,
                None => return Ok(None),
            }
        };

        board = board.place(position)?;
        moves.push(Move::new(to_move, position));
    };

    write!(out, "{}", render_board(&board))?;
    match outcome {
        GameOutcome::Draw => writeln!(out, "Draw.")?,
        GameOutcome::Win(winner) if winner == human => writeln!(out, "You win!")?,
        GameOutcome::Win(_) => writeln!(out, "MENACE wins.")?,
    }

    Ok(Some(GameRecord::new(
        board.first_player(),
        agent_player,
        moves,
        outcome,
    )))
}

fn prompt_move<R: BufRead, W: Write>(
    board: &Board,
    input: &mut R,
    out: &mut W,
) -> Result<Option<Position>> {
    loop {
        write!(out, "Your move: ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match parse_move(&line) {
            Ok(position) if board.is_empty(position) => return Ok(Some(position)),
            Ok(position) => writeln!(out, "{position} is taken.")?,
            Err(message) => writeln!(out, "{message}")?,
        }
    }
}

/// Parse `row col`, also accepting `row,col`.
fn parse_move(line: &str) -> std::result::Result<Position, String> {
    let coords: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .collect();
    let [row, col] = coords.as_slice() else {
        return Err("Enter a row and a column, e.g. 1 1".to_string());
    };
    let parse = |token: &str| {
        token
            .parse::<usize>()
            .map_err(|_| format!("'{token}' is not a number"))
    };
    Position::new(parse(row)?, parse(col)?).map_err(|err| err.to_string())
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("reading from stdin")?;
    Ok((read > 0).then_some(line))
}
