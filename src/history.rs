//! Recorded games and their plain-text log format.
//!
//! A log holds one game:
//!
//! ```text
//! FirstPlayer:	CROSS	Bot:	NOUGHT
//! #Moves:	5
//! CROSS	1	1
//! NOUGHT	0	0
//! CROSS	0	2
//! NOUGHT	1	0
//! CROSS	2	0
//! PLAYER_WINS
//! ```
//!
//! Fields are tab separated when written; any whitespace is accepted when
//! read. The outcome is stated from the bot's point of view.

use serde::Serialize;

use crate::{
    Error, Result,
    tictactoe::{Board, GameOutcome, Move, Player, Position},
};

const FIRST_PLAYER_KEY: &str = "FirstPlayer:";
const BOT_KEY: &str = "Bot:";
const MOVES_KEY: &str = "#Moves:";

/// A complete game as seen by the agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub first_player: Player,
    /// Mark the agent played
    pub agent_player: Player,
    pub moves: Vec<Move>,
    pub outcome: GameOutcome,
}

impl GameRecord {
    pub fn new(
        first_player: Player,
        agent_player: Player,
        moves: Vec<Move>,
        outcome: GameOutcome,
    ) -> Self {
        Self {
            first_player,
            agent_player,
            moves,
            outcome,
        }
    }

    /// Replay the moves from an empty board.
    ///
    /// # Errors
    /// Returns the first placement the board rejects.
    pub fn final_board(&self) -> Result<Board> {
        self.moves
            .iter()
            .try_fold(Board::new(self.first_player), |board, mv| {
                board.place_mark(mv.position, mv.player)
            })
    }

    /// Render the record in log format, newline terminated.
    pub fn to_log_string(&self) -> String {
        let mut out = format!(
            "{FIRST_PLAYER_KEY}\t{}\t{BOT_KEY}\t{}\n{MOVES_KEY}\t{}\n",
            mark_token(self.first_player),
            mark_token(self.agent_player),
            self.moves.len()
        );
        for mv in &self.moves {
            out.push_str(&format!(
                "{}\t{}\t{}\n",
                mark_token(mv.player),
                mv.position.row(),
                mv.position.col()
            ));
        }
        out.push_str(outcome_token(self.outcome, self.agent_player));
        out.push('\n');
        out
    }

    /// Parse a record from log text.
    ///
    /// Blank lines are ignored. The move count must match the number of move
    /// lines, and nothing may follow the outcome line.
    pub fn parse_log(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.split_whitespace().collect::<Vec<_>>()))
            .filter(|(_, tokens)| !tokens.is_empty());

        let (line, header) = lines.next().ok_or_else(|| parse_error(1, "empty game log"))?;
        let (first_player, agent_player) = match header.as_slice() {
            [FIRST_PLAYER_KEY, first, BOT_KEY, bot] => {
                (parse_mark(line, first)?, parse_mark(line, bot)?)
            }
            _ => {
                return Err(parse_error(
                    line,
                    format!("expected '{FIRST_PLAYER_KEY} <MARK> {BOT_KEY} <MARK>'"),
                ));
            }
        };

        let (line, count) = lines
            .next()
            .ok_or_else(|| parse_error(line + 1, "missing move count"))?;
        let count: usize = match count.as_slice() {
            [MOVES_KEY, n] => n
                .parse()
                .map_err(|_| parse_error(line, format!("invalid move count '{n}'")))?,
            _ => return Err(parse_error(line, format!("expected '{MOVES_KEY} <N>'"))),
        };

        let mut moves = Vec::with_capacity(count.min(crate::tictactoe::CELLS));
        let mut last_line = line;
        for _ in 0..count {
            let (line, tokens) = lines.next().ok_or_else(|| {
                parse_error(
                    last_line + 1,
                    format!("expected {count} moves, found {}", moves.len()),
                )
            })?;
            moves.push(parse_move(line, &tokens)?);
            last_line = line;
        }

        let (line, outcome) = lines
            .next()
            .ok_or_else(|| parse_error(last_line + 1, "missing outcome"))?;
        let outcome = match outcome.as_slice() {
            [token] => parse_outcome(line, token, agent_player)?,
            _ => return Err(parse_error(line, "expected an outcome")),
        };

        if let Some((line, _)) = lines.next() {
            return Err(parse_error(line, "unexpected content after outcome"));
        }

        Ok(Self {
            first_player,
            agent_player,
            moves,
            outcome,
        })
    }
}

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::GameLogParse {
        line,
        message: message.into(),
    }
}

fn mark_token(player: Player) -> &'static str {
    match player {
        Player::X => "CROSS",
        Player::O => "NOUGHT",
    }
}

fn parse_mark(line: usize, token: &str) -> Result<Player> {
    match token {
        "CROSS" => Ok(Player::X),
        "NOUGHT" => Ok(Player::O),
        other => Err(parse_error(line, format!("unknown mark '{other}'"))),
    }
}

fn parse_move(line: usize, tokens: &[&str]) -> Result<Move> {
    let [mark, row, col] = tokens else {
        return Err(parse_error(line, "expected '<MARK> <ROW> <COL>'"));
    };
    let player = parse_mark(line, mark)?;
    let coordinate = |token: &str| {
        token
            .parse::<usize>()
            .map_err(|_| parse_error(line, format!("invalid coordinate '{token}'")))
    };
    let position = Position::new(coordinate(*row)?, coordinate(*col)?)
        .map_err(|err| parse_error(line, err.to_string()))?;
    Ok(Move::new(player, position))
}

fn outcome_token(outcome: GameOutcome, agent_player: Player) -> &'static str {
    match outcome {
        GameOutcome::Draw => "DRAW",
        GameOutcome::Win(winner) if winner == agent_player => "BOT_WINS",
        GameOutcome::Win(_) => "PLAYER_WINS",
    }
}

fn parse_outcome(line: usize, token: &str, agent_player: Player) -> Result<GameOutcome> {
    match token {
        "BOT_WINS" => Ok(GameOutcome::Win(agent_player)),
        "PLAYER_WINS" => Ok(GameOutcome::Win(agent_player.opponent())),
        "DRAW" => Ok(GameOutcome::Draw),
        other => Err(parse_error(line, format!("unknown outcome '{other}'"))),
    }
}
