//! Training utilities for MENACE

use std::{cell::RefCell, rc::Rc};

use rand::{SeedableRng, prelude::IndexedRandom, rngs::StdRng};
use serde::Serialize;
use tracing::{debug, warn};

use super::agent::MenaceAgent;
use crate::{
    history::GameRecord,
    tictactoe::{Board, GameOutcome, Move, Player, Position},
};

/// Games between two entries of the win-rate history
pub const WIN_RATE_INTERVAL: usize = 100;

/// Configuration for training session
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub num_games: usize,
    pub opponent: OpponentType,
    /// Seed for the opponent's random choices
    pub seed: Option<u64>,
    pub curriculum: Option<Vec<TrainingBlockConfig>>,
}

impl TrainingConfig {
    pub fn new(num_games: usize, opponent: OpponentType) -> Self {
        Self {
            num_games,
            opponent,
            seed: None,
            curriculum: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_curriculum(mut self, blocks: Vec<TrainingBlockConfig>) -> Self {
        self.curriculum = Some(blocks);
        self
    }
}

/// Sequential block of games played against a specific opponent configuration.
#[derive(Debug, Clone)]
pub struct TrainingBlockConfig {
    pub games: usize,
    pub opponent: OpponentType,
}

impl TrainingBlockConfig {
    pub fn new(opponent: OpponentType, games: usize) -> Self {
        Self { games, opponent }
    }
}

/// Type of opponent for training
#[derive(Debug, Clone)]
pub enum OpponentType {
    /// Uniformly random legal moves
    Random,
    /// Another learning agent seated at the other mark; it learns too
    Menace(Rc<RefCell<MenaceAgent>>),
}

/// A training session
pub struct TrainingSession {
    pub agent: MenaceAgent,
    pub config: TrainingConfig,
    pub games_played: usize,
    pub results: TrainingResults,
    rng: StdRng,
}

/// Results from training, from the trained agent's point of view
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrainingResults {
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    /// Games ended because a side could not produce a move; also counted
    /// as a win or loss
    pub forfeits: usize,
    /// Cumulative win rate sampled every [`WIN_RATE_INTERVAL`] games
    pub win_rate_history: Vec<f64>,
}

impl TrainingResults {
    pub fn games(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    pub fn win_rate(&self) -> f64 {
        match self.games() {
            0 => 0.0,
            games => self.wins as f64 / games as f64,
        }
    }

    fn record(&mut self, outcome: GameOutcome, agent_player: Player) {
        match outcome {
            GameOutcome::Win(winner) if winner == agent_player => self.wins += 1,
            GameOutcome::Draw => self.draws += 1,
            GameOutcome::Win(_) => self.losses += 1,
        }
    }
}

struct TrainingBlockRuntime {
    games: usize,
    opponent: OpponentRuntime,
}

impl TrainingBlockRuntime {
    fn new(config: TrainingBlockConfig) -> Self {
        Self {
            games: config.games,
            opponent: OpponentRuntime::from_type(config.opponent),
        }
    }
}

enum OpponentRuntime {
    Random,
    Menace(Rc<RefCell<MenaceAgent>>),
}

impl OpponentRuntime {
    fn from_type(opponent: OpponentType) -> Self {
        match opponent {
            OpponentType::Random => OpponentRuntime::Random,
            OpponentType::Menace(agent) => OpponentRuntime::Menace(agent),
        }
    }

    fn start_game(&mut self) {
        if let OpponentRuntime::Menace(agent) = self {
            agent.borrow_mut().start_game();
        }
    }

    fn select_move(&mut self, rng: &mut StdRng, board: &Board) -> crate::Result<Position> {
        match self {
            OpponentRuntime::Random => Self::random_move(rng, board),
            OpponentRuntime::Menace(agent) => agent.borrow_mut().next_move(board),
        }
    }

    fn finish_game(&mut self, outcome: GameOutcome) {
        if let OpponentRuntime::Menace(agent) = self {
            agent.borrow_mut().finish_game(outcome);
        }
    }

    /// Select a random move from available empty positions
    fn random_move(rng: &mut StdRng, board: &Board) -> crate::Result<Position> {
        let moves = board.empty_positions();
        moves.choose(rng).copied().ok_or(crate::Error::GameOver)
    }
}

impl TrainingSession {
    /// Create a new training session.
    ///
    /// # Errors
    /// Returns an error if an opposing agent sits at the same mark as the
    /// trained agent or expects a different opening player.
    pub fn new(agent: MenaceAgent, config: TrainingConfig) -> crate::Result<Self> {
        let opponents = config
            .curriculum
            .iter()
            .flatten()
            .map(|block| &block.opponent)
            .chain(std::iter::once(&config.opponent));
        for opponent in opponents {
            if let OpponentType::Menace(other) = opponent {
                let other = other.borrow();
                if other.agent_player() == agent.agent_player()
                    || other.first_player() != agent.first_player()
                {
                    return Err(crate::Error::InvalidConfiguration {
                        message: format!(
                            "opposing agent plays {} with {} first, trained agent plays {} with {} first",
                            other.agent_player(),
                            other.first_player(),
                            agent.agent_player(),
                            agent.first_player()
                        ),
                    });
                }
            }
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        };

        Ok(TrainingSession {
            agent,
            config,
            games_played: 0,
            results: TrainingResults::default(),
            rng,
        })
    }

    /// Run training for configured number of games
    pub fn train(&mut self) -> crate::Result<()> {
        self.train_with(|_| Ok(()))
    }

    /// Run training, handing every finished game to `on_game`.
    pub fn train_with(
        &mut self,
        mut on_game: impl FnMut(&GameRecord) -> crate::Result<()>,
    ) -> crate::Result<()> {
        let mut schedule = self.build_schedule();

        for block in &mut schedule {
            for _ in 0..block.games {
                let record = self.play_training_game(&mut block.opponent)?;
                self.games_played += 1;
                on_game(&record)?;

                if self.games_played.is_multiple_of(WIN_RATE_INTERVAL) {
                    self.results.win_rate_history.push(self.results.win_rate());
                }
            }
        }
        Ok(())
    }

    pub fn into_agent(self) -> MenaceAgent {
        self.agent
    }

    fn play_training_game(&mut self, opponent: &mut OpponentRuntime) -> crate::Result<GameRecord> {
        let agent_player = self.agent.agent_player();
        let first_player = self.agent.first_player();
        self.agent.start_game();
        opponent.start_game();

        let mut board = self.agent.new_board();
        let mut moves = Vec::new();

        let outcome = loop {
            if let Some(outcome) = board.state().outcome() {
                break outcome;
            }

            let to_move = board.player_on_turn();
            let chosen = if to_move == agent_player {
                self.agent.next_move(&board)
            } else {
                opponent.select_move(&mut self.rng, &board)
            };
            let position = match chosen {
                Ok(position) => position,
                Err(err) => {
                    warn!(%err, player = %to_move, board = %board.encode(), "no move available, forfeiting game");
                    self.results.forfeits += 1;
                    break GameOutcome::Win(to_move.opponent());
                }
            };

            board = board.place(position)?;
            moves.push(Move::new(to_move, position));
        };

        let summary = self.agent.finish_game(outcome);
        opponent.finish_game(outcome);
        self.results.record(outcome, agent_player);
        debug!(?outcome, moves = moves.len(), adjusted = summary.adjusted, "training game finished");

        Ok(GameRecord::new(first_player, agent_player, moves, outcome))
    }

    fn build_schedule(&self) -> Vec<TrainingBlockRuntime> {
        if let Some(blocks) = &self.config.curriculum {
            let schedule: Vec<_> = blocks
                .iter()
                .filter(|block| block.games > 0)
                .cloned()
                .map(TrainingBlockRuntime::new)
                .collect();
            if !schedule.is_empty() {
                return schedule;
            }
        }

        if self.config.num_games == 0 {
            return Vec::new();
        }

        vec![TrainingBlockRuntime::new(TrainingBlockConfig::new(
            self.config.opponent.clone(),
            self.config.num_games,
        ))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(player: Player, seed: u64) -> MenaceAgent {
        MenaceAgent::builder()
            .seed(seed)
            .agent_player(player)
            .build()
    }

    #[test]
    fn random_training_tallies_every_game() {
        let config = TrainingConfig::new(250, OpponentType::Random).with_seed(11);
        let mut session = TrainingSession::new(agent(Player::O, 3), config).unwrap();

        let mut records = Vec::new();
        session
            .train_with(|record| {
                records.push(record.clone());
                Ok(())
            })
            .unwrap();

        assert_eq!(session.games_played, 250);
        assert_eq!(session.results.games(), 250);
        assert_eq!(session.results.forfeits, 0);
        assert_eq!(session.results.win_rate_history.len(), 2);
        assert_eq!(records.len(), 250);
        for record in &records {
            let board = record.final_board().unwrap();
            assert_eq!(board.state().outcome(), Some(record.outcome));
        }
    }

    #[test]
    fn training_shifts_seeds() {
        let config = TrainingConfig::new(50, OpponentType::Random).with_seed(1);
        let fresh = agent(Player::X, 2).stats().total_seeds;
        let mut session = TrainingSession::new(agent(Player::X, 2), config).unwrap();
        session.train().unwrap();
        assert_ne!(session.into_agent().stats().total_seeds, fresh);
    }

    #[test]
    fn menace_opponent_learns_alongside() {
        let opponent = Rc::new(RefCell::new(agent(Player::X, 5)));
        let before = opponent.borrow().stats().total_seeds;
        let config = TrainingConfig::new(20, OpponentType::Menace(Rc::clone(&opponent)));
        let mut session = TrainingSession::new(agent(Player::O, 6), config).unwrap();
        session.train().unwrap();

        assert_eq!(session.results.games(), 20);
        assert_ne!(opponent.borrow().stats().total_seeds, before);
        assert!(opponent.borrow().trail().is_empty());
    }

    #[test]
    fn rejects_opponent_on_same_mark() {
        let opponent = Rc::new(RefCell::new(agent(Player::O, 5)));
        let config = TrainingConfig::new(1, OpponentType::Menace(opponent));
        assert!(matches!(
            TrainingSession::new(agent(Player::O, 6), config),
            Err(crate::Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn curriculum_runs_blocks_in_order() {
        let opponent = Rc::new(RefCell::new(agent(Player::X, 8)));
        let config = TrainingConfig::new(0, OpponentType::Random).with_curriculum(vec![
            TrainingBlockConfig::new(OpponentType::Random, 30),
            TrainingBlockConfig::new(OpponentType::Menace(opponent), 20),
        ]);
        let mut session = TrainingSession::new(agent(Player::O, 9), config).unwrap();
        session.train().unwrap();
        assert_eq!(session.games_played, 50);
    }
}
