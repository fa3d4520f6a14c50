//! MENACE agent that learns to play Tic-Tac-Toe from game outcomes.

use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;
use tracing::{debug, error, warn};

use super::{
    builder::MenaceAgentBuilder,
    matchbox::Matchbox,
    schedule::InitialSeedSchedule,
    state_space::StateSpace,
    table::{MatchboxId, MatchboxTable},
};
use crate::{
    history::GameRecord,
    tictactoe::{Board, GameOutcome, Player, Position, Symmetry},
};

/// One decision made during the current game: which matchbox was used and
/// which cell was chosen, in the matchbox's own (canonical) frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrailEntry {
    pub matchbox: MatchboxId,
    pub position: Position,
}

/// Whether the agent is between games or inside one.
///
/// A game moves `Idle -> InProgress -> Idle`. The finished state lasts only
/// for the body of [`MenaceAgent::finish_game`], which applies the outcome
/// and returns to `Idle`, so it has no variant of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// No decisions pending
    Idle,
    /// At least one decision waits for the game's outcome
    InProgress,
}

/// Seed adjustment applied to every trail entry at the end of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Adjustment {
    Reward,
    RewardDraw,
    Punish,
}

impl Adjustment {
    fn for_outcome(outcome: GameOutcome, agent_player: Player) -> Self {
        match outcome {
            GameOutcome::Draw => Adjustment::RewardDraw,
            GameOutcome::Win(winner) if winner == agent_player => Adjustment::Reward,
            GameOutcome::Win(_) => Adjustment::Punish,
        }
    }

    fn apply(self, matchbox: &mut Matchbox, position: Position) {
        match self {
            Adjustment::Reward => matchbox.reward_move(position),
            Adjustment::RewardDraw => matchbox.reward_drawn_move(position),
            Adjustment::Punish => matchbox.punish_move(position),
        }
    }
}

/// What [`MenaceAgent::finish_game`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LearningSummary {
    pub adjustment: Adjustment,
    /// Number of trail entries adjusted
    pub adjusted: usize,
}

/// Statistics about a MENACE agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentStats {
    pub matchboxes: usize,
    /// Matchboxes for positions where the agent is the one to move
    pub decision_matchboxes: usize,
    pub total_seeds: u64,
}

/// MENACE learning agent.
///
/// Owns one matchbox per canonical position, the trail of decisions made in
/// the current game, and its random source.
pub struct MenaceAgent {
    pub(crate) table: MatchboxTable,
    pub(crate) trail: Vec<TrailEntry>,
    pub(crate) rng: StdRng,
    pub(crate) agent_player: Player,
    pub(crate) first_player: Player,
    pub(crate) initial_seeds: InitialSeedSchedule,
    pub(crate) phase: GamePhase,
}

impl std::fmt::Debug for MenaceAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenaceAgent")
            .field("matchboxes", &self.table.len())
            .field("trail", &self.trail.len())
            .field("agent_player", &self.agent_player)
            .field("first_player", &self.first_player)
            .field("phase", &self.phase)
            .finish()
    }
}

impl MenaceAgent {
    /// Create a new builder for constructing a MENACE agent.
    ///
    /// # Example
    /// ```
    /// use menace_bot::{MenaceAgent, Player};
    ///
    /// let agent = MenaceAgent::builder()
    ///     .seed(42)
    ///     .agent_player(Player::O)
    ///     .build();
    /// assert_eq!(agent.table().len(), 627);
    /// ```
    pub fn builder() -> MenaceAgentBuilder {
        MenaceAgentBuilder::new()
    }

    /// Create an agent with default configuration.
    pub fn new(seed: Option<u64>) -> Self {
        let mut builder = Self::builder();
        if let Some(s) = seed {
            builder = builder.seed(s);
        }
        builder.build()
    }

    /// Set or reset the agent's RNG seed
    pub fn reseed(&mut self, seed: Option<u64>) {
        self.rng = match seed {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        };
    }

    pub fn agent_player(&self) -> Player {
        self.agent_player
    }

    pub fn first_player(&self) -> Player {
        self.first_player
    }

    pub fn initial_seeds(&self) -> &InitialSeedSchedule {
        &self.initial_seeds
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn table(&self) -> &MatchboxTable {
        &self.table
    }

    pub fn trail(&self) -> &[TrailEntry] {
        &self.trail
    }

    /// An empty board with this agent's opening player
    pub fn new_board(&self) -> Board {
        Board::new(self.first_player)
    }

    /// Forget any decisions recorded for an unfinished game.
    pub fn start_game(&mut self) {
        if !self.trail.is_empty() {
            debug!(
                discarded = self.trail.len(),
                "starting new game, discarding trail"
            );
        }
        self.trail.clear();
        self.phase = GamePhase::Idle;
    }

    /// Locate the matchbox for a live board and the transform taking its
    /// canonical board onto the live one.
    pub fn find_matchbox(&self, board: &Board) -> crate::Result<(MatchboxId, Symmetry)> {
        self.table.find(board)
    }

    /// Choose a move for the live board and remember it for learning.
    ///
    /// The returned position is in the live board's frame and is always an
    /// empty cell there.
    ///
    /// # Errors
    /// Returns an error if the board is finished, has no matchbox, or its
    /// matchbox has run out of seeds. The trail is left unchanged.
    pub fn next_move(&mut self, board: &Board) -> crate::Result<Position> {
        if board.is_terminal() {
            return Err(crate::Error::GameOver);
        }

        let (id, symmetry) = self.table.find(board).inspect_err(|err| {
            error!(%err, board = %board.encode(), "no matchbox for live board");
        })?;

        let matchbox = &self.table[id];
        let Some(canonical) = matchbox.pick_move(&mut self.rng) else {
            let err = crate::Error::DepletedMatchbox {
                board: matchbox.board().encode(),
            };
            error!(%err, board = %board.encode(), "matchbox has no seeds left");
            return Err(err);
        };
        let position = symmetry.apply(canonical);
        debug_assert!(board.is_empty(position));

        debug!(
            board = %board.encode(),
            canonical_board = %matchbox.board().encode(),
            ?symmetry,
            %canonical,
            %position,
            "picked move"
        );

        self.trail.push(TrailEntry {
            matchbox: id,
            position: canonical,
        });
        self.phase = GamePhase::InProgress;
        Ok(position)
    }

    /// Adjust every matchbox used this game according to the outcome, then
    /// clear the trail.
    pub fn finish_game(&mut self, outcome: GameOutcome) -> LearningSummary {
        let adjustment = Adjustment::for_outcome(outcome, self.agent_player);
        let adjusted = self.trail.len();

        for entry in self.trail.drain(..) {
            let matchbox = &mut self.table[entry.matchbox];
            adjustment.apply(matchbox, entry.position);
            debug!(
                rank = entry.matchbox.rank,
                index = entry.matchbox.index,
                position = %entry.position,
                seeds = ?matchbox.seeds(entry.position),
                ?adjustment,
                "adjusted matchbox"
            );
        }

        self.phase = GamePhase::Idle;
        LearningSummary {
            adjustment,
            adjusted,
        }
    }

    /// Rebuild the trail from a recorded game.
    ///
    /// Replays `marks[i]` at `positions[i]` from an empty board and records a
    /// trail entry for each move made by the agent's mark. Replay stops early,
    /// keeping the entries gathered so far, when a placement is rejected or a
    /// position falls outside the table. Returns the number of entries
    /// recorded.
    ///
    /// # Panics
    /// Panics if `marks` and `positions` differ in length.
    pub fn load_history(&mut self, marks: &[Player], positions: &[Position]) -> usize {
        assert_eq!(
            marks.len(),
            positions.len(),
            "history needs one mark per position"
        );

        self.trail.clear();
        let mut board = self.new_board();

        for (step, (&player, &position)) in marks.iter().zip(positions).enumerate() {
            let before = board;
            board = match before.place_mark(position, player) {
                Ok(next) => next,
                Err(err) => {
                    warn!(step, %err, board = %before.encode(), "stopping replay at rejected move");
                    break;
                }
            };

            if before.rank() >= self.table.ranks() {
                warn!(step, rank = before.rank(), "stopping replay beyond table");
                break;
            }
            if player != self.agent_player {
                continue;
            }

            let (id, symmetry) = match self.table.find(&before) {
                Ok(found) => found,
                Err(err) => {
                    error!(step, %err, board = %before.encode(), "no matchbox for replayed board");
                    break;
                }
            };
            let canonical = symmetry.inverse().apply(position);
            debug!(step, %position, %canonical, ?symmetry, "replayed move");
            self.trail.push(TrailEntry {
                matchbox: id,
                position: canonical,
            });
        }

        self.phase = if self.trail.is_empty() {
            GamePhase::Idle
        } else {
            GamePhase::InProgress
        };
        self.trail.len()
    }

    /// Replay a recorded game and learn from its outcome.
    ///
    /// Records played with a different opening player or agent mark do not
    /// fit this agent's table and are skipped.
    pub fn learn_from_record(&mut self, record: &GameRecord) -> Option<LearningSummary> {
        if record.first_player != self.first_player || record.agent_player != self.agent_player {
            warn!(
                record_first = %record.first_player,
                record_agent = %record.agent_player,
                first = %self.first_player,
                agent = %self.agent_player,
                "skipping game record for a different seating"
            );
            return None;
        }

        let marks: Vec<Player> = record.moves.iter().map(|mv| mv.player).collect();
        let positions: Vec<Position> = record.moves.iter().map(|mv| mv.position).collect();
        self.load_history(&marks, &positions);
        Some(self.finish_game(record.outcome))
    }

    /// Learn from each record in order, returning how many were applied.
    pub fn learn_from_records<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a GameRecord>,
    ) -> usize {
        records
            .into_iter()
            .filter_map(|record| self.learn_from_record(record))
            .count()
    }

    /// Get statistics about the agent
    pub fn stats(&self) -> AgentStats {
        let mut decision_matchboxes = 0;
        let mut total_seeds = 0u64;
        for (_, matchbox) in self.table.iter() {
            total_seeds += u64::from(matchbox.total_seeds());
            if matchbox.board().next_player() == Some(self.agent_player) {
                decision_matchboxes += 1;
            }
        }

        AgentStats {
            matchboxes: self.table.len(),
            decision_matchboxes,
            total_seeds,
        }
    }

    /// Reset all matchboxes to their initial seeds and clear the trail.
    pub fn reset(&mut self) {
        self.table = MatchboxTable::from_state_space(
            StateSpace::enumerate(self.first_player),
            &self.initial_seeds,
        );
        self.start_game();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    fn agent() -> MenaceAgent {
        MenaceAgent::builder()
            .seed(7)
            .agent_player(Player::X)
            .first_player(Player::X)
            .build()
    }

    #[test]
    fn next_move_is_legal_and_recorded() {
        let mut agent = agent();
        let board: Board = "..X .O. ...".parse().unwrap();
        let board = board.with_first_player(Player::X);

        let mv = agent.next_move(&board).unwrap();
        assert!(board.is_empty(mv));
        assert_eq!(agent.trail().len(), 1);
        assert_eq!(agent.phase(), GamePhase::InProgress);

        let entry = agent.trail()[0];
        let canonical = agent.table()[entry.matchbox].board();
        assert!(canonical.is_empty(entry.position));
    }

    #[test]
    fn next_move_rejects_finished_board() {
        let mut agent = agent();
        let board: Board = "XXX OO. ...".parse().unwrap();
        assert!(matches!(agent.next_move(&board), Err(crate::Error::GameOver)));
        assert!(agent.trail().is_empty());
    }

    #[test]
    fn next_move_reports_unknown_board() {
        let mut agent = agent();
        let board: Board = "OO. ... ...".parse().unwrap();
        assert!(matches!(
            agent.next_move(&board),
            Err(crate::Error::NoMatchingState { rank: 2, .. })
        ));
        assert!(agent.trail().is_empty());
    }

    #[test]
    fn finish_game_rewards_and_clears_trail() {
        let mut agent = agent();
        let board = agent.new_board();
        agent.next_move(&board).unwrap();
        let entry = agent.trail()[0];

        let summary = agent.finish_game(GameOutcome::Win(Player::X));
        assert_eq!(summary.adjustment, Adjustment::Reward);
        assert_eq!(summary.adjusted, 1);
        assert!(agent.trail().is_empty());
        assert_eq!(agent.phase(), GamePhase::Idle);
        assert_eq!(agent.table()[entry.matchbox].seeds(entry.position), Some(7));
    }

    #[test]
    fn finish_game_punishes_loss() {
        let mut agent = agent();
        agent.next_move(&agent.new_board()).unwrap();
        let entry = agent.trail()[0];
        let summary = agent.finish_game(GameOutcome::Win(Player::O));
        assert_eq!(summary.adjustment, Adjustment::Punish);
        assert_eq!(agent.table()[entry.matchbox].seeds(entry.position), Some(3));
    }

    #[test]
    fn finish_game_with_empty_trail_changes_nothing() {
        let mut agent = agent();
        let before = agent.stats();
        let summary = agent.finish_game(GameOutcome::Draw);
        assert_eq!(summary.adjusted, 0);
        assert_eq!(agent.stats(), before);
    }

    #[test]
    fn start_game_discards_trail() {
        let mut agent = agent();
        agent.next_move(&agent.new_board()).unwrap();
        agent.start_game();
        assert!(agent.trail().is_empty());
        assert_eq!(agent.phase(), GamePhase::Idle);
    }

    #[test]
    fn load_history_records_only_agent_moves() {
        let mut agent = agent();
        let marks = [Player::X, Player::O, Player::X];
        let positions = [pos(2, 2), pos(1, 1), pos(0, 0)];
        assert_eq!(agent.load_history(&marks, &positions), 2);

        // First move: bottom-right corner of the empty board is stored as the
        // top-left corner of the canonical empty board.
        assert_eq!(agent.trail()[0].matchbox, MatchboxId { rank: 0, index: 0 });
        let first = agent.trail()[0].position;
        assert!([pos(0, 0), pos(0, 2), pos(2, 0), pos(2, 2)].contains(&first));
        assert_eq!(agent.trail()[1].matchbox.rank, 2);
    }

    #[test]
    fn load_history_stops_at_rejected_move() {
        let mut agent = agent();
        let marks = [Player::X, Player::O, Player::X];
        let positions = [pos(1, 1), pos(1, 1), pos(0, 0)];
        assert_eq!(agent.load_history(&marks, &positions), 1);
    }

    #[test]
    fn load_history_without_agent_moves_stays_idle() {
        let mut agent = MenaceAgent::builder().seed(7).agent_player(Player::O).build();
        agent.next_move(&"X........".parse().unwrap()).unwrap();
        assert_eq!(agent.phase(), GamePhase::InProgress);

        // Only X has moved, so there is nothing for an O agent to learn
        assert_eq!(agent.load_history(&[Player::X], &[pos(1, 1)]), 0);
        assert!(agent.trail().is_empty());
        assert_eq!(agent.phase(), GamePhase::Idle);

        assert_eq!(agent.load_history(&[Player::X, Player::O], &[pos(1, 1), pos(0, 0)]), 1);
        assert_eq!(agent.phase(), GamePhase::InProgress);
    }

    #[test]
    #[should_panic(expected = "one mark per position")]
    fn load_history_panics_on_length_mismatch() {
        agent().load_history(&[Player::X], &[]);
    }

    #[test]
    fn stats_count_decision_matchboxes() {
        let x_agent = agent();
        let stats = x_agent.stats();
        assert_eq!(stats.matchboxes, 627);
        assert_eq!(stats.decision_matchboxes, 1 + 12 + 108 + 183 + 34);

        let o_agent = MenaceAgent::builder().agent_player(Player::O).build();
        assert_eq!(o_agent.stats().decision_matchboxes, 3 + 38 + 153 + 95);
    }

    #[test]
    fn reset_restores_initial_seeds() {
        let mut agent = agent();
        let fresh = agent.stats();
        agent.next_move(&agent.new_board()).unwrap();
        agent.finish_game(GameOutcome::Win(Player::X));
        assert_ne!(agent.stats(), fresh);

        agent.reset();
        assert_eq!(agent.stats(), fresh);
    }
}
