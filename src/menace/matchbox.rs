//! Matchbox implementation for MENACE

use std::collections::BTreeMap;

use rand::Rng;
use serde::Serialize;

use super::schedule::InitialSeedSchedule;
use crate::tictactoe::{Board, Position};

/// Seeds added to a move that led to a win
pub const WIN_REWARD: u32 = 3;
/// Seeds added to a move that led to a draw
pub const DRAW_REWARD: u32 = 1;
/// Seeds removed from a move that led to a loss
pub const LOSS_PENALTY: u32 = 1;
/// A punished cell never drops below this many seeds
pub const MIN_SEEDS: u32 = 1;

/// Weighted move store for one canonical board.
///
/// Every empty cell of the owned board carries a seed count; occupied cells
/// carry none.
#[derive(Debug, Clone, Serialize)]
pub struct Matchbox {
    board: Board,
    /// Seeds per empty cell, iterated in row-major order
    seeds: BTreeMap<Position, u32>,
}

impl Matchbox {
    /// Create a new matchbox using the default seed schedule.
    pub fn new(board: Board) -> Self {
        Self::with_schedule(board, &InitialSeedSchedule::default())
    }

    /// Create a new matchbox with a custom seed schedule.
    pub fn with_schedule(board: Board, schedule: &InitialSeedSchedule) -> Self {
        let initial = schedule.seeds_for_rank(board.rank());
        let seeds = board
            .empty_positions()
            .into_iter()
            .map(|pos| (pos, initial))
            .collect();
        Matchbox { board, seeds }
    }

    /// The canonical board this matchbox was built for
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rank(&self) -> usize {
        self.board.rank()
    }

    /// Seed count for a cell, `None` if the cell is occupied
    pub fn seeds(&self, position: Position) -> Option<u32> {
        self.seeds.get(&position).copied()
    }

    /// All (cell, seeds) pairs in row-major order
    pub fn entries(&self) -> impl Iterator<Item = (Position, u32)> + '_ {
        self.seeds.iter().map(|(&pos, &count)| (pos, count))
    }

    pub fn total_seeds(&self) -> u32 {
        self.seeds.values().sum()
    }

    /// Draw a cell with probability proportional to its seeds.
    ///
    /// Returns `None` when no seeds are left.
    pub fn pick_move(&self, rng: &mut impl Rng) -> Option<Position> {
        let total = self.total_seeds();
        if total == 0 {
            return None;
        }

        let mut draw = rng.random_range(0..total);
        for (&pos, &count) in &self.seeds {
            if draw < count {
                return Some(pos);
            }
            draw -= count;
        }
        None
    }

    pub fn reward_move(&mut self, position: Position) {
        *self.seeds_mut(position) += WIN_REWARD;
    }

    pub fn reward_drawn_move(&mut self, position: Position) {
        *self.seeds_mut(position) += DRAW_REWARD;
    }

    pub fn punish_move(&mut self, position: Position) {
        let count = self.seeds_mut(position);
        *count = count.saturating_sub(LOSS_PENALTY).max(MIN_SEEDS);
    }

    /// # Panics
    ///
    /// Panics if `position` is occupied on the matchbox board; adjusting such a
    /// cell means the caller recorded a move that could never have been picked.
    fn seeds_mut(&mut self, position: Position) -> &mut u32 {
        let board = self.board;
        self.seeds.get_mut(&position).unwrap_or_else(|| {
            panic!("cell {position} is not empty on matchbox board\n{board}")
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn seeds_only_for_empty_cells() {
        let board: Board = "X.. .O. ...".parse().unwrap();
        let matchbox = Matchbox::new(board);
        assert_eq!(matchbox.seeds(pos(0, 0)), None);
        assert_eq!(matchbox.seeds(pos(1, 1)), None);
        assert_eq!(matchbox.seeds(pos(2, 2)), Some(4));
        assert_eq!(matchbox.entries().count(), 7);
        assert_eq!(matchbox.total_seeds(), 28);
    }

    #[test]
    fn schedule_sets_initial_seeds_by_rank() {
        let board: Board = "XO. ... ...".parse().unwrap();
        let matchbox = Matchbox::with_schedule(board, &InitialSeedSchedule::menace());
        assert!(matchbox.entries().all(|(_, seeds)| seeds == 3));
    }

    #[test]
    fn entries_are_row_major() {
        let matchbox = Matchbox::new(Board::default());
        let order: Vec<usize> = matchbox.entries().map(|(p, _)| p.index()).collect();
        assert_eq!(order, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn reward_then_punish_nets_two() {
        let mut matchbox = Matchbox::new(Board::default());
        let cell = pos(1, 1);
        matchbox.reward_move(cell);
        matchbox.punish_move(cell);
        assert_eq!(matchbox.seeds(cell), Some(4 + 2));

        matchbox.reward_drawn_move(pos(0, 0));
        assert_eq!(matchbox.seeds(pos(0, 0)), Some(5));
        // Other cells untouched
        assert_eq!(matchbox.seeds(pos(2, 2)), Some(4));
    }

    #[test]
    fn punish_never_goes_below_one() {
        let mut matchbox = Matchbox::new(Board::default());
        let cell = pos(0, 2);
        for _ in 0..20 {
            matchbox.punish_move(cell);
            assert!(matchbox.seeds(cell).unwrap() >= MIN_SEEDS);
        }
        assert_eq!(matchbox.seeds(cell), Some(MIN_SEEDS));
    }

    #[test]
    #[should_panic(expected = "is not empty")]
    fn rewarding_occupied_cell_panics() {
        let board: Board = "X........".parse().unwrap();
        let mut matchbox = Matchbox::new(board);
        matchbox.reward_move(pos(0, 0));
    }

    #[test]
    fn pick_only_returns_empty_cells() {
        let board: Board = "XOX OX. ...".parse().unwrap();
        let matchbox = Matchbox::new(board);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let picked = matchbox.pick_move(&mut rng).unwrap();
            assert!(board.is_empty(picked));
        }
    }

    #[test]
    fn pick_frequencies_follow_seed_weights() {
        let board: Board = "XOX OXO ...".parse().unwrap();
        let mut matchbox = Matchbox::with_schedule(board, &InitialSeedSchedule::uniform(1));
        // Weights 1 : 4 : 7 over the bottom row
        matchbox.reward_move(pos(2, 1));
        for _ in 0..2 {
            matchbox.reward_move(pos(2, 2));
        }

        let mut rng = StdRng::seed_from_u64(42);
        let trials = 24_000;
        let mut counts = [0usize; 3];
        for _ in 0..trials {
            let picked = matchbox.pick_move(&mut rng).unwrap();
            counts[picked.col()] += 1;
        }

        for (col, expected) in [(0, 1.0 / 12.0), (1, 4.0 / 12.0), (2, 7.0 / 12.0)] {
            let observed = counts[col] as f64 / trials as f64;
            assert!(
                (observed - expected).abs() < 0.02,
                "column {col}: observed {observed:.3}, expected {expected:.3}"
            );
        }
    }
}
