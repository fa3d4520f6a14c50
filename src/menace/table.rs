//! Rank-indexed table owning every matchbox

use std::ops::{Index, IndexMut};

use serde::Serialize;

use super::{matchbox::Matchbox, schedule::InitialSeedSchedule, state_space::StateSpace};
use crate::tictactoe::{Board, Symmetry, SymmetryRelation};

/// Stable key of a matchbox inside a [`MatchboxTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MatchboxId {
    pub rank: usize,
    pub index: usize,
}

/// All matchboxes, grouped by the rank of their canonical board.
///
/// The set of boards is fixed at construction; only seed counts change.
#[derive(Debug, Clone)]
pub struct MatchboxTable {
    ranks: Vec<Vec<Matchbox>>,
}

impl MatchboxTable {
    /// Wrap every canonical board in a fresh matchbox, consuming the state space.
    pub fn from_state_space(space: StateSpace, schedule: &InitialSeedSchedule) -> Self {
        let ranks = space
            .into_ranks()
            .into_iter()
            .map(|boards| {
                boards
                    .into_iter()
                    .map(|board| Matchbox::with_schedule(board, schedule))
                    .collect()
            })
            .collect();
        MatchboxTable { ranks }
    }

    /// Number of rank buckets
    pub fn ranks(&self) -> usize {
        self.ranks.len()
    }

    pub fn at_rank(&self, rank: usize) -> Option<&[Matchbox]> {
        self.ranks.get(rank).map(Vec::as_slice)
    }

    pub fn get(&self, id: MatchboxId) -> Option<&Matchbox> {
        self.ranks.get(id.rank)?.get(id.index)
    }

    /// Total number of matchboxes
    pub fn len(&self) -> usize {
        self.ranks.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (MatchboxId, &Matchbox)> + '_ {
        self.ranks.iter().enumerate().flat_map(|(rank, boxes)| {
            boxes
                .iter()
                .enumerate()
                .map(move |(index, matchbox)| (MatchboxId { rank, index }, matchbox))
        })
    }

    /// Locate the matchbox equivalent to `board`.
    ///
    /// Returns its key and the transform taking the canonical board onto
    /// `board`.
    pub fn find(&self, board: &Board) -> crate::Result<(MatchboxId, Symmetry)> {
        let rank = board.rank();
        let boxes = self.at_rank(rank).ok_or(crate::Error::RankOutOfRange {
            rank,
            ranks: self.ranks(),
        })?;

        boxes
            .iter()
            .enumerate()
            .find_map(|(index, matchbox)| {
                match SymmetryRelation::classify(matchbox.board(), board) {
                    SymmetryRelation::Equivalent(symmetry) => {
                        Some((MatchboxId { rank, index }, symmetry))
                    }
                    SymmetryRelation::Unequal => None,
                }
            })
            .ok_or_else(|| crate::Error::NoMatchingState {
                board: board.encode(),
                rank,
            })
    }
}

impl Index<MatchboxId> for MatchboxTable {
    type Output = Matchbox;

    fn index(&self, id: MatchboxId) -> &Matchbox {
        &self.ranks[id.rank][id.index]
    }
}

impl IndexMut<MatchboxId> for MatchboxTable {
    fn index_mut(&mut self, id: MatchboxId) -> &mut Matchbox {
        &mut self.ranks[id.rank][id.index]
    }
}
