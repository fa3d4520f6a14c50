//! Enumeration of every playable position, reduced by board symmetry

use tracing::{debug, info};

use crate::tictactoe::{Board, CELLS, Player, are_equivalent};

/// Number of rank buckets. A full board (rank 9) is always terminal, so
/// ranks 0 through 8 cover every playable position.
pub const RANKS: usize = CELLS;

/// Canonical non-terminal boards grouped by rank.
///
/// Within a rank no two boards are equivalent under rotation or reflection,
/// and boards appear in the order the depth-first enumeration found them.
#[derive(Debug, Clone)]
pub struct StateSpace {
    by_rank: Vec<Vec<Board>>,
}

impl StateSpace {
    /// Enumerate all positions reachable from the empty board.
    pub fn enumerate(first_player: Player) -> Self {
        let root = Board::new(first_player);
        let mut by_rank = vec![Vec::new(); RANKS];
        by_rank[0].push(root);
        Self::expand(&root, &mut by_rank);

        let space = StateSpace { by_rank };
        for (rank, boards) in space.by_rank.iter().enumerate() {
            debug!(rank, count = boards.len(), "canonical states at rank");
        }
        info!(
            total = space.len(),
            ?first_player,
            "enumerated canonical state space"
        );
        space
    }

    fn expand(board: &Board, by_rank: &mut [Vec<Board>]) {
        for pos in board.empty_positions() {
            let Ok(child) = board.place(pos) else {
                continue;
            };
            // Finished games need no matchbox and have no children
            if child.is_terminal() {
                continue;
            }

            let kept = &mut by_rank[child.rank()];
            if kept.iter().any(|existing| are_equivalent(existing, &child)) {
                continue;
            }
            kept.push(child);
            Self::expand(&child, by_rank);
        }
    }

    /// Boards kept at a rank, empty for ranks outside the table
    pub fn boards_at(&self, rank: usize) -> &[Board] {
        self.by_rank.get(rank).map_or(&[], Vec::as_slice)
    }

    /// Number of canonical boards per rank
    pub fn counts(&self) -> Vec<usize> {
        self.by_rank.iter().map(Vec::len).collect()
    }

    pub fn len(&self) -> usize {
        self.by_rank.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_ranks(self) -> Vec<Vec<Board>> {
        self.by_rank
    }
}
