//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::collections::HashSet;

use menace_bot::{Board, GameRecord, Move, Player, Position};

pub fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col).unwrap()
}

/// Alternate marks starting with `first`, returning the marks and positions
/// in the shape `MenaceAgent::load_history` takes.
pub fn alternating(first: Player, cells: &[(usize, usize)]) -> (Vec<Player>, Vec<Position>) {
    let mut mark = first;
    let mut marks = Vec::with_capacity(cells.len());
    for _ in cells {
        marks.push(mark);
        mark = mark.opponent();
    }
    let positions = cells.iter().map(|&(row, col)| pos(row, col)).collect();
    (marks, positions)
}

/// Build a finished record from alternating moves; the outcome is read off
/// the final board.
pub fn record(first: Player, agent: Player, cells: &[(usize, usize)]) -> GameRecord {
    let (marks, positions) = alternating(first, cells);
    let moves: Vec<Move> = marks
        .into_iter()
        .zip(positions)
        .map(|(player, position)| Move::new(player, position))
        .collect();
    let mut board = Board::new(first);
    for mv in &moves {
        board = board.place_mark(mv.position, mv.player).unwrap();
    }
    let outcome = board
        .state()
        .outcome()
        .expect("helper only builds finished games");
    GameRecord::new(first, agent, moves, outcome)
}

/// Every distinct non-terminal board reachable by legal play, with no
/// symmetry reduction.
pub fn reachable_boards(first: Player) -> HashSet<Board> {
    let mut seen = HashSet::new();
    let mut stack = vec![Board::new(first)];
    while let Some(board) = stack.pop() {
        if board.is_terminal() || !seen.insert(board) {
            continue;
        }
        for position in board.empty_positions() {
            stack.push(board.place(position).unwrap());
        }
    }
    seen
}

/// A game played to completion by two sides that take the first empty cell
/// in row-major order.
pub const FIRST_EMPTY_GAME: [(usize, usize); 7] =
    [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 0)];
