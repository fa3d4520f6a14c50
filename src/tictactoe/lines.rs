//! Winning line analysis for Tic-Tac-Toe

use super::board::{COLS, Cell, Player, Position, ROWS};

/// Winning lines as (row, col) triples, in detection order
pub const WINNING_LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)], // rows
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)], // columns
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// First fully occupied line with a single mark, with its owner.
    pub fn completed_line(cells: &[[Cell; COLS]; ROWS]) -> Option<(Player, [Position; 3])> {
        WINNING_LINES.iter().find_map(|line| {
            let [a, b, c] = line.map(|(row, col)| cells[row][col]);
            if a != Cell::Empty && a == b && b == c {
                let positions = line.map(|(row, col)| Position::at(row, col));
                a.player().map(|player| (player, positions))
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_line_horizontal() {
        let mut cells = [[Cell::Empty; COLS]; ROWS];
        cells[1] = [Cell::X; COLS];

        let (player, line) = LineAnalyzer::completed_line(&cells).unwrap();
        assert_eq!(player, Player::X);
        assert_eq!(line[0], Position::at(1, 0));
    }

    #[test]
    fn test_completed_line_diagonal() {
        let mut cells = [[Cell::Empty; COLS]; ROWS];
        cells[0][0] = Cell::O;
        cells[1][1] = Cell::O;
        cells[2][2] = Cell::O;

        let (player, line) = LineAnalyzer::completed_line(&cells).unwrap();
        assert_eq!(player, Player::O);
        assert_eq!(
            line,
            [Position::at(0, 0), Position::at(1, 1), Position::at(2, 2)]
        );
    }

    #[test]
    fn test_no_completed_line() {
        let mut cells = [[Cell::Empty; COLS]; ROWS];
        cells[0][0] = Cell::X;
        cells[0][1] = Cell::X;
        cells[0][2] = Cell::O;

        assert!(LineAnalyzer::completed_line(&cells).is_none());
    }
}
