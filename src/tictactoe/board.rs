//! Board state representation and basic operations

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::Serialize;

use super::{game::GameOutcome, lines::LineAnalyzer, symmetry::Symmetry};

/// Number of rows on the board
pub const ROWS: usize = 3;
/// Number of columns on the board
pub const COLS: usize = 3;
/// Number of cells on the board
pub const CELLS: usize = ROWS * COLS;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// The player owning this mark, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Player::X => "X",
            Player::O => "O",
        })
    }
}

/// A cell coordinate, 0-indexed, always inside the board.
///
/// Ordering is row-major, which is the order used for weighted move selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// Create a position, rejecting coordinates outside the board.
    pub fn new(row: usize, col: usize) -> crate::Result<Self> {
        if row >= ROWS || col >= COLS {
            return Err(crate::Error::InvalidPosition { row, col });
        }
        Ok(Position { row, col })
    }

    /// Callers guarantee `row < ROWS && col < COLS`.
    pub(crate) const fn at(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    /// Row-major index (0-8)
    pub fn index(self) -> usize {
        self.row * COLS + self.col
    }

    /// All positions in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..ROWS).flat_map(|row| (0..COLS).map(move |col| Position { row, col }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Terminal classification of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GameState {
    Ongoing,
    Won(Player),
    Draw,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameState::Ongoing)
    }

    /// The final outcome, or `None` while the game is still being played
    pub fn outcome(self) -> Option<GameOutcome> {
        match self {
            GameState::Ongoing => None,
            GameState::Won(player) => Some(GameOutcome::Win(player)),
            GameState::Draw => Some(GameOutcome::Draw),
        }
    }
}

/// A 3x3 grid of marks.
///
/// Boards are values: placing a mark returns a new board and leaves the
/// original untouched. The configured first mover only decides whose turn it
/// is; equality and hashing look at the cells alone.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
    first_player: Player,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells.hash(state);
    }
}

impl Board {
    /// Create an empty board where `first_player` makes the opening move.
    pub fn new(first_player: Player) -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
            first_player,
        }
    }

    /// Same cells, different opening player.
    #[must_use]
    pub fn with_first_player(mut self, first_player: Player) -> Self {
        self.first_player = first_player;
        self
    }

    pub fn first_player(&self) -> Player {
        self.first_player
    }

    /// Get the mark at a position
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.row][pos.col]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Count of occupied cells, which equals the number of moves played.
    pub fn rank(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// All empty positions in row-major order
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::all().filter(|&pos| self.is_empty(pos)).collect()
    }

    /// The player to move, or `None` once the game has ended.
    pub fn next_player(&self) -> Option<Player> {
        if self.is_terminal() {
            return None;
        }
        Some(self.player_on_turn())
    }

    /// Whose turn it is by move count alone, ignoring whether the game ended.
    pub fn player_on_turn(&self) -> Player {
        if self.rank().is_multiple_of(2) {
            self.first_player
        } else {
            self.first_player.opponent()
        }
    }

    pub fn state(&self) -> GameState {
        if let Some((player, _)) = LineAnalyzer::completed_line(&self.cells) {
            GameState::Won(player)
        } else if self.rank() == CELLS {
            GameState::Draw
        } else {
            GameState::Ongoing
        }
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.state().is_terminal()
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        LineAnalyzer::completed_line(&self.cells).map(|(player, _)| player)
    }

    /// The completed line, checked rows first, then columns, then diagonals.
    pub fn winning_line(&self) -> Option<[Position; 3]> {
        LineAnalyzer::completed_line(&self.cells).map(|(_, line)| line)
    }

    /// Place the mark of the player to move.
    #[must_use = "place returns a new board; the original is unchanged"]
    pub fn place(&self, pos: Position) -> crate::Result<Board> {
        let player = self.next_player().ok_or(crate::Error::GameOver)?;
        self.place_mark(pos, player)
    }

    /// Place an explicit mark, regardless of whose turn it is.
    #[must_use = "place_mark returns a new board; the original is unchanged"]
    pub fn place_mark(&self, pos: Position, player: Player) -> crate::Result<Board> {
        if self.is_terminal() {
            return Err(crate::Error::GameOver);
        }
        if !self.is_empty(pos) {
            return Err(crate::Error::CellOccupied {
                row: pos.row,
                col: pos.col,
            });
        }

        let mut next = *self;
        next.cells[pos.row][pos.col] = player.to_cell();
        Ok(next)
    }

    /// Apply a dihedral transform: the mark at `p` moves to `symmetry.apply(p)`.
    #[must_use]
    pub fn transform(&self, symmetry: Symmetry) -> Board {
        let mut transformed = Board::new(self.first_player);
        for pos in Position::all() {
            let target = symmetry.apply(pos);
            transformed.cells[target.row][target.col] = self.get(pos);
        }
        transformed
    }

    /// Single-line encoding, e.g. `XO.......`
    pub fn encode(&self) -> String {
        self.cells.iter().flatten().map(|c| c.to_char()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Player::X)
    }
}

impl FromStr for Board {
    type Err = crate::Error;

    /// Parse 9 cell characters (whitespace ignored). The opening player is X.
    fn from_str(s: &str) -> crate::Result<Self> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != CELLS {
            return Err(crate::Error::InvalidBoardLength {
                expected: CELLS,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut board = Board::default();
        for (i, (&c, pos)) in chars.iter().zip(Position::all()).enumerate() {
            board.cells[pos.row][pos.col] =
                Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                    character: c,
                    position: i,
                    context: s.to_string(),
                })?;
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            if i + 1 < ROWS {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
