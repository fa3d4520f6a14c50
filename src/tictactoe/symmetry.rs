//! D4 symmetry group operations for board canonicalization

use serde::Serialize;

use super::board::{Board, COLS, Position, ROWS};

// Rotations and diagonal reflections only map a square grid onto itself.
const _: () = assert!(ROWS == COLS);

const LAST: usize = ROWS - 1;

/// One of the 8 symmetries of the square (dihedral group D4).
///
/// Variants carry the classic matchbox relation names; the coordinate map of
/// each is given on the variant and is what [`Symmetry::apply`] computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Symmetry {
    /// `(r, c) -> (r, c)`
    Identity,
    /// `(r, c) -> (2 - c, 2 - r)`
    Rotate180,
    /// `(r, c) -> (2 - c, r)`, a counter-clockwise quarter turn
    RotateLeft90,
    /// `(r, c) -> (c, 2 - r)`, a clockwise quarter turn
    RotateRight90,
    /// `(r, c) -> (2 - r, c)`, top row swaps with bottom row
    ReflectHorizontal,
    /// `(r, c) -> (r, 2 - c)`, left column swaps with right column
    ReflectVertical,
    /// `(r, c) -> (2 - r, 2 - c)`
    ReflectAntiDiagonal,
    /// `(r, c) -> (c, r)`
    ReflectMainDiagonal,
}

impl Symmetry {
    /// All transforms in classification priority order
    pub const ALL: [Symmetry; 8] = [
        Symmetry::Identity,
        Symmetry::Rotate180,
        Symmetry::RotateLeft90,
        Symmetry::RotateRight90,
        Symmetry::ReflectHorizontal,
        Symmetry::ReflectVertical,
        Symmetry::ReflectAntiDiagonal,
        Symmetry::ReflectMainDiagonal,
    ];

    /// Where the cell at `pos` ends up after the transform.
    pub fn apply(self, pos: Position) -> Position {
        let (r, c) = (pos.row(), pos.col());
        let (row, col) = match self {
            Symmetry::Identity => (r, c),
            Symmetry::Rotate180 => (LAST - c, LAST - r),
            Symmetry::RotateLeft90 => (LAST - c, r),
            Symmetry::RotateRight90 => (c, LAST - r),
            Symmetry::ReflectHorizontal => (LAST - r, c),
            Symmetry::ReflectVertical => (r, LAST - c),
            Symmetry::ReflectAntiDiagonal => (LAST - r, LAST - c),
            Symmetry::ReflectMainDiagonal => (c, r),
        };
        Position::at(row, col)
    }

    /// Get the inverse transform
    pub fn inverse(self) -> Symmetry {
        match self {
            Symmetry::RotateLeft90 => Symmetry::RotateRight90,
            Symmetry::RotateRight90 => Symmetry::RotateLeft90,
            // Every other element of D4 is an involution
            other => other,
        }
    }
}

/// How a candidate board relates to a reference board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SymmetryRelation {
    Unequal,
    /// `candidate[s.apply(p)] == reference[p]` for every cell `p`
    Equivalent(Symmetry),
}

impl SymmetryRelation {
    /// Determine which transform maps `reference` onto `candidate`.
    ///
    /// Transforms are tried in [`Symmetry::ALL`] order and the first match
    /// wins, so a board with internal symmetry always reports the earliest
    /// transform that fits.
    pub fn classify(reference: &Board, candidate: &Board) -> SymmetryRelation {
        Symmetry::ALL
            .into_iter()
            .find(|&symmetry| {
                Position::all().all(|pos| reference.get(pos) == candidate.get(symmetry.apply(pos)))
            })
            .map_or(SymmetryRelation::Unequal, SymmetryRelation::Equivalent)
    }

    pub fn is_equivalent(self) -> bool {
        self != SymmetryRelation::Unequal
    }

    pub fn symmetry(self) -> Option<Symmetry> {
        match self {
            SymmetryRelation::Unequal => None,
            SymmetryRelation::Equivalent(symmetry) => Some(symmetry),
        }
    }

    /// Map a move from the reference frame into the candidate frame.
    pub fn transform_move(self, pos: Position) -> Option<Position> {
        self.symmetry().map(|symmetry| symmetry.apply(pos))
    }
}

/// True when the two boards are identical up to a rotation or reflection
pub fn are_equivalent(a: &Board, b: &Board) -> bool {
    SymmetryRelation::classify(a, b).is_equivalent()
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;

    fn random_board(rng: &mut StdRng) -> Board {
        let mut board = Board::default();
        let moves = rng.random_range(0..=7);
        for _ in 0..moves {
            let empty = board.empty_positions();
            if board.is_terminal() || empty.is_empty() {
                break;
            }
            let pos = empty[rng.random_range(0..empty.len())];
            board = board.place(pos).unwrap();
        }
        board
    }

    #[test]
    fn identity_is_checked_first() {
        let board = Board::default();
        assert_eq!(
            SymmetryRelation::classify(&board, &board),
            SymmetryRelation::Equivalent(Symmetry::Identity)
        );
    }

    #[test]
    fn every_transform_is_a_bijection_on_cells() {
        for symmetry in Symmetry::ALL {
            let mut images: Vec<usize> = Position::all().map(|p| symmetry.apply(p).index()).collect();
            images.sort_unstable();
            assert_eq!(images, (0..9).collect::<Vec<_>>(), "{symmetry:?}");
        }
    }

    #[test]
    fn transforms_are_distinct() {
        let probe = Position::new(0, 1).unwrap();
        let corner = Position::new(0, 0).unwrap();
        let mut images: Vec<(Position, Position)> = Symmetry::ALL
            .iter()
            .map(|s| (s.apply(probe), s.apply(corner)))
            .collect();
        images.sort();
        images.dedup();
        assert_eq!(images.len(), 8);
    }

    #[test]
    fn inverse_round_trips_every_move() {
        for symmetry in Symmetry::ALL {
            for pos in Position::all() {
                assert_eq!(symmetry.inverse().apply(symmetry.apply(pos)), pos);
            }
        }
    }

    #[test]
    fn four_left_turns_are_identity() {
        for pos in Position::all() {
            let turned = (0..4).fold(pos, |p, _| Symmetry::RotateLeft90.apply(p));
            assert_eq!(turned, pos);
            assert_eq!(
                Symmetry::RotateLeft90.apply(Symmetry::RotateLeft90.apply(pos)),
                Symmetry::ReflectAntiDiagonal.apply(pos)
            );
        }
    }

    #[test]
    fn quarter_turns_have_expected_direction() {
        // Top-left corner goes to bottom-left on a counter-clockwise turn
        let corner = Position::new(0, 0).unwrap();
        assert_eq!(
            Symmetry::RotateLeft90.apply(corner),
            Position::new(2, 0).unwrap()
        );
        assert_eq!(
            Symmetry::RotateRight90.apply(corner),
            Position::new(0, 2).unwrap()
        );
    }

    #[test]
    fn named_relations_use_their_coordinate_maps() {
        let edge = Position::new(0, 1).unwrap();
        let expected = [
            (Symmetry::Identity, (0, 1)),
            (Symmetry::Rotate180, (1, 2)),
            (Symmetry::RotateLeft90, (1, 0)),
            (Symmetry::RotateRight90, (1, 2)),
            (Symmetry::ReflectHorizontal, (2, 1)),
            (Symmetry::ReflectVertical, (0, 1)),
            (Symmetry::ReflectAntiDiagonal, (2, 1)),
            (Symmetry::ReflectMainDiagonal, (1, 0)),
        ];
        for (symmetry, (row, col)) in expected {
            assert_eq!(symmetry.apply(edge), Position::new(row, col).unwrap(), "{symmetry:?}");
        }
    }

    #[test]
    fn symmetric_boards_report_the_earliest_relation() {
        // "X........" is mirrored onto "........X" by both corner-swapping maps
        let corner: Board = "X........".parse().unwrap();
        let opposite: Board = "........X".parse().unwrap();
        let relation = SymmetryRelation::classify(&corner, &opposite);
        assert_eq!(relation, SymmetryRelation::Equivalent(Symmetry::Rotate180));
        assert_eq!(
            relation.transform_move(Position::new(0, 1).unwrap()),
            Some(Position::new(1, 2).unwrap())
        );

        // Both (2-r, 2-c) and (c, r) send the top-right corner to the bottom-left
        let top_right: Board = "..X......".parse().unwrap();
        let bottom_left: Board = "......X..".parse().unwrap();
        let relation = SymmetryRelation::classify(&top_right, &bottom_left);
        assert_eq!(
            relation,
            SymmetryRelation::Equivalent(Symmetry::ReflectAntiDiagonal)
        );
        assert_eq!(
            relation.transform_move(Position::new(0, 1).unwrap()),
            Some(Position::new(2, 1).unwrap())
        );

        let edge: Board = ".X.......".parse().unwrap();
        let bottom_edge: Board = ".......X.".parse().unwrap();
        assert_eq!(
            SymmetryRelation::classify(&edge, &bottom_edge),
            SymmetryRelation::Equivalent(Symmetry::ReflectHorizontal)
        );
    }

    #[test]
    fn classify_recovers_transform_of_asymmetric_board() {
        // X at a corner, O on an adjacent edge: no non-trivial symmetry
        let board: Board = "XO. ... ...".parse().unwrap();
        for symmetry in Symmetry::ALL {
            let image = board.transform(symmetry);
            assert_eq!(
                SymmetryRelation::classify(&board, &image),
                SymmetryRelation::Equivalent(symmetry)
            );
        }
    }

    #[test]
    fn classify_closure_over_random_boards() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let board = random_board(&mut rng);
            for symmetry in Symmetry::ALL {
                let image = board.transform(symmetry);
                let relation = SymmetryRelation::classify(&board, &image);
                let found = relation.symmetry().expect("image must be equivalent");
                // A symmetric board may report an earlier transform with the same image
                assert_eq!(board.transform(found), image);
            }
        }
    }

    #[test]
    fn moves_follow_the_relation() {
        let reference: Board = "X.. .O. ...".parse().unwrap();
        let candidate = reference.transform(Symmetry::RotateRight90);
        let relation = SymmetryRelation::classify(&reference, &candidate);
        let x = Position::new(0, 0).unwrap();
        let mapped = relation.transform_move(x).unwrap();
        assert_eq!(candidate.get(mapped), reference.get(x));
    }

    #[test]
    fn unequal_boards_are_reported() {
        let a: Board = "X........".parse().unwrap();
        let b: Board = "....X....".parse().unwrap();
        assert_eq!(SymmetryRelation::classify(&a, &b), SymmetryRelation::Unequal);
        assert!(!are_equivalent(&a, &b));
        assert_eq!(
            SymmetryRelation::Unequal.transform_move(Position::new(0, 0).unwrap()),
            None
        );
    }
}
