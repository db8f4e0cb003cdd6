use rand::{seq::SliceRandom, thread_rng, Rng};
use std::fmt;

use crate::error::PuzzleError;

/// Number of random slides performed by a shuffle.
pub const SHUFFLE_STEPS: usize = 1000;

/// The direction a tile slides to fill the empty slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Offset from the empty slot to the tile that slides in this direction.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (1, 0),
            Direction::Left => (0, 1),
            Direction::Down => (-1, 0),
            Direction::Right => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// An N x N sliding puzzle.
///
/// `cells` is stored row-major and always holds a permutation of `1..=N*N`.
/// The value `N*N` marks the empty slot, so the solved board is simply
/// `[1, 2, ..., N*N]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<u32>,
    empty: Position,
}

impl Board {
    /// Builds a solved board of the given size.
    pub fn new(size: usize) -> Result<Self, PuzzleError> {
        let total = Self::checked_total(size)?;

        Ok(Self {
            size,
            cells: (1..=total).collect(),
            empty: Position::new(size - 1, size - 1),
        })
    }

    /// Builds a board from a prepared row-major arrangement.
    ///
    /// The arrangement must be a permutation of `1..=N*N` that is reachable
    /// from the solved board.
    pub fn from_cells(size: usize, cells: Vec<u32>) -> Result<Self, PuzzleError> {
        let total = Self::checked_total(size)?;

        if cells.len() != total as usize {
            return Err(PuzzleError::InvalidCells(format!(
                "expected {} cells for a {}x{} board, got {}",
                total,
                size,
                size,
                cells.len()
            )));
        }

        let mut seen = vec![false; cells.len()];
        for &value in &cells {
            if value == 0 || value > total {
                return Err(PuzzleError::InvalidCells(format!(
                    "value {} is outside 1..={}",
                    value, total
                )));
            }
            let slot = &mut seen[value as usize - 1];
            if *slot {
                return Err(PuzzleError::InvalidCells(format!(
                    "value {} appears more than once",
                    value
                )));
            }
            *slot = true;
        }

        let mut board = Self {
            size,
            cells,
            empty: Position::new(0, 0),
        };
        board.empty = board.locate_empty();

        if !board.is_solvable() {
            return Err(PuzzleError::InvalidCells(
                "arrangement is not reachable from the solved board".to_string(),
            ));
        }

        Ok(board)
    }

    /// Checks that a board of this size can be built.
    pub fn validate_size(size: usize) -> Result<(), PuzzleError> {
        Self::checked_total(size).map(|_| ())
    }

    fn checked_total(size: usize) -> Result<u32, PuzzleError> {
        if size < 2 {
            return Err(PuzzleError::InvalidSize { size });
        }
        size.checked_mul(size)
            .and_then(|total| u32::try_from(total).ok())
            .ok_or(PuzzleError::InvalidSize { size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    pub fn empty_position(&self) -> Position {
        self.empty
    }

    /// The value that marks the empty slot (`N*N`).
    pub fn empty_value(&self) -> u32 {
        (self.size * self.size) as u32
    }

    pub fn value_at(&self, row: usize, col: usize) -> Option<u32> {
        if row < self.size && col < self.size {
            Some(self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks(self.size)
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    fn locate_empty(&self) -> Position {
        let empty_value = self.empty_value();
        let index = self
            .cells
            .iter()
            .position(|&value| value == empty_value)
            .unwrap_or(self.cells.len() - 1);

        Position::new(index / self.size, index % self.size)
    }

    /// True iff `(row, col)` is on the board and shares an edge with the
    /// empty slot.
    pub fn is_adjacent(&self, row: usize, col: usize) -> bool {
        row < self.size
            && col < self.size
            && row.abs_diff(self.empty.row) + col.abs_diff(self.empty.col) == 1
    }

    /// Slides the tile at `(row, col)` into the empty slot.
    ///
    /// Returns `false` and leaves the board untouched when the tile is not
    /// adjacent to the empty slot.
    pub fn move_tile(&mut self, row: usize, col: usize) -> bool {
        if !self.is_adjacent(row, col) {
            return false;
        }

        let clicked = self.index(row, col);
        let empty = self.index(self.empty.row, self.empty.col);
        self.cells.swap(clicked, empty);
        self.empty = Position::new(row, col);
        true
    }

    /// Position of the tile that would slide in `direction`, if there is one.
    pub fn neighbor(&self, direction: Direction) -> Option<Position> {
        let (dr, dc) = direction.offset();

        let row = self.empty.row as isize + dr;
        let col = self.empty.col as isize + dc;

        if row >= 0 && row < self.size as isize && col >= 0 && col < self.size as isize {
            Some(Position::new(row as usize, col as usize))
        } else {
            None
        }
    }

    pub fn legal_directions(&self) -> Vec<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .filter(|&dir| self.neighbor(dir).is_some())
            .collect()
    }

    pub fn slide(&mut self, direction: Direction) -> bool {
        match self.neighbor(direction) {
            Some(pos) => self.move_tile(pos.row, pos.col),
            None => false,
        }
    }

    /// Resets to the solved arrangement and performs [`SHUFFLE_STEPS`]
    /// uniformly random legal slides.
    ///
    /// Returns the walk that was taken; sliding each step's opposite in
    /// reverse order restores the solved board.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Direction> {
        let total = self.empty_value();
        self.cells = (1..=total).collect();
        self.empty = Position::new(self.size - 1, self.size - 1);

        let mut walk = Vec::with_capacity(SHUFFLE_STEPS);
        for _ in 0..SHUFFLE_STEPS {
            let candidates = self.legal_directions();
            // Every N >= 2 board has at least two legal slides.
            if let Some(&dir) = candidates.choose(rng) {
                self.slide(dir);
                walk.push(dir);
            }
        }

        self.empty = self.locate_empty();
        tracing::debug!(size = self.size, steps = walk.len(), "board shuffled");
        walk
    }

    pub fn shuffle(&mut self) -> Vec<Direction> {
        let mut rng = thread_rng();
        self.shuffle_with(&mut rng)
    }

    pub fn is_solved(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(i, &value)| value as usize == i + 1)
    }

    /// Number of tiles, excluding the empty slot, away from their home cell.
    pub fn misplaced(&self) -> usize {
        let empty_value = self.empty_value();
        self.cells
            .iter()
            .enumerate()
            .filter(|&(i, &value)| value != empty_value && value as usize != i + 1)
            .count()
    }

    pub fn is_solvable(&self) -> bool {
        let inversions = self.count_inversions();

        if self.size % 2 == 1 {
            // Odd width: solvable iff inversions count is even
            inversions % 2 == 0
        } else {
            // Even width: solvable iff inversions + empty row (from top) is odd
            (inversions + self.empty.row) % 2 == 1
        }
    }

    fn count_inversions(&self) -> usize {
        let empty_value = self.empty_value();
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &val)| val != empty_value)
            .map(|(i, &val)| {
                self.cells[i + 1..]
                    .iter()
                    .filter(|&&next| next != empty_value && next < val)
                    .count()
            })
            .sum()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.empty_value().to_string().len();
        let empty_value = self.empty_value();

        for row in self.rows() {
            for &val in row {
                if val == empty_value {
                    write!(f, "{:>width$} ", ".", width = width)?;
                } else {
                    write!(f, "{:>width$} ", val, width = width)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn new_board_is_solved() {
        let board = Board::new(3).unwrap();
        assert_eq!(board.cells(), &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(board.empty_position(), Position::new(2, 2));
        assert!(board.is_solved());
        assert!(board.is_solvable());
        assert_eq!(board.misplaced(), 0);
    }

    #[test]
    fn rejects_sizes_below_two() {
        assert_eq!(Board::new(0), Err(PuzzleError::InvalidSize { size: 0 }));
        assert_eq!(Board::new(1), Err(PuzzleError::InvalidSize { size: 1 }));
        assert!(Board::new(2).is_ok());
    }

    #[test]
    fn adjacency_is_four_neighbour_only() {
        let board = Board::new(3).unwrap();
        assert!(board.is_adjacent(1, 2));
        assert!(board.is_adjacent(2, 1));
        assert!(!board.is_adjacent(1, 1));
        assert!(!board.is_adjacent(2, 2));
        assert!(!board.is_adjacent(0, 2));
        // off the grid but one step from the corner
        assert!(!board.is_adjacent(3, 2));
        assert!(!board.is_adjacent(2, 3));
    }

    #[test]
    fn move_tile_swaps_with_empty() {
        let mut board = Board::new(3).unwrap();
        assert!(board.move_tile(2, 1));
        assert_eq!(board.cells(), &[1, 2, 3, 4, 5, 6, 7, 9, 8]);
        assert_eq!(board.empty_position(), Position::new(2, 1));
        assert!(!board.is_solved());
        assert_eq!(board.misplaced(), 1);
    }

    #[test]
    fn non_adjacent_move_is_ignored() {
        let mut board = Board::new(4).unwrap();
        let before = board.clone();
        assert!(!board.move_tile(0, 0));
        assert!(!board.move_tile(2, 2));
        assert_eq!(board, before);
    }

    #[test]
    fn slide_uses_direction_offsets() {
        let mut board = Board::new(3).unwrap();
        assert_eq!(board.neighbor(Direction::Up), None);
        assert_eq!(board.neighbor(Direction::Down), Some(Position::new(1, 2)));
        assert_eq!(board.neighbor(Direction::Right), Some(Position::new(2, 1)));

        assert!(board.slide(Direction::Down));
        assert_eq!(board.value_at(2, 2), Some(6));
        assert_eq!(board.empty_position(), Position::new(1, 2));

        assert!(board.slide(Direction::Up));
        assert!(board.is_solved());
    }

    #[test]
    fn corner_has_two_legal_directions() {
        let board = Board::new(2).unwrap();
        let dirs = board.legal_directions();
        assert_eq!(dirs, vec![Direction::Down, Direction::Right]);
    }

    #[test]
    fn shuffle_walk_is_reversible() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut board = Board::new(4).unwrap();
        let walk = board.shuffle_with(&mut rng);
        assert_eq!(walk.len(), SHUFFLE_STEPS);
        assert!(board.is_solvable());

        for dir in walk.iter().rev() {
            assert!(board.slide(dir.opposite()));
        }
        assert!(board.is_solved());
    }

    #[test]
    fn shuffle_tracks_empty_slot() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut board = Board::new(5).unwrap();
        board.shuffle_with(&mut rng);
        let pos = board.empty_position();
        assert_eq!(board.value_at(pos.row, pos.col), Some(25));
    }

    #[test]
    fn every_single_swap_is_unsolved() {
        for size in [3, 4, 5] {
            let total = size * size;
            for a in 0..total {
                for b in a + 1..total {
                    let mut cells: Vec<u32> = (1..=total as u32).collect();
                    cells.swap(a, b);
                    let mut board = Board {
                        size,
                        cells,
                        empty: Position::new(0, 0),
                    };
                    board.empty = board.locate_empty();
                    assert!(!board.is_solved(), "swap {}<->{} on {}x{}", a, b, size, size);
                }
            }
        }
    }

    #[test]
    fn from_cells_validates_arrangement() {
        assert!(matches!(
            Board::from_cells(3, vec![1, 2, 3]),
            Err(PuzzleError::InvalidCells(_))
        ));
        assert!(matches!(
            Board::from_cells(2, vec![1, 1, 3, 4]),
            Err(PuzzleError::InvalidCells(_))
        ));
        assert!(matches!(
            Board::from_cells(2, vec![0, 2, 3, 4]),
            Err(PuzzleError::InvalidCells(_))
        ));
        // a single swap of two tiles is the classic unsolvable position
        assert!(matches!(
            Board::from_cells(3, vec![2, 1, 3, 4, 5, 6, 7, 8, 9]),
            Err(PuzzleError::InvalidCells(_))
        ));

        let board = Board::from_cells(3, vec![1, 2, 3, 4, 5, 6, 7, 9, 8]).unwrap();
        assert_eq!(board.empty_position(), Position::new(2, 1));
    }

    #[test]
    fn even_width_parity_accounts_for_empty_row() {
        // one vertical slide away from solved on a 4x4
        let mut board = Board::new(4).unwrap();
        board.slide(Direction::Down);
        assert!(board.is_solvable());
        let rebuilt = Board::from_cells(4, board.cells().to_vec()).unwrap();
        assert_eq!(rebuilt, board);
    }

    #[test]
    fn display_blanks_the_empty_slot() {
        let board = Board::new(2).unwrap();
        assert_eq!(board.to_string(), "1 2 \n3 . \n");
    }
}
