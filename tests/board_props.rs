//! Property tests for board invariants.

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use slide_puzzle::{Board, Direction};

fn size() -> impl Strategy<Value = usize> {
    prop_oneof![Just(3usize), Just(4usize), Just(5usize)]
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn shuffled(size: usize, seed: u64) -> Board {
    let mut board = Board::new(size).unwrap();
    board.shuffle_with(&mut StdRng::seed_from_u64(seed));
    board
}

fn is_permutation(board: &Board) -> bool {
    let mut sorted = board.cells().to_vec();
    sorted.sort_unstable();
    sorted
        .iter()
        .enumerate()
        .all(|(i, &value)| value as usize == i + 1)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Cells stay a permutation of 1..=N*N through shuffles and any clicks.
    #[test]
    fn prop_cells_remain_permutation(
        size in size(),
        seed in any::<u64>(),
        clicks in prop::collection::vec((0usize..6, 0usize..6), 0..200),
    ) {
        let mut board = shuffled(size, seed);
        prop_assert!(is_permutation(&board));

        for (row, col) in clicks {
            board.move_tile(row, col);
            prop_assert!(is_permutation(&board));
            let empty = board.empty_position();
            prop_assert_eq!(board.value_at(empty.row, empty.col), Some(board.empty_value()));
        }
    }

    /// Every step of a shuffle walk is one legal slide, and undoing the walk
    /// re-solves the board.
    #[test]
    fn prop_shuffle_is_reachable(size in size(), seed in any::<u64>()) {
        let mut replay = Board::new(size).unwrap();
        let mut board = Board::new(size).unwrap();
        let walk = board.shuffle_with(&mut StdRng::seed_from_u64(seed));

        for dir in &walk {
            let before = replay.clone();
            prop_assert!(replay.slide(*dir));
            let changed = before
                .cells()
                .iter()
                .zip(replay.cells())
                .filter(|(a, b)| a != b)
                .count();
            prop_assert_eq!(changed, 2);
        }
        prop_assert_eq!(&replay, &board);
        prop_assert!(board.is_solvable());

        for dir in walk.iter().rev() {
            prop_assert!(board.slide(dir.opposite()));
        }
        prop_assert!(board.is_solved());
    }

    /// Clicks that are not 4-adjacent to the empty slot change nothing.
    #[test]
    fn prop_non_adjacent_moves_are_noops(
        size in size(),
        seed in any::<u64>(),
        row in 0usize..6,
        col in 0usize..6,
    ) {
        let mut board = shuffled(size, seed);
        prop_assume!(!board.is_adjacent(row, col));

        let before = board.clone();
        prop_assert!(!board.move_tile(row, col));
        prop_assert_eq!(board, before);
    }

    /// A move followed by clicking the previous empty slot restores the board.
    #[test]
    fn prop_moves_are_involutive(size in size(), seed in any::<u64>(), dir in direction()) {
        let mut board = shuffled(size, seed);
        let target = board.neighbor(dir);
        prop_assume!(target.is_some());
        let target = target.unwrap();

        let before = board.clone();
        let old_empty = board.empty_position();

        prop_assert!(board.move_tile(target.row, target.col));
        prop_assert_eq!(board.empty_position(), target);
        prop_assert!(board.move_tile(old_empty.row, old_empty.col));
        prop_assert_eq!(board, before);
    }

    /// Any single transposition of the solved arrangement is not solved.
    #[test]
    fn prop_transpositions_are_not_solved(
        size in size(),
        a in 0usize..25,
        b in 0usize..25,
    ) {
        let total = size * size;
        let (a, b) = (a % total, b % total);
        prop_assume!(a != b);

        let mut cells: Vec<u32> = (1..=total as u32).collect();
        cells.swap(a, b);

        // Unsolvable transpositions are rejected outright, which also means
        // they can never count as solved.
        if let Ok(board) = Board::from_cells(size, cells) {
            prop_assert!(!board.is_solved());
        }
    }
}

#[test]
fn solved_iff_sorted() {
    for size in [2, 3, 4, 5] {
        let board = Board::new(size).unwrap();
        assert!(board.is_solved());

        let mut board = board;
        let dir = board.legal_directions()[0];
        board.slide(dir);
        assert!(!board.is_solved());
        board.slide(dir.opposite());
        assert!(board.is_solved());
    }
}

#[test]
fn two_by_two_shuffle_stays_valid() {
    for seed in 0..20 {
        let board = shuffled(2, seed);
        assert!(is_permutation(&board));
        assert!(board.is_solvable());
    }
}
