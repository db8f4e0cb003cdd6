//! Timed game session wrapping a [`Board`].
//!
//! The session is a small state machine:
//!
//! ```text
//! Idle --start--> Running --solved--> Complete
//!                    |
//!                    +--time limit--> TimedOut
//! ```
//!
//! `start` is accepted from every phase and `change_difficulty` returns any
//! phase to `Idle`. Moves and ticks outside `Running` are ignored rather than
//! reported as errors: they are ordinary user input, not faults.

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, warn};

use crate::best_time::{BestTimeStore, MemoryBestTime};
use crate::board::{Board, Direction, Position};
use crate::error::PuzzleError;

/// Default time limit in seconds.
pub const DEFAULT_TIME_LIMIT: u32 = 600;

/// Board size used before any difficulty has been chosen.
pub const DEFAULT_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Running,
    Complete,
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Seconds allowed per game. A limit of 0 is raised to 1 so every game
    /// can tick at least once.
    pub time_limit: u32,
    /// Fixed seed for reproducible shuffles; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit: DEFAULT_TIME_LIMIT,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The session was not running.
    Ignored,
    Advanced,
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Not running, or the tile was not adjacent to the empty slot.
    Ignored,
    Moved,
    /// The move solved the board. `new_best` is set when the completion time
    /// strictly beat the previous best (or there was none).
    Completed { new_best: bool },
}

/// Everything a presentation layer needs to draw the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub phase: Phase,
    pub size: usize,
    /// Empty while no board exists (`Idle`).
    pub cells: Vec<u32>,
    pub empty_position: Option<Position>,
    pub move_count: u32,
    pub elapsed: u32,
    pub remaining: u32,
    pub time_limit: u32,
    pub best_time: Option<u32>,
}

pub struct Session<S: BestTimeStore = MemoryBestTime> {
    size: usize,
    board: Option<Board>,
    phase: Phase,
    move_count: u32,
    elapsed: u32,
    time_limit: u32,
    best: S,
    rng: StdRng,
}

impl Session<MemoryBestTime> {
    pub fn with_config(config: SessionConfig) -> Self {
        Self::new(config, MemoryBestTime::new())
    }
}

impl<S: BestTimeStore> Session<S> {
    pub fn new(config: SessionConfig, best: S) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            size: DEFAULT_SIZE,
            board: None,
            phase: Phase::Idle,
            move_count: 0,
            elapsed: 0,
            time_limit: config.time_limit.max(1),
            best,
            rng,
        }
    }

    /// Shuffles a fresh board of `size` and starts the clock.
    ///
    /// On `InvalidSize` the session is left exactly as it was.
    pub fn start(&mut self, size: usize) -> Result<(), PuzzleError> {
        let mut board = Board::new(size).map_err(|err| {
            warn!(size, "rejected board size");
            err
        })?;

        // A walk can land back on the solved arrangement (likely on 2x2);
        // a game must not begin already complete.
        loop {
            board.shuffle_with(&mut self.rng);
            if !board.is_solved() {
                break;
            }
            debug!(size, "shuffle returned a solved board, reshuffling");
        }

        self.begin(board);
        Ok(())
    }

    /// Starts a new game at the current size.
    pub fn restart(&mut self) -> Result<(), PuzzleError> {
        self.start(self.size)
    }

    /// Starts the clock on a prepared board instead of a shuffled one.
    pub fn start_with(&mut self, board: Board) {
        self.begin(board);
    }

    fn begin(&mut self, board: Board) {
        self.size = board.size();
        self.board = Some(board);
        self.move_count = 0;
        self.elapsed = 0;
        self.phase = Phase::Running;
        info!(size = self.size, time_limit = self.time_limit, "game started");
    }

    /// Advances the clock by one second of game time.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Ignored;
        }

        let next = self.elapsed + 1;
        if next >= self.time_limit {
            self.elapsed = self.time_limit;
            self.phase = Phase::TimedOut;
            info!(
                size = self.size,
                moves = self.move_count,
                elapsed = self.elapsed,
                "time limit reached"
            );
            TickOutcome::TimedOut
        } else {
            self.elapsed = next;
            TickOutcome::Advanced
        }
    }

    /// Slides the tile at `(row, col)` into the empty slot if it is adjacent.
    pub fn request_move(&mut self, row: usize, col: usize) -> MoveOutcome {
        if self.phase != Phase::Running {
            return MoveOutcome::Ignored;
        }
        let Some(board) = self.board.as_mut() else {
            return MoveOutcome::Ignored;
        };

        if !board.move_tile(row, col) {
            return MoveOutcome::Ignored;
        }
        let solved = board.is_solved();

        self.move_count += 1;
        debug!(row, col, moves = self.move_count, "tile moved");

        if !solved {
            return MoveOutcome::Moved;
        }

        self.phase = Phase::Complete;
        let new_best = self.best.record(self.elapsed);
        info!(
            size = self.size,
            moves = self.move_count,
            elapsed = self.elapsed,
            new_best,
            "puzzle solved"
        );
        MoveOutcome::Completed { new_best }
    }

    /// Slides the tile on the `direction` side of the empty slot.
    pub fn request_slide(&mut self, direction: Direction) -> MoveOutcome {
        let target = match (&self.board, self.phase) {
            (Some(board), Phase::Running) => board.neighbor(direction),
            _ => None,
        };

        match target {
            Some(pos) => self.request_move(pos.row, pos.col),
            None => MoveOutcome::Ignored,
        }
    }

    /// Discards the current board and returns to `Idle` with a new size.
    ///
    /// Does not start a game. On `InvalidSize` nothing changes.
    pub fn change_difficulty(&mut self, size: usize) -> Result<(), PuzzleError> {
        Board::validate_size(size).map_err(|err| {
            warn!(size, "rejected board size");
            err
        })?;

        debug!(from = self.size, to = size, phase = ?self.phase, "difficulty changed");
        self.size = size;
        self.board = None;
        self.move_count = 0;
        self.elapsed = 0;
        self.phase = Phase::Idle;
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    pub fn remaining(&self) -> u32 {
        self.time_limit.saturating_sub(self.elapsed)
    }

    pub fn best_time(&self) -> Option<u32> {
        self.best.best()
    }

    pub fn snapshot(&self) -> SessionView {
        SessionView {
            phase: self.phase,
            size: self.size,
            cells: self
                .board
                .as_ref()
                .map(|board| board.cells().to_vec())
                .unwrap_or_default(),
            empty_position: self.board.as_ref().map(Board::empty_position),
            move_count: self.move_count,
            elapsed: self.elapsed,
            remaining: self.remaining(),
            time_limit: self.time_limit,
            best_time: self.best_time(),
        }
    }
}
