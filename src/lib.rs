//! Sliding tile puzzle core.
//!
//! - [`board`]: the N x N grid, solvable shuffling, moves and completion.
//! - [`session`]: a timed game around a board, with best-time tracking.
//! - [`clock`]: the one-second ticker whose lifetime follows the session.
//! - [`config`]: command-line options for the terminal front end.

pub mod best_time;
pub mod board;
pub mod clock;
pub mod config;
pub mod error;
pub mod session;

pub use best_time::{BestTimeStore, MemoryBestTime};
pub use board::{Board, Direction, Position, SHUFFLE_STEPS};
pub use clock::Ticker;
pub use config::{Config, Difficulty};
pub use error::PuzzleError;
pub use session::{MoveOutcome, Phase, Session, SessionConfig, SessionView, TickOutcome};
