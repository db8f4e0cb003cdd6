use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("invalid board size {size}: must be at least 2 and N*N must fit a tile value")]
    InvalidSize { size: usize },

    #[error("invalid cells: {0}")]
    InvalidCells(String),
}
