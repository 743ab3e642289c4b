use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Level index {0} is out of range")]
    InvalidLevel(usize),
    #[error("Word index {0} is out of range for this level")]
    InvalidWordIndex(usize),
    #[error("Level catalog has no levels")]
    EmptyCatalog,
    #[error("Level has no target words")]
    EmptyLevel,
    #[error("Target words must be non-empty and made of letters A-Z only")]
    InvalidWord,
    #[error("Target word has {len} letters but the grid only has {cells} cells")]
    WordTooLong { len: usize, cells: CellCount },
    #[error("No completed word is waiting for a transition")]
    NoTransitionPending,
    #[error("Malformed level catalog at line {line}, column {column}")]
    MalformedCatalog { line: usize, column: usize },
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedCatalog {
            line: err.line(),
            column: err.column(),
        }
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
