use thiserror::Error;

use crate::PuzzleKind;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Puzzle kind {0:?} is not implemented")]
    NotImplemented(PuzzleKind),
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Cell is already occupied")]
    CellOccupied,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Board has no light source")]
    MissingSource,
    #[error("Goal does not match the board's targets")]
    GoalMismatch,
    #[error("Board generation failed after {attempts} attempts")]
    GenerationFailed { attempts: u32 },
}

pub type Result<T> = core::result::Result<T, PuzzleError>;
