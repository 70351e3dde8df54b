use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Hazards and rewards do not fit in the grid")]
    InvalidConfiguration,
    #[error("Grid is not a cube of a supported side")]
    InvalidGridShape,
    #[error("Coordinates outside of the grid")]
    OutOfBounds,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
