use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid tile index")]
    InvalidIndex,
    #[error("Board needs at least one row and one column")]
    InvalidSize,
    #[error("Too many mines, at least one tile must stay safe")]
    TooManyMines,
    #[error("Unknown difficulty")]
    UnknownDifficulty,
    #[error("Invalid settings")]
    InvalidSettings,
}

pub type Result<T> = core::result::Result<T, GameError>;
