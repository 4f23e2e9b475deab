use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid tile index")]
    InvalidIndex,
    #[error("Board layout does not match the board size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
