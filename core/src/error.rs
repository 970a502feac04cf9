use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HubError {
    #[error("Game not found: {0:?}")]
    UnknownGame(String),
    #[error("Cell index is outside the board")]
    InvalidCell,
    #[error("Card id is outside the deck")]
    InvalidCard,
}

pub type Result<T> = core::result::Result<T, HubError>;
