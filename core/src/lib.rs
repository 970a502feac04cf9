#![no_std]

extern crate alloc;

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use error::*;
pub use memory::*;
pub use rps::*;
pub use schedule::*;
pub use snake::*;
pub use tictactoe::*;
pub use types::*;

mod error;
mod memory;
mod random;
mod rps;
mod schedule;
mod snake;
mod tictactoe;
mod types;

/// Common shape of every game: a value that owns its whole state and changes only through events.
pub trait StateMachine {
    type Event;
    type Outcome;

    fn apply(&mut self, event: Self::Event) -> Self::Outcome;

    /// Pure form of [`StateMachine::apply`], consuming the old state and returning the next one.
    fn transition(mut self, event: Self::Event) -> Self
    where
        Self: Sized,
    {
        self.apply(event);
        self
    }
}

/// Registry of the games the hub knows how to host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameId {
    TicTacToe,
    RockPaperScissors,
    Snake,
    Memory,
}

impl GameId {
    pub const ALL: [GameId; 4] = [
        GameId::TicTacToe,
        GameId::RockPaperScissors,
        GameId::Snake,
        GameId::Memory,
    ];

    pub const fn slug(self) -> &'static str {
        use GameId::*;
        match self {
            TicTacToe => "tic-tac-toe",
            RockPaperScissors => "rock-paper-scissors",
            Snake => "snake",
            Memory => "memory",
        }
    }

    pub const fn title(self) -> &'static str {
        use GameId::*;
        match self {
            TicTacToe => "Tic Tac Toe",
            RockPaperScissors => "Rock Paper Scissors",
            Snake => "Snake Game",
            Memory => "Memory Card Game",
        }
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for GameId {
    type Err = HubError;

    fn from_str(slug: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.slug() == slug)
            .ok_or_else(|| HubError::UnknownGame(slug.into()))
    }
}
