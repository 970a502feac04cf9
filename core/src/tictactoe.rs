use serde::{Deserialize, Serialize};

use crate::*;

pub const BOARD_CELLS: usize = 9;

/// The eight winning triples: rows, columns, then diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::O => "O",
        }
    }
}

pub type Board = [Option<Mark>; BOARD_CELLS];

/// Returns the mark that fills any winning line, if one does.
pub fn evaluate(board: &Board) -> Option<Mark> {
    LINES.iter().find_map(|&[a, b, c]| match board[a] {
        Some(mark) if board[b] == Some(mark) && board[c] == Some(mark) => Some(mark),
        _ => None,
    })
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicTacToeStatus {
    Next(Mark),
    Winner(Mark),
    Draw,
}

impl TicTacToeStatus {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Next(_))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TicTacToeOutcome {
    NoChange,
    Placed,
    Won(Mark),
    Draw,
    Restarted,
}

impl TicTacToeOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TicTacToeEvent {
    Place(usize),
    Restart,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToe {
    board: Board,
}

impl TicTacToe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn moves(&self) -> usize {
        self.board.iter().flatten().count()
    }

    /// X always opens, so the parity of moves played decides who is next.
    pub fn next_mark(&self) -> Mark {
        if self.moves() % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }

    pub fn winner(&self) -> Option<Mark> {
        evaluate(&self.board)
    }

    pub fn status(&self) -> TicTacToeStatus {
        match self.winner() {
            Some(mark) => TicTacToeStatus::Winner(mark),
            None if self.moves() == BOARD_CELLS => TicTacToeStatus::Draw,
            None => TicTacToeStatus::Next(self.next_mark()),
        }
    }

    pub fn place(&mut self, index: usize) -> Result<TicTacToeOutcome> {
        let cell = self.board.get(index).ok_or(HubError::InvalidCell)?;

        if cell.is_some() || self.status().is_finished() {
            return Ok(TicTacToeOutcome::NoChange);
        }

        let mark = self.next_mark();
        self.board[index] = Some(mark);
        log::trace!("{} placed at {}", mark.symbol(), index);

        Ok(match self.status() {
            TicTacToeStatus::Winner(mark) => {
                log::debug!("tic-tac-toe won by {}", mark.symbol());
                TicTacToeOutcome::Won(mark)
            }
            TicTacToeStatus::Draw => TicTacToeOutcome::Draw,
            TicTacToeStatus::Next(_) => TicTacToeOutcome::Placed,
        })
    }

    pub fn restart(&mut self) {
        self.board = Board::default();
    }
}

impl StateMachine for TicTacToe {
    type Event = TicTacToeEvent;
    type Outcome = Result<TicTacToeOutcome>;

    fn apply(&mut self, event: TicTacToeEvent) -> Self::Outcome {
        match event {
            TicTacToeEvent::Place(index) => self.place(index),
            TicTacToeEvent::Restart => {
                let had_moves = self.moves() > 0;
                self.restart();
                Ok(if had_moves {
                    TicTacToeOutcome::Restarted
                } else {
                    TicTacToeOutcome::NoChange
                })
            }
        }
    }
}
