use std::fmt;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 9;

pub type Board = [Mark; BOARD_SIZE];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Mark::Empty
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::Empty => write!(f, " "),
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    XWon,
    OWon,
    Draw,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        *self != GameStatus::InProgress
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::XWon => write!(f, "X wins"),
            GameStatus::OWon => write!(f, "O wins"),
            GameStatus::Draw => write!(f, "draw"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningLine {
    pub mark: Mark,
    pub cells: [usize; 3],
}

impl WinningLine {
    pub fn new(mark: Mark, cells: [usize; 3]) -> Self {
        Self { mark, cells }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.cells.contains(&index)
    }
}

/// Consistent copy of everything a front-end renders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub current_mark: Mark,
    pub status: GameStatus,
    pub winning_line: Option<WinningLine>,
    pub status_text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveError {
    GameOver,
    OutOfBounds(usize),
    CellOccupied(usize),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::GameOver => write!(f, "Game is already over"),
            MoveError::OutOfBounds(index) => write!(f, "Position {} is out of bounds", index),
            MoveError::CellOccupied(index) => write!(f, "Cell {} is already marked", index),
        }
    }
}

impl std::error::Error for MoveError {}
