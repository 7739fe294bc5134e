pub mod config;
pub mod logger;
pub mod mode;
pub mod tictactoe;

pub use mode::{GameMode, ModeSignal};
pub use tictactoe::{GameEngine, GameSnapshot, GameStatus, Mark, MoveError, SharedEngine};
