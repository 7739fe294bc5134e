mod board;
mod bot_controller;
mod game_state;
mod observer;
mod types;
mod win_detector;

pub use board::{count_marks, empty_board, get_available_moves, is_board_full, is_valid_move};
pub use bot_controller::{BotInput, BotMove, MoveReason, POSITION_PREFERENCE, calculate_move};
pub use game_state::{GameEngine, SharedEngine};
pub use observer::StateObserver;
pub use types::{BOARD_SIZE, Board, GameSnapshot, GameStatus, Mark, MoveError, WinningLine};
pub use win_detector::{LINES, WinCheck, check_win, check_win_with_line, check_winner};
