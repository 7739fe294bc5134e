use super::board::is_board_full;
use super::types::{Board, Mark, WinningLine};

/// Rows, then columns, then diagonals. The first complete line wins.
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

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WinCheck {
    InProgress,
    Win(WinningLine),
    Draw,
}

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    for [a, b, c] in LINES {
        let mark = board[a];
        if !mark.is_empty() && mark == board[b] && mark == board[c] {
            return Some(WinningLine::new(mark, [a, b, c]));
        }
    }
    None
}

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

pub fn check_winner(board: &Board) -> WinCheck {
    if let Some(line) = check_win_with_line(board) {
        return WinCheck::Win(line);
    }

    if is_board_full(board) {
        WinCheck::Draw
    } else {
        WinCheck::InProgress
    }
}
