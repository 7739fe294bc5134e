use super::board::get_available_moves;
use super::types::{Board, Mark};
use super::win_detector::check_win;

/// Center, corners, then edges.
pub const POSITION_PREFERENCE: [usize; 9] = [4, 0, 2, 6, 8, 1, 3, 5, 7];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveReason {
    Win,
    Block,
    Preference,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BotMove {
    pub index: usize,
    pub reason: MoveReason,
}

pub struct BotInput {
    pub board: Board,
    pub bot_mark: Mark,
}

impl BotInput {
    pub fn new(board: Board, bot_mark: Mark) -> Self {
        Self { board, bot_mark }
    }
}

pub fn calculate_move(input: &BotInput) -> Option<BotMove> {
    let bot_mark = input.bot_mark;
    let opponent_mark = bot_mark.opponent()?;
    let available_moves = get_available_moves(&input.board);

    if available_moves.is_empty() {
        return None;
    }

    let mut board = input.board;

    if let Some(index) = find_winning_move(&mut board, bot_mark, &available_moves) {
        return Some(BotMove { index, reason: MoveReason::Win });
    }

    if let Some(index) = find_winning_move(&mut board, opponent_mark, &available_moves) {
        return Some(BotMove { index, reason: MoveReason::Block });
    }

    POSITION_PREFERENCE
        .iter()
        .copied()
        .find(|&index| board[index].is_empty())
        .map(|index| BotMove { index, reason: MoveReason::Preference })
}

fn find_winning_move(board: &mut Board, mark: Mark, moves: &[usize]) -> Option<usize> {
    for &index in moves {
        board[index] = mark;
        let winner = check_win(board);
        board[index] = Mark::Empty;

        if winner == Some(mark) {
            return Some(index);
        }
    }
    None
}
