use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::mode::ModeSignal;
use crate::{log, log_debug};
use super::board::{empty_board, is_valid_move};
use super::bot_controller::{BotInput, calculate_move};
use super::observer::StateObserver;
use super::types::{BOARD_SIZE, Board, GameSnapshot, GameStatus, Mark, MoveError, WinningLine};
use super::win_detector::{WinCheck, check_winner};

pub type SharedEngine = Rc<RefCell<GameEngine>>;

/// Board, turn and outcome of a single 3x3 game.
///
/// Every mutator either commits a full transition and notifies observers,
/// or leaves the state untouched. Invalid requests are ignored rather than
/// reported; [`GameEngine::try_make_move`] exposes the rejection reason.
pub struct GameEngine {
    board: Board,
    current_mark: Mark,
    status: GameStatus,
    winning_line: Option<WinningLine>,
    status_text: String,
    bot_mark: Mark,
    observers: Vec<Box<dyn StateObserver>>,
}

impl GameEngine {
    pub fn new() -> Self {
        Self::with_bot_mark(Mark::O)
    }

    pub fn with_bot_mark(bot_mark: Mark) -> Self {
        Self {
            board: empty_board(),
            current_mark: Mark::X,
            status: GameStatus::InProgress,
            winning_line: None,
            status_text: String::new(),
            bot_mark,
            observers: Vec::new(),
        }
    }

    /// Shares `engine` and resets it whenever `signal` changes value.
    pub fn attach(engine: GameEngine, signal: &mut ModeSignal) -> SharedEngine {
        let shared = Rc::new(RefCell::new(engine));
        let weak: Weak<RefCell<GameEngine>> = Rc::downgrade(&shared);

        signal.subscribe(move |_mode| {
            let Some(engine) = weak.upgrade() else {
                return;
            };
            match engine.try_borrow_mut() {
                Ok(mut engine) => engine.reset(),
                Err(_) => log!("Engine busy, reset on mode change skipped"),
            }
        });

        shared
    }

    pub fn add_observer(&mut self, observer: impl StateObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board,
            current_mark: self.current_mark,
            status: self.status,
            winning_line: self.winning_line,
            status_text: self.status_text.clone(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<Mark> {
        self.winning_line.map(|line| line.mark)
    }

    pub fn winner_line(&self) -> Option<[usize; 3]> {
        self.winning_line.map(|line| line.cells)
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn bot_mark(&self) -> Mark {
        self.bot_mark
    }

    pub fn try_make_move(&mut self, index: usize) -> Result<(), MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }

        if !is_valid_move(&self.board, index) {
            return Err(if index >= BOARD_SIZE {
                MoveError::OutOfBounds(index)
            } else {
                MoveError::CellOccupied(index)
            });
        }

        self.board[index] = self.current_mark;
        log_debug!("{} placed at {}", self.current_mark, index);

        match check_winner(&self.board) {
            WinCheck::Win(line) => {
                self.status = match line.mark {
                    Mark::X => GameStatus::XWon,
                    Mark::O => GameStatus::OWon,
                    Mark::Empty => unreachable!(),
                };
                self.winning_line = Some(line);
                log!("Game over: {} wins on {:?}", line.mark, line.cells);
            }
            WinCheck::Draw => {
                self.status = GameStatus::Draw;
                log!("Game over: draw");
            }
            WinCheck::InProgress => self.switch_turn(),
        }

        self.notify();
        Ok(())
    }

    pub fn make_move(&mut self, index: usize) {
        if let Err(e) = self.try_make_move(index) {
            log_debug!("Move at {} ignored: {}", index, e);
        }
    }

    /// Plays the bot's reply if it is the bot's turn. Returns the chosen cell.
    pub fn ai_move(&mut self) -> Option<usize> {
        if self.status.is_over() || self.current_mark != self.bot_mark {
            return None;
        }

        let bot_move = calculate_move(&BotInput::new(self.board, self.bot_mark))?;
        log_debug!("Bot {} chose {} ({:?})", self.bot_mark, bot_move.index, bot_move.reason);

        self.make_move(bot_move.index);
        Some(bot_move.index)
    }

    pub fn restart(&mut self) {
        self.board = empty_board();
        self.current_mark = Mark::X;
        self.status = GameStatus::InProgress;
        self.winning_line = None;
        self.status_text.clear();
        log_debug!("Game restarted");

        self.notify();
    }

    pub fn reset(&mut self) {
        self.restart();
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status_text = text.into();
        self.notify();
    }

    fn switch_turn(&mut self) {
        self.current_mark = if self.current_mark == Mark::X { Mark::O } else { Mark::X };
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in self.observers.iter_mut() {
            observer.on_state_changed(&snapshot);
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
