use tictactoe_engine::tictactoe::StateObserver;
use tictactoe_engine::{GameEngine, GameMode, ModeSignal, MoveError, SharedEngine, log};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::command::{ClientCommand, HELP_TEXT, parse_command};
use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct LocalGameSession {
    engine: SharedEngine,
    mode: ModeSignal,
}

impl LocalGameSession {
    pub fn new(config: &Config) -> Self {
        let mut mode = ModeSignal::new(config.mode);
        let engine = GameEngine::attach(GameEngine::with_bot_mark(config.bot_mark), &mut mode);
        Self { engine, mode }
    }

    pub fn engine(&self) -> &SharedEngine {
        &self.engine
    }

    pub fn mode(&self) -> GameMode {
        self.mode.get()
    }

    pub fn add_observer(&self, observer: impl StateObserver + 'static) {
        self.engine.borrow_mut().add_observer(observer);
    }

    pub fn start(&mut self) {
        self.engine.borrow_mut().restart();
        self.play_bot_turn();
    }

    pub fn set_status(&self, text: impl Into<String>) {
        self.engine.borrow_mut().set_status(text);
    }

    pub fn handle_command(&mut self, command: ClientCommand) -> Flow {
        match command {
            ClientCommand::PlaceMark { index } => self.place_mark(index),
            ClientCommand::Restart => {
                self.engine.borrow_mut().restart();
                self.play_bot_turn();
            }
            ClientCommand::SwitchMode(mode) => {
                if mode == self.mode.get() {
                    self.set_status(format!("Already playing in {} mode", mode));
                } else {
                    self.mode.set(mode);
                    self.play_bot_turn();
                }
            }
            ClientCommand::Help => println!("{}", HELP_TEXT),
            ClientCommand::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn place_mark(&mut self, index: usize) {
        if !self.engine.borrow().status_text().is_empty() {
            self.set_status("");
        }

        let result = self.engine.borrow_mut().try_make_move(index);
        match result {
            Ok(()) => self.play_bot_turn(),
            Err(e) => self.set_status(describe_move_error(e)),
        }
    }

    fn play_bot_turn(&mut self) {
        if self.mode.get() != GameMode::PlayerVsBot {
            return;
        }

        let played = self.engine.borrow_mut().ai_move();
        if let Some(index) = played {
            self.set_status(format!("Bot played {}", index + 1));
        }
    }
}

fn describe_move_error(error: MoveError) -> String {
    match error {
        MoveError::GameOver => "Game is over, type r to play again".to_string(),
        MoveError::OutOfBounds(_) => "Choose a cell from 1 to 9".to_string(),
        MoveError::CellOccupied(index) => format!("Cell {} is already marked", index + 1),
    }
}

pub async fn run_local_game(session: &mut LocalGameSession) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", HELP_TEXT);
    session.start();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                session.set_status(e);
                continue;
            }
        };

        if session.handle_command(command) == Flow::Quit {
            break;
        }
    }

    log!("Input closed, leaving game");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_engine::{GameStatus, Mark};

    fn session(mode: GameMode, bot_mark: Mark) -> LocalGameSession {
        let config = Config {
            mode,
            bot_mark,
            show_indices: true,
        };
        let mut session = LocalGameSession::new(&config);
        session.start();
        session
    }

    fn place(session: &mut LocalGameSession, index: usize) {
        session.handle_command(ClientCommand::PlaceMark { index });
    }

    #[test]
    fn test_bot_replies_after_human_move() {
        let mut session = session(GameMode::PlayerVsBot, Mark::O);
        place(&mut session, 4);

        let engine = session.engine().borrow();
        assert_eq!(engine.board()[4], Mark::X);
        assert_eq!(engine.board()[0], Mark::O);
        assert_eq!(engine.current_mark(), Mark::X);
        assert_eq!(engine.status_text(), "Bot played 1");
    }

    #[test]
    fn test_bot_opens_when_playing_x() {
        let session = session(GameMode::PlayerVsBot, Mark::X);
        let engine = session.engine().borrow();
        assert_eq!(engine.board()[4], Mark::X);
        assert_eq!(engine.current_mark(), Mark::O);
    }

    #[test]
    fn test_pvp_alternates_humans() {
        let mut session = session(GameMode::PlayerVsPlayer, Mark::O);
        place(&mut session, 0);
        place(&mut session, 1);

        let engine = session.engine().borrow();
        assert_eq!(engine.board()[0], Mark::X);
        assert_eq!(engine.board()[1], Mark::O);
        assert_eq!(engine.current_mark(), Mark::X);
    }

    #[test]
    fn test_rejected_move_sets_status() {
        let mut session = session(GameMode::PlayerVsPlayer, Mark::O);
        place(&mut session, 0);
        place(&mut session, 0);
        assert_eq!(session.engine().borrow().status_text(), "Cell 1 is already marked");

        place(&mut session, 1);
        let engine = session.engine().borrow();
        assert_eq!(engine.status_text(), "");
        assert_eq!(engine.board()[1], Mark::O);
    }

    #[test]
    fn test_switch_mode_resets_game() {
        let mut session = session(GameMode::PlayerVsPlayer, Mark::O);
        place(&mut session, 0);
        place(&mut session, 4);

        session.handle_command(ClientCommand::SwitchMode(GameMode::PlayerVsBot));
        assert_eq!(session.mode(), GameMode::PlayerVsBot);
        let engine = session.engine().borrow();
        assert_eq!(engine.board(), &[Mark::Empty; 9]);
        assert_eq!(engine.current_mark(), Mark::X);
    }

    #[test]
    fn test_switch_to_same_mode_keeps_game() {
        let mut session = session(GameMode::PlayerVsPlayer, Mark::O);
        place(&mut session, 0);
        session.handle_command(ClientCommand::SwitchMode(GameMode::PlayerVsPlayer));
        let engine = session.engine().borrow();
        assert_eq!(engine.board()[0], Mark::X);
        assert_eq!(engine.status_text(), "Already playing in pvp mode");
    }

    #[test]
    fn test_bot_wins_against_careless_human() {
        let mut session = session(GameMode::PlayerVsBot, Mark::O);
        // O takes the center, then blocks row 0.
        place(&mut session, 1);
        place(&mut session, 2);
        assert_eq!(session.engine().borrow().board()[0], Mark::O);
        // O holds 0 and 4 and threatens 8; X ignores it.
        place(&mut session, 3);
        let engine = session.engine().borrow();
        assert_eq!(engine.status(), GameStatus::OWon);
        assert_eq!(engine.winner_line(), Some([0, 4, 8]));
    }

    #[test]
    fn test_moves_after_game_over_report_status() {
        let mut session = session(GameMode::PlayerVsPlayer, Mark::O);
        for index in [0, 3, 1, 4, 2] {
            place(&mut session, index);
        }
        place(&mut session, 8);
        let engine = session.engine().borrow();
        assert_eq!(engine.status(), GameStatus::XWon);
        assert_eq!(engine.board()[8], Mark::Empty);
        assert_eq!(engine.status_text(), "Game is over, type r to play again");
    }

    #[test]
    fn test_restart_and_quit() {
        let mut session = session(GameMode::PlayerVsPlayer, Mark::O);
        place(&mut session, 0);
        assert_eq!(session.handle_command(ClientCommand::Restart), Flow::Continue);
        assert_eq!(session.engine().borrow().board()[0], Mark::Empty);
        assert_eq!(session.handle_command(ClientCommand::Quit), Flow::Quit);
    }
}
