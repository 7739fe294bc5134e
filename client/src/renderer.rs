use std::io::Write;

use tictactoe_engine::tictactoe::StateObserver;
use tictactoe_engine::{GameSnapshot, GameStatus, Mark};

pub fn render_board(snapshot: &GameSnapshot, show_indices: bool) -> String {
    let mut out = String::new();

    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let index = row * 3 + col;
                let mark = snapshot.board[index];
                let on_line = snapshot
                    .winning_line
                    .is_some_and(|line| line.contains(index));

                match mark {
                    Mark::Empty if show_indices => format!(" {} ", index + 1),
                    Mark::Empty => "   ".to_string(),
                    _ if on_line => format!("[{}]", mark),
                    _ => format!(" {} ", mark),
                }
            })
            .collect();

        out.push_str(&cells.join("|"));
        out.push('\n');
        if row < 2 {
            out.push_str("---+---+---\n");
        }
    }

    out
}

pub fn render_status(snapshot: &GameSnapshot) -> String {
    let mut line = match snapshot.status {
        GameStatus::InProgress => format!("Turn: {}", snapshot.current_mark),
        GameStatus::XWon | GameStatus::OWon => format!("{}! Type r to play again.", snapshot.status),
        GameStatus::Draw => "Draw! Type r to play again.".to_string(),
    };

    if !snapshot.status_text.is_empty() {
        line.push_str("\n> ");
        line.push_str(&snapshot.status_text);
    }

    line
}

/// Prints the board after every engine transition. A change that only
/// replaces the status text prints just that text.
pub struct TerminalRenderer<W: Write> {
    out: W,
    show_indices: bool,
    last: Option<GameSnapshot>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, show_indices: bool) -> Self {
        Self {
            out,
            show_indices,
            last: None,
        }
    }

    fn frame(&self, snapshot: &GameSnapshot) -> String {
        let status_only = self.last.as_ref().is_some_and(|last| {
            last.status_text != snapshot.status_text
                && last.board == snapshot.board
                && last.status == snapshot.status
                && last.current_mark == snapshot.current_mark
                && last.winning_line == snapshot.winning_line
        });

        if !status_only {
            return format!(
                "\n{}{}\n",
                render_board(snapshot, self.show_indices),
                render_status(snapshot)
            );
        }

        if snapshot.status_text.is_empty() {
            String::new()
        } else {
            format!("> {}\n", snapshot.status_text)
        }
    }
}

impl<W: Write> StateObserver for TerminalRenderer<W> {
    fn on_state_changed(&mut self, snapshot: &GameSnapshot) {
        let frame = self.frame(snapshot);
        self.last = Some(snapshot.clone());

        if frame.is_empty() {
            return;
        }
        if let Err(e) = self.out.write_all(frame.as_bytes()).and_then(|_| self.out.flush()) {
            tictactoe_engine::log!("Failed to render board: {}", e);
        }
    }
}
