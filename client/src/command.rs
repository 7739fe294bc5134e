use tictactoe_engine::GameMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    /// Zero-based cell index.
    PlaceMark { index: usize },
    Restart,
    SwitchMode(GameMode),
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "\
Commands:
  1-9         place a mark (cells numbered left to right, top to bottom)
  r           restart the game
  m pvp|pvb   switch mode (player vs player, player vs bot)
  h           show this help
  q           quit";

pub fn parse_command(line: &str) -> Result<ClientCommand, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err("Empty command".to_string());
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "r" | "restart" => ClientCommand::Restart,
        "h" | "help" | "?" => ClientCommand::Help,
        "q" | "quit" | "exit" => ClientCommand::Quit,
        "m" | "mode" => {
            let mode = parts
                .next()
                .ok_or_else(|| "Usage: m pvp|pvb".to_string())?
                .parse::<GameMode>()?;
            ClientCommand::SwitchMode(mode)
        }
        cell => {
            // Out-of-range cells are forwarded; the engine rejects them.
            let index = match cell.parse::<usize>() {
                Ok(number) => number.wrapping_sub(1),
                Err(_) if cell.bytes().all(|b| b.is_ascii_digit()) => usize::MAX,
                Err(_) => return Err(format!("Unknown command '{}', type h for help", cell)),
            };
            ClientCommand::PlaceMark { index }
        }
    };

    if parts.next().is_some() {
        return Err(format!("Unexpected arguments after '{}'", head));
    }

    Ok(command)
}
