use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::log;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    PlayerVsPlayer,
    #[default]
    PlayerVsBot,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::PlayerVsPlayer => write!(f, "pvp"),
            GameMode::PlayerVsBot => write!(f, "pvb"),
        }
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pvp" | "player_vs_player" => Ok(GameMode::PlayerVsPlayer),
            "pvb" | "player_vs_bot" => Ok(GameMode::PlayerVsBot),
            other => Err(format!("Unknown game mode '{}', expected pvp or pvb", other)),
        }
    }
}

type ModeHandler = Box<dyn FnMut(GameMode)>;

/// Observable game mode. Handlers run on every change of value, in
/// registration order.
pub struct ModeSignal {
    mode: GameMode,
    handlers: Vec<ModeHandler>,
}

impl ModeSignal {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            handlers: Vec::new(),
        }
    }

    pub fn get(&self) -> GameMode {
        self.mode
    }

    pub fn subscribe(&mut self, handler: impl FnMut(GameMode) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn set(&mut self, mode: GameMode) {
        if self.mode == mode {
            return;
        }

        log!("Game mode changed: {} -> {}", self.mode, mode);
        self.mode = mode;

        for handler in self.handlers.iter_mut() {
            handler(mode);
        }
    }
}

impl Default for ModeSignal {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}
