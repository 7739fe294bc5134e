use serde::{Deserialize, Serialize};
use tictactoe_engine::config::{
    ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer,
};
use tictactoe_engine::{GameMode, Mark};

const CONFIG_FILE_NAME: &str = "tictactoe_client_config.yaml";

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub type ClientConfigManager = ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>;

pub fn get_config_manager(path_override: Option<&str>) -> ClientConfigManager {
    match path_override {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(get_config_path()),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub mode: GameMode,
    pub bot_mark: Mark,
    #[serde(default = "default_show_indices")]
    pub show_indices: bool,
}

fn default_show_indices() -> bool {
    true
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        if self.bot_mark.is_empty() {
            return Err("bot_mark must be X or O".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: GameMode::PlayerVsBot,
            bot_mark: Mark::O,
            show_indices: default_show_indices(),
        }
    }
}
