use std::path::PathBuf;

use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::tictactoe::TicTacToeSettings;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "tictactoe_client_config.yaml";

pub fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    path: PathBuf,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub game: TicTacToeSettings,
    #[serde(default)]
    pub show_engine_stats: bool,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        Ok(())
    }
}
