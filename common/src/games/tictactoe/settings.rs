use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::FirstPlayerMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentMode {
    Engine,
    Human,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeSettings {
    pub opponent: OpponentMode,
    pub first_player: FirstPlayerMode,
}

impl Default for TicTacToeSettings {
    fn default() -> Self {
        Self {
            opponent: OpponentMode::Engine,
            first_player: FirstPlayerMode::Human,
        }
    }
}

impl Validate for TicTacToeSettings {
    fn validate(&self) -> Result<(), String> {
        if self.opponent == OpponentMode::Human && self.first_player != FirstPlayerMode::Human {
            return Err(format!(
                "first_player must be human when the opponent is human, got {:?}",
                self.first_player
            ));
        }
        Ok(())
    }
}
