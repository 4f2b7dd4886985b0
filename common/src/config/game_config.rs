use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::games::tictactoe::{GameMode, GameSettings, Player};
use super::Validate;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_size: usize,
    pub game_mode: GameMode,
    pub human_player: Player,
    /// Pause before an AI move is applied.
    pub ai_delay_ms: u64,
    pub seed: Option<u64>,
    /// Turns after which an undecided game is called a draw.
    pub max_turns: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 3,
            game_mode: GameMode::Singleplayer,
            human_player: Player::X,
            ai_delay_ms: 600,
            seed: None,
            max_turns: 200,
        }
    }
}

impl GameConfig {
    pub fn game_settings(&self) -> GameSettings {
        GameSettings::new(self.grid_size, self.game_mode, self.human_player)
    }

    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        self.game_settings().validate().map_err(|e| e.to_string())?;
        if self.max_turns == 0 {
            return Err("max_turns must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, ConfigManager, MemoryContentConfigProvider, YamlConfigSerializer};

    fn manager(content: Option<&str>) -> ConfigManager<MemoryContentConfigProvider, GameConfig> {
        ConfigManager::new(
            MemoryContentConfigProvider::new(content.map(str::to_string)),
            YamlConfigSerializer,
        )
    }

    #[test]
    fn test_missing_config_yields_defaults() {
        assert_eq!(manager(None).get_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = manager(Some("grid_size: 5\ngame_mode: multiplayer\nhuman_player: O\n"))
            .get_config()
            .unwrap();
        assert_eq!(config.grid_size, 5);
        assert_eq!(config.game_mode, GameMode::Multiplayer);
        assert_eq!(config.human_player, Player::O);
        assert_eq!(config.ai_delay_ms, 600);
        assert_eq!(config.game_settings().pieces_per_player(), 6);
    }

    #[test]
    fn test_invalid_grid_is_rejected() {
        let result = manager(Some("grid_size: 12\n")).get_config();
        assert!(matches!(result, Err(ConfigError::Validation(_))));

        let result = manager(Some("grid_size: [1, 2]\n")).get_config();
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn test_set_config_writes_yaml() {
        let manager = manager(None);
        let config = GameConfig {
            grid_size: 4,
            seed: Some(9),
            ..GameConfig::default()
        };
        manager.set_config(&config).unwrap();

        let written = manager.provider().content().unwrap();
        assert!(written.contains("grid_size: 4"));
        assert!(written.contains("game_mode: singleplayer"));
        assert_eq!(manager.get_config().unwrap(), config);

        let bad = GameConfig {
            max_turns: 0,
            ..GameConfig::default()
        };
        assert!(matches!(manager.set_config(&bad), Err(ConfigError::Validation(_))));
    }
}
