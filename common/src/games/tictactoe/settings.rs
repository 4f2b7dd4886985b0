use super::error::SettingsError;
use super::types::{GameMode, Player};

pub const MIN_GRID_SIZE: usize = 3;
pub const MAX_GRID_SIZE: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSettings {
    pub grid_size: usize,
    pub game_mode: GameMode,
    /// Only consulted in single-player mode.
    pub human_player: Player,
}

impl GameSettings {
    pub fn new(grid_size: usize, game_mode: GameMode, human_player: Player) -> Self {
        Self {
            grid_size,
            game_mode,
            human_player,
        }
    }

    pub fn multiplayer(grid_size: usize) -> Self {
        Self::new(grid_size, GameMode::Multiplayer, Player::X)
    }

    pub fn singleplayer(grid_size: usize, human_player: Player) -> Self {
        Self::new(grid_size, GameMode::Singleplayer, human_player)
    }

    pub fn pieces_per_player(&self) -> usize {
        self.grid_size + 1
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(SettingsError::GridSizeOutOfRange {
                found: self.grid_size,
                min: MIN_GRID_SIZE,
                max: MAX_GRID_SIZE,
            });
        }
        Ok(())
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::singleplayer(MIN_GRID_SIZE, Player::X)
    }
}
