use thiserror::Error;

use super::types::Player;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Game is already over")]
    GameOver,
    #[error("Not your turn: {current} is to move, input belongs to {human}")]
    NotYourTurn { current: Player, human: Player },
    #[error("Cell {cell} is out of range (board has {cell_count} cells)")]
    OutOfRange { cell: usize, cell_count: usize },
    #[error("Cell {cell} is already occupied")]
    CellOccupied { cell: usize },
    #[error("Piece #{move_number} of player {player} is missing from the move history")]
    InconsistentMoveHistory { player: Player, move_number: usize },
    #[error("No legal move: the board has no empty cell")]
    NoLegalMove,
}

impl MoveError {
    /// Input that is simply not acceptable right now, as opposed to a broken
    /// state or an exhausted board.
    pub fn is_invalid_move(&self) -> bool {
        matches!(
            self,
            MoveError::GameOver
                | MoveError::NotYourTurn { .. }
                | MoveError::OutOfRange { .. }
                | MoveError::CellOccupied { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("Grid size must be between {min} and {max}, got {found}")]
    GridSizeOutOfRange { found: usize, min: usize, max: usize },
}
