mod board;
mod bot_controller;
mod error;
mod game_state;
mod session;
mod settings;
mod types;
mod win_detector;

pub use board::Board;
pub use bot_controller::{BotDecision, BotInput, Strategy, decide, select_move};
pub use error::{MoveError, SettingsError};
pub use game_state::GameState;
pub use session::{AiTurnOutcome, ComputedAiMove, SessionError, TicTacToeSession};
pub use settings::{GameSettings, MAX_GRID_SIZE, MIN_GRID_SIZE};
pub use types::{CellValue, GameMode, GamePhase, LineKind, Move, PerPlayer, Player, Scores, WinningLine};
pub use win_detector::{check_win, check_win_with_line, line_cells};
