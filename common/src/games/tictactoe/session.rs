use std::time::Duration;

use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

use crate::games::SessionRng;
use super::bot_controller::{BotInput, select_move};
use super::error::{MoveError, SettingsError};
use super::game_state::GameState;
use super::settings::GameSettings;
use super::types::{GameMode, Player, Scores};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// A move the AI computed, stamped with the generation it was computed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComputedAiMove {
    pub generation: u64,
    pub cell: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AiTurnOutcome {
    Applied { cell: usize },
    Discarded { computed_for: u64, live: u64 },
    Rejected(MoveError),
    Cancelled,
    NotScheduled,
}

type AiTaskResult = Result<Result<ComputedAiMove, MoveError>, JoinError>;

struct PendingAiMove {
    generation: u64,
    handle: JoinHandle<AiTaskResult>,
}

/// Owns the live game for one player session and schedules AI turns.
///
/// Every state replacement bumps `generation`. A scheduled AI move carries
/// the generation it was computed against and is dropped if the live game
/// has moved on by the time it arrives.
pub struct TicTacToeSession {
    state: GameState,
    rng: SessionRng,
    generation: u64,
    ai_delay: Duration,
    pending: Option<PendingAiMove>,
}

impl TicTacToeSession {
    pub fn new(settings: GameSettings, seed: u64, ai_delay: Duration) -> Result<Self, SessionError> {
        settings.validate()?;
        let mut rng = SessionRng::new(seed);
        let state = GameState::new(&settings, &mut rng);

        info!(
            seed,
            grid_size = settings.grid_size,
            mode = ?settings.game_mode,
            "Session created"
        );

        Ok(Self {
            state,
            rng,
            generation: 0,
            ai_delay,
            pending: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn scores(&self) -> Scores {
        self.state.scores
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn has_pending_ai_move(&self) -> bool {
        self.pending.is_some()
    }

    pub fn handle_cell_click(&mut self, cell: usize) -> Result<(), MoveError> {
        match self.state.transition(cell) {
            Ok(next) => {
                self.replace_state(next);
                Ok(())
            }
            Err(e) => {
                warn!(cell, error = %e, "Rejected cell click");
                Err(e)
            }
        }
    }

    pub fn new_game(&mut self) {
        self.restart(self.state.settings());
    }

    pub fn set_grid_size(&mut self, grid_size: usize) -> Result<(), SessionError> {
        let settings = GameSettings {
            grid_size,
            ..self.state.settings()
        };
        settings.validate()?;
        self.restart(settings);
        Ok(())
    }

    /// `human_player` is kept from the current game when not given.
    pub fn set_game_mode(&mut self, game_mode: GameMode, human_player: Option<Player>) {
        let current = self.state.settings();
        let settings = GameSettings {
            game_mode,
            human_player: human_player.unwrap_or(current.human_player),
            ..current
        };
        self.restart(settings);
    }

    pub fn reset_scores(&mut self) {
        self.state = self.state.reset_scores();
        info!("Scores reset");
    }

    /// Starts the deferred AI turn if it is the AI's move and nothing is
    /// pending yet. Returns whether a task is pending afterwards.
    pub fn schedule_ai_move(&mut self) -> bool {
        if self.pending.is_some() {
            return true;
        }
        if !self.state.is_ai_turn() {
            return false;
        }

        let input = BotInput::from_game_state(&self.state);
        let mut rng = self.rng.fork();
        let generation = self.generation;
        let delay = self.ai_delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::task::spawn_blocking(move || select_move(&input, &mut rng))
                .await
                .map(|result| result.map(|cell| ComputedAiMove { generation, cell }))
        });

        debug!(generation, delay_ms = delay.as_millis() as u64, "Scheduled AI move");
        self.pending = Some(PendingAiMove { generation, handle });
        true
    }

    pub async fn await_ai_move(&mut self) -> AiTurnOutcome {
        let Some(pending) = self.pending.take() else {
            return AiTurnOutcome::NotScheduled;
        };

        match pending.handle.await.and_then(|inner| inner) {
            Ok(Ok(computed)) => self.apply_ai_move(computed),
            Ok(Err(e)) => {
                warn!(generation = pending.generation, error = %e, "AI could not move");
                AiTurnOutcome::Rejected(e)
            }
            Err(e) => {
                debug!(generation = pending.generation, cancelled = e.is_cancelled(), "AI task ended early");
                AiTurnOutcome::Cancelled
            }
        }
    }

    /// Schedules (if needed) and waits for the AI's move.
    pub async fn play_ai_turn(&mut self) -> AiTurnOutcome {
        if !self.schedule_ai_move() {
            return AiTurnOutcome::NotScheduled;
        }
        self.await_ai_move().await
    }

    pub fn apply_ai_move(&mut self, computed: ComputedAiMove) -> AiTurnOutcome {
        if computed.generation != self.generation {
            warn!(
                computed_for = computed.generation,
                live = self.generation,
                "Discarding stale AI move"
            );
            return AiTurnOutcome::Discarded {
                computed_for: computed.generation,
                live: self.generation,
            };
        }

        match self.state.transition_ai(computed.cell) {
            Ok(next) => {
                self.replace_state(next);
                AiTurnOutcome::Applied {
                    cell: computed.cell,
                }
            }
            Err(e) => {
                warn!(cell = computed.cell, error = %e, "AI move rejected");
                AiTurnOutcome::Rejected(e)
            }
        }
    }

    pub fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
            debug!(generation = pending.generation, "Cancelled pending AI move");
        }
    }

    fn restart(&mut self, settings: GameSettings) {
        self.cancel_pending();
        let next = GameState::new_with_scores(&settings, self.state.scores, &mut self.rng);
        self.replace_state(next);
    }

    fn replace_state(&mut self, next: GameState) {
        self.state = next;
        self.generation += 1;
    }
}

impl Drop for TicTacToeSession {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::GamePhase;

    fn singleplayer(human: Player, delay_ms: u64) -> TicTacToeSession {
        TicTacToeSession::new(
            GameSettings::singleplayer(3, human),
            42,
            Duration::from_millis(delay_ms),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_bad_grid() {
        let result = TicTacToeSession::new(GameSettings::multiplayer(2), 1, Duration::ZERO);
        assert!(matches!(result, Err(SessionError::Settings(_))));
    }

    #[tokio::test]
    async fn test_ai_turn_is_applied() {
        let mut session = singleplayer(Player::O, 1);
        assert!(session.state().is_ai_turn());
        let generation = session.generation();

        let outcome = session.play_ai_turn().await;
        let AiTurnOutcome::Applied { cell } = outcome else {
            panic!("unexpected outcome {outcome:?}");
        };
        assert_eq!(session.state().board.get(cell), Some(Player::X));
        assert_eq!(session.generation(), generation + 1);
        assert!(!session.state().is_ai_turn());
        assert_eq!(session.play_ai_turn().await, AiTurnOutcome::NotScheduled);
    }

    #[tokio::test]
    async fn test_reset_cancels_pending_ai_move() {
        let mut session = singleplayer(Player::O, 60_000);
        assert!(session.schedule_ai_move());
        assert!(session.has_pending_ai_move());

        session.new_game();
        assert!(!session.has_pending_ai_move());
        assert_eq!(session.await_ai_move().await, AiTurnOutcome::NotScheduled);
        assert_eq!(session.state().board.count_empty(), 9);
    }

    #[test]
    fn test_stale_ai_move_is_discarded() {
        let mut session = singleplayer(Player::O, 0);
        let stale = ComputedAiMove {
            generation: session.generation(),
            cell: 4,
        };
        session.set_grid_size(4).unwrap();

        let before = session.state().clone();
        assert_eq!(
            session.apply_ai_move(stale),
            AiTurnOutcome::Discarded {
                computed_for: 0,
                live: 1
            }
        );
        assert_eq!(session.state(), &before);
    }

    #[tokio::test]
    async fn test_human_click_and_guard() {
        let mut session = singleplayer(Player::O, 0);
        assert_eq!(session.state().current_player, Player::X);
        assert!(matches!(
            session.handle_cell_click(0),
            Err(MoveError::NotYourTurn {
                current: Player::X,
                human: Player::O
            })
        ));
        assert_eq!(session.generation(), 0);

        let AiTurnOutcome::Applied { cell: ai_cell } = session.play_ai_turn().await else {
            panic!("AI should open");
        };
        assert_eq!(session.generation(), 1);

        let cell = (0..9).find(|&c| c != ai_cell).unwrap();
        session.handle_cell_click(cell).unwrap();
        assert_eq!(session.generation(), 2);
        assert_eq!(session.state().board.get(cell), Some(Player::O));

        assert_eq!(
            session.handle_cell_click(cell),
            Err(MoveError::NotYourTurn {
                current: Player::X,
                human: Player::O
            })
        );
        assert_eq!(session.generation(), 2);
    }

    #[test]
    fn test_scores_persist_across_settings_changes() {
        let mut session = TicTacToeSession::new(GameSettings::multiplayer(3), 7, Duration::ZERO).unwrap();
        let first = session.state().current_player;
        // first: 0, 1, 2 ; other: 3, 4
        for cell in [0, 3, 1, 4, 2] {
            session.handle_cell_click(cell).unwrap();
        }
        assert_eq!(session.state().winner, Some(first));
        assert_eq!(session.scores()[first], 1);

        session.set_grid_size(5).unwrap();
        assert_eq!(session.state().grid_size, 5);
        assert_eq!(session.scores()[first], 1);

        session.set_game_mode(GameMode::Singleplayer, Some(Player::O));
        assert_eq!(session.state().game_mode, GameMode::Singleplayer);
        assert_eq!(session.state().grid_size, 5);
        assert_eq!(session.scores()[first], 1);
        assert_eq!(session.state().game_phase, GamePhase::Placement);

        session.reset_scores();
        assert_eq!(session.scores(), Scores::default());
        assert!(session.set_grid_size(11).is_err());
    }

    #[tokio::test]
    async fn test_ai_vs_human_game_progresses() {
        let mut session = singleplayer(Player::X, 0);
        for _ in 0..12 {
            if session.state().is_over() {
                break;
            }
            if session.state().is_ai_turn() {
                let outcome = session.play_ai_turn().await;
                assert!(matches!(outcome, AiTurnOutcome::Applied { .. }), "{outcome:?}");
            } else {
                let cell = session.state().board.empty_cells()[0];
                session.handle_cell_click(cell).unwrap();
            }
        }
        assert!(session.state().moves.len() >= 8 || session.state().is_over());
    }
}
