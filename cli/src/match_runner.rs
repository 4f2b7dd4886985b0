use tracing::{error, info, warn};

use common::tictactoe::{AiTurnOutcome, MoveError, Player, TicTacToeSession};

use crate::input::MoveInput;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Won(Player),
    /// Turn limit reached or no legal move left.
    Draw { turns: usize },
    Aborted,
}

/// Drives the live game of `session` to an end: AI turns through the
/// session's scheduler, every other turn from `input`.
pub async fn play_game<I: MoveInput>(
    session: &mut TicTacToeSession,
    input: &mut I,
    max_turns: usize,
) -> Result<GameResult, MoveError> {
    let mut turns = 0;

    loop {
        if let Some(winner) = session.state().winner {
            info!(%winner, turns, "Game over");
            return Ok(GameResult::Won(winner));
        }
        if turns >= max_turns {
            info!(turns, "Turn limit reached, calling a draw");
            return Ok(GameResult::Draw { turns });
        }

        if session.state().is_ai_turn() {
            let outcome = session.play_ai_turn().await;
            if let Some(result) = settle_ai_turn(outcome, turns)? {
                return Ok(result);
            }
        } else {
            let Some(cell) = input.next_cell(session.state()).await? else {
                return Ok(GameResult::Aborted);
            };
            match session.handle_cell_click(cell) {
                Ok(()) => {}
                Err(MoveError::NoLegalMove) => return Ok(GameResult::Draw { turns }),
                Err(e) if e.is_invalid_move() => {
                    input.rejected(cell, &e);
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        turns += 1;
    }
}

/// Ends the game on a terminal AI outcome. Anything else uses up the turn
/// so a misbehaving AI still runs into the turn limit.
fn settle_ai_turn(outcome: AiTurnOutcome, turns: usize) -> Result<Option<GameResult>, MoveError> {
    match outcome {
        AiTurnOutcome::Applied { .. } => Ok(None),
        AiTurnOutcome::Rejected(MoveError::NoLegalMove) => Ok(Some(GameResult::Draw { turns })),
        AiTurnOutcome::Rejected(e) => {
            error!(error = %e, "AI turn failed");
            Err(e)
        }
        AiTurnOutcome::Cancelled => {
            warn!("AI task was cancelled");
            Ok(Some(GameResult::Aborted))
        }
        other => {
            warn!(outcome = ?other, "AI turn produced no move");
            Ok(None)
        }
    }
}
