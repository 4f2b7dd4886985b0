use tracing::debug;

use crate::games::SessionRng;
use super::board::Board;
use super::error::MoveError;
use super::game_state::GameState;
use super::types::{GamePhase, Move, Player};
use super::win_detector::check_win;

const WIN_SCORE: i32 = 10;
const MINIMAX_MAX_GRID: usize = 4;
const PLACEMENT_SEARCH_MAX_EMPTY: usize = 10;
const MOVEMENT_SEARCH_MAX_EMPTY: usize = 15;

/// Snapshot the selector works on; it never touches the live game.
#[derive(Clone, Debug)]
pub struct BotInput {
    pub board: Board,
    pub game_phase: GamePhase,
    pub moves: Vec<Move>,
    pub ai_player: Player,
    pub human_player: Player,
    pub ai_next_piece: usize,
    pub grid_size: usize,
}

impl BotInput {
    /// Plays for whoever is to move in `state`.
    pub fn from_game_state(state: &GameState) -> Self {
        let ai_player = state.current_player;
        Self {
            board: state.board.clone(),
            game_phase: state.game_phase,
            moves: state.moves.clone(),
            ai_player,
            human_player: ai_player.opponent(),
            ai_next_piece: state.next_piece_to_move[ai_player],
            grid_size: state.grid_size,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Win,
    Block,
    Minimax,
    Heuristic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BotDecision {
    pub cell: usize,
    pub strategy: Strategy,
}

pub fn select_move(input: &BotInput, rng: &mut SessionRng) -> Result<usize, MoveError> {
    decide(input, rng).map(|decision| decision.cell)
}

pub fn decide(input: &BotInput, rng: &mut SessionRng) -> Result<BotDecision, MoveError> {
    let candidates = input.board.empty_cells();
    if candidates.is_empty() {
        return Err(MoveError::NoLegalMove);
    }

    let from = match input.game_phase {
        GamePhase::Placement => None,
        GamePhase::Movement => Some(due_piece_position(input)?),
    };

    let mut board = input.board.clone();
    let ai = input.ai_player;
    let human = input.human_player;

    let decision = if let Some(cell) = find_winning_move(&mut board, from, ai, &candidates) {
        BotDecision {
            cell,
            strategy: Strategy::Win,
        }
    } else if let Some(cell) = find_blocking_move(&mut board, from, ai, human, &candidates) {
        BotDecision {
            cell,
            strategy: Strategy::Block,
        }
    } else if let Some(max_depth) = search_depth(input.grid_size, input.game_phase, candidates.len()) {
        let cell = calculate_minimax_move(&mut board, from, ai, human, &candidates, max_depth)
            .ok_or(MoveError::NoLegalMove)?;
        BotDecision {
            cell,
            strategy: Strategy::Minimax,
        }
    } else {
        let cell = calculate_heuristic_move(&board, input.game_phase, &candidates, rng)
            .ok_or(MoveError::NoLegalMove)?;
        BotDecision {
            cell,
            strategy: Strategy::Heuristic,
        }
    };

    debug!(
        player = %ai,
        cell = decision.cell,
        strategy = ?decision.strategy,
        "Bot selected move"
    );
    Ok(decision)
}

fn due_piece_position(input: &BotInput) -> Result<usize, MoveError> {
    input
        .moves
        .iter()
        .find(|m| m.player == input.ai_player && m.move_number == input.ai_next_piece)
        .map(|m| m.position)
        .ok_or(MoveError::InconsistentMoveHistory {
            player: input.ai_player,
            move_number: input.ai_next_piece,
        })
}

/// `None` means the position is too wide to search and the heuristic
/// fallback decides.
fn search_depth(grid_size: usize, phase: GamePhase, empty_cells: usize) -> Option<usize> {
    if grid_size > MINIMAX_MAX_GRID {
        return None;
    }
    let max_empty = match phase {
        GamePhase::Placement => PLACEMENT_SEARCH_MAX_EMPTY,
        GamePhase::Movement => MOVEMENT_SEARCH_MAX_EMPTY,
    };
    if empty_cells > max_empty {
        return None;
    }
    Some(if grid_size <= 3 { 6 } else { 4 })
}

/// Applies `player`'s move (vacating `from` first, if any), evaluates `f`,
/// then restores the board.
fn simulate<R>(
    board: &mut Board,
    from: Option<usize>,
    to: usize,
    player: Player,
    f: impl FnOnce(&mut Board) -> R,
) -> R {
    if let Some(from) = from {
        board.set(from, None);
    }
    board.set(to, Some(player));
    let result = f(board);
    board.set(to, None);
    if let Some(from) = from {
        board.set(from, Some(player));
    }
    result
}

fn find_winning_move(
    board: &mut Board,
    from: Option<usize>,
    player: Player,
    candidates: &[usize],
) -> Option<usize> {
    candidates
        .iter()
        .copied()
        .find(|&cell| simulate(board, from, cell, player, |b| check_win(b) == Some(player)))
}

fn find_blocking_move(
    board: &mut Board,
    from: Option<usize>,
    ai: Player,
    human: Player,
    candidates: &[usize],
) -> Option<usize> {
    match from {
        None => find_winning_move(board, None, human, candidates),
        Some(from) => candidates.iter().copied().find(|&cell| {
            simulate(board, Some(from), cell, ai, |b| {
                let replies = b.empty_cells();
                find_winning_move(b, None, human, &replies).is_none()
            })
        }),
    }
}

fn calculate_minimax_move(
    board: &mut Board,
    from: Option<usize>,
    ai: Player,
    human: Player,
    candidates: &[usize],
    max_depth: usize,
) -> Option<usize> {
    let mut best_move = None;
    let mut best_score = i32::MIN;

    for &cell in candidates {
        let score = simulate(board, from, cell, ai, |b| {
            minimax(b, 0, max_depth, false, ai, human, i32::MIN, i32::MAX)
        });

        if score > best_score {
            best_score = score;
            best_move = Some(cell);
        }
    }

    best_move
}

fn minimax(
    board: &mut Board,
    depth: usize,
    max_depth: usize,
    is_maximizing: bool,
    ai: Player,
    human: Player,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    if let Some(winner) = check_win(board) {
        return if winner == ai {
            WIN_SCORE - depth as i32
        } else {
            -WIN_SCORE + depth as i32
        };
    }

    if depth >= max_depth {
        return 0;
    }

    let moves = board.empty_cells();
    if moves.is_empty() {
        return 0;
    }

    if is_maximizing {
        let mut max_eval = i32::MIN;
        for cell in moves {
            let eval = simulate(board, None, cell, ai, |b| {
                minimax(b, depth + 1, max_depth, false, ai, human, alpha, beta)
            });

            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        max_eval
    } else {
        let mut min_eval = i32::MAX;
        for cell in moves {
            let eval = simulate(board, None, cell, human, |b| {
                minimax(b, depth + 1, max_depth, true, ai, human, alpha, beta)
            });

            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        min_eval
    }
}

fn calculate_heuristic_move(
    board: &Board,
    phase: GamePhase,
    candidates: &[usize],
    rng: &mut SessionRng,
) -> Option<usize> {
    if phase == GamePhase::Placement {
        if let Some(center) = board.center().filter(|&c| board.is_empty_cell(c)) {
            return Some(center);
        }

        let corners: Vec<usize> = board
            .corners()
            .into_iter()
            .filter(|&c| board.is_empty_cell(c))
            .collect();
        if let Some(corner) = rng.choose(&corners) {
            return Some(corner);
        }
    }

    rng.choose(candidates)
}
