use tracing::{debug, error, info};

use crate::games::SessionRng;
use super::board::Board;
use super::error::MoveError;
use super::settings::GameSettings;
use super::types::{GameMode, GamePhase, Move, PerPlayer, Player, Scores};
use super::win_detector::check_win;

/// One game instance. Every accepted move produces a fresh value; rejected
/// moves leave the source state untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub grid_size: usize,
    pub current_player: Player,
    pub game_mode: GameMode,
    pub human_player: Player,
    pub game_phase: GamePhase,
    pub moves: Vec<Move>,
    pub winner: Option<Player>,
    pub scores: Scores,
    pub next_piece_to_move: PerPlayer<usize>,
}

impl GameState {
    /// `settings` is expected to have passed [`GameSettings::validate`];
    /// `TicTacToeSession` checks it before building any state.
    pub fn new(settings: &GameSettings, rng: &mut SessionRng) -> Self {
        Self::new_with_scores(settings, Scores::default(), rng)
    }

    /// Fresh board for a new game; score counters are carried over.
    pub fn new_with_scores(settings: &GameSettings, scores: Scores, rng: &mut SessionRng) -> Self {
        let current_player = choose_first_player(settings, rng);

        debug!(
            grid_size = settings.grid_size,
            mode = ?settings.game_mode,
            first = %current_player,
            "New game"
        );

        Self {
            board: Board::new(settings.grid_size),
            grid_size: settings.grid_size,
            current_player,
            game_mode: settings.game_mode,
            human_player: settings.human_player,
            game_phase: GamePhase::Placement,
            moves: Vec::new(),
            winner: None,
            scores,
            next_piece_to_move: PerPlayer::new(1, 1),
        }
    }

    pub fn settings(&self) -> GameSettings {
        GameSettings::new(self.grid_size, self.game_mode, self.human_player)
    }

    pub fn pieces_per_player(&self) -> usize {
        self.grid_size + 1
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn ai_player(&self) -> Option<Player> {
        match self.game_mode {
            GameMode::Singleplayer => Some(self.human_player.opponent()),
            GameMode::Multiplayer => None,
        }
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.is_over() && self.ai_player() == Some(self.current_player)
    }

    pub fn moves_of(&self, player: Player) -> impl Iterator<Item = &Move> {
        self.moves.iter().filter(move |m| m.player == player)
    }

    /// Cell holding the piece `player` has to relocate on their next turn.
    /// Only defined once the movement phase has started.
    pub fn due_piece_position(&self, player: Player) -> Option<usize> {
        if self.game_phase != GamePhase::Movement {
            return None;
        }
        let due = self.next_piece_to_move[player];
        self.moves_of(player)
            .find(|m| m.move_number == due)
            .map(|m| m.position)
    }

    /// Ordinal of the piece the current player acts with next: the one about
    /// to be placed, or the one about to be relocated.
    pub fn next_move_number(&self) -> usize {
        match self.game_phase {
            GamePhase::Placement => self.moves_of(self.current_player).count() + 1,
            GamePhase::Movement => self.next_piece_to_move[self.current_player],
        }
    }

    pub fn reset_scores(&self) -> Self {
        Self {
            scores: Scores::default(),
            ..self.clone()
        }
    }

    /// Entry point for human input. In single-player mode only the human's
    /// own turns are accepted.
    pub fn transition(&self, cell: usize) -> Result<GameState, MoveError> {
        if self.winner.is_some() {
            return Err(MoveError::GameOver);
        }
        if self.game_mode == GameMode::Singleplayer && self.current_player != self.human_player {
            return Err(MoveError::NotYourTurn {
                current: self.current_player,
                human: self.human_player,
            });
        }
        self.apply(cell)
    }

    /// Entry point for a move computed by the AI; skips the human guard.
    pub fn transition_ai(&self, cell: usize) -> Result<GameState, MoveError> {
        self.apply(cell)
    }

    fn apply(&self, cell: usize) -> Result<GameState, MoveError> {
        if self.winner.is_some() {
            return Err(MoveError::GameOver);
        }
        if !self.board.contains(cell) {
            return Err(MoveError::OutOfRange {
                cell,
                cell_count: self.board.cell_count(),
            });
        }
        if self.board.count_empty() == 0 {
            return Err(MoveError::NoLegalMove);
        }

        let mover = self.current_player;
        let mut next = self.clone();

        match self.game_phase {
            GamePhase::Placement => next.place(mover, cell)?,
            GamePhase::Movement => next.relocate(mover, cell)?,
        }

        next.current_player = mover.opponent();

        if let Some(winner) = check_win(&next.board) {
            next.winner = Some(winner);
            next.scores[winner] += 1;
            info!(
                winner = %winner,
                x = next.scores.x,
                o = next.scores.o,
                "Game won"
            );
        }

        Ok(next)
    }

    fn place(&mut self, mover: Player, cell: usize) -> Result<(), MoveError> {
        if !self.board.is_empty_cell(cell) {
            return Err(MoveError::CellOccupied { cell });
        }

        let move_number = self.moves_of(mover).count() + 1;
        self.board.set(cell, Some(mover));
        self.moves.push(Move::new(mover, cell, move_number));
        debug!(player = %mover, cell, move_number, "Placed piece");

        let cap = self.pieces_per_player();
        if self.moves_of(Player::X).count() == cap && self.moves_of(Player::O).count() == cap {
            self.game_phase = GamePhase::Movement;
            info!(pieces_per_player = cap, "Entering movement phase");
        }
        Ok(())
    }

    fn relocate(&mut self, mover: Player, cell: usize) -> Result<(), MoveError> {
        let due = self.next_piece_to_move[mover];
        let Some(slot) = self
            .moves
            .iter()
            .position(|m| m.player == mover && m.move_number == due)
        else {
            error!(player = %mover, move_number = due, "Due piece missing from move history");
            return Err(MoveError::InconsistentMoveHistory {
                player: mover,
                move_number: due,
            });
        };

        if !self.board.is_empty_cell(cell) {
            return Err(MoveError::CellOccupied { cell });
        }

        let from = self.moves[slot].position;
        self.board.set(from, None);
        self.board.set(cell, Some(mover));
        self.moves[slot].position = cell;
        self.next_piece_to_move[mover] = (due % self.pieces_per_player()) + 1;
        debug!(player = %mover, from, to = cell, move_number = due, "Moved piece");
        Ok(())
    }
}

/// A human playing O lets the AI's X open; everything else is a coin flip.
fn choose_first_player(settings: &GameSettings, rng: &mut SessionRng) -> Player {
    match (settings.game_mode, settings.human_player) {
        (GameMode::Singleplayer, Player::O) => Player::X,
        _ => {
            if rng.random_bool() {
                Player::X
            } else {
                Player::O
            }
        }
    }
}
