use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::error;

use common::SessionRng;
use common::tictactoe::{BotInput, GamePhase, GameState, MoveError, select_move};

/// Source of moves for the seats the session does not play itself.
/// `Ok(None)` means the seat gave up.
pub trait MoveInput {
    async fn next_cell(&mut self, state: &GameState) -> Result<Option<usize>, MoveError>;

    fn rejected(&mut self, _cell: usize, _error: &MoveError) {}
}

/// Plays the human seats with the same selector the AI uses.
pub struct BotMoveInput {
    rng: SessionRng,
}

impl BotMoveInput {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SessionRng::new(seed),
        }
    }
}

impl MoveInput for BotMoveInput {
    async fn next_cell(&mut self, state: &GameState) -> Result<Option<usize>, MoveError> {
        select_move(&BotInput::from_game_state(state), &mut self.rng)
            .map(Some)
            .inspect_err(|e| error!(player = %state.current_player, error = %e, "Bot seat could not move"))
    }
}

pub struct StdinMoveInput {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinMoveInput {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinMoveInput {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveInput for StdinMoveInput {
    async fn next_cell(&mut self, state: &GameState) -> Result<Option<usize>, MoveError> {
        println!("{}", state.board);
        let player = state.current_player;
        match (state.game_phase, state.due_piece_position(player)) {
            (GamePhase::Movement, Some(from)) => println!(
                "{player}: move piece #{} from cell {from} to an empty cell (q to quit)",
                state.next_move_number()
            ),
            _ => println!(
                "{player}: place piece #{} on an empty cell (q to quit)",
                state.next_move_number()
            ),
        }

        loop {
            let Ok(Some(line)) = self.lines.next_line().await else {
                return Ok(None);
            };
            let line = line.trim();
            if line.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match line.parse::<usize>() {
                Ok(cell) => return Ok(Some(cell)),
                Err(_) => println!("Enter a cell number between 0 and {}", state.board.cell_count() - 1),
            }
        }
    }

    fn rejected(&mut self, cell: usize, error: &MoveError) {
        println!("Cell {cell} not accepted: {error}");
    }
}
