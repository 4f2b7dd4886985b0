mod input;
mod match_runner;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use common::SessionRng;
use common::config::{ConfigManager, GameConfig, Validate};
use common::logger;
use common::tictactoe::{GameMode, Player, TicTacToeSession};
use tracing::info;

use input::{BotMoveInput, StdinMoveInput};
use match_runner::{GameResult, play_game};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Singleplayer,
    Multiplayer,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Singleplayer => GameMode::Singleplayer,
            ModeArg::Multiplayer => GameMode::Multiplayer,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PlayerArg {
    X,
    O,
}

impl From<PlayerArg> for Player {
    fn from(player: PlayerArg) -> Self {
        match player {
            PlayerArg::X => Player::X,
            PlayerArg::O => Player::O,
        }
    }
}

#[derive(Parser)]
#[command(name = "tiebreaker")]
struct Args {
    #[arg(long, default_value = "tiebreaker.yaml")]
    config: PathBuf,

    #[arg(long)]
    grid_size: Option<usize>,

    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Seat taken from stdin in single-player games.
    #[arg(long, value_enum)]
    human: Option<PlayerArg>,

    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Let the bot play the human seats as well.
    #[arg(long)]
    autoplay: bool,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Write the effective config back to `--config`.
    #[arg(long)]
    save_config: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut GameConfig) {
        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(mode) = self.mode {
            config.game_mode = mode.into();
        }
        if let Some(human) = self.human {
            config.human_player = human.into();
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.autoplay {
            config.ai_delay_ms = 0;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Tiebreaker".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager = ConfigManager::<_, GameConfig>::from_yaml_file(&args.config);
    let mut config = config_manager.get_config()?;
    args.apply_overrides(&mut config);
    config.validate()?;

    if args.save_config {
        config_manager.set_config(&config)?;
        info!(path = %args.config.display(), "Config saved");
    }

    let seed = config.seed.unwrap_or_else(|| SessionRng::from_random().seed());
    let mut session = TicTacToeSession::new(config.game_settings(), seed, config.ai_delay())?;

    for game in 1..=args.games {
        info!(game, first = %session.state().current_player, "Starting game");

        let result = if args.autoplay {
            let mut input = BotMoveInput::new(seed.wrapping_add(u64::from(game)));
            play_game(&mut session, &mut input, config.max_turns).await?
        } else {
            let mut input = StdinMoveInput::new();
            play_game(&mut session, &mut input, config.max_turns).await?
        };

        println!("{}", session.state().board);
        match result {
            GameResult::Won(winner) => println!("{winner} wins"),
            GameResult::Draw { turns } => println!("Draw after {turns} turns"),
            GameResult::Aborted => {
                info!(game, "Game aborted");
                break;
            }
        }

        let scores = session.scores();
        info!(x = scores.x, o = scores.o, "Scores");
        println!("Score  X: {}  O: {}", scores.x, scores.o);

        if game < args.games {
            session.new_game();
        }
    }

    Ok(())
}
