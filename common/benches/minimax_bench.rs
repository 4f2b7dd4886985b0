use criterion::{Criterion, SamplingMode, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use common::games::SessionRng;
use common::games::tictactoe::{BotInput, GamePhase, GameSettings, GameState, Player, select_move};

fn bot_self_play(grid_size: usize, plies: usize) {
    let mut rng = SessionRng::new(42);
    let mut state = GameState::new(&GameSettings::multiplayer(grid_size), &mut rng);

    for _ in 0..plies {
        if state.winner.is_some() {
            break;
        }
        let Ok(cell) = select_move(&BotInput::from_game_state(&state), &mut rng) else {
            break;
        };
        match state.transition_ai(cell) {
            Ok(next) => state = next,
            Err(_) => break,
        }
    }
    black_box(state);
}

fn bench_first_move_3x3() {
    let mut rng = SessionRng::new(42);
    let mut state = GameState::new(&GameSettings::multiplayer(3), &mut rng);
    state.current_player = Player::X;
    black_box(select_move(&BotInput::from_game_state(&state), &mut rng).ok());
}

fn bench_movement_phase_4x4() {
    let mut rng = SessionRng::new(7);
    let mut state = GameState::new(&GameSettings::multiplayer(4), &mut rng);
    while state.game_phase == GamePhase::Placement && state.winner.is_none() {
        let Some(next) = state
            .board
            .empty_cells()
            .into_iter()
            .filter_map(|cell| state.transition_ai(cell).ok())
            .find(|next| next.winner.is_none())
        else {
            return;
        };
        state = next;
    }
    black_box(select_move(&BotInput::from_game_state(&state), &mut rng).ok());
}

fn minimax_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");

    group
        .sampling_mode(SamplingMode::Flat)
        .sample_size(10)
        .measurement_time(Duration::from_secs(30));

    group.bench_function("first_move_3x3", |b| b.iter(bench_first_move_3x3));

    group.bench_function("self_play_3x3_20_plies", |b| {
        b.iter(|| bot_self_play(3, 20))
    });

    group.bench_function("self_play_4x4_30_plies", |b| {
        b.iter(|| bot_self_play(4, 30))
    });

    group.bench_function("movement_phase_4x4", |b| b.iter(bench_movement_phase_4x4));

    group.finish();
}

criterion_group!(benches, minimax_bench);
criterion_main!(benches);
