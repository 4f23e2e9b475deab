use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sunlit_core::*;

fn deal(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(0x5EED);
    c.bench_function("deal_shuffled_board", |b| {
        b.iter(|| black_box(Board::shuffled(&mut rng)))
    });
}

/// Plays rows left to right in groups of three until the game ends or no card is selectable.
fn play_out(engine: &mut TurnEngine) -> Score {
    let mut cursor = 0;
    while !engine.phase().is_finished() && cursor < TILE_COUNT * 4 {
        let index = cursor % TILE_COUNT;
        cursor += 1;

        let Ok(SelectOutcome::TurnComplete(mut step)) = engine.select(index) else {
            continue;
        };
        while let AdvanceOutcome::Announced(next) = engine.advance(step) {
            step = next;
        }
    }
    engine.score()
}

fn scripted_game(c: &mut Criterion) {
    let config = GameConfig::default().with_delays(0, 0);
    c.bench_function("scripted_game", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            let mut engine = TurnEngine::new(config, seed);
            black_box(play_out(&mut engine))
        })
    });
}

criterion_group!(benches, deal, scripted_game);
criterion_main!(benches);
