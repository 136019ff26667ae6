use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use slide_2048::engine::{self, GameState, Grid, Move};
use slide_2048::session::Session;
use std::hint::black_box;

fn corpus() -> Vec<Grid> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut grids = vec![Grid::EMPTY];
    let mut game = GameState::new(&mut rng);
    grids.push(*game.grid());
    // Derive a variety of densities deterministically
    for i in 0..60 {
        if game.shift(Move::ALL[i % 4]).changed {
            game.spawn_random(&mut rng);
        }
        grids.push(*game.grid());
    }
    grids
}

fn bench_shift(c: &mut Criterion) {
    let grids = corpus();
    for dir in Move::ALL {
        c.bench_function(&format!("shift/{dir}"), |bch| {
            bch.iter(|| {
                let mut merges = 0usize;
                for g in &grids {
                    merges += engine::shift(black_box(g), dir).1.merged.len();
                }
                black_box(merges)
            })
        });
    }
}

fn bench_can_move(c: &mut Criterion) {
    let grids = corpus();
    c.bench_function("can_move", |bch| {
        bch.iter(|| grids.iter().filter(|g| engine::can_move(black_box(g))).count())
    });
}

fn bench_spawn(c: &mut Criterion) {
    c.bench_function("spawn_random/empty", |bch| {
        let mut rng = StdRng::seed_from_u64(7);
        bch.iter_batched(
            || GameState::from_parts(Grid::EMPTY, 0),
            |mut game| black_box(game.spawn_random(&mut rng)),
            BatchSize::SmallInput,
        )
    });
}

fn bench_full_game(c: &mut Criterion) {
    c.bench_function("session/full_game", |bch| {
        let mut seed = 0u64;
        bch.iter(|| {
            seed += 1;
            let mut session = Session::from_seed(seed);
            while !session.is_over() {
                for dir in Move::ALL {
                    session.play(dir);
                }
            }
            black_box(session.score())
        })
    });
}

criterion_group!(benches, bench_shift, bench_can_move, bench_spawn, bench_full_game);
criterion_main!(benches);
