use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use gamehub_core::{Direction, SnakeEvent, SnakeGame, StateMachine};
use std::hint::black_box;

fn long_snake() -> SnakeGame {
    let tail: Vec<_> = (0..10).rev().map(|x| (x, 10)).collect();
    SnakeGame::with_layout(1, (10, 10), &tail, Direction::Right, (0, 0))
}

fn snake_tick(c: &mut Criterion) {
    c.bench_function("snake_tick_move", |b| {
        b.iter_batched(
            long_snake,
            |mut game| black_box(game.tick()),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("snake_tick_eat", |b| {
        b.iter_batched(
            || SnakeGame::with_layout(1, (10, 10), &[], Direction::Right, (11, 10)),
            |game| black_box(game.transition(SnakeEvent::Tick(Default::default()))),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("snake_grid", |b| {
        let game = long_snake();
        b.iter(|| black_box(game.grid()))
    });
}

criterion_group!(benches, snake_tick);
criterion_main!(benches);
