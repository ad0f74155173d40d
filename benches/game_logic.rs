use criterion::{black_box, criterion_group, criterion_main, Criterion};
use naut_tetris::core::{update_blocks, Block, DropBlock, GameState, PieceGenerator};
use naut_tetris::types::{Command, Direction, Matrix, PieceKind, Settings};

fn running_game() -> GameState {
    let mut state = GameState::new(Settings::default(), 12345);
    state.dispatch(Command::Reset);
    state.dispatch(Command::GameTick);
    state
}

fn bench_tick(c: &mut Criterion) {
    c.bench_function("game_tick", |b| {
        b.iter_batched(
            running_game,
            |mut state| {
                for _ in 0..black_box(8) {
                    state.dispatch(Command::GameTick);
                }
                state
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let matrix = Matrix::new(12, 24);
    // Bottom 4 rows full except column 0, closed by an upright I.
    let blocks: Vec<Block> = (20..24)
        .flat_map(|y| (1..12).map(move |x| Block::new(x, y, 3)))
        .collect();
    let piece = DropBlock::new(PieceKind::I, (0, 21).into()).rotate();

    c.bench_function("clear_4_lines", |b| {
        b.iter(|| update_blocks(black_box(&blocks), Some(&piece), matrix))
    });
}

fn bench_generate(c: &mut Criterion) {
    let matrix = Matrix::default();
    let mut generator = PieceGenerator::new(12345);

    c.bench_function("generate_batch", |b| {
        b.iter(|| generator.generate(matrix, true, black_box(6)))
    });
}

fn bench_move(c: &mut Criterion) {
    let mut state = running_game();

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            state.dispatch(Command::Move(Direction::Left));
            state.dispatch(Command::Move(Direction::Right));
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = running_game();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            state.dispatch(Command::Rotate);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_generate,
    bench_move,
    bench_rotate
);
criterion_main!(benches);
