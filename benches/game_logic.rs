use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wahoo::core::{cell_rect, Board, BoardSnapshot, GameConfig, GameLoop, SimpleRng, Size};
use wahoo::types::{Color, GameCommand};

fn bench_tick(c: &mut Criterion) {
    let mut game = GameLoop::new(GameConfig::default(), SimpleRng::new(12345), (), ()).unwrap();
    game.new_game();

    c.bench_function("game_tick", |b| {
        b.iter(|| {
            if !game.tick().keep_scheduling {
                game.new_game();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new(20, 10, SimpleRng::new(1));
            // Fill bottom 4 rows
            for row in 16..20 {
                for col in 0..10 {
                    board.fill_cell(row, col, Color::Purple);
                }
            }
            black_box(board.check_fills(16, 4));
        })
    });
}

fn bench_piece_spawn(c: &mut Criterion) {
    let mut board = Board::new(20, 10, SimpleRng::new(12345));

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            black_box(board.random_shape());
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut game = GameLoop::new(GameConfig::default(), SimpleRng::new(12345), (), ()).unwrap();
    game.new_game();

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            game.apply_command(GameCommand::Left);
            game.apply_command(GameCommand::Right);
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut game = GameLoop::new(GameConfig::default(), SimpleRng::new(12345), (), ()).unwrap();
    game.new_game();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            game.apply_command(GameCommand::RotateRight);
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut board = Board::new(20, 10, SimpleRng::new(12345));
    board.reset();
    let mut snapshot = BoardSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            board.snapshot_into(&mut snapshot);
            black_box(&snapshot);
        })
    });
}

fn bench_layout(c: &mut Criterion) {
    let size = Size::new(1080, 1920);

    c.bench_function("cell_rect_full_board", |b| {
        b.iter(|| {
            for row in 0..20 {
                for col in 0..10 {
                    black_box(cell_rect(black_box(size), 20, 10, 2, row, col));
                }
            }
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_piece_spawn,
    bench_move,
    bench_rotate,
    bench_snapshot,
    bench_layout
);
criterion_main!(benches);
