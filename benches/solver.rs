//! Benchmarks for the circuit puzzle solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use spaghetti::astar::{find_a_path, SquareKind};
use spaghetti::board::Board;
use spaghetti::geometry::{Pos, BOARD_TILES};
use spaghetti::levels::{level_hints, LevelHints};
use spaghetti::pieces::{LINE2_1, PIECES};
use spaghetti::solver::Solver;

/// Benchmark a complete solve of level 83 with all checks enabled.
fn bench_solve_level_83(c: &mut Criterion) {
    let hints = level_hints(83).unwrap();

    c.bench_function("solve_level_83", |b| {
        b.iter(|| {
            let board = Board::new(black_box(&hints)).unwrap();
            let mut solver = Solver::new(board, true);
            solver.solve()
        })
    });
}

/// Benchmark blitting one side to absolute coordinates.
fn bench_blit_side(c: &mut Criterion) {
    let side = &PIECES[LINE2_1].sides[0];

    c.bench_function("blit_side", |b| {
        b.iter(|| side.blit(black_box(Pos::new(3, 1)), black_box(1)))
    });
}

/// Benchmark one pathfinding call across a lightly occupied board.
fn bench_find_a_path(c: &mut Criterion) {
    let mut board = Board::new(&LevelHints::default()).unwrap();
    board.add_piece(LINE2_1, 1, Pos::new(3, 1), 0).unwrap();
    let target = Pos::new(7, 3);

    c.bench_function("find_a_path", |b| {
        b.iter(|| {
            let mut classification = [SquareKind::NoInfo; BOARD_TILES];
            classification[target.flat().unwrap()] = SquareKind::Target;
            find_a_path(&board, black_box(Pos::new(0, 0)), target, &mut classification)
        })
    });
}

criterion_group!(benches, bench_solve_level_83, bench_blit_side, bench_find_a_path);
criterion_main!(benches);
