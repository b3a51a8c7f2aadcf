//! Search and move generation benchmarks.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_tafl::board::Board;
use rust_tafl::mcts::{MCTSConfig, TreeSearch};
use rust_tafl::nn::{Oracle, UniformOracle};

// =============================================================================
// Board Benchmarks
// =============================================================================

fn bench_legal_moves(c: &mut Criterion) {
    let board = Board::new();

    c.bench_function("legal_actions_opening", |b| b.iter(|| black_box(board.legal_actions())));
    c.bench_function("valid_action_mask_opening", |b| {
        b.iter(|| black_box(board.valid_action_mask()))
    });
    c.bench_function("check_for_winner_opening", |b| {
        b.iter(|| black_box(board.check_for_winner()))
    });
}

fn bench_clone_and_move(c: &mut Criterion) {
    let board = Board::new();
    let action = board.legal_actions()[0];

    c.bench_function("clone_apply_action", |b| {
        b.iter(|| {
            let mut next = board.clone();
            black_box(next.apply_action(action))
        })
    });
}

// =============================================================================
// Search Benchmarks
// =============================================================================

fn bench_search_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_iterations");
    group.sample_size(10);
    let board = Board::new();

    for iterations in [50u32, 200] {
        group.throughput(Throughput::Elements(u64::from(iterations)));
        group.bench_with_input(BenchmarkId::new("uniform", iterations), &iterations, |b, &n| {
            let mut search = TreeSearch::new(MCTSConfig::default());
            b.iter(|| black_box(search.run(&board, n, None).map(|tree| tree.len())))
        });
    }

    group.bench_function("oracle_200", |b| {
        let oracle = UniformOracle::new(board.action_size());
        let mut search = TreeSearch::new(MCTSConfig::default());
        b.iter(|| {
            black_box(
                search
                    .run(&board, 200, Some(&oracle as &dyn Oracle))
                    .map(|tree| tree.len()),
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_legal_moves, bench_clone_and_move, bench_search_iterations);
criterion_main!(benches);
