use criterion::{black_box, criterion_group, criterion_main, Criterion};
use emoji_guess::core::{GameSnapshot, GameState, PuzzleQueue};
use emoji_guess::term::{FrameBuffer, GameView, Viewport};
use emoji_guess::types::{PuzzleRecord, FRAME_MS};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::with_fallback(12345);
    state.start();

    c.bench_function("game_tick_50ms", |b| {
        b.iter(|| {
            if state.game_over() {
                state.start();
            }
            state.tick(black_box(FRAME_MS));
        })
    });
}

fn bench_queue_next(c: &mut Criterion) {
    let records: Vec<PuzzleRecord> = (0..200)
        .map(|i| PuzzleRecord::new("🧩", format!("answer{i}"), "hint"))
        .collect();
    let mut queue = PuzzleQueue::from_records(records, 12345).unwrap();

    c.bench_function("queue_next_200", |b| {
        b.iter(|| {
            black_box(queue.next());
        })
    });
}

fn bench_submit_guess(c: &mut Criterion) {
    let mut state = GameState::with_fallback(12345);
    state.start();

    c.bench_function("submit_wrong_guess", |b| {
        b.iter(|| {
            if !state.is_running() || state.attempts_used() == 2 {
                state.start();
            }
            state.submit_guess(black_box("  Not It  "));
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut state = GameState::with_fallback(12345);
    state.start();
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("render_80x24", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            view.render_into(&snap, black_box("guess"), Viewport::new(80, 24), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_queue_next,
    bench_submit_guess,
    bench_render
);
criterion_main!(benches);
