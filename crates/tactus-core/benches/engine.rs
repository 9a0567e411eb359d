//! Benchmarks for the per-event recognition path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tactus_core::{ElementId, GestureConfig, GestureEngine, GestureType, MotionInput, Point, PointerId, Target};

const ELEMENT: ElementId = ElementId(1);

fn engine() -> GestureEngine {
    let mut engine = GestureEngine::new();
    engine
        .bind(ELEMENT, GestureConfig::default())
        .expect("valid config");
    for gesture in GestureType::ALL {
        engine.subscribe(ELEMENT, gesture, "bench");
    }
    engine
}

fn sample(pointer: PointerId, x: f32, t: u64) -> MotionInput {
    MotionInput::new(pointer, Target::generic(ELEMENT), Point::new(x, 0.0), t)
}

fn bench_tap(c: &mut Criterion) {
    let mut engine = engine();
    let finger = PointerId::Touch(0);

    c.bench_function("engine_tap", |b| {
        b.iter(|| {
            engine.on_start(ELEMENT, black_box(&sample(finger, 0.0, 0)));
            engine.on_end(black_box(&sample(finger, 0.0, 100)))
        })
    });
}

fn bench_swipe_move(c: &mut Criterion) {
    let mut engine = engine();
    let finger = PointerId::Touch(0);

    c.bench_function("engine_swipe_moves", |b| {
        b.iter(|| {
            engine.on_start(ELEMENT, &sample(finger, 0.0, 0));
            for step in 1..=10u64 {
                black_box(engine.on_move(&sample(finger, step as f32 * 10.0, step * 16)));
            }
            engine.on_end(&sample(finger, 100.0, 200))
        })
    });
}

fn bench_pinch_move(c: &mut Criterion) {
    let mut engine = engine();
    let a = PointerId::Touch(0);
    let b = PointerId::Touch(1);
    engine.on_start(ELEMENT, &sample(a, 0.0, 0));
    engine.on_start(ELEMENT, &sample(b, 100.0, 0));
    let mut x = 100.0;

    c.bench_function("engine_pinch_move", |bench| {
        bench.iter(|| {
            x += 1.0;
            engine.on_move(black_box(&sample(b, x, 16)))
        })
    });
}

criterion_group!(benches, bench_tap, bench_swipe_move, bench_pinch_move);
criterion_main!(benches);
