//! Per-frame cost of the motion engine across clips.
//!
//! Run with: `cargo bench -p gravpose-animation-core`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gravpose_animation_core::{ClipType, Config, MotionEngine};

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("pose_step");

    for clip in ClipType::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(clip), &clip, |b, &clip| {
            let mut eng = MotionEngine::new(Config {
                record_events: false,
                ..Config::default()
            });
            eng.start_clip(clip, None, true);
            b.iter(|| black_box(eng.update(black_box(16.0))));
        });
    }

    group.finish();
}

fn bench_gravity_sweep(c: &mut Criterion) {
    c.bench_function("flip_durations_over_gravity", |b| {
        let cfg = Config::default();
        b.iter(|| {
            let mut total = 0.0f32;
            for i in 1..=300 {
                total += ClipType::FrontFlip.resolve_duration(None, i as f32 * 0.1, &cfg);
            }
            black_box(total)
        });
    });
}

criterion_group!(benches, bench_update, bench_gravity_sweep);
criterion_main!(benches);
