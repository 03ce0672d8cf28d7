//! Per-tick cost of the avoidance controller

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fuzzbot_core::{ControllerConfig, ControllerState};

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tick");
    let mut controller = match ControllerState::new(ControllerConfig::default()) {
        Ok(controller) => controller,
        Err(err) => panic!("default config must build: {err}"),
    };

    let cases = [
        ("open", 40.0, 40.0),
        ("obstacle_left", 500.0, 40.0),
        ("boxed_in", 500.0, 500.0),
        ("gap_fallback", 80.0, 80.0),
    ];

    for (name, left, right) in cases {
        group.bench_with_input(BenchmarkId::new("step", name), &(left, right), |b, &(l, r)| {
            b.iter(|| controller.step(black_box(l), black_box(r)));
        });
    }

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build_controller", |b| {
        b.iter(|| ControllerState::new(black_box(ControllerConfig::default())));
    });
}

criterion_group!(benches, bench_tick, bench_build);
criterion_main!(benches);
