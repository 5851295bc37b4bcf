//! Benchmarks for span snapping.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use masonry_layout::span::snap_span;
use masonry_layout::{GridMetrics, compute_span_from_width, compute_width_for_span};

fn bench_snap(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap_span");
    for columns in [3u32, 6, 12] {
        let Some(metrics) = GridMetrics::from_grid(1920.0, columns, 16.0) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(columns), &metrics, |b, m| {
            b.iter(|| {
                let mut total = 0u32;
                let mut width = 0.0f32;
                while width < 2000.0 {
                    total += snap_span(black_box(width), m, m.column_count);
                    width += 7.5;
                }
                total
            });
        });
    }
    group.finish();
}

fn bench_snap_and_width(c: &mut Criterion) {
    let Some(metrics) = GridMetrics::from_grid(940.0, 3, 20.0) else {
        return;
    };
    c.bench_function("snap_then_width", |b| {
        b.iter(|| {
            let span = compute_span_from_width(black_box(650.0), &metrics);
            compute_width_for_span(span, &metrics)
        });
    });
}

criterion_group!(benches, bench_snap, bench_snap_and_width);
criterion_main!(benches);
