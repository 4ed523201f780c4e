use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec2;
use linear_referencing::geometry::{locate_point, offset_curve, trajectory_interpolate_m};
use linear_referencing::Polyline;
use std::hint::black_box;

/// Zickzack-Trajektorie mit `vertex_count` Stützpunkten und M = N.
fn build_trajectory(vertex_count: usize) -> Polyline {
    let mut m = 0.0;
    let mut previous: Option<(f64, f64)> = None;
    let coords: Vec<(f64, f64, f64)> = (0..vertex_count)
        .map(|i| {
            let x = i as f64 * 2.0;
            let y = if i % 2 == 0 { 0.0 } else { 1.5 };
            if let Some((px, py)) = previous {
                m += ((x - px).powi(2) + (y - py).powi(2)).sqrt();
            }
            previous = Some((x, y));
            (x, y, m)
        })
        .collect();

    Polyline::from_xym(&coords).expect("Trajektorie sollte gültig sein")
}

fn bench_trajectory_interpolate_m(c: &mut Criterion) {
    let mut group = c.benchmark_group("trajectory_interpolate_m");

    for &vertex_count in &[10_000usize, 100_000] {
        let line = build_trajectory(vertex_count);
        let m_last = line.last_vertex().and_then(|v| v.m).unwrap_or(0.0);
        let queries: Vec<f64> = (0..64).map(|i| m_last * (i as f64 + 0.5) / 64.0).collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(vertex_count),
            &queries,
            |b, queries| {
                b.iter(|| {
                    for &m in queries {
                        let vertex = trajectory_interpolate_m(&line, black_box(m))
                            .expect("Interpolation sollte gelingen");
                        black_box(vertex);
                    }
                })
            },
        );
    }

    group.finish();
}

fn bench_locate_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate_point");

    for &vertex_count in &[10_000usize, 100_000] {
        let line = build_trajectory(vertex_count);
        let width = vertex_count as f64 * 2.0;
        let queries: Vec<DVec2> = (0..64)
            .map(|i| DVec2::new(width * (i as f64 + 0.37) / 64.0, 3.0))
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(vertex_count),
            &queries,
            |b, queries| {
                b.iter(|| {
                    for &q in queries {
                        black_box(locate_point(&line, black_box(q)));
                    }
                })
            },
        );
    }

    group.finish();
}

fn bench_offset_curve(c: &mut Criterion) {
    let mut group = c.benchmark_group("offset_curve");

    for &vertex_count in &[10_000usize, 50_000] {
        let line = build_trajectory(vertex_count);

        group.bench_with_input(
            BenchmarkId::from_parameter(vertex_count),
            &line,
            |b, line| {
                b.iter(|| {
                    let offset = offset_curve(line, black_box(0.25))
                        .expect("Versatz sollte gelingen");
                    black_box(offset.vertex_count())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    core_benches,
    bench_trajectory_interpolate_m,
    bench_locate_point,
    bench_offset_curve
);
criterion_main!(core_benches);
