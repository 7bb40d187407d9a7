//! Criterion benchmarks for the incremental planar projection.
//! Focus sizes: m in {6, 12, 24, 48} halfspaces.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use polyproj::prelude::*;
use polyproj::sample::{draw_polytope_radial, JitterCfg, ReplayToken};

fn bench_project(c: &mut Criterion) {
    let mut group = c.benchmark_group("project");
    for &m in &[6usize, 12, 24, 48] {
        group.bench_with_input(BenchmarkId::new("identity_2d", m), &m, |b, &m| {
            b.iter_batched(
                || {
                    draw_polytope_radial(
                        JitterCfg {
                            halfspaces: m,
                            ..Default::default()
                        },
                        ReplayToken {
                            seed: 43,
                            index: m as u64,
                        },
                    )
                },
                |poly| {
                    let map = ProjectionMap2::coordinate_plane(2);
                    let _res = project(&poly, &map, &ProjectionCfg::default());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_project);
criterion_main!(benches);
