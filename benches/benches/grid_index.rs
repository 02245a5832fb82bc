// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tessera_index::{Aabb2D, ExtentPolicy, GridIndex};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Boxes scattered over a square world, sized like typical sketch elements.
fn gen_scattered(count: usize, world: f64) -> Vec<(u32, Aabb2D<f64>)> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|i| {
            let x0 = rng.next_f64() * world;
            let y0 = rng.next_f64() * world;
            let w = 20.0 + rng.next_f64() * 300.0;
            let h = 20.0 + rng.next_f64() * 300.0;
            (i as u32, Aabb2D::from_xywh(x0, y0, w, h))
        })
        .collect()
}

/// A few long strokes that span many cells each, mixed with small boxes.
fn gen_with_long_strokes(count: usize, world: f64) -> Vec<(u32, Aabb2D<f64>)> {
    let mut out = gen_scattered(count, world);
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    for i in 0..count / 50 {
        let x0 = rng.next_f64() * world;
        let y0 = rng.next_f64() * world;
        out.push((
            (count + i) as u32,
            Aabb2D::from_xywh(x0, y0, world / 4.0, 40.0),
        ));
    }
    out
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_rebuild");
    for &n in &[1_000usize, 10_000] {
        let items = gen_scattered(n, 20_000.0);
        group.throughput(Throughput::Elements(n as u64));
        for &cell in &[250.0, 500.0, 1000.0] {
            group.bench_function(format!("scattered_n{n}_cell{cell}"), |b| {
                b.iter_batched(
                    || GridIndex::<u32>::new(cell, ExtentPolicy::Normalized),
                    |mut idx| {
                        idx.rebuild(items.iter());
                        black_box(idx.cell_count());
                    },
                    BatchSize::SmallInput,
                )
            });
        }
    }
    let items = gen_with_long_strokes(10_000, 20_000.0);
    group.bench_function("long_strokes_n10000_cell500", |b| {
        b.iter_batched(
            GridIndex::<u32>::default,
            |mut idx| {
                idx.rebuild(items.iter());
                black_box(idx.cell_count());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_query");
    let items = gen_scattered(10_000, 20_000.0);
    // One 1920x1080 screen at three zoom levels.
    let views = [
        ("zoom1", Aabb2D::from_xywh(5_000.0, 5_000.0, 1920.0, 1080.0)),
        ("zoom0.5", Aabb2D::from_xywh(5_000.0, 5_000.0, 3840.0, 2160.0)),
        ("zoom0.1", Aabb2D::from_xywh(0.0, 0.0, 19_200.0, 10_800.0)),
    ];
    for &cell in &[250.0, 500.0, 1000.0] {
        let mut idx = GridIndex::<u32>::new(cell, ExtentPolicy::Normalized);
        idx.rebuild(items.iter());
        for (name, view) in views {
            group.bench_function(format!("{name}_cell{cell}"), |b| {
                b.iter(|| black_box(idx.query(black_box(view)).len()));
            });
        }
    }
    // Small probe, like a hit-test margin box.
    let mut idx = GridIndex::<u32>::default();
    idx.rebuild(items.iter());
    group.bench_function("probe_10x10_cell500", |b| {
        b.iter(|| black_box(idx.query(Aabb2D::from_xywh(7_000.0, 7_000.0, 10.0, 10.0)).len()));
    });
    group.finish();
}

criterion_group!(benches, bench_rebuild, bench_query);
criterion_main!(benches);
