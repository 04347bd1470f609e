#![allow(missing_docs)]
//! Benchmarks for wire propagation.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;

use redwire_core::{Level, NoopListener, VoxelStore};
use redwire_registry::TileRegistry;
use redwire_registry::tile_ids::{REDSTONE_TORCH_ON, REDSTONE_WIRE, STONE};
use redwire_utils::{BlockPos, UpdateFlags};

/// Builds `rows` parallel wire runs of `len` cells, each fed by its own torch
/// at `x = 0`. Rows are two cells apart so they stay separate networks.
fn wired_level(len: i32, rows: i32) -> Level<NoopListener> {
    let mut level = Level::with_listener(
        VoxelStore::new(128, 128),
        Arc::new(TileRegistry::vanilla()),
        NoopListener,
    );
    for row in 0..rows {
        let z = row * 2;
        for x in 0..=len {
            level.set_block(BlockPos::new(x, 0, z), STONE, 0, UpdateFlags::empty());
        }
        level.place(BlockPos::new(0, 1, z), REDSTONE_TORCH_ON, 5);
        for x in 1..=len {
            level.place(BlockPos::new(x, 1, z), REDSTONE_WIRE, 0);
        }
    }
    level
}

fn bench_toggle_source(c: &mut Criterion) {
    let mut group = c.benchmark_group("wire_toggle_source");

    for len in [15, 64, 120] {
        group.bench_with_input(BenchmarkId::new("run", len), &len, |b, &len| {
            let mut level = wired_level(len, 1);
            let torch = BlockPos::new(0, 1, 0);
            b.iter(|| {
                level.remove(black_box(torch));
                level.place(black_box(torch), REDSTONE_TORCH_ON, 5);
                black_box(level.get_meta(BlockPos::new(1, 1, 0)));
            });
        });
    }

    group.finish();
}

fn bench_full_pass(c: &mut Criterion) {
    let mut level = wired_level(64, 32);
    c.bench_function("wire_pass_settled_rows", |b| {
        b.iter(|| {
            for row in 0..32 {
                level.wire_propagation_start(black_box(BlockPos::new(32, 1, row * 2)));
            }
        });
    });
}

criterion_group!(benches, bench_toggle_source, bench_full_pass);
criterion_main!(benches);
