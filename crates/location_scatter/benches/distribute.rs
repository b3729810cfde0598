mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use location_scatter::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn basic_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("distribute/basic");

    for &n in &[16usize, 256, 4096] {
        let parent = common::make_composite("bench", 8, n, n / 4);
        let store = SnapshotStore::capture(&Catalog::new(vec![parent.clone()]).unwrap());
        group.throughput(common::elements_throughput(n + n / 4));

        group.bench_with_input(BenchmarkId::new("seeded", n), &n, |b, _| {
            b.iter(|| {
                let layout = distribute(&parent, &store, Some("player123_visit1"));
                black_box(layout);
            });
        });

        group.bench_with_input(BenchmarkId::new("std_rng", n), &n, |b, _| {
            let mut rng = AmbientRandom::new(StdRng::seed_from_u64(0xC0FFEE));
            b.iter(|| {
                let result = distribute_with_events(&parent, &store, &mut rng, &mut ());
                black_box(result);
            });
        });
    }

    group.finish();
}

fn advanced_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("distribute/advanced");

    for &n in &[16usize, 256, 4096] {
        let parent = common::make_composite("bench", 8, n, n / 4);
        let store = SnapshotStore::capture(&Catalog::new(vec![parent.clone()]).unwrap());
        group.throughput(common::elements_throughput(n + n / 4));

        let roomy = AdvancedOptions::new()
            .with_seed("roomy")
            .with_guaranteed_distribution(true);
        group.bench_with_input(BenchmarkId::new("unbounded", n), &n, |b, _| {
            b.iter(|| black_box(distribute_advanced(&parent, &store, &roomy)));
        });

        // Capacity far below the pool: most values burn the full attempt ceiling.
        let tight = AdvancedOptions::new()
            .with_seed("tight")
            .with_max_items_per_sublocation(2)
            .with_max_entities_per_sublocation(1);
        group.bench_with_input(BenchmarkId::new("tight_capacity", n), &n, |b, _| {
            b.iter(|| black_box(distribute_advanced(&parent, &store, &tight)));
        });
    }

    group.finish();
}

fn seeded_random_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("random/seeded");
    let draws = 4096usize;
    group.throughput(common::elements_throughput(draws));
    group.bench_function("pick_index", |b| {
        b.iter(|| {
            let mut rng = SeededRandom::new("player123_visit1");
            let mut acc = 0usize;
            for _ in 0..draws {
                acc = acc.wrapping_add(rng.pick_index(7));
            }
            black_box(acc);
        });
    });
    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = basic_benches, advanced_benches, seeded_random_benches
}
criterion_main!(benches);
