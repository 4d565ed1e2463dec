//! Benchmark for reward sampling and inheritance.
//!
//! TARGET: sampling must stay negligible next to the rule lookup itself
//!
//! Run with: cargo bench --package bounty_economy --bench sampling_benchmark

use bounty_economy::{resolve_chain, Range, ResourceKind, Reward};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn benchmark_sample_int(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let ranges = [
        Range::constant(2.5),
        Range::new(0.7, 5.3),
        Range::new(0.2, 0.7),
        Range::new(-10.0, 250.0),
    ];

    let mut group = c.benchmark_group("sample_int");
    group.throughput(Throughput::Elements(ranges.len() as u64));
    group.bench_function("mixed_ranges", |b| {
        b.iter(|| {
            for range in &ranges {
                black_box(range.sample_int(&mut rng));
            }
        });
    });
    group.finish();
}

fn benchmark_inheritance_chain(c: &mut Criterion) {
    let chain: Vec<Reward> = (0..8)
        .map(|depth| {
            Reward::new(format!("layer {depth}"))
                .with_factory(ResourceKind::Experience, f64::from(depth))
                .with_factory(ResourceKind::Custom(format!("token{depth}")), 1.0)
                .with_inherit(depth > 0)
                .with_multiplier(1.5)
        })
        .collect();

    c.bench_function("resolve_chain_depth_8", |b| {
        b.iter(|| black_box(resolve_chain(black_box(&chain))));
    });
}

fn benchmark_draw(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let reward = Reward::new("kill")
        .with_factory(ResourceKind::Experience, Range::new(1.0, 4.5))
        .with_factory(ResourceKind::Currency, 0.25)
        .with_multiplier(2.0);

    c.bench_function("reward_draw", |b| {
        b.iter(|| black_box(reward.draw(&mut rng)));
    });
}

criterion_group!(benches, benchmark_sample_int, benchmark_inheritance_chain, benchmark_draw);
criterion_main!(benches);
