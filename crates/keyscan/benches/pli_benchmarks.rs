//! Position list index construction and refinement benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use keyscan::{AttributeList, PositionListIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn generate_column(rows: usize, cardinality: u32, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..rows)
        .map(|_| rng.gen_range(0..cardinality).to_string())
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("pli_build");

    for &cardinality in &[10, 1_000, 100_000] {
        let column = generate_column(100_000, cardinality, 7);
        group.throughput(Throughput::Elements(column.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(cardinality),
            &column,
            |b, values| {
                b.iter(|| {
                    PositionListIndex::from_values(
                        AttributeList::single(0),
                        black_box(values.as_slice()),
                    )
                })
            },
        );
    }

    group.finish();
}

fn bench_intersect(c: &mut Criterion) {
    let mut group = c.benchmark_group("pli_intersect");

    for &cardinality in &[10, 100, 1_000] {
        let left = PositionListIndex::from_values(
            AttributeList::single(0),
            generate_column(100_000, cardinality, 1).as_slice(),
        );
        let right = PositionListIndex::from_values(
            AttributeList::single(1),
            generate_column(100_000, cardinality, 2).as_slice(),
        );

        group.throughput(Throughput::Elements(100_000));
        group.bench_function(BenchmarkId::from_parameter(cardinality), |b| {
            b.iter(|| black_box(&left).intersect(black_box(&right)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_intersect);
criterion_main!(benches);
