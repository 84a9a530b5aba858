use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hllpp::HyperLogLogPP;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Cardinalities are swept as [1, 2, 4, ..., MAX_CARDINALITY] to cover the
/// sparse representation, the promotion point, and the dense regime.
const MAX_CARDINALITY: usize = 1 << 16;

criterion_group!(benches, benchmark);
criterion_main!(benches);

fn benchmark(c: &mut Criterion) {
    let cardinalities: Vec<usize> = (0..)
        .map(|exp| 1 << exp)
        .take_while(|&n| n <= MAX_CARDINALITY)
        .collect();

    let mut rng = StdRng::seed_from_u64(12345);
    let keys: Vec<u64> = (0..MAX_CARDINALITY).map(|_| rng.gen()).collect();

    let mut group = c.benchmark_group("add");
    for &cardinality in &cardinalities {
        group.throughput(Throughput::Elements(cardinality as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(cardinality),
            &cardinality,
            |b, &cardinality| {
                b.iter(|| {
                    let mut estimator = HyperLogLogPP::new(14).unwrap();
                    for &key in &keys[..cardinality] {
                        estimator.add(black_box(key));
                    }
                    estimator
                });
            },
        );
    }
    group.finish();

    let mut group = c.benchmark_group("cardinality");
    group.throughput(Throughput::Elements(1));
    for &cardinality in &cardinalities {
        let mut estimator = HyperLogLogPP::new(14).unwrap();
        estimator.add_many(&keys[..cardinality]);
        group.bench_with_input(
            BenchmarkId::new("heule", cardinality),
            &estimator,
            |b, estimator| b.iter(|| black_box(estimator.cardinality())),
        );
        group.bench_with_input(
            BenchmarkId::new("ertl", cardinality),
            &estimator,
            |b, estimator| b.iter(|| black_box(estimator.ertl_cardinality())),
        );
    }
    group.finish();

    let mut group = c.benchmark_group("merge");
    group.throughput(Throughput::Elements(1));
    for &cardinality in &cardinalities {
        let mut lhs = HyperLogLogPP::new(14).unwrap();
        let mut rhs = HyperLogLogPP::new(14).unwrap();
        lhs.add_many(&keys[..cardinality / 2]);
        rhs.add_many(&keys[cardinality / 2..cardinality]);
        group.bench_with_input(
            BenchmarkId::from_parameter(cardinality),
            &(lhs, rhs),
            |b, (lhs, rhs)| {
                b.iter(|| {
                    let mut merged = lhs.clone();
                    merged.merge(black_box(rhs)).unwrap();
                    merged
                });
            },
        );
    }
    group.finish();
}
