use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use denscan::cluster::{Dbscan, Expansion, Metric};
use rand::prelude::*;

/// `n` points scattered around `n / 50` centers in `d` dimensions.
fn blobs(n: usize, d: usize, seed: u64) -> Vec<Vec<f32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let centers: Vec<Vec<f32>> = (0..(n / 50).max(1))
        .map(|_| (0..d).map(|_| rng.random::<f32>() * 20.0).collect())
        .collect();
    (0..n)
        .map(|i| {
            let c = &centers[i % centers.len()];
            c.iter().map(|x| x + rng.random::<f32>() - 0.5).collect()
        })
        .collect()
}

fn bench_dbscan(c: &mut Criterion) {
    let mut group = c.benchmark_group("dbscan");

    for &n in &[250usize, 1000] {
        let data = blobs(n, 8, 42);
        group.bench_with_input(BenchmarkId::new("euclidean_d8", n), &data, |b, data| {
            let model = Dbscan::new(1.0, 4).unwrap();
            b.iter(|| model.fit(black_box(data)).unwrap())
        });
    }

    let data = blobs(1000, 8, 7);
    for metric in [Metric::Manhattan, Metric::Cosine] {
        group.bench_with_input(BenchmarkId::new(metric.name(), 1000), &data, |b, data| {
            let model = Dbscan::new(1.0, 4).unwrap().with_metric(metric);
            b.iter(|| model.fit(black_box(data)).unwrap())
        });
    }

    group.bench_function("core_only_n1000_d8", |b| {
        let model = Dbscan::new(1.0, 4)
            .unwrap()
            .with_expansion(Expansion::CoreOnly);
        b.iter(|| model.fit(black_box(&data)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_dbscan);
criterion_main!(benches);
