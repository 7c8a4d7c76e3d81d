use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use kd_index::kdtree::{KDTree, KDTreeIndex};
use kd_index::metric::{EuclideanDistance, ManhattanDistance};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstar::{RTree, AABB};

fn generate_points(n: usize) -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|_| [rng.gen_range(-180.0..180.0), rng.gen_range(-90.0..90.0)])
        .collect()
}

fn construct_kdtree(points: &[[f64; 2]]) -> KDTree<[f64; 2]> {
    KDTree::build(points.to_vec()).unwrap()
}

fn construct_rstar(points: &[[f64; 2]]) -> RTree<[f64; 2]> {
    RTree::bulk_load(points.to_vec())
}

pub fn criterion_benchmark(c: &mut Criterion) {
    for size in [1_000, 100_000] {
        let points = generate_points(size);

        let mut group = c.benchmark_group("construction");
        group.bench_with_input(BenchmarkId::new("kdtree", size), &points, |b, points| {
            b.iter(|| construct_kdtree(points))
        });
        group.bench_with_input(BenchmarkId::new("rstar bulk", size), &points, |b, points| {
            b.iter(|| construct_rstar(points))
        });
        group.finish();

        let tree = construct_kdtree(&points);
        let rstar_tree = construct_rstar(&points);
        let query = [12.5, -30.25];

        let mut group = c.benchmark_group("nearest");
        for k in [1, 10, 100] {
            group.bench_with_input(BenchmarkId::new(format!("euclidean k={k}"), size), &k, |b, &k| {
                b.iter(|| tree.nearest(&query, k, &EuclideanDistance).unwrap())
            });
        }
        group.bench_with_input(BenchmarkId::new("manhattan k=10", size), &10, |b, &k| {
            b.iter(|| tree.nearest(&query, k, &ManhattanDistance).unwrap())
        });
        group.finish();

        let r = 5.0;
        let mut group = c.benchmark_group("within radius");
        group.bench_with_input(BenchmarkId::new("kdtree", size), &r, |b, &r| {
            b.iter(|| {
                tree.nearest_within(&query, r, usize::MAX, &EuclideanDistance)
                    .unwrap()
            })
        });
        group.bench_with_input(BenchmarkId::new("rstar envelope", size), &r, |b, &r| {
            b.iter(|| {
                let aabb = AABB::from_corners(
                    [query[0] - r, query[1] - r],
                    [query[0] + r, query[1] + r],
                );
                rstar_tree.locate_in_envelope(&aabb).count()
            })
        });
        group.finish();
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
