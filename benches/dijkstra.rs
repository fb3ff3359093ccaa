use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use path_engine::graph::generators::{generate_grid, generate_random};
use path_engine::graph::NodeId;
use path_engine::{compute_distances, path_edges};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_random_graphs(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_distances/random");
    let mut rng = StdRng::seed_from_u64(7);

    for &size in &[1_000usize, 10_000] {
        let graph = generate_random(&mut rng, size, 4.0, 100.0);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| compute_distances(black_box(graph), NodeId(0)))
        });
    }

    group.finish();
}

fn bench_grid_path(c: &mut Criterion) {
    let graph = generate_grid(100, 100);
    let end = NodeId(100 * 100 - 1);

    c.bench_function("grid 100x100 distances + path", |b| {
        b.iter(|| {
            let records = compute_distances(black_box(&graph), NodeId(0)).expect("valid start");
            path_edges(&records, end).expect("known end")
        })
    });
}

criterion_group!(benches, bench_random_graphs, bench_grid_path);
criterion_main!(benches);
