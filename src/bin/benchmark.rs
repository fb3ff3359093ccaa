use std::time::{Duration, Instant};
use ordered_float::OrderedFloat;
use path_engine::algorithm::{dijkstra::Dijkstra, ShortestPathAlgorithm};
use path_engine::graph::generators::{generate_grid, generate_random};
use path_engine::graph::{DirectedGraph, Graph, NodeId};
use rand::rngs::StdRng;
use rand::SeedableRng;

// Runs one full computation and reports what it reached
fn benchmark_run(label: &str, graph: &DirectedGraph<OrderedFloat<f64>>, start: NodeId) -> Duration {
    println!("Running Dijkstra on {} ({} nodes, {} edges)...", label, graph.node_count(), graph.edge_count());

    let started = Instant::now();
    let records = match Dijkstra::new().compute_shortest_paths(graph, start) {
        Ok(records) => records,
        Err(err) => {
            eprintln!("  - failed: {}", err);
            return Duration::ZERO;
        }
    };
    let duration = started.elapsed();

    println!(
        "  - {} reachable nodes, {} relaxations, {} stale pops in {:?}",
        records.reachable_count(),
        records.stats.edges_relaxed,
        records.stats.stale_entries,
        duration
    );

    duration
}

fn main() {
    env_logger::init();

    let graph_sizes = [1_000, 10_000, 50_000, 100_000, 200_000];

    // Average number of edges per node
    let edge_factor = 4.0;

    let mut rng = StdRng::seed_from_u64(42);
    let mut results = Vec::new();

    println!("=====================================================");
    println!("Benchmark: lazy-deletion Dijkstra");
    println!("Edge factor: {} edges per node (on average)", edge_factor);
    println!("=====================================================");

    for &size in &graph_sizes {
        let random = generate_random(&mut rng, size, edge_factor, 100.0);
        let random_time = benchmark_run("random graph", &random, NodeId(0));

        let side = (size as f64).sqrt().ceil() as usize;
        let grid = generate_grid(side, side);
        let grid_time = benchmark_run("grid", &grid, NodeId(0));

        results.push((size, random_time, grid_time));
    }

    println!("\n=====================================================");
    println!("Summary of Results");
    println!("=====================================================");
    println!("{:<10} | {:<15} | {:<15}", "Nodes", "Random (ms)", "Grid (ms)");
    println!("-----------------------------------------------------");

    for (size, random_time, grid_time) in &results {
        println!(
            "{:<10} | {:<15.2} | {:<15.2}",
            size,
            random_time.as_secs_f64() * 1000.0,
            grid_time.as_secs_f64() * 1000.0
        );
    }
}
