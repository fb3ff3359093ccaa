use crate::graph::{DirectedGraph, Graph, MutableGraph, NodeId};
use ordered_float::OrderedFloat;
use rand::prelude::*;

/// Generates a random directed graph with `n` nodes and roughly
/// `edge_factor * n` edges whose weights are drawn from `1.0..=max_weight`.
pub fn generate_random<R: Rng>(
    rng: &mut R,
    n: usize,
    edge_factor: f64,
    max_weight: f64,
) -> DirectedGraph<OrderedFloat<f64>> {
    assert!(max_weight >= 1.0, "max_weight must be at least 1.0");

    let mut graph = DirectedGraph::with_nodes(n);
    if n < 2 {
        return graph;
    }

    let num_edges = (edge_factor * n as f64) as usize;

    for _ in 0..num_edges {
        let u = NodeId(rng.gen_range(0..n));
        let v = NodeId(rng.gen_range(0..n));
        // Self-loops are not allowed
        if u != v {
            let weight = OrderedFloat(rng.gen_range(1.0..=max_weight));
            graph
                .add_edge(u, v, weight)
                .expect("generated endpoints are valid nodes");
        }
    }

    graph
}

/// Generates a `width * height` grid where every cell links to its four
/// neighbours in both directions with weight 1. Node `y * width + x` is the
/// cell at `(x, y)`.
pub fn generate_grid(width: usize, height: usize) -> DirectedGraph<OrderedFloat<f64>> {
    let mut graph = DirectedGraph::with_nodes(width * height);

    let index = |x: usize, y: usize| NodeId(y * width + x);

    for y in 0..height {
        for x in 0..width {
            let current = index(x, y);
            let mut neighbours = Vec::with_capacity(4);
            if x > 0 {
                neighbours.push(index(x - 1, y));
            }
            if x + 1 < width {
                neighbours.push(index(x + 1, y));
            }
            if y > 0 {
                neighbours.push(index(x, y - 1));
            }
            if y + 1 < height {
                neighbours.push(index(x, y + 1));
            }
            for neighbour in neighbours {
                graph
                    .add_edge(current, neighbour, OrderedFloat(1.0))
                    .expect("grid neighbours are valid nodes");
            }
        }
    }

    debug_assert_eq!(graph.node_count(), width * height);
    graph
}
