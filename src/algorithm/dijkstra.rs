use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use log::{debug, trace};
use num_traits::{Float, Zero};

use crate::algorithm::{DistanceRecord, DistanceRecords, SearchStats, ShortestPathAlgorithm};
use crate::data_structures::MinQueue;
use crate::graph::{Graph, NodeId};
use crate::{Error, Result};

/// Dijkstra's algorithm with lazy deletion
///
/// The queue may hold several entries for the same node; only the first one
/// popped counts and the rest are skipped through the visited set.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dijkstra {
    /// Stop as soon as this node is popped
    target: Option<NodeId>,
}

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra { target: None }
    }

    /// Stops the search once `target` is finalized.
    ///
    /// Only the target's record (and those of nodes finalized before it) is
    /// guaranteed to be final in the returned records.
    pub fn with_target(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }

    /// Shortest distance from `start` to `destination`, infinite when there is
    /// no directed path
    pub fn distance_to<W, G>(graph: &G, start: NodeId, destination: NodeId) -> Result<W>
    where
        W: Float + Zero + Debug + Copy + Ord,
        G: Graph<W>,
    {
        if !graph.has_node(start) {
            return Err(Error::InvalidStartNode(start));
        }
        if !graph.has_node(destination) {
            return Err(Error::InvalidVertex(destination));
        }

        let records = Dijkstra::new()
            .with_target(destination)
            .compute_shortest_paths(graph, start)?;

        Ok(records.distance(destination).unwrap_or_else(W::infinity))
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Dijkstra
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn compute_shortest_paths(&self, graph: &G, start: NodeId) -> Result<DistanceRecords<W>> {
        if !graph.has_node(start) {
            return Err(Error::InvalidStartNode(start));
        }

        if let Some(edge) = graph.find_negative_edge() {
            return Err(Error::UnsupportedNegativeWeight {
                origin: edge.origin,
                destination: edge.destination,
                weight: edge.weight.to_f64().unwrap_or(f64::NAN),
            });
        }

        let n = graph.node_count();

        let mut records: HashMap<NodeId, DistanceRecord<W>> = graph
            .nodes()
            .map(|node| (node, DistanceRecord::unreached()))
            .collect();
        records.insert(start, DistanceRecord::origin());

        let mut visited: HashSet<NodeId> = HashSet::with_capacity(n);
        let mut queue = MinQueue::with_capacity(n);
        let mut stats = SearchStats::default();

        queue.push(start, W::zero());

        while let Some((node, _)) = queue.pop() {
            if !visited.insert(node) {
                trace!("skipping stale queue entry for {}", node);
                stats.stale_entries += 1;
                continue;
            }
            stats.nodes_finalized += 1;

            if self.target == Some(node) {
                break;
            }

            let dist_node = records[&node].dist;

            for edge in graph.outgoing_edges(node) {
                if visited.contains(&edge.destination) {
                    continue;
                }

                let candidate = dist_node + edge.weight;
                let record = records
                    .entry(edge.destination)
                    .or_insert_with(DistanceRecord::unreached);

                if candidate < record.dist {
                    record.dist = candidate;
                    record.shortest_parent_edge = Some(edge);
                    queue.push(edge.destination, candidate);
                    stats.edges_relaxed += 1;
                }
            }
        }

        stats.heap_pushes = queue.pushes();

        debug!(
            "dijkstra from {}: {} of {} nodes finalized, {} relaxations, {} stale entries",
            start, stats.nodes_finalized, n, stats.edges_relaxed, stats.stale_entries
        );

        Ok(DistanceRecords {
            start,
            records,
            stats,
        })
    }
}
