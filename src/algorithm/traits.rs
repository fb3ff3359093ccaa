use std::collections::HashMap;
use std::fmt::Debug;
use num_traits::{Float, Zero};

use crate::algorithm::path::{self, ShortestPath};
use crate::graph::{Edge, Graph, NodeId};
use crate::Result;

/// Best known distance of one node and the edge that achieves it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceRecord<W> {
    /// Distance from the start node, infinite when the node was never reached
    pub dist: W,

    /// Last edge on the best known path, `None` for the start node and for
    /// unreachable nodes
    pub shortest_parent_edge: Option<Edge<W>>,
}

impl<W> DistanceRecord<W>
where
    W: Float + Zero + Debug + Copy,
{
    pub fn unreached() -> Self {
        DistanceRecord {
            dist: W::infinity(),
            shortest_parent_edge: None,
        }
    }

    pub fn origin() -> Self {
        DistanceRecord {
            dist: W::zero(),
            shortest_parent_edge: None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.dist.is_finite()
    }
}

/// Counters collected while a search runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped for the first time
    pub nodes_finalized: usize,
    /// Relaxations that improved a distance
    pub edges_relaxed: usize,
    pub heap_pushes: usize,
    /// Outdated queue entries discarded on pop
    pub stale_entries: usize,
}

/// Distance records of every node of one graph snapshot, computed from `start`
#[derive(Debug, Clone)]
pub struct DistanceRecords<W> {
    pub start: NodeId,
    pub records: HashMap<NodeId, DistanceRecord<W>>,
    pub stats: SearchStats,
}

impl<W> DistanceRecords<W>
where
    W: Float + Zero + Debug + Copy,
{
    pub fn get(&self, node: NodeId) -> Option<&DistanceRecord<W>> {
        self.records.get(&node)
    }

    /// Distance of `node`, or `None` if the node is not part of the snapshot
    pub fn distance(&self, node: NodeId) -> Option<W> {
        self.records.get(&node).map(|record| record.dist)
    }

    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.records
            .get(&node)
            .map_or(false, DistanceRecord::is_reachable)
    }

    pub fn parent_edge(&self, node: NodeId) -> Option<Edge<W>> {
        self.records
            .get(&node)
            .and_then(|record| record.shortest_parent_edge)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &DistanceRecord<W>)> + '_ {
        self.records.iter().map(|(node, record)| (*node, record))
    }

    pub fn reachable_count(&self) -> usize {
        self.records.values().filter(|record| record.is_reachable()).count()
    }
}

/// Trait for shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    /// Compute shortest paths from `start` to every node of `graph`
    fn compute_shortest_paths(&self, graph: &G, start: NodeId) -> Result<DistanceRecords<W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Get the shortest path from the start node to `end`, `None` when `end`
    /// cannot be reached
    fn get_path(&self, records: &DistanceRecords<W>, end: NodeId) -> Result<Option<ShortestPath<W>>> {
        path::reconstruct(records, end)
    }
}
