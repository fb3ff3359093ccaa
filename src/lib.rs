//! Path Engine - single-source shortest paths for interactively edited graphs
//!
//! The engine runs Dijkstra's algorithm (lazy-deletion variant) over a snapshot
//! of a weighted directed graph and records, for every node, the best known
//! distance together with the edge that achieves it. Walking those parent
//! edges backwards from a chosen end node yields the concrete path.
//!
//! The two entry points used by graph editors are [`compute_distances`] and
//! [`path_edges`].

pub mod algorithm;
pub mod data_structures;
pub mod graph;
pub mod session;
pub mod web;

pub use algorithm::{
    dijkstra::Dijkstra, path::ShortestPath, DistanceRecord, DistanceRecords, SearchStats,
    ShortestPathAlgorithm,
};
/// Re-export main types for convenient use
pub use graph::directed::DirectedGraph;
pub use graph::edge::{Edge, NodeId};
pub use session::GraphSession;

use graph::Graph;
use num_traits::{Float, Zero};
use std::fmt::Debug;

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Start node {0} is not part of the graph")]
    InvalidStartNode(NodeId),

    #[error("Negative edge weight {weight} on edge {origin} -> {destination}")]
    UnsupportedNegativeWeight {
        origin: NodeId,
        destination: NodeId,
        weight: f64,
    },

    #[error("Invalid node ID: {0}")]
    InvalidVertex(NodeId),

    #[error("Invalid edge: from {0} to {1}")]
    InvalidEdge(NodeId, NodeId),

    #[error("No edge from {0} to {1}")]
    EdgeNotFound(NodeId, NodeId),

    #[error("Invalid position: ({0}, {1})")]
    InvalidPosition(f64, f64),

    #[error("Invalid edge weight: {0}")]
    InvalidWeight(f64),

    #[error("Parent chain from node {0} does not lead back to the start node")]
    BrokenParentChain(NodeId),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Computes the distance record of every node in `graph` from `start`.
///
/// Fails with [`Error::InvalidStartNode`] when `start` is not a node of the
/// graph and with [`Error::UnsupportedNegativeWeight`] when any edge carries a
/// negative weight.
pub fn compute_distances<W, G>(graph: &G, start: NodeId) -> Result<DistanceRecords<W>>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    Dijkstra::new().compute_shortest_paths(graph, start)
}

/// Returns the edges of the shortest path from the records' start node to
/// `end`, ordered start to end.
///
/// `Ok(None)` means `end` is unreachable. A path to the start node itself is
/// the empty sequence.
pub fn path_edges<W>(records: &DistanceRecords<W>, end: NodeId) -> Result<Option<Vec<Edge<W>>>>
where
    W: Float + Zero + Debug + Copy,
{
    Ok(algorithm::path::reconstruct(records, end)?.map(|path| path.edges))
}
