use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle identifying a node.
///
/// Handles are handed out by the graph and never reused, so two nodes are the
/// same node exactly when their handles are equal, whatever their payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        NodeId(index)
    }
}

/// A directed, weighted arc.
///
/// The origin is part of the edge, so `a -> b` and `b -> a` are always
/// different edges even when they share a weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge<W> {
    pub origin: NodeId,
    pub destination: NodeId,
    pub weight: W,
}

impl<W: Copy> Edge<W> {
    pub fn new(origin: NodeId, destination: NodeId, weight: W) -> Self {
        Edge {
            origin,
            destination,
            weight,
        }
    }
}

impl<W: fmt::Display> fmt::Display for Edge<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.origin, self.destination, self.weight)
    }
}
