use std::fmt::Debug;
use num_traits::{Float, Zero};

use crate::graph::edge::{Edge, NodeId};
use crate::Result;

/// Trait representing a weighted directed graph
pub trait Graph<W>: Debug
where
    W: Float + Zero + Debug + Copy,
{
    /// Returns the number of live nodes in the graph
    fn node_count(&self) -> usize;

    /// Returns the number of edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns an iterator over every node in the graph
    fn nodes(&self) -> Box<dyn Iterator<Item = NodeId> + '_>;

    /// Returns an iterator over the outgoing edges from a node
    fn outgoing_edges(&self, node: NodeId) -> Box<dyn Iterator<Item = Edge<W>> + '_>;

    /// Returns an iterator over the incoming edges to a node
    fn incoming_edges(&self, node: NodeId) -> Box<dyn Iterator<Item = Edge<W>> + '_>;

    /// Returns true if the node exists in the graph
    fn has_node(&self, node: NodeId) -> bool;

    /// Returns true if there's an edge between the two nodes
    fn has_edge(&self, origin: NodeId, destination: NodeId) -> bool {
        self.get_edge_weight(origin, destination).is_some()
    }

    /// Gets the weight of an edge if it exists
    fn get_edge_weight(&self, origin: NodeId, destination: NodeId) -> Option<W> {
        self.outgoing_edges(origin)
            .find(|edge| edge.destination == destination)
            .map(|edge| edge.weight)
    }

    /// Returns the first edge whose weight is negative or not a number
    fn find_negative_edge(&self) -> Option<Edge<W>> {
        self.nodes()
            .flat_map(|node| self.outgoing_edges(node))
            .find(|edge| edge.weight.is_nan() || edge.weight < W::zero())
    }
}

/// Trait for mutable graph operations
pub trait MutableGraph<W>: Graph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Adds a node to the graph and returns its handle
    fn add_node(&mut self) -> NodeId;

    /// Removes a node and every edge touching it
    fn remove_node(&mut self, node: NodeId) -> Result<()>;

    /// Adds a directed edge, replacing the weight if the edge already exists
    fn add_edge(&mut self, origin: NodeId, destination: NodeId, weight: W) -> Result<()>;

    /// Removes an edge from the graph, returning it
    fn remove_edge(&mut self, origin: NodeId, destination: NodeId) -> Result<Edge<W>>;

    /// Updates the weight of an existing edge
    fn update_edge_weight(&mut self, origin: NodeId, destination: NodeId, weight: W) -> Result<()>;
}
