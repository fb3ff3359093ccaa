use crate::graph::edge::{Edge, NodeId};
use crate::graph::traits::{Graph, MutableGraph};
use crate::{Error, Result};
use num_traits::{Float, Zero};
use std::collections::HashMap;
use std::fmt::Debug;

/// A directed graph implementation using adjacency lists
///
/// Nodes are addressed by [`NodeId`] handles. Removing a node retires its
/// handle; later nodes never reuse it.
#[derive(Debug, Clone)]
pub struct DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Next handle to hand out
    next_id: usize,

    /// Outgoing edges for each node: node -> [edge with origin == node]
    outgoing_edges: HashMap<NodeId, Vec<Edge<W>>>,

    /// Incoming edges for each node: node -> [edge with destination == node]
    incoming_edges: HashMap<NodeId, Vec<Edge<W>>>,
}

impl<W> Default for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W> DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Creates a new empty directed graph
    pub fn new() -> Self {
        DirectedGraph {
            next_id: 0,
            outgoing_edges: HashMap::new(),
            incoming_edges: HashMap::new(),
        }
    }

    /// Creates a new directed graph with `nodes` nodes, numbered from zero
    pub fn with_nodes(nodes: usize) -> Self {
        let mut graph = DirectedGraph {
            next_id: 0,
            outgoing_edges: HashMap::with_capacity(nodes),
            incoming_edges: HashMap::with_capacity(nodes),
        };

        for _ in 0..nodes {
            graph.add_node();
        }

        graph
    }

    /// Builds a graph from `(origin, destination, weight)` triples over
    /// `nodes` nodes numbered from zero
    pub fn from_edges<I>(nodes: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, W)>,
    {
        let mut graph = Self::with_nodes(nodes);
        for (origin, destination, weight) in edges {
            graph.add_edge(NodeId(origin), NodeId(destination), weight)?;
        }
        Ok(graph)
    }

    fn check_weight(origin: NodeId, destination: NodeId, weight: W) -> Result<()> {
        if !weight.is_nan() && weight >= W::zero() {
            Ok(())
        } else {
            Err(Error::UnsupportedNegativeWeight {
                origin,
                destination,
                weight: weight.to_f64().unwrap_or(f64::NAN),
            })
        }
    }

    fn check_endpoints(&self, origin: NodeId, destination: NodeId) -> Result<()> {
        if !self.has_node(origin) {
            return Err(Error::InvalidVertex(origin));
        }
        if !self.has_node(destination) {
            return Err(Error::InvalidVertex(destination));
        }
        if origin == destination {
            return Err(Error::InvalidEdge(origin, destination));
        }
        Ok(())
    }
}

impl<W> Graph<W> for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn node_count(&self) -> usize {
        self.outgoing_edges.len()
    }

    fn edge_count(&self) -> usize {
        self.outgoing_edges.values().map(|edges| edges.len()).sum()
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new(self.outgoing_edges.keys().copied())
    }

    fn outgoing_edges(&self, node: NodeId) -> Box<dyn Iterator<Item = Edge<W>> + '_> {
        match self.outgoing_edges.get(&node) {
            Some(edges) => Box::new(edges.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn incoming_edges(&self, node: NodeId) -> Box<dyn Iterator<Item = Edge<W>> + '_> {
        match self.incoming_edges.get(&node) {
            Some(edges) => Box::new(edges.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn has_node(&self, node: NodeId) -> bool {
        self.outgoing_edges.contains_key(&node)
    }
}

impl<W> MutableGraph<W> for DirectedGraph<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn add_node(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.outgoing_edges.insert(id, Vec::new());
        self.incoming_edges.insert(id, Vec::new());
        self.next_id += 1;
        id
    }

    fn remove_node(&mut self, node: NodeId) -> Result<()> {
        let outgoing = self
            .outgoing_edges
            .remove(&node)
            .ok_or(Error::InvalidVertex(node))?;
        let incoming = self.incoming_edges.remove(&node).unwrap_or_default();

        for edge in outgoing {
            if let Some(edges) = self.incoming_edges.get_mut(&edge.destination) {
                edges.retain(|e| e.origin != node);
            }
        }

        for edge in incoming {
            if let Some(edges) = self.outgoing_edges.get_mut(&edge.origin) {
                edges.retain(|e| e.destination != node);
            }
        }

        Ok(())
    }

    fn add_edge(&mut self, origin: NodeId, destination: NodeId, weight: W) -> Result<()> {
        self.check_endpoints(origin, destination)?;
        Self::check_weight(origin, destination, weight)?;

        if self.has_edge(origin, destination) {
            return self.update_edge_weight(origin, destination, weight);
        }

        let edge = Edge::new(origin, destination, weight);
        self.outgoing_edges.entry(origin).or_default().push(edge);
        self.incoming_edges.entry(destination).or_default().push(edge);
        Ok(())
    }

    fn remove_edge(&mut self, origin: NodeId, destination: NodeId) -> Result<Edge<W>> {
        let outgoing = self
            .outgoing_edges
            .get_mut(&origin)
            .ok_or(Error::InvalidVertex(origin))?;
        let position = outgoing
            .iter()
            .position(|e| e.destination == destination)
            .ok_or(Error::EdgeNotFound(origin, destination))?;
        let removed = outgoing.swap_remove(position);

        if let Some(incoming) = self.incoming_edges.get_mut(&destination) {
            incoming.retain(|e| e.origin != origin);
        }

        Ok(removed)
    }

    fn update_edge_weight(&mut self, origin: NodeId, destination: NodeId, weight: W) -> Result<()> {
        Self::check_weight(origin, destination, weight)?;

        let edge = self
            .outgoing_edges
            .get_mut(&origin)
            .ok_or(Error::InvalidVertex(origin))?
            .iter_mut()
            .find(|e| e.destination == destination)
            .ok_or(Error::EdgeNotFound(origin, destination))?;
        edge.weight = weight;

        if let Some(incoming) = self.incoming_edges.get_mut(&destination) {
            for edge in incoming.iter_mut().filter(|e| e.origin == origin) {
                edge.weight = weight;
            }
        }

        Ok(())
    }
}
