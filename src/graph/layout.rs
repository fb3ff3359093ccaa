use num_traits::{Float, NumCast, Zero};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;

use crate::graph::edge::NodeId;
use crate::graph::traits::MutableGraph;
use crate::{Error, Result};

/// A position in the editor's world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Node positions, kept apart from the graph so that moving a node never
/// touches node identity.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    positions: HashMap<NodeId, Point>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(&mut self, node: NodeId, position: Point) -> Result<()> {
        if !position.is_finite() {
            return Err(Error::InvalidPosition(position.x, position.y));
        }
        self.positions.insert(node, position);
        Ok(())
    }

    pub fn forget(&mut self, node: NodeId) -> Option<Point> {
        self.positions.remove(&node)
    }

    pub fn position(&self, node: NodeId) -> Option<Point> {
        self.positions.get(&node).copied()
    }

    /// Euclidean length of the segment between two placed nodes.
    ///
    /// Fails with [`Error::InvalidWeight`] when the nodes are too far apart
    /// for the length to be finite.
    pub fn edge_length(&self, origin: NodeId, destination: NodeId) -> Result<f64> {
        let from = self.position(origin).ok_or(Error::InvalidVertex(origin))?;
        let to = self.position(destination).ok_or(Error::InvalidVertex(destination))?;
        let length = from.distance_to(&to);
        if !length.is_finite() {
            return Err(Error::InvalidWeight(length));
        }
        Ok(length)
    }

    /// Rewrites the weight of every edge touching `node` to its current length
    pub fn reweight_incident<W, G>(&self, graph: &mut G, node: NodeId) -> Result<usize>
    where
        W: Float + Zero + Debug + Copy,
        G: MutableGraph<W>,
    {
        let incident: Vec<(NodeId, NodeId)> = graph
            .outgoing_edges(node)
            .chain(graph.incoming_edges(node))
            .map(|edge| (edge.origin, edge.destination))
            .collect();

        for &(origin, destination) in &incident {
            let length = self.edge_length(origin, destination)?;
            let weight = <W as NumCast>::from(length).ok_or(Error::InvalidWeight(length))?;
            graph.update_edge_weight(origin, destination, weight)?;
        }

        Ok(incident.len())
    }
}
