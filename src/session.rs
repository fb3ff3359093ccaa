//! Editing session: one graph, its layout, and the path chosen on it.
//!
//! The session owns its graph and hands it to the engine by reference. Any
//! change to the topology, to a weight, or to the start node drops the cached
//! distance records; they are recomputed on the next read.

use log::debug;
use ordered_float::OrderedFloat;

use crate::algorithm::path::{self, ShortestPath};
use crate::algorithm::{DistanceRecords, ShortestPathAlgorithm};
use crate::algorithm::dijkstra::Dijkstra;
use crate::graph::{DirectedGraph, Graph, Layout, MutableGraph, NodeId, Point};
use crate::{Error, Result};

/// Edge weight used by editing sessions
pub type Weight = OrderedFloat<f64>;

#[derive(Debug, Clone, Default)]
pub struct GraphSession {
    graph: DirectedGraph<Weight>,
    layout: Layout,
    start: Option<NodeId>,
    end: Option<NodeId>,
    records: Option<DistanceRecords<Weight>>,
}

impl GraphSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self) -> &DirectedGraph<Weight> {
        &self.graph
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn start(&self) -> Option<NodeId> {
        self.start
    }

    pub fn end(&self) -> Option<NodeId> {
        self.end
    }

    /// True while the records of the last run are still valid
    pub fn has_cached_records(&self) -> bool {
        self.records.is_some()
    }

    pub fn add_node(&mut self, position: Point) -> Result<NodeId> {
        if !position.is_finite() {
            return Err(Error::InvalidPosition(position.x, position.y));
        }
        let node = self.graph.add_node();
        self.layout.place(node, position)?;
        self.invalidate("node added");
        Ok(node)
    }

    /// Moves a node and re-weights every edge touching it
    pub fn move_node(&mut self, node: NodeId, position: Point) -> Result<()> {
        if !self.graph.has_node(node) {
            return Err(Error::InvalidVertex(node));
        }
        let previous = self.layout.position(node);
        self.layout.place(node, position)?;
        let updated = match self.layout.reweight_incident(&mut self.graph, node) {
            Ok(updated) => updated,
            Err(err) => {
                // put the node back so no edge keeps a half-applied length
                if let Some(previous) = previous {
                    self.layout.place(node, previous)?;
                    self.layout.reweight_incident(&mut self.graph, node)?;
                }
                return Err(err);
            }
        };
        if updated > 0 {
            self.invalidate("edge weights changed");
        }
        Ok(())
    }

    pub fn remove_node(&mut self, node: NodeId) -> Result<()> {
        self.graph.remove_node(node)?;
        self.layout.forget(node);
        if self.start == Some(node) {
            self.start = None;
        }
        if self.end == Some(node) {
            self.end = None;
        }
        self.invalidate("node removed");
        Ok(())
    }

    /// Links `origin` to `destination` with the distance between them as
    /// weight. Linking an already linked pair refreshes its weight.
    pub fn connect(&mut self, origin: NodeId, destination: NodeId) -> Result<Weight> {
        if origin == destination {
            return Err(Error::InvalidEdge(origin, destination));
        }
        let weight = OrderedFloat(self.layout.edge_length(origin, destination)?);
        self.graph.add_edge(origin, destination, weight)?;
        self.invalidate("edge added");
        Ok(weight)
    }

    pub fn disconnect(&mut self, origin: NodeId, destination: NodeId) -> Result<()> {
        self.graph.remove_edge(origin, destination)?;
        self.invalidate("edge removed");
        Ok(())
    }

    /// Chooses the start node; the end node is cleared if it is the same node
    pub fn set_start(&mut self, node: NodeId) -> Result<()> {
        if !self.graph.has_node(node) {
            return Err(Error::InvalidStartNode(node));
        }
        if self.end == Some(node) {
            self.end = None;
        }
        if self.start != Some(node) {
            self.start = Some(node);
            self.invalidate("start changed");
        }
        Ok(())
    }

    /// Chooses the end node; the start node is cleared if it is the same node
    pub fn set_end(&mut self, node: NodeId) -> Result<()> {
        if !self.graph.has_node(node) {
            return Err(Error::InvalidVertex(node));
        }
        if self.start == Some(node) {
            self.start = None;
            self.invalidate("start cleared");
        }
        self.end = Some(node);
        Ok(())
    }

    /// Distance records from the current start node, recomputed if the graph
    /// changed since the last run. `None` while no start node is chosen.
    pub fn records(&mut self) -> Result<Option<&DistanceRecords<Weight>>> {
        let start = match self.start {
            Some(start) => start,
            None => return Ok(None),
        };

        if self.records.is_none() {
            let records = Dijkstra::new().compute_shortest_paths(&self.graph, start)?;
            debug!(
                "recomputed distances from {}: {} of {} nodes reachable",
                start,
                records.reachable_count(),
                records.len()
            );
            self.records = Some(records);
        }

        Ok(self.records.as_ref())
    }

    /// Path between the chosen start and end nodes. `None` when either is
    /// unset or when the end cannot be reached.
    pub fn highlighted_path(&mut self) -> Result<Option<ShortestPath<Weight>>> {
        let end = match self.end {
            Some(end) => end,
            None => return Ok(None),
        };

        match self.records()? {
            Some(records) => path::reconstruct(records, end),
            None => Ok(None),
        }
    }

    fn invalidate(&mut self, reason: &str) {
        if self.records.take().is_some() {
            debug!("dropping cached distances: {}", reason);
        }
    }
}
