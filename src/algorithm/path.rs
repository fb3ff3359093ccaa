use std::fmt::Debug;
use log::warn;
use num_traits::{Float, Zero};

use crate::algorithm::DistanceRecords;
use crate::graph::{Edge, NodeId};
use crate::{Error, Result};

/// A concrete path recovered from distance records
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath<W> {
    pub start: NodeId,
    pub end: NodeId,
    /// Edges ordered from `start` to `end`
    pub edges: Vec<Edge<W>>,
    pub weight: W,
}

impl<W> ShortestPath<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Nodes visited along the path, `start` and `end` included
    pub fn nodes(&self) -> Vec<NodeId> {
        std::iter::once(self.start)
            .chain(self.edges.iter().map(|edge| edge.destination))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }
}

/// Walks parent edges back from `end` to the start node of `records`.
///
/// Returns `Ok(None)` when `end` is unreachable and an empty path when `end`
/// is the start node. Fails when `end` is not part of the snapshot.
pub fn reconstruct<W>(records: &DistanceRecords<W>, end: NodeId) -> Result<Option<ShortestPath<W>>>
where
    W: Float + Zero + Debug + Copy,
{
    let record = records.get(end).ok_or(Error::InvalidVertex(end))?;
    if !record.is_reachable() {
        return Ok(None);
    }

    let mut edges = Vec::new();
    let mut current = end;

    while current != records.start {
        let edge = match records.parent_edge(current) {
            Some(edge) => edge,
            None => {
                warn!(
                    "node {} has a finite distance but no parent edge; treating {} as unreachable",
                    current, end
                );
                return Ok(None);
            }
        };

        edges.push(edge);
        // Parent edges of a finished run form a tree, so a longer chain can
        // only come from inconsistent records.
        if edges.len() > records.len() {
            return Err(Error::BrokenParentChain(end));
        }
        current = edge.origin;
    }

    edges.reverse();

    let weight = edges
        .iter()
        .fold(W::zero(), |total, edge| total + edge.weight);

    Ok(Some(ShortestPath {
        start: records.start,
        end,
        edges,
        weight,
    }))
}
