use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::algorithm::path::ShortestPath;
use crate::algorithm::SearchStats;
use crate::graph::{Edge, NodeId};
use crate::session::{GraphSession, Weight};

/// A node as seen by the editor frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebNode {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    /// Distance from the start node; absent when unreachable or no start is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default)]
    pub is_start: bool,
    #[serde(default)]
    pub is_end: bool,
}

/// A directed edge as seen by the editor frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f64,
    #[serde(default)]
    pub is_path: bool,
}

impl WebEdge {
    pub fn from_edge(edge: &Edge<Weight>, is_path: bool) -> Self {
        WebEdge {
            source: edge.origin,
            target: edge.destination,
            weight: edge.weight.into_inner(),
            is_path,
        }
    }
}

/// Complete graph of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebGraph {
    pub nodes: Vec<WebNode>,
    pub links: Vec<WebEdge>,
}

#[derive(Debug, Deserialize)]
pub struct NodeRequest {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Deserialize)]
pub struct EdgeRequest {
    pub source: NodeId,
    pub target: NodeId,
}

#[derive(Debug, Deserialize)]
pub struct EndpointRequest {
    pub node: NodeId,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeCreated {
    pub id: NodeId,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeCreated {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f64,
}

/// Path between the chosen start and end nodes
#[derive(Debug, Clone, Serialize)]
pub struct PathResponse {
    pub start: Option<NodeId>,
    pub end: Option<NodeId>,
    pub reachable: bool,
    pub distance: Option<f64>,
    pub nodes: Vec<NodeId>,
    pub edges: Vec<WebEdge>,
}

impl PathResponse {
    pub fn new(start: Option<NodeId>, end: Option<NodeId>, path: Option<&ShortestPath<Weight>>) -> Self {
        match path {
            Some(path) => PathResponse {
                start,
                end,
                reachable: true,
                distance: Some(path.weight.into_inner()),
                nodes: path.nodes(),
                edges: path
                    .edges
                    .iter()
                    .map(|edge| WebEdge::from_edge(edge, true))
                    .collect(),
            },
            None => PathResponse {
                start,
                end,
                reachable: false,
                distance: None,
                nodes: Vec::new(),
                edges: Vec::new(),
            },
        }
    }
}

/// Stateless distance computation over nodes `0..node_count`
#[derive(Debug, Deserialize)]
pub struct DistanceRequest {
    pub node_count: usize,
    pub links: Vec<WebEdge>,
    pub source: NodeId,
    #[serde(default)]
    pub target: Option<NodeId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DistanceResponse {
    pub execution_id: Uuid,
    pub source: NodeId,
    pub execution_time_ms: f64,
    /// `None` marks an unreachable node
    pub distances: BTreeMap<NodeId, Option<f64>>,
    pub parent_edges: BTreeMap<NodeId, Option<WebEdge>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathResponse>,
    pub metrics: SearchMetrics,
}

/// Counters collected during one run
#[derive(Debug, Clone, Serialize)]
pub struct SearchMetrics {
    pub nodes_finalized: usize,
    pub edges_relaxed: usize,
    pub heap_pushes: usize,
    pub stale_entries: usize,
}

impl From<SearchStats> for SearchMetrics {
    fn from(stats: SearchStats) -> Self {
        SearchMetrics {
            nodes_finalized: stats.nodes_finalized,
            edges_relaxed: stats.edges_relaxed,
            heap_pushes: stats.heap_pushes,
            stale_entries: stats.stale_entries,
        }
    }
}

/// Full state of a session as returned to the frontend
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub start: Option<NodeId>,
    pub end: Option<NodeId>,
    pub graph: WebGraph,
    pub path: PathResponse,
}

/// Error response for API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// Editing session stored by the server
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub editor: GraphSession,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            editor: GraphSession::new(),
            created_at: Utc::now(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
