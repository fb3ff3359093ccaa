use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use log::{info, warn};
use ordered_float::OrderedFloat;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use uuid::Uuid;

use crate::algorithm::dijkstra::Dijkstra;
use crate::algorithm::path;
use crate::algorithm::ShortestPathAlgorithm;
use crate::graph::{DirectedGraph, Graph, NodeId, Point};
use crate::web::models::*;
use crate::Error;

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Largest `node_count` accepted by `/api/distances` unless configured otherwise
pub const DEFAULT_MAX_REQUEST_NODES: usize = 100_000;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    pub max_sessions: usize,
    pub max_request_nodes: usize,
}

impl AppState {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            max_sessions,
            max_request_nodes: DEFAULT_MAX_REQUEST_NODES,
        }
    }

    pub fn with_max_request_nodes(mut self, max_request_nodes: usize) -> Self {
        self.max_request_nodes = max_request_nodes;
        self
    }
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/sessions", get(list_sessions).post(create_session))
        .route("/api/sessions/:session_id", get(get_session).delete(delete_session))
        .route("/api/sessions/:session_id/nodes", post(add_node))
        .route(
            "/api/sessions/:session_id/nodes/:node_id",
            put(move_node).delete(remove_node),
        )
        .route("/api/sessions/:session_id/edges", post(add_edge))
        .route(
            "/api/sessions/:session_id/edges/:source/:target",
            delete(remove_edge),
        )
        .route("/api/sessions/:session_id/start", put(set_start))
        .route("/api/sessions/:session_id/end", put(set_end))
        .route("/api/sessions/:session_id/path", get(get_path))
        .route("/api/distances", post(compute_distances))
        .route("/api/health", get(health_check))
}

/// Create an empty editing session
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionView>), ApiError> {
    let mut sessions = lock_sessions(&state)?;
    if sessions.len() >= state.max_sessions {
        return Err(api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "session_limit_reached",
            format!("At most {} sessions can be open", state.max_sessions),
        ));
    }

    let mut session = Session::new();
    let view = session_view(&mut session).map_err(engine_error)?;
    info!("created session {}", session.id);
    sessions.insert(session.id, session);

    Ok((StatusCode::CREATED, Json(view)))
}

/// List all active sessions
pub async fn list_sessions(State(state): State<AppState>) -> Result<Json<Vec<Uuid>>, ApiError> {
    let sessions = lock_sessions(&state)?;
    let mut ids: Vec<Uuid> = sessions.keys().cloned().collect();
    ids.sort();
    Ok(Json(ids))
}

/// Get the graph, endpoints and current path of a session
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    with_session(&state, session_id, session_view).map(Json)
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut sessions = lock_sessions(&state)?;
    match sessions.remove(&session_id) {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(session_not_found()),
    }
}

pub async fn add_node(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<NodeRequest>,
) -> Result<(StatusCode, Json<NodeCreated>), ApiError> {
    let id = with_session(&state, session_id, |session| {
        session.editor.add_node(Point::new(request.x, request.y))
    })?;
    Ok((StatusCode::CREATED, Json(NodeCreated { id })))
}

pub async fn move_node(
    State(state): State<AppState>,
    Path((session_id, node_id)): Path<(Uuid, usize)>,
    Json(request): Json<NodeRequest>,
) -> Result<Json<SessionView>, ApiError> {
    with_session(&state, session_id, |session| {
        session
            .editor
            .move_node(NodeId(node_id), Point::new(request.x, request.y))?;
        session_view(session)
    })
    .map(Json)
}

pub async fn remove_node(
    State(state): State<AppState>,
    Path((session_id, node_id)): Path<(Uuid, usize)>,
) -> Result<StatusCode, ApiError> {
    with_session(&state, session_id, |session| {
        session.editor.remove_node(NodeId(node_id))
    })?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_edge(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<EdgeRequest>,
) -> Result<(StatusCode, Json<EdgeCreated>), ApiError> {
    let weight = with_session(&state, session_id, |session| {
        session.editor.connect(request.source, request.target)
    })?;
    Ok((
        StatusCode::CREATED,
        Json(EdgeCreated {
            source: request.source,
            target: request.target,
            weight: weight.into_inner(),
        }),
    ))
}

pub async fn remove_edge(
    State(state): State<AppState>,
    Path((session_id, source, target)): Path<(Uuid, usize, usize)>,
) -> Result<StatusCode, ApiError> {
    with_session(&state, session_id, |session| {
        session.editor.disconnect(NodeId(source), NodeId(target))
    })?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_start(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<EndpointRequest>,
) -> Result<Json<PathResponse>, ApiError> {
    with_session(&state, session_id, |session| {
        session.editor.set_start(request.node)?;
        current_path(session)
    })
    .map(Json)
}

pub async fn set_end(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<EndpointRequest>,
) -> Result<Json<PathResponse>, ApiError> {
    with_session(&state, session_id, |session| {
        session.editor.set_end(request.node)?;
        current_path(session)
    })
    .map(Json)
}

pub async fn get_path(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<PathResponse>, ApiError> {
    with_session(&state, session_id, current_path).map(Json)
}

/// Run the engine over a graph sent in the request body
pub async fn compute_distances(
    State(state): State<AppState>,
    Json(request): Json<DistanceRequest>,
) -> Result<Json<DistanceResponse>, ApiError> {
    validate_distance_request(&request, state.max_request_nodes)?;

    let graph = DirectedGraph::from_edges(
        request.node_count,
        request
            .links
            .iter()
            .map(|link| (link.source.index(), link.target.index(), OrderedFloat(link.weight))),
    )
    .map_err(engine_error)?;

    let start_time = Instant::now();
    let records = Dijkstra::new()
        .compute_shortest_paths(&graph, request.source)
        .map_err(engine_error)?;
    let execution_time = start_time.elapsed();

    let path = match request.target {
        Some(target) => {
            let found = path::reconstruct(&records, target).map_err(engine_error)?;
            Some(PathResponse::new(Some(request.source), Some(target), found.as_ref()))
        }
        None => None,
    };

    let distances: BTreeMap<NodeId, Option<f64>> = records
        .iter()
        .map(|(node, record)| {
            let distance = record.is_reachable().then(|| record.dist.into_inner());
            (node, distance)
        })
        .collect();

    let parent_edges = records
        .iter()
        .map(|(node, record)| {
            let edge = record
                .shortest_parent_edge
                .as_ref()
                .map(|edge| WebEdge::from_edge(edge, false));
            (node, edge)
        })
        .collect();

    Ok(Json(DistanceResponse {
        execution_id: Uuid::new_v4(),
        source: request.source,
        execution_time_ms: execution_time.as_secs_f64() * 1000.0,
        distances,
        parent_edges,
        path,
        metrics: records.stats.into(),
    }))
}

/// Health check endpoint
pub async fn health_check() -> Result<Json<serde_json::Value>, ApiError> {
    Ok(Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    })))
}

// Helper functions

fn lock_sessions(
    state: &AppState,
) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, Session>>, ApiError> {
    state.sessions.lock().map_err(|_| {
        warn!("session store lock poisoned");
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "session_store_unavailable",
            "Session store is unavailable".to_string(),
        )
    })
}

fn with_session<T>(
    state: &AppState,
    session_id: Uuid,
    f: impl FnOnce(&mut Session) -> crate::Result<T>,
) -> Result<T, ApiError> {
    let mut sessions = lock_sessions(state)?;
    let session = sessions.get_mut(&session_id).ok_or_else(session_not_found)?;
    f(session).map_err(engine_error)
}

fn current_path(session: &mut Session) -> crate::Result<PathResponse> {
    let path = session.editor.highlighted_path()?;
    Ok(PathResponse::new(
        session.editor.start(),
        session.editor.end(),
        path.as_ref(),
    ))
}

fn session_view(session: &mut Session) -> crate::Result<SessionView> {
    let path = current_path(session)?;
    let on_path: HashSet<(NodeId, NodeId)> = path
        .edges
        .iter()
        .map(|edge| (edge.source, edge.target))
        .collect();

    let start = session.editor.start();
    let end = session.editor.end();

    let distances: HashMap<NodeId, f64> = match session.editor.records()? {
        Some(records) => records
            .iter()
            .filter(|(_, record)| record.is_reachable())
            .map(|(node, record)| (node, record.dist.into_inner()))
            .collect(),
        None => HashMap::new(),
    };

    let graph = session.editor.graph();
    let layout = session.editor.layout();

    let mut node_ids: Vec<NodeId> = graph.nodes().collect();
    node_ids.sort();

    let nodes = node_ids
        .iter()
        .map(|&id| {
            let position = layout.position(id).unwrap_or_default();
            WebNode {
                id,
                x: position.x,
                y: position.y,
                distance: distances.get(&id).copied(),
                is_start: start == Some(id),
                is_end: end == Some(id),
            }
        })
        .collect();

    let links = node_ids
        .iter()
        .flat_map(|&id| graph.outgoing_edges(id))
        .map(|edge| {
            let is_path = on_path.contains(&(edge.origin, edge.destination));
            WebEdge::from_edge(&edge, is_path)
        })
        .collect();

    Ok(SessionView {
        id: session.id,
        created_at: session.created_at,
        start,
        end,
        graph: WebGraph { nodes, links },
        path,
    })
}

/// Rejects request bodies that are too large or reference nodes outside
/// `0..node_count`, before any graph is built
fn validate_distance_request(request: &DistanceRequest, max_nodes: usize) -> Result<(), ApiError> {
    if request.node_count > max_nodes {
        warn!(
            "rejected distance request with {} nodes (limit {})",
            request.node_count, max_nodes
        );
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "too_many_nodes",
            format!(
                "node_count {} exceeds the limit of {}",
                request.node_count, max_nodes
            ),
        ));
    }

    let out_of_range = request
        .links
        .iter()
        .flat_map(|link| [link.source, link.target])
        .chain(request.target)
        .find(|node| node.index() >= request.node_count);

    match out_of_range {
        Some(node) => Err(api_error(
            StatusCode::BAD_REQUEST,
            "invalid_request",
            format!(
                "node {} is outside the {} nodes of the request",
                node, request.node_count
            ),
        )),
        None => Ok(()),
    }
}

fn api_error(status: StatusCode, error: &str, message: String) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
            details: None,
        }),
    )
}

fn session_not_found() -> ApiError {
    api_error(
        StatusCode::NOT_FOUND,
        "session_not_found",
        "Session not found".to_string(),
    )
}

fn engine_error(err: Error) -> ApiError {
    let (status, code) = match &err {
        Error::InvalidStartNode(_) => (StatusCode::BAD_REQUEST, "invalid_start_node"),
        Error::UnsupportedNegativeWeight { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "unsupported_negative_weight")
        }
        Error::InvalidVertex(_) => (StatusCode::NOT_FOUND, "node_not_found"),
        Error::InvalidEdge(_, _) => (StatusCode::BAD_REQUEST, "invalid_edge"),
        Error::EdgeNotFound(_, _) => (StatusCode::NOT_FOUND, "edge_not_found"),
        Error::InvalidPosition(_, _) => (StatusCode::BAD_REQUEST, "invalid_position"),
        Error::InvalidWeight(_) => (StatusCode::BAD_REQUEST, "invalid_weight"),
        Error::BrokenParentChain(_) => (StatusCode::INTERNAL_SERVER_ERROR, "broken_parent_chain"),
    };
    api_error(status, code, err.to_string())
}
