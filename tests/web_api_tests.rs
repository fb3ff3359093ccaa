use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use path_engine::graph::NodeId;
use path_engine::web::api::*;
use path_engine::web::models::{
    DistanceRequest, EdgeRequest, EndpointRequest, NodeRequest, WebEdge,
};
use uuid::Uuid;

async fn new_session(state: &AppState) -> Uuid {
    let (status, Json(view)) = create_session(State(state.clone())).await.unwrap();
    assert_eq!(status, StatusCode::CREATED);
    view.id
}

async fn place(state: &AppState, session: Uuid, x: f64, y: f64) -> NodeId {
    let (_, Json(created)) = add_node(State(state.clone()), Path(session), Json(NodeRequest { x, y }))
        .await
        .unwrap();
    created.id
}

async fn link(state: &AppState, session: Uuid, source: NodeId, target: NodeId) -> f64 {
    let (_, Json(created)) = add_edge(
        State(state.clone()),
        Path(session),
        Json(EdgeRequest { source, target }),
    )
    .await
    .unwrap();
    created.weight
}

#[tokio::test]
async fn test_session_lifecycle() {
    let state = AppState::new(10);
    let id = new_session(&state).await;

    let Json(ids) = list_sessions(State(state.clone())).await.unwrap();
    assert_eq!(ids, vec![id]);

    let Json(view) = get_session(State(state.clone()), Path(id)).await.unwrap();
    assert!(view.graph.nodes.is_empty());
    assert!(!view.path.reachable);

    let status = delete_session(State(state.clone()), Path(id)).await.unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, Json(error)) = get_session(State(state.clone()), Path(id)).await.unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error.error, "session_not_found");
}

#[tokio::test]
async fn test_session_limit() {
    let state = AppState::new(1);
    new_session(&state).await;

    let (status, Json(error)) = create_session(State(state.clone())).await.unwrap_err();
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(error.error, "session_limit_reached");
}

#[tokio::test]
async fn test_editing_and_path_highlighting() {
    let state = AppState::new(10);
    let id = new_session(&state).await;

    let a = place(&state, id, 0.0, 0.0).await;
    let b = place(&state, id, 3.0, 4.0).await;
    let c = place(&state, id, 3.0, 10.0).await;

    assert_eq!(link(&state, id, a, b).await, 5.0);
    assert_eq!(link(&state, id, b, c).await, 6.0);

    let Json(path) = set_start(State(state.clone()), Path(id), Json(EndpointRequest { node: a }))
        .await
        .unwrap();
    assert!(!path.reachable);

    let Json(path) = set_end(State(state.clone()), Path(id), Json(EndpointRequest { node: c }))
        .await
        .unwrap();
    assert!(path.reachable);
    assert_eq!(path.distance, Some(11.0));
    assert_eq!(path.nodes, vec![a, b, c]);

    let Json(view) = get_session(State(state.clone()), Path(id)).await.unwrap();
    assert_eq!(view.graph.nodes.len(), 3);
    assert!(view.graph.links.iter().all(|link| link.is_path));
    let c_node = view.graph.nodes.iter().find(|node| node.id == c).unwrap();
    assert_eq!(c_node.distance, Some(11.0));
    assert!(c_node.is_end);

    let status = remove_edge(State(state.clone()), Path((id, b.index(), c.index())))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);

    let Json(path) = get_path(State(state.clone()), Path(id)).await.unwrap();
    assert!(!path.reachable);
    assert!(path.edges.is_empty());
}

#[tokio::test]
async fn test_moving_and_removing_nodes() {
    let state = AppState::new(10);
    let id = new_session(&state).await;

    let a = place(&state, id, 0.0, 0.0).await;
    let b = place(&state, id, 3.0, 4.0).await;
    link(&state, id, a, b).await;

    let Json(view) = move_node(
        State(state.clone()),
        Path((id, b.index())),
        Json(NodeRequest { x: 6.0, y: 8.0 }),
    )
    .await
    .unwrap();
    assert_eq!(view.graph.links[0].weight, 10.0);

    let status = remove_node(State(state.clone()), Path((id, b.index()))).await.unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, Json(error)) = remove_node(State(state.clone()), Path((id, b.index())))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error.error, "node_not_found");
}

#[tokio::test]
async fn test_self_loop_is_rejected() {
    let state = AppState::new(10);
    let id = new_session(&state).await;
    let a = place(&state, id, 1.0, 1.0).await;

    let (status, Json(error)) = add_edge(
        State(state.clone()),
        Path(id),
        Json(EdgeRequest { source: a, target: a }),
    )
    .await
    .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.error, "invalid_edge");
}

fn edge(source: usize, target: usize, weight: f64) -> WebEdge {
    WebEdge {
        source: NodeId(source),
        target: NodeId(target),
        weight,
        is_path: false,
    }
}

#[tokio::test]
async fn test_stateless_distances() {
    let request = DistanceRequest {
        node_count: 4,
        links: vec![edge(0, 1, 5.0), edge(1, 2, 7.0)],
        source: NodeId(0),
        target: Some(NodeId(2)),
    };

    let Json(response) = compute_distances(State(AppState::new(1)), Json(request)).await.unwrap();

    assert_eq!(response.distances[&NodeId(0)], Some(0.0));
    assert_eq!(response.distances[&NodeId(1)], Some(5.0));
    assert_eq!(response.distances[&NodeId(2)], Some(12.0));
    assert_eq!(response.distances[&NodeId(3)], None);
    assert_eq!(response.parent_edges[&NodeId(2)], Some(edge(1, 2, 7.0)));
    assert_eq!(response.parent_edges[&NodeId(0)], None);
    assert_eq!(response.metrics.nodes_finalized, 3);

    let path = response.path.unwrap();
    assert!(path.reachable);
    assert_eq!(path.distance, Some(12.0));
    assert_eq!(path.edges.len(), 2);
}

#[tokio::test]
async fn test_stateless_distances_reject_bad_input() {
    let negative = DistanceRequest {
        node_count: 2,
        links: vec![edge(0, 1, -2.0)],
        source: NodeId(0),
        target: None,
    };
    let (status, Json(error)) = compute_distances(State(AppState::new(1)), Json(negative)).await.unwrap_err();
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error.error, "unsupported_negative_weight");

    let bad_start = DistanceRequest {
        node_count: 2,
        links: vec![edge(0, 1, 1.0)],
        source: NodeId(5),
        target: None,
    };
    let (status, Json(error)) = compute_distances(State(AppState::new(1)), Json(bad_start)).await.unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.error, "invalid_start_node");
}

#[tokio::test]
async fn test_stateless_distances_reject_oversized_node_count() {
    let huge: DistanceRequest =
        serde_json::from_str(r#"{"node_count": 18446744073709551615, "links": [], "source": 0}"#)
            .unwrap();
    let (status, Json(error)) = compute_distances(State(AppState::new(1)), Json(huge))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.error, "too_many_nodes");

    let state = AppState::new(1).with_max_request_nodes(3);
    let just_over = DistanceRequest {
        node_count: 4,
        links: vec![],
        source: NodeId(0),
        target: None,
    };
    let (status, Json(error)) = compute_distances(State(state.clone()), Json(just_over))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.error, "too_many_nodes");

    let at_limit = DistanceRequest {
        node_count: 3,
        links: vec![edge(0, 2, 1.0)],
        source: NodeId(0),
        target: None,
    };
    let Json(response) = compute_distances(State(state), Json(at_limit)).await.unwrap();
    assert_eq!(response.distances[&NodeId(2)], Some(1.0));
}

#[tokio::test]
async fn test_stateless_distances_reject_out_of_range_nodes() {
    let bad_link = DistanceRequest {
        node_count: 2,
        links: vec![edge(0, 5, 1.0)],
        source: NodeId(0),
        target: None,
    };
    let (status, Json(error)) = compute_distances(State(AppState::new(1)), Json(bad_link))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.error, "invalid_request");

    let bad_target = DistanceRequest {
        node_count: 2,
        links: vec![edge(0, 1, 1.0)],
        source: NodeId(0),
        target: Some(NodeId(2)),
    };
    let (status, Json(error)) = compute_distances(State(AppState::new(1)), Json(bad_target))
        .await
        .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.error, "invalid_request");
}

#[tokio::test]
async fn test_far_apart_nodes_cannot_be_linked() {
    let state = AppState::new(10);
    let id = new_session(&state).await;
    let a = place(&state, id, -1e308, 0.0).await;
    let b = place(&state, id, 1e308, 0.0).await;

    let (status, Json(error)) = add_edge(
        State(state.clone()),
        Path(id),
        Json(EdgeRequest { source: a, target: b }),
    )
    .await
    .unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error.error, "invalid_weight");
}

#[tokio::test]
async fn test_health_check() {
    let Json(body) = health_check().await.unwrap();
    assert_eq!(body["status"], "healthy");
}
