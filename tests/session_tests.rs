use ordered_float::OrderedFloat;
use path_engine::graph::{Graph, NodeId, Point};
use path_engine::{Error, GraphSession};

// a(0,0) -> b(3,4) -> c(3,10), plus a -> c directly
fn triangle() -> (GraphSession, NodeId, NodeId, NodeId) {
    let mut session = GraphSession::new();
    let a = session.add_node(Point::new(0.0, 0.0)).unwrap();
    let b = session.add_node(Point::new(3.0, 4.0)).unwrap();
    let c = session.add_node(Point::new(3.0, 10.0)).unwrap();
    session.connect(a, b).unwrap();
    session.connect(b, c).unwrap();
    (session, a, b, c)
}

#[test]
fn test_connect_uses_euclidean_length() {
    let (mut session, a, b, c) = triangle();

    assert_eq!(session.graph().get_edge_weight(a, b), Some(OrderedFloat(5.0)));
    assert_eq!(session.graph().get_edge_weight(b, c), Some(OrderedFloat(6.0)));
    assert_eq!(session.connect(a, a), Err(Error::InvalidEdge(a, a)));
    assert_eq!(
        session.connect(a, NodeId(40)),
        Err(Error::InvalidVertex(NodeId(40)))
    );
}

#[test]
fn test_no_path_without_endpoints() {
    let (mut session, a, _, _) = triangle();

    assert!(session.records().unwrap().is_none());
    assert!(session.highlighted_path().unwrap().is_none());

    session.set_start(a).unwrap();
    assert!(session.records().unwrap().is_some());
    assert!(session.highlighted_path().unwrap().is_none());
}

#[test]
fn test_highlighted_path_follows_edits() {
    let (mut session, a, b, c) = triangle();
    session.set_start(a).unwrap();
    session.set_end(c).unwrap();

    let path = session.highlighted_path().unwrap().unwrap();
    assert_eq!(path.nodes(), vec![a, b, c]);
    assert_eq!(path.weight, OrderedFloat(11.0));
    assert!(session.has_cached_records());

    // The direct edge is shorter than the detour
    session.connect(a, c).unwrap();
    assert!(!session.has_cached_records());
    let path = session.highlighted_path().unwrap().unwrap();
    assert_eq!(path.nodes(), vec![a, c]);
    assert!((path.weight.into_inner() - 3.0f64.hypot(10.0)).abs() < 1e-12);

    session.disconnect(a, c).unwrap();
    let path = session.highlighted_path().unwrap().unwrap();
    assert_eq!(path.nodes(), vec![a, b, c]);
}

#[test]
fn test_moving_a_node_reweights_its_edges() {
    let (mut session, a, b, c) = triangle();
    session.set_start(a).unwrap();
    session.set_end(c).unwrap();
    session.highlighted_path().unwrap();

    session.move_node(b, Point::new(0.0, 5.0)).unwrap();
    assert!(!session.has_cached_records());
    assert_eq!(session.graph().get_edge_weight(a, b), Some(OrderedFloat(5.0)));
    assert_eq!(session.graph().get_edge_weight(b, c), Some(OrderedFloat(3.0f64.hypot(5.0))));

    let records = session.records().unwrap().unwrap();
    assert_eq!(records.distance(b), Some(OrderedFloat(5.0)));

    assert_eq!(
        session.move_node(NodeId(77), Point::new(1.0, 1.0)),
        Err(Error::InvalidVertex(NodeId(77)))
    );
}

#[test]
fn test_removing_nodes_clears_endpoints() {
    let (mut session, a, b, c) = triangle();
    session.set_start(a).unwrap();
    session.set_end(c).unwrap();

    session.remove_node(b).unwrap();
    assert_eq!(session.end(), Some(c));
    assert!(session.highlighted_path().unwrap().is_none());
    assert!(session.layout().position(b).is_none());

    session.remove_node(c).unwrap();
    assert_eq!(session.end(), None);
    session.remove_node(a).unwrap();
    assert_eq!(session.start(), None);
    assert!(session.records().unwrap().is_none());
}

#[test]
fn test_start_and_end_are_distinct() {
    let (mut session, a, b, _) = triangle();

    session.set_start(a).unwrap();
    session.set_end(b).unwrap();

    session.set_start(b).unwrap();
    assert_eq!(session.start(), Some(b));
    assert_eq!(session.end(), None);

    session.set_end(b).unwrap();
    assert_eq!(session.start(), None);
    assert_eq!(session.end(), Some(b));

    assert_eq!(session.set_start(NodeId(9)), Err(Error::InvalidStartNode(NodeId(9))));
}

#[test]
fn test_changing_only_the_end_keeps_records() {
    let (mut session, a, b, c) = triangle();
    session.set_start(a).unwrap();
    session.set_end(c).unwrap();
    session.highlighted_path().unwrap();

    session.set_end(b).unwrap();
    assert!(session.has_cached_records());
    let path = session.highlighted_path().unwrap().unwrap();
    assert_eq!(path.nodes(), vec![a, b]);
}

#[test]
fn test_invalid_positions_are_rejected() {
    let mut session = GraphSession::new();
    assert!(matches!(
        session.add_node(Point::new(f64::INFINITY, 0.0)),
        Err(Error::InvalidPosition(_, _))
    ));
    assert_eq!(session.graph().node_count(), 0);
}

#[test]
fn test_infinite_lengths_are_rejected() {
    let mut session = GraphSession::new();
    let a = session.add_node(Point::new(-1e308, 0.0)).unwrap();
    let b = session.add_node(Point::new(1e308, 0.0)).unwrap();
    let c = session.add_node(Point::new(0.0, 0.0)).unwrap();

    assert!(matches!(session.connect(a, b), Err(Error::InvalidWeight(w)) if w.is_infinite()));
    assert!(!session.graph().has_edge(a, b));

    // A move that would stretch an edge to infinity leaves the node in place
    session.connect(c, a).unwrap();
    assert!(matches!(
        session.move_node(c, Point::new(1e308, 0.0)),
        Err(Error::InvalidWeight(_))
    ));
    assert_eq!(session.layout().position(c), Some(Point::new(0.0, 0.0)));
    assert_eq!(session.graph().get_edge_weight(c, a), Some(OrderedFloat(1e308)));
}
