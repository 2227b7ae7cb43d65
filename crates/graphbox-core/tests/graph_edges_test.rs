use graphbox_core::edge::DEFAULT_EDGE_COLOR;
use graphbox_core::{EdgeId, EdgeKind, Graph, GraphError, GraphOptions, KnotId, Weight};

fn two_knots(options: GraphOptions) -> (Graph, usize, usize) {
    let mut g = Graph::new(options);
    let a = g.add_knot_by_position(100.0, 100.0).unwrap();
    let b = g.add_knot_by_position(300.0, 100.0).unwrap();
    (g, a, b)
}

#[test]
fn first_edge_between_a_pair_is_plain() {
    let (mut g, a, b) = two_knots(GraphOptions::default());
    let id = g.add_edge(a, b, 4, DEFAULT_EDGE_COLOR, false, true).unwrap();

    let edge = g.edge(id).unwrap();
    assert_eq!(edge.kind(), EdgeKind::Plain);
    assert_eq!(edge.type_name(), "normalEdge");
    assert_eq!(edge.start(), g.knot(a).unwrap().id());
    assert_eq!(edge.end(), g.knot(b).unwrap().id());
    assert_eq!(edge.weight, Weight::Number(4.0));
    assert!(edge.is_weighted());
    assert!(!edge.is_directed());
}

#[test]
fn opposite_directed_request_pairs_half_edges_and_third_is_rejected() {
    let (mut g, a, b) = two_knots(GraphOptions::default());
    let first = g.add_edge(a, b, 1, DEFAULT_EDGE_COLOR, true, false).unwrap();
    let second = g.add_edge(b, a, 2, DEFAULT_EDGE_COLOR, true, false).unwrap();

    assert_eq!(g.edge(first).unwrap().brother_id(), Some(second));
    assert_eq!(g.edge(second).unwrap().brother_id(), Some(first));
    assert_eq!(g.edge(first).unwrap().type_name(), "halfEdge");

    assert_eq!(
        g.add_edge(a, b, 3, DEFAULT_EDGE_COLOR, true, false),
        Err(GraphError::EdgePairSaturated { start: a, end: b })
    );
    assert_eq!(
        g.add_edge(b, a, 3, DEFAULT_EDGE_COLOR, false, false),
        Err(GraphError::EdgePairSaturated { start: b, end: a })
    );
    assert_eq!(g.edge_count(), 2);
}

#[test]
fn undirected_request_places_half_edge_opposite_the_existing_one() {
    let (mut g, a, b) = two_knots(GraphOptions::default());
    let first = g.add_edge_by_indices(a, b).unwrap();
    let second = g.add_edge_by_indices(a, b).unwrap();

    let knot_a = g.knot(a).unwrap().id();
    let knot_b = g.knot(b).unwrap().id();
    let half = g.edge(second).unwrap();
    assert_eq!((half.start(), half.end()), (knot_b, knot_a));
    assert_eq!(half.brother_id(), Some(first));
    assert_eq!(g.edge(first).unwrap().brother_id(), Some(second));
}

#[test]
fn directed_request_running_the_same_way_is_rejected() {
    let (mut g, a, b) = two_knots(GraphOptions::default());
    g.add_edge(a, b, 0, DEFAULT_EDGE_COLOR, true, false).unwrap();
    assert_eq!(
        g.add_edge(a, b, 0, DEFAULT_EDGE_COLOR, true, false),
        Err(GraphError::DuplicateEdge { start: a, end: b })
    );
    assert_eq!(g.edge_count(), 1);
}

#[test]
fn pairing_is_drawn_on_both_sides_of_the_center_line() {
    let (mut g, a, b) = two_knots(GraphOptions::default());
    let first = g.add_edge(a, b, 0, DEFAULT_EDGE_COLOR, true, false).unwrap();
    let second = g.add_edge(b, a, 0, DEFAULT_EDGE_COLOR, true, false).unwrap();

    assert!(g.edge(first).unwrap().geometry().start.y < 100.0);
    assert!(g.edge(second).unwrap().geometry().start.y > 100.0);
    assert_eq!(g.edge_id_by_point(200.0, 94.0), Some(first));
    assert_eq!(g.edge_id_by_point(200.0, 106.0), Some(second));
}

#[test]
fn self_loops_and_bad_indices_are_rejected() {
    let (mut g, a, _) = two_knots(GraphOptions::default());
    assert_eq!(
        g.add_edge_by_indices(a, a),
        Err(GraphError::SelfLoop { index: a })
    );
    assert_eq!(
        g.add_edge_by_indices(a, 7),
        Err(GraphError::KnotIndexOutOfRange { index: 7, len: 2 })
    );
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn graph_flags_apply_to_convenience_adds() {
    let (mut g, a, b) = two_knots(GraphOptions {
        directed: true,
        weighted: true,
        ..Default::default()
    });
    let id = g.add_edge_by_weight(a, b, "heavy").unwrap();
    let edge = g.edge(id).unwrap();
    assert!(edge.is_directed());
    assert!(edge.is_weighted());
    assert_eq!(edge.weight, Weight::Label("heavy".to_string()));
    assert_eq!(edge.color, DEFAULT_EDGE_COLOR);
}

#[test]
fn removing_a_half_edge_turns_its_brother_plain() {
    let (mut g, a, b) = two_knots(GraphOptions::default());
    let first = g.add_edge(a, b, 0, DEFAULT_EDGE_COLOR, true, false).unwrap();
    let second = g.add_edge(b, a, 0, DEFAULT_EDGE_COLOR, true, false).unwrap();

    let removed = g.remove_edge(second).unwrap();
    assert_eq!(removed.id(), second);

    let survivor = g.edge(first).unwrap();
    assert_eq!(survivor.kind(), EdgeKind::Plain);
    assert_eq!(survivor.geometry().start.y, 100.0);
    assert!(g.remove_edge(second).is_none());
}

#[test]
fn removing_selected_edges_repairs_surviving_brothers() {
    let (mut g, a, b) = two_knots(GraphOptions::default());
    let first = g.add_edge(a, b, 0, DEFAULT_EDGE_COLOR, true, false).unwrap();
    let second = g.add_edge(b, a, 0, DEFAULT_EDGE_COLOR, true, false).unwrap();

    assert_eq!(g.select_edge_by_point(200.0, 106.0), Some(second));
    assert_eq!(g.remove_edges_by_selection(), 1);
    assert_eq!(g.selected_edge_count(), 0);
    assert_eq!(g.edge(first).unwrap().brother_id(), None);

    // The pair has room for a half edge again.
    g.add_edge(b, a, 0, DEFAULT_EDGE_COLOR, true, false).unwrap();
    assert_eq!(g.edge_count(), 2);
}

#[test]
fn explicit_ids_are_unique_and_advance_the_sequence() {
    let (mut g, a, b) = two_knots(GraphOptions::default());
    let id = EdgeId(500);
    assert_eq!(
        g.add_edge_with_id(a, b, id, 1, DEFAULT_EDGE_COLOR, false, false),
        Ok(id)
    );
    assert_eq!(
        g.add_edge_with_id(b, a, id, 1, DEFAULT_EDGE_COLOR, false, false),
        Err(GraphError::DuplicateEdgeId(id))
    );

    let c = g.add_knot_by_position(500.0, 100.0).unwrap();
    assert_eq!(g.knot(c).unwrap().id(), KnotId(501));
}

#[test]
fn remove_all_edges_keeps_knots() {
    let (mut g, a, b) = two_knots(GraphOptions::default());
    let id = g.add_edge_by_indices(a, b).unwrap();
    g.select_edge_by_point(200.0, 100.0);
    assert!(g.edge(id).unwrap().is_selected());

    g.remove_all_edges();
    assert_eq!(g.edge_count(), 0);
    assert_eq!(g.selected_edge_count(), 0);
    assert_eq!(g.knot_count(), 2);
}
