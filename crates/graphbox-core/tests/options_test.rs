use graphbox_core::{Error, Graph, GraphOptions, OptionsError, parse_graphml};

#[test]
fn partial_json_keeps_defaults() {
    let options = GraphOptions::from_json_str(r#"{ "directed": true, "knotRadius": 25 }"#).unwrap();
    assert!(options.directed);
    assert!(!options.weighted);
    assert_eq!(options.knot_radius, 25.0);
    assert_eq!(options.hit_tolerance, 8.0);
    assert_eq!((options.canvas_width, options.canvas_height), (800.0, 600.0));

    let mut g = Graph::new(options);
    let k = g.add_knot_by_position(50.0, 50.0).unwrap();
    assert_eq!(g.knot(k).unwrap().r, 25.0);
}

#[test]
fn invalid_options_are_rejected() {
    assert!(matches!(
        GraphOptions::from_json_str(r#"{ "canvasWidth": 0 }"#),
        Err(OptionsError::NotPositive { field: "canvasWidth", .. })
    ));
    assert!(matches!(
        GraphOptions::from_json_str("{ directed: yes }"),
        Err(OptionsError::Json(_))
    ));
}

#[test]
fn options_round_trip_through_json() {
    let options = GraphOptions {
        weighted: true,
        hit_tolerance: 4.0,
        ..Default::default()
    };
    let text = options.to_json_string();
    assert!(text.contains("\"hitTolerance\""));
    assert_eq!(GraphOptions::from_json_str(&text).unwrap(), options);
}

#[test]
fn checked_construction_rejects_unusable_options() {
    let zero_radius = GraphOptions {
        knot_radius: 0.0,
        ..Default::default()
    };
    assert!(matches!(
        Graph::try_new(zero_radius.clone()),
        Err(OptionsError::NotPositive { field: "knotRadius", .. })
    ));
    assert!(matches!(
        parse_graphml("<graphml><graph/></graphml>", zero_radius),
        Err(Error::Options(_))
    ));

    let flat = GraphOptions {
        canvas_height: -1.0,
        ..Default::default()
    };
    assert!(Graph::try_new(flat).is_err());
    assert!(Graph::try_new(GraphOptions::default()).unwrap().is_empty());
}
