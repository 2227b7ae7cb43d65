#![cfg(feature = "render")]

use graphbox::render::{HeadlessError, HeadlessRenderer, SvgRenderOptions};
use graphbox::{Graph, GraphOptions, GraphmlError};

fn sample_graphml() -> String {
    let mut g = Graph::default();
    let a = g.add_knot_by_position(100.0, 100.0).unwrap();
    let b = g.add_knot_by_position_and_name(300.0, 200.0, "sink").unwrap();
    g.add_edge_by_indices(a, b).unwrap();
    g.to_graphml()
}

#[test]
fn renders_graphml_to_well_formed_svg() {
    let svg = graphbox::render::render_graphml_svg(
        &sample_graphml(),
        &GraphOptions::default(),
        &SvgRenderOptions::default(),
    )
    .unwrap();

    let doc = roxmltree::Document::parse(&svg).unwrap();
    let root = doc.root_element();
    assert_eq!(root.tag_name().name(), "svg");
    assert_eq!(root.attribute("viewBox"), Some("0 0 800 600"));
    let texts: Vec<_> = doc
        .descendants()
        .filter(|n| n.has_tag_name("text"))
        .filter_map(|n| n.text())
        .collect();
    assert_eq!(texts, vec!["0", "sink"]);
}

#[test]
fn renderer_applies_its_options() {
    let renderer = HeadlessRenderer::new()
        .with_graph_options(GraphOptions {
            directed: true,
            ..Default::default()
        })
        .with_svg_options(SvgRenderOptions {
            background: None,
            ..Default::default()
        });
    let mut graph = renderer.load(&sample_graphml()).unwrap();
    assert!(graph.is_directed());
    // Edge flags come from the document until the graph flag is applied again.
    assert!(graph.edges().all(|e| !e.is_directed()));
    graph.set_directed(true);

    let svg = renderer.render_graph(&graph);
    assert!(!svg.contains("<rect"));
    assert!(svg.contains("<polygon"));
}

#[test]
fn svg_options_load_from_json() {
    let renderer = HeadlessRenderer::new()
        .with_svg_options_json(r#"{ "width": 320, "height": 240, "fontFamily": "serif" }"#)
        .unwrap();
    let svg = renderer.render_graphml(&sample_graphml()).unwrap();
    assert!(svg.contains(r#"viewBox="0 0 320 240""#));
    assert!(svg.contains(r#"font-family="serif""#));

    assert!(matches!(
        HeadlessRenderer::new().with_svg_options_json("{"),
        Err(HeadlessError::Render(_))
    ));
}

#[test]
fn malformed_input_surfaces_as_graph_error() {
    let err = HeadlessRenderer::new().render_graphml("<graphml>").unwrap_err();
    assert!(matches!(
        err,
        HeadlessError::Graph(graphbox::Error::Graphml(GraphmlError::Xml(_)))
    ));
}
