use graphbox_core::{Graph, GraphOptions};
use graphbox_render::{SvgRenderOptions, render_svg};

fn sample() -> Graph {
    let mut g = Graph::new(GraphOptions {
        directed: true,
        weighted: true,
        ..Default::default()
    });
    let a = g.add_knot_by_position(100.0, 100.0).unwrap();
    let b = g.add_knot_by_position(300.0, 100.0).unwrap();
    g.add_edge_by_weight(a, b, 5).unwrap();
    g
}

#[test]
fn document_uses_canvas_size_and_background() {
    let svg = render_svg(&sample(), &SvgRenderOptions::default());
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="600" viewBox="0 0 800 600">"#));
    assert!(svg.contains(r#"<rect x="0" y="0" width="100%" height="100%" fill="white"/>"#));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn edges_come_before_knots() {
    let svg = render_svg(&sample(), &SvgRenderOptions::default());
    let line = svg.find("<line").unwrap();
    let arrow = svg.find("<polygon").unwrap();
    let knot = svg.find("<circle").unwrap();
    assert!(line < knot);
    assert!(arrow < knot);
    assert!(svg.contains(r#"<line x1="120" y1="100" x2="280" y2="100" stroke="rgba(0,0,0,1)" stroke-width="1"/>"#));
    assert_eq!(svg.matches("<circle").count(), 4);
    assert!(svg.contains(">5</text>"));
}

#[test]
fn options_override_size_and_drop_background() {
    let options = SvgRenderOptions::from_json_str(r#"{ "background": null, "width": 400 }"#).unwrap();
    let svg = render_svg(&sample(), &options);
    assert!(svg.contains(r#"width="400" height="600""#));
    assert!(!svg.contains("<rect"));
}
