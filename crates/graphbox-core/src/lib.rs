#![forbid(unsafe_code)]

//! Editing engine of the graphbox diagram editor.
//!
//! A [`Graph`] owns knots (labeled circles) and the edges between them, tracks selection,
//! answers hit-tests, applies batch mutations to the selection and persists itself as GraphML.
//! Rendering goes through the [`Surface`] trait so that any 2D backend can draw a graph.
//!
//! ```
//! use graphbox_core::{Graph, GraphOptions};
//!
//! let mut graph = Graph::new(GraphOptions::default());
//! let a = graph.add_knot_by_position(100.0, 100.0).unwrap();
//! let b = graph.add_knot_by_position(300.0, 100.0).unwrap();
//! graph.add_edge_by_indices(a, b).unwrap();
//! assert!(graph.select_edge_by_point(200.0, 103.0).is_some());
//! ```

pub mod edge;
pub mod error;
pub mod geom;
pub mod graph;
pub mod graphml;
pub mod ids;
pub mod knot;
pub mod options;
pub mod surface;
pub mod utils;
pub mod weight;

pub use edge::{Edge, EdgeGeometry, EdgeKind};
pub use error::{Error, GraphError, GraphmlError, OptionsError, Result};
pub use geom::{Point, Vector2, VectorExt};
pub use graph::{Boundary, Graph, Toggled};
pub use graphml::InsertReport;
pub use ids::{EdgeId, KnotId};
pub use knot::Knot;
pub use options::GraphOptions;
pub use surface::{DrawCommand, RecordingSurface, Surface, TextAlign, TextBaseline, TextStyle};
pub use weight::Weight;

/// Parses a GraphML document into a new graph configured with `options`.
pub fn parse_graphml(graphml: &str, options: GraphOptions) -> Result<Graph> {
    let mut graph = Graph::try_new(options)?;
    graph.insert(graphml)?;
    Ok(graph)
}
