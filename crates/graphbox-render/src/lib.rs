#![forbid(unsafe_code)]

//! SVG output for graphbox graphs.
//!
//! [`SvgSurface`] implements the core [`Surface`](graphbox_core::Surface) contract by emitting
//! SVG elements; [`render_svg`] wraps a whole graph into a standalone document.

pub mod svg;

use graphbox_core::Graph;
use serde::{Deserialize, Serialize};

pub use svg::SvgSurface;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("render options JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SvgRenderOptions {
    /// Fill of a full-size rectangle behind the graph. `None` leaves the canvas transparent.
    pub background: Option<String>,
    /// Overrides the graph's canvas width.
    pub width: Option<f64>,
    /// Overrides the graph's canvas height.
    pub height: Option<f64>,
    pub font_family: String,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            background: Some("white".to_string()),
            width: None,
            height: None,
            font_family: "sans-serif".to_string(),
        }
    }
}

impl SvgRenderOptions {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Renders the graph (edges first, knots on top) as a standalone SVG document.
pub fn render_svg(graph: &Graph, options: &SvgRenderOptions) -> String {
    let (canvas_width, canvas_height) = graph.canvas_size();
    let width = options.width.unwrap_or(canvas_width);
    let height = options.height.unwrap_or(canvas_height);

    let mut surface = SvgSurface::new(&options.font_family);
    graph.render(&mut surface);
    let svg = surface.finish(width, height, options.background.as_deref());
    tracing::debug!(
        knots = graph.knot_count(),
        edges = graph.edge_count(),
        bytes = svg.len(),
        "rendered svg"
    );
    svg
}
