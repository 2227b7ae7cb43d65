#![forbid(unsafe_code)]

//! `graphbox` is a headless graph diagram editing engine.
//!
//! Knots and edges are edited through [`Graph`]; graphs persist as GraphML.
//!
//! # Features
//!
//! - `render`: enable SVG output (`graphbox::render`)

pub use graphbox_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use graphbox_render::{SvgRenderOptions, SvgSurface, render_svg};

    use graphbox_core::{Graph, GraphOptions};

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Graph(#[from] graphbox_core::Error),
        #[error(transparent)]
        Graphml(#[from] graphbox_core::GraphmlError),
        #[error(transparent)]
        Render(#[from] graphbox_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Parses GraphML and renders it as SVG in one step.
    pub fn render_graphml_svg(
        graphml: &str,
        graph_options: &GraphOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let graph = graphbox_core::parse_graphml(graphml, graph_options.clone())?;
        Ok(render_svg(&graph, svg_options))
    }

    /// Bundles graph and SVG options for repeated headless rendering.
    #[derive(Debug, Clone, Default)]
    pub struct HeadlessRenderer {
        pub graph: GraphOptions,
        pub svg: SvgRenderOptions,
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_graph_options(mut self, graph: GraphOptions) -> Self {
            self.graph = graph;
            self
        }

        pub fn with_svg_options(mut self, svg: SvgRenderOptions) -> Self {
            self.svg = svg;
            self
        }

        /// Replaces the SVG options with ones read from JSON (camelCase keys).
        pub fn with_svg_options_json(mut self, text: &str) -> Result<Self> {
            self.svg = SvgRenderOptions::from_json_str(text)?;
            Ok(self)
        }

        pub fn load(&self, graphml: &str) -> Result<Graph> {
            let mut graph =
                Graph::try_new(self.graph.clone()).map_err(graphbox_core::Error::from)?;
            graph.insert(graphml)?;
            Ok(graph)
        }

        pub fn render_graph(&self, graph: &Graph) -> String {
            render_svg(graph, &self.svg)
        }

        pub fn render_graphml(&self, graphml: &str) -> Result<String> {
            render_graphml_svg(graphml, &self.graph, &self.svg)
        }
    }
}
