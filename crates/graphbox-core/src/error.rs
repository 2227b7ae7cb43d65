use crate::ids::{EdgeId, KnotId};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Graphml(#[from] GraphmlError),

    #[error(transparent)]
    Options(#[from] OptionsError),
}

/// A rejected graph mutation. The graph is left unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("knot index {index} is out of range (graph has {len} knots)")]
    KnotIndexOutOfRange { index: usize, len: usize },

    #[error("invalid knot radius: {radius}")]
    InvalidRadius { radius: f64 },

    #[error("invalid knot position: ({x}, {y})")]
    InvalidPosition { x: f64, y: f64 },

    #[error("knot id {0} is already in use")]
    DuplicateKnotId(KnotId),

    #[error("edge id {0} is already in use")]
    DuplicateEdgeId(EdgeId),

    #[error("an edge cannot connect knot {index} to itself")]
    SelfLoop { index: usize },

    #[error("an edge from knot {start} to knot {end} already exists")]
    DuplicateEdge { start: usize, end: usize },

    #[error("knots {start} and {end} are already joined by two half edges")]
    EdgePairSaturated { start: usize, end: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum GraphmlError {
    #[error("malformed GraphML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("<{element}> is missing the `{attribute}` attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("<{element}> is missing data key `{key}`")]
    MissingData { element: String, key: &'static str },

    #[error("data key `{key}` holds an invalid number: {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("data key `{key}` holds an invalid boolean: {value:?}")]
    InvalidBool { key: &'static str, value: String },

    #[error("edge references unknown node `{id}`")]
    UnknownNode { id: String },

    #[error("node id `{id}` appears more than once")]
    DuplicateNode { id: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("invalid graph options JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("graph option `{field}` must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
}
