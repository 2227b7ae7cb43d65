//! GraphML persistence.
//!
//! The dialect is fixed: fourteen `<key>` declarations (`d0`..`d13`), knots as
//! `<node id="n<index>">` and edges as `<edge id="e<index>" source=".." target="..">`, every
//! attribute stored as `<data key="..">`. Element ids are positional and unrelated to the
//! knot/edge identities, which travel in `d1`/`d8`.

use std::fmt::Write as _;
use std::ops::Range;

use rustc_hash::FxBuildHasher;

use crate::edge::{DEFAULT_EDGE_COLOR, Edge, HALF_EDGE_TYPE};
use crate::error::GraphmlError;
use crate::graph::Graph;
use crate::ids::{EdgeId, KnotId};
use crate::knot::{DEFAULT_KNOT_COLOR, Knot};
use crate::utils::{escape_xml_into, fmt_number};
use crate::weight::Weight;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";

const KEY_NODE_TYPE: &str = "d0";
const KEY_NODE_ID: &str = "d1";
const KEY_NODE_NAME: &str = "d2";
const KEY_NODE_X: &str = "d3";
const KEY_NODE_Y: &str = "d4";
const KEY_NODE_RADIUS: &str = "d5";
const KEY_NODE_COLOR: &str = "d6";
const KEY_EDGE_TYPE: &str = "d7";
const KEY_EDGE_ID: &str = "d8";
const KEY_EDGE_BROTHER: &str = "d9";
const KEY_EDGE_WEIGHT: &str = "d10";
const KEY_EDGE_COLOR: &str = "d11";
const KEY_EDGE_DIRECTED: &str = "d12";
const KEY_EDGE_WEIGHTED: &str = "d13";

/// `(id, for, attr.name, attr.type)`
const KEYS: [(&str, &str, &str, &str); 14] = [
    (KEY_NODE_TYPE, "node", "type", "string"),
    (KEY_NODE_ID, "node", "id", "long"),
    (KEY_NODE_NAME, "node", "name", "string"),
    (KEY_NODE_X, "node", "x", "double"),
    (KEY_NODE_Y, "node", "y", "double"),
    (KEY_NODE_RADIUS, "node", "radius", "double"),
    (KEY_NODE_COLOR, "node", "color", "string"),
    (KEY_EDGE_TYPE, "edge", "type", "string"),
    (KEY_EDGE_ID, "edge", "id", "long"),
    (KEY_EDGE_BROTHER, "edge", "brotherId", "long"),
    (KEY_EDGE_WEIGHT, "edge", "weight", "string"),
    (KEY_EDGE_COLOR, "edge", "color", "string"),
    (KEY_EDGE_DIRECTED, "edge", "directed", "boolean"),
    (KEY_EDGE_WEIGHTED, "edge", "weighted", "boolean"),
];

/// What [`Graph::insert`] added.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InsertReport {
    /// Indices of the inserted knots (always contiguous at the end of the knot list).
    pub knots: Range<usize>,
    /// Ids of the inserted edges, in document order.
    pub edges: Vec<EdgeId>,
}

impl Graph {
    pub fn to_graphml(&self) -> String {
        self.write_graphml(|_| true)
    }

    /// Selected knots plus every edge whose two endpoints are selected.
    pub fn selection_to_graphml(&self) -> String {
        self.write_graphml(Knot::is_selected)
    }

    fn write_graphml(&self, include: impl Fn(&Knot) -> bool) -> String {
        let mut out = String::with_capacity(512 + 256 * (self.knots.len() + self.edges.len()));
        out.push_str(XML_DECLARATION);
        let _ = write!(out, r#"<graphml xmlns="{GRAPHML_NS}">"#);
        for (id, domain, name, ty) in KEYS {
            let _ = write!(
                out,
                r#"<key id="{id}" for="{domain}" attr.name="{name}" attr.type="{ty}"/>"#
            );
        }
        let edge_default = if self.is_directed() {
            "directed"
        } else {
            "undirected"
        };
        let _ = write!(out, r#"<graph id="G" edgedefault="{edge_default}">"#);

        let mut positions: HashMap<KnotId, usize> = HashMap::default();
        for (index, knot) in self.knots.iter().enumerate() {
            if !include(knot) {
                continue;
            }
            positions.insert(knot.id(), index);
            write_knot(&mut out, index, knot);
        }
        for (index, edge) in self.edges.values().enumerate() {
            let (Some(&source), Some(&target)) =
                (positions.get(&edge.start()), positions.get(&edge.end()))
            else {
                continue;
            };
            write_edge(&mut out, index, source, target, edge);
        }

        out.push_str("</graph></graphml>");
        out
    }

    /// Adds the knots and edges of a GraphML document to this graph.
    ///
    /// Knots get fresh identities. Edge ids are remapped to fresh ids as well, with brother
    /// references following the same mapping; half edges whose brother is missing or does not
    /// point back become plain edges. A second edge on a knot pair is paired with the first as
    /// opposing half edges and further edges on that pair are dropped. Knots created before an
    /// error stay in the graph.
    pub fn insert(&mut self, graphml: &str) -> Result<InsertReport, GraphmlError> {
        let doc = roxmltree::Document::parse(graphml)?;
        let first = self.knots.len();

        let mut node_index: HashMap<&str, usize> = HashMap::default();
        for node in doc.descendants().filter(|n| n.has_tag_name("node")) {
            let doc_id = node
                .attribute("id")
                .ok_or(GraphmlError::MissingAttribute {
                    element: "node",
                    attribute: "id",
                })?;
            if node_index.contains_key(doc_id) {
                return Err(GraphmlError::DuplicateNode {
                    id: doc_id.to_string(),
                });
            }
            let data = DataFields::of(node);
            let x = data.number("node", KEY_NODE_X)?;
            let y = data.number("node", KEY_NODE_Y)?;
            let r = data.number("node", KEY_NODE_RADIUS)?;
            let name = data.text(KEY_NODE_NAME).unwrap_or_default();
            let color = data.text(KEY_NODE_COLOR).unwrap_or(DEFAULT_KNOT_COLOR);
            let index = self.add_knot(x, y, r, name, color)?;
            node_index.insert(doc_id, index);
        }

        let mut parsed = Vec::new();
        for element in doc.descendants().filter(|n| n.has_tag_name("edge")) {
            parsed.push(self.parse_edge(element, &node_index)?);
        }

        let mut fresh: HashMap<u64, EdgeId> = HashMap::default();
        let assigned: Vec<EdgeId> = parsed
            .iter()
            .map(|p| {
                let id = self.ids.edge();
                if let Some(raw) = p.id {
                    fresh.insert(raw, id);
                }
                id
            })
            .collect();

        let mut edges = Vec::with_capacity(parsed.len());
        for (p, id) in parsed.into_iter().zip(assigned) {
            let brother = if p.half {
                p.brother.and_then(|raw| fresh.get(&raw).copied())
            } else {
                None
            };
            if p.half && brother.is_none() {
                tracing::warn!(edge = %id, "half edge without a resolvable brother");
            }
            let restored = self.restore_edge(
                p.start, p.end, id, brother, p.weight, &p.color, p.directed, p.weighted,
            )?;
            edges.extend(restored);
        }
        self.repair_half_edges();

        let report = InsertReport {
            knots: first..self.knots.len(),
            edges,
        };
        tracing::debug!(
            knots = report.knots.len(),
            edges = report.edges.len(),
            "inserted GraphML"
        );
        Ok(report)
    }

    fn parse_edge(
        &self,
        element: roxmltree::Node<'_, '_>,
        node_index: &HashMap<&str, usize>,
    ) -> Result<ParsedEdge, GraphmlError> {
        let endpoint = |attribute: &'static str| -> Result<usize, GraphmlError> {
            let id = element
                .attribute(attribute)
                .ok_or(GraphmlError::MissingAttribute {
                    element: "edge",
                    attribute,
                })?;
            node_index
                .get(id)
                .copied()
                .ok_or_else(|| GraphmlError::UnknownNode { id: id.to_string() })
        };
        let start = endpoint("source")?;
        let end = endpoint("target")?;

        let data = DataFields::of(element);
        Ok(ParsedEdge {
            start,
            end,
            id: data.integer(KEY_EDGE_ID)?,
            brother: data.integer(KEY_EDGE_BROTHER)?,
            half: data.text(KEY_EDGE_TYPE) == Some(HALF_EDGE_TYPE),
            weight: data.text(KEY_EDGE_WEIGHT).map(Weight::parse).unwrap_or_default(),
            color: data
                .text(KEY_EDGE_COLOR)
                .unwrap_or(DEFAULT_EDGE_COLOR)
                .to_string(),
            directed: data.flag(KEY_EDGE_DIRECTED)?.unwrap_or(self.is_directed()),
            weighted: data.flag(KEY_EDGE_WEIGHTED)?.unwrap_or(self.is_weighted()),
        })
    }

    /// GraphML of the current selection, for a later [`Graph::paste`].
    pub fn copy_selection(&self) -> String {
        self.selection_to_graphml()
    }

    /// Inserts `graphml`, moves the new knots by `(dx, dy)` and leaves exactly them selected.
    pub fn paste(&mut self, graphml: &str, dx: f64, dy: f64) -> Result<InsertReport, GraphmlError> {
        self.deselect_all();
        let report = self.insert(graphml)?;
        for index in report.knots.clone() {
            self.select_knot_by_index(index);
        }
        self.translate_knots_by_selection(dx, dy);
        Ok(report)
    }
}

struct ParsedEdge {
    start: usize,
    end: usize,
    id: Option<u64>,
    brother: Option<u64>,
    half: bool,
    weight: Weight,
    color: String,
    directed: bool,
    weighted: bool,
}

/// `<data key="..">` children of one element, looked up by key.
struct DataFields<'a> {
    values: HashMap<&'a str, &'a str>,
}

impl<'a> DataFields<'a> {
    fn of(node: roxmltree::Node<'a, '_>) -> Self {
        let values = node
            .children()
            .filter(|c| c.has_tag_name("data"))
            .filter_map(|c| Some((c.attribute("key")?, c.text().unwrap_or_default())))
            .collect();
        Self { values }
    }

    fn text(&self, key: &str) -> Option<&'a str> {
        self.values.get(key).copied()
    }

    fn number(&self, element: &str, key: &'static str) -> Result<f64, GraphmlError> {
        let raw = self.text(key).ok_or_else(|| GraphmlError::MissingData {
            element: element.to_string(),
            key,
        })?;
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(GraphmlError::InvalidNumber {
                key,
                value: raw.to_string(),
            }),
        }
    }

    fn integer(&self, key: &'static str) -> Result<Option<u64>, GraphmlError> {
        let Some(raw) = self.text(key) else {
            return Ok(None);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed
            .parse::<u64>()
            .map(Some)
            .map_err(|_| GraphmlError::InvalidNumber {
                key,
                value: raw.to_string(),
            })
    }

    fn flag(&self, key: &'static str) -> Result<Option<bool>, GraphmlError> {
        let Some(raw) = self.text(key) else {
            return Ok(None);
        };
        match raw.trim() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            _ => Err(GraphmlError::InvalidBool {
                key,
                value: raw.to_string(),
            }),
        }
    }
}

fn push_data(out: &mut String, key: &str, value: &str) {
    let _ = write!(out, r#"<data key="{key}">"#);
    escape_xml_into(out, value);
    out.push_str("</data>");
}

fn write_knot(out: &mut String, index: usize, knot: &Knot) {
    let _ = write!(out, r#"<node id="n{index}">"#);
    push_data(out, KEY_NODE_TYPE, knot.type_name());
    push_data(out, KEY_NODE_ID, &knot.id().to_string());
    push_data(out, KEY_NODE_NAME, &knot.name);
    push_data(out, KEY_NODE_X, &fmt_number(knot.x));
    push_data(out, KEY_NODE_Y, &fmt_number(knot.y));
    push_data(out, KEY_NODE_RADIUS, &fmt_number(knot.r));
    push_data(out, KEY_NODE_COLOR, &knot.fill_color);
    out.push_str("</node>");
}

fn write_edge(out: &mut String, index: usize, source: usize, target: usize, edge: &Edge) {
    let _ = write!(
        out,
        r#"<edge id="e{index}" source="n{source}" target="n{target}">"#
    );
    push_data(out, KEY_EDGE_TYPE, edge.type_name());
    push_data(out, KEY_EDGE_ID, &edge.id().to_string());
    if let Some(brother) = edge.brother_id() {
        push_data(out, KEY_EDGE_BROTHER, &brother.to_string());
    }
    push_data(out, KEY_EDGE_WEIGHT, &edge.weight.to_string());
    push_data(out, KEY_EDGE_COLOR, &edge.color);
    push_data(out, KEY_EDGE_DIRECTED, bool_str(edge.is_directed()));
    push_data(out, KEY_EDGE_WEIGHTED, bool_str(edge.is_weighted()));
    out.push_str("</edge>");
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
