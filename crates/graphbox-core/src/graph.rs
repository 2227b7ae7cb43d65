//! The editable graph: knots, edges, selection and mutation.
//!
//! `Graph` owns every [`Knot`] and [`Edge`]. Knots keep insertion order, which is also drawing
//! order and serialization order. Edges live in an insertion-ordered arena keyed by [`EdgeId`];
//! they refer to knots by [`KnotId`] and to their half-edge brother by [`EdgeId`].
//!
//! Between two distinct knots there is either no edge, one plain edge, or two half edges that
//! name each other as brothers. Every public operation keeps that invariant, keeps the selected
//! counts exact and keeps cached edge geometry in sync with knot positions and radii.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::edge::{Edge, EdgeKind};
use crate::error::{GraphError, OptionsError};
use crate::ids::{EdgeId, IdSequence, KnotId};
use crate::knot::{DEFAULT_KNOT_COLOR, Knot};
use crate::options::GraphOptions;
use crate::surface::Surface;

mod edges;
mod mutate;
mod selection;

pub use mutate::Boundary;
pub use selection::Toggled;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

pub(crate) type EdgeTable = IndexMap<EdgeId, Edge, FxBuildHasher>;

#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) options: GraphOptions,
    pub(crate) ids: IdSequence,
    next_knot_name: u64,
    pub(crate) knots: Vec<Knot>,
    pub(crate) edges: EdgeTable,
    selected_knots: usize,
    selected_edges: usize,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(GraphOptions::default())
    }
}

impl Graph {
    /// Creates an empty graph with the options as given. Options that fail
    /// [`GraphOptions::validate`] leave every default-radius add failing; use [`Graph::try_new`]
    /// for options from outside the program.
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            ids: IdSequence::default(),
            next_knot_name: 0,
            knots: Vec::new(),
            edges: EdgeTable::default(),
            selected_knots: 0,
            selected_edges: 0,
        }
    }

    pub fn try_new(options: GraphOptions) -> Result<Self, OptionsError> {
        options.validate()?;
        Ok(Self::new(options))
    }

    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    pub fn is_directed(&self) -> bool {
        self.options.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.options.weighted
    }

    pub fn knot_radius(&self) -> f64 {
        self.options.knot_radius
    }

    pub fn hit_tolerance(&self) -> f64 {
        self.options.hit_tolerance
    }

    pub fn canvas_size(&self) -> (f64, f64) {
        (self.options.canvas_width, self.options.canvas_height)
    }

    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    pub fn knot_count(&self) -> usize {
        self.knots.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn selected_knot_count(&self) -> usize {
        self.selected_knots
    }

    pub fn selected_edge_count(&self) -> usize {
        self.selected_edges
    }

    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    pub fn knot(&self, index: usize) -> Option<&Knot> {
        self.knots.get(index)
    }

    pub fn knot_index(&self, id: KnotId) -> Option<usize> {
        self.knots.iter().position(|k| k.id() == id)
    }

    pub fn knot_by_id(&self, id: KnotId) -> Option<&Knot> {
        self.knots.iter().find(|k| k.id() == id)
    }

    /// Index of the top-most knot containing the point.
    pub fn knot_index_by_point(&self, x: f64, y: f64) -> Option<usize> {
        self.knots.iter().rposition(|k| k.contains(x, y))
    }

    pub fn edges(&self) -> impl DoubleEndedIterator<Item = &Edge> + ExactSizeIterator + '_ {
        self.edges.values()
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Edges joining the two knots, in either direction.
    pub fn edges_between(&self, a: usize, b: usize) -> Vec<&Edge> {
        let (Some(a), Some(b)) = (self.knots.get(a), self.knots.get(b)) else {
            return Vec::new();
        };
        let (a, b) = (a.id(), b.id());
        self.edges.values().filter(|e| e.connects(a, b)).collect()
    }

    pub fn add_knot(
        &mut self,
        x: f64,
        y: f64,
        r: f64,
        name: impl Into<String>,
        fill_color: impl Into<String>,
    ) -> Result<usize, GraphError> {
        let mut knot = validated_knot(x, y, r, name.into(), fill_color.into())?;
        knot.set_id(self.ids.knot());
        Ok(self.push_knot(knot))
    }

    /// Adds a knot at the position with the default radius and color, named after an internal
    /// counter.
    pub fn add_knot_by_position(&mut self, x: f64, y: f64) -> Result<usize, GraphError> {
        let name = self.next_knot_name.to_string();
        let index = self.add_knot_by_position_and_name(x, y, name)?;
        self.next_knot_name += 1;
        Ok(index)
    }

    pub fn add_knot_by_position_and_name(
        &mut self,
        x: f64,
        y: f64,
        name: impl Into<String>,
    ) -> Result<usize, GraphError> {
        self.add_knot(x, y, self.options.knot_radius, name, DEFAULT_KNOT_COLOR)
    }

    /// Adds a knot that keeps a previously assigned identity.
    pub fn add_knot_with_id(
        &mut self,
        id: KnotId,
        x: f64,
        y: f64,
        r: f64,
        name: impl Into<String>,
        fill_color: impl Into<String>,
    ) -> Result<usize, GraphError> {
        if self.knot_by_id(id).is_some() {
            return Err(GraphError::DuplicateKnotId(id));
        }
        let mut knot = validated_knot(x, y, r, name.into(), fill_color.into())?;
        knot.set_id(id);
        self.ids.observe(id.0);
        Ok(self.push_knot(knot))
    }

    fn push_knot(&mut self, knot: Knot) -> usize {
        let index = self.knots.len();
        tracing::debug!(index, id = %knot.id(), x = knot.x, y = knot.y, "added knot");
        self.knots.push(knot);
        index
    }

    /// Removes the knot and every edge touching it.
    pub fn remove_knot_by_index(&mut self, index: usize) -> Result<Knot, GraphError> {
        self.check_index(index)?;
        let knot = self.knots.remove(index);
        if knot.is_selected() {
            self.selected_knots -= 1;
        }
        let mut removed: HashSet<KnotId> = HashSet::default();
        removed.insert(knot.id());
        let edges = self.drop_edges_touching(&removed);
        tracing::debug!(index, id = %knot.id(), edges, "removed knot");
        Ok(knot)
    }

    /// Removes every selected knot and the edges touching them. Returns the number of knots
    /// removed.
    pub fn remove_knots_by_selection(&mut self) -> usize {
        let removed: HashSet<KnotId> = self
            .knots
            .iter()
            .filter(|k| k.is_selected())
            .map(Knot::id)
            .collect();
        if removed.is_empty() {
            return 0;
        }
        self.knots.retain(|k| !k.is_selected());
        self.selected_knots = 0;
        let edges = self.drop_edges_touching(&removed);
        tracing::debug!(knots = removed.len(), edges, "removed selected knots");
        removed.len()
    }

    pub fn remove_all_knots(&mut self) {
        self.knots.clear();
        self.edges.clear();
        self.selected_knots = 0;
        self.selected_edges = 0;
    }

    /// Removes everything and restarts knot naming. Identities are never reused.
    pub fn clear(&mut self) {
        self.remove_all_knots();
        self.next_knot_name = 0;
    }

    fn drop_edges_touching(&mut self, knots: &HashSet<KnotId>) -> usize {
        let before = self.edges.len();
        let mut selected = 0usize;
        self.edges.retain(|_, e| {
            let keep = !knots.contains(&e.start()) && !knots.contains(&e.end());
            if !keep && e.is_selected() {
                selected += 1;
            }
            keep
        });
        self.selected_edges -= selected;
        let dropped = before - self.edges.len();
        if dropped > 0 {
            self.repair_half_edges();
        }
        dropped
    }

    /// Draws every edge, then every knot on top.
    pub fn render(&self, surface: &mut dyn Surface) {
        for edge in self.edges.values() {
            edge.render(surface);
        }
        for knot in &self.knots {
            knot.render(surface);
        }
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<(), GraphError> {
        if index < self.knots.len() {
            Ok(())
        } else {
            Err(GraphError::KnotIndexOutOfRange {
                index,
                len: self.knots.len(),
            })
        }
    }

    /// Recomputes the geometry of every edge for which `filter` returns true.
    pub(crate) fn refresh_edges(&mut self, filter: impl Fn(&Edge) -> bool) {
        let by_id: HashMap<KnotId, &Knot> = self.knots.iter().map(|k| (k.id(), k)).collect();
        for edge in self.edges.values_mut() {
            if !filter(edge) {
                continue;
            }
            if let (Some(start), Some(end)) = (by_id.get(&edge.start()), by_id.get(&edge.end())) {
                edge.update(start, end);
            }
        }
    }

    pub(crate) fn refresh_edge(&mut self, id: EdgeId) {
        let Some(edge) = self.edges.get_mut(&id) else {
            return;
        };
        let start = self.knots.iter().find(|k| k.id() == edge.start());
        let end = self.knots.iter().find(|k| k.id() == edge.end());
        if let (Some(start), Some(end)) = (start, end) {
            edge.update(start, end);
        }
    }

    pub(crate) fn refresh_edges_touching(&mut self, knots: &HashSet<KnotId>) {
        self.refresh_edges(|e| knots.contains(&e.start()) || knots.contains(&e.end()));
    }

    /// Turns every half edge whose brother is gone, does not point back or does not run the
    /// opposite way into a plain edge.
    /// Returns the number of edges converted.
    pub(crate) fn repair_half_edges(&mut self) -> usize {
        let orphans: Vec<EdgeId> = self
            .edges
            .values()
            .filter(|e| match e.kind() {
                EdgeKind::Plain => false,
                EdgeKind::Half { brother } => !self
                    .edges
                    .get(&brother)
                    .is_some_and(|b| {
                        b.brother_id() == Some(e.id()) && b.start() == e.end() && b.end() == e.start()
                    }),
            })
            .map(Edge::id)
            .collect();
        for id in &orphans {
            if let Some(edge) = self.edges.get_mut(id) {
                edge.set_kind(EdgeKind::Plain);
            }
            self.refresh_edge(*id);
            tracing::warn!(edge = %id, "half edge lost its brother; converted to a plain edge");
        }
        orphans.len()
    }

    pub(crate) fn mark_knot_selected(&mut self, index: usize, selected: bool) -> bool {
        let changed = self.knots[index].set_selected(selected);
        if changed {
            if selected {
                self.selected_knots += 1;
            } else {
                self.selected_knots -= 1;
            }
        }
        changed
    }

    pub(crate) fn mark_edge_selected(&mut self, id: EdgeId, selected: bool) -> bool {
        let Some(edge) = self.edges.get_mut(&id) else {
            return false;
        };
        let changed = edge.set_selected(selected);
        if changed {
            if selected {
                self.selected_edges += 1;
            } else {
                self.selected_edges -= 1;
            }
        }
        changed
    }
}

pub(crate) fn validated_knot(
    x: f64,
    y: f64,
    r: f64,
    name: String,
    fill_color: String,
) -> Result<Knot, GraphError> {
    if !(x.is_finite() && y.is_finite()) {
        return Err(GraphError::InvalidPosition { x, y });
    }
    validate_radius(r)?;
    Ok(Knot::new(KnotId(0), x, y, r, name, fill_color))
}

pub(crate) fn validate_radius(r: f64) -> Result<(), GraphError> {
    if r.is_finite() && r > 0.0 {
        Ok(())
    } else {
        Err(GraphError::InvalidRadius { radius: r })
    }
}
