use super::Graph;
use crate::edge::{DEFAULT_EDGE_COLOR, Edge, EdgeKind};
use crate::error::GraphError;
use crate::ids::EdgeId;
use crate::weight::Weight;

impl Graph {
    /// Connects two knots.
    ///
    /// - no edge between them yet: a plain edge is added;
    /// - one edge, request directed and the existing edge runs the other way: both become half
    ///   edges of each other;
    /// - one edge, request undirected: the new half edge runs opposite the existing one;
    /// - one edge running the same way with a directed request, or two edges: rejected.
    #[must_use = "a rejected edge request is reported through the returned Result"]
    pub fn add_edge(
        &mut self,
        start: usize,
        end: usize,
        weight: impl Into<Weight>,
        color: &str,
        directed: bool,
        weighted: bool,
    ) -> Result<EdgeId, GraphError> {
        self.check_endpoints(start, end)?;
        let existing = self.edges_on_pair(start, end);

        let result = match existing.as_slice() {
            [] => {
                let id = self.ids.edge();
                let mut edge = Edge::new(id, &self.knots[start], &self.knots[end], weight.into());
                edge.color = color.to_string();
                edge.set_directed(directed);
                edge.set_weighted(weighted);
                self.edges.insert(id, edge);
                Ok(id)
            }
            [(brother, same_way)] => {
                if directed && *same_way {
                    Err(GraphError::DuplicateEdge { start, end })
                } else {
                    let (s, e) = if *same_way { (end, start) } else { (start, end) };
                    Ok(self.pair_with(*brother, s, e, weight.into(), color, directed, weighted))
                }
            }
            _ => Err(GraphError::EdgePairSaturated { start, end }),
        };

        match &result {
            Ok(id) => tracing::debug!(start, end, edge = %id, directed, "added edge"),
            Err(err) => tracing::warn!(start, end, %err, "edge request rejected"),
        }
        result
    }

    /// Adds an edge with weight 0, the default color and the graph's flags.
    pub fn add_edge_by_indices(&mut self, start: usize, end: usize) -> Result<EdgeId, GraphError> {
        self.add_edge_by_weight(start, end, Weight::default())
    }

    pub fn add_edge_by_weight(
        &mut self,
        start: usize,
        end: usize,
        weight: impl Into<Weight>,
    ) -> Result<EdgeId, GraphError> {
        let (directed, weighted) = (self.options.directed, self.options.weighted);
        self.add_edge(start, end, weight, DEFAULT_EDGE_COLOR, directed, weighted)
    }

    /// Adds a plain edge under a given id without the pair check. Used when rebuilding a graph
    /// from serialized data.
    #[allow(clippy::too_many_arguments)]
    pub fn add_edge_with_id(
        &mut self,
        start: usize,
        end: usize,
        id: EdgeId,
        weight: impl Into<Weight>,
        color: &str,
        directed: bool,
        weighted: bool,
    ) -> Result<EdgeId, GraphError> {
        self.insert_with_id(start, end, id, weight.into(), color, directed, weighted, EdgeKind::Plain)
    }

    /// Adds a half edge under a given id, naming its brother. The brother may be added later;
    /// until then (or if it never appears) the pair is not mutual.
    #[allow(clippy::too_many_arguments)]
    pub fn add_half_edge_with_id(
        &mut self,
        start: usize,
        end: usize,
        id: EdgeId,
        brother: EdgeId,
        weight: impl Into<Weight>,
        color: &str,
        directed: bool,
        weighted: bool,
    ) -> Result<EdgeId, GraphError> {
        self.insert_with_id(
            start,
            end,
            id,
            weight.into(),
            color,
            directed,
            weighted,
            EdgeKind::Half { brother },
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn insert_with_id(
        &mut self,
        start: usize,
        end: usize,
        id: EdgeId,
        weight: Weight,
        color: &str,
        directed: bool,
        weighted: bool,
        kind: EdgeKind,
    ) -> Result<EdgeId, GraphError> {
        self.check_endpoints(start, end)?;
        if self.edges.contains_key(&id) {
            return Err(GraphError::DuplicateEdgeId(id));
        }
        let (s, e) = (&self.knots[start], &self.knots[end]);
        let mut edge = match kind {
            EdgeKind::Plain => Edge::new(id, s, e, weight),
            EdgeKind::Half { brother } => Edge::new_half(id, s, e, weight, brother),
        };
        edge.color = color.to_string();
        edge.set_directed(directed);
        edge.set_weighted(weighted);
        self.ids.observe(id.0);
        self.edges.insert(id, edge);
        tracing::debug!(start, end, edge = %id, half = kind != EdgeKind::Plain, "restored edge");
        Ok(id)
    }

    /// Adds an edge read from a document without breaking the pair invariant. A second edge on
    /// a pair becomes the half edge of the first, running opposite it; a third is dropped.
    /// Returns `None` for a dropped edge.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore_edge(
        &mut self,
        start: usize,
        end: usize,
        id: EdgeId,
        brother: Option<EdgeId>,
        weight: Weight,
        color: &str,
        directed: bool,
        weighted: bool,
    ) -> Result<Option<EdgeId>, GraphError> {
        self.check_endpoints(start, end)?;
        match self.edges_on_pair(start, end).as_slice() {
            [] => {
                let kind = brother.map_or(EdgeKind::Plain, |brother| EdgeKind::Half { brother });
                self.insert_with_id(start, end, id, weight, color, directed, weighted, kind)
                    .map(Some)
            }
            [(other, same_way)] => {
                let other = *other;
                let (s, e) = if *same_way { (end, start) } else { (start, end) };
                let kind = EdgeKind::Half { brother: other };
                self.insert_with_id(s, e, id, weight, color, directed, weighted, kind)?;
                if let Some(existing) = self.edges.get_mut(&other) {
                    existing.set_kind(EdgeKind::Half { brother: id });
                }
                self.refresh_edge(other);
                Ok(Some(id))
            }
            _ => {
                tracing::warn!(start, end, edge = %id, "knot pair already has two edges; edge dropped");
                Ok(None)
            }
        }
    }

    /// Edges joining the two knots as `(id, runs from start to end)`.
    fn edges_on_pair(&self, start: usize, end: usize) -> Vec<(EdgeId, bool)> {
        let start_id = self.knots[start].id();
        let end_id = self.knots[end].id();
        self.edges
            .values()
            .filter(|e| e.connects(start_id, end_id))
            .map(|e| (e.id(), e.start() == start_id))
            .collect()
    }

    /// Adds a half edge from `start` to `end` and turns `brother` into its mutual half edge.
    #[allow(clippy::too_many_arguments)]
    fn pair_with(
        &mut self,
        brother: EdgeId,
        start: usize,
        end: usize,
        weight: Weight,
        color: &str,
        directed: bool,
        weighted: bool,
    ) -> EdgeId {
        let id = self.ids.edge();
        let mut half = Edge::new_half(id, &self.knots[start], &self.knots[end], weight, brother);
        half.color = color.to_string();
        half.set_directed(directed);
        half.set_weighted(weighted);
        if let Some(existing) = self.edges.get_mut(&brother) {
            existing.set_kind(EdgeKind::Half { brother: id });
            existing.set_directed(directed);
            existing.set_weighted(weighted);
        }
        self.edges.insert(id, half);
        self.refresh_edge(brother);
        id
    }

    fn check_endpoints(&self, start: usize, end: usize) -> Result<(), GraphError> {
        self.check_index(start)?;
        self.check_index(end)?;
        if start == end {
            return Err(GraphError::SelfLoop { index: start });
        }
        Ok(())
    }

    /// Removes one edge. A surviving brother becomes a plain edge.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let edge = self.edges.shift_remove(&id)?;
        if edge.is_selected() {
            self.selected_edges -= 1;
        }
        if edge.is_half() {
            self.repair_half_edges();
        }
        tracing::debug!(edge = %id, "removed edge");
        Some(edge)
    }

    /// Removes every selected edge. Returns the number removed.
    pub fn remove_edges_by_selection(&mut self) -> usize {
        let before = self.edges.len();
        self.edges.retain(|_, e| !e.is_selected());
        self.selected_edges = 0;
        let removed = before - self.edges.len();
        if removed > 0 {
            self.repair_half_edges();
            tracing::debug!(edges = removed, "removed selected edges");
        }
        removed
    }

    pub fn remove_all_edges(&mut self) {
        self.edges.clear();
        self.selected_edges = 0;
    }
}
