use super::{Graph, HashSet};
use crate::ids::{EdgeId, KnotId};

/// Outcome of a toggle-by-point request that hit something.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled<T> {
    Selected(T),
    Deselected(T),
}

/// Axis-aligned rectangle with normalized corners; containment excludes the border.
#[derive(Debug, Clone, Copy)]
struct SelectRect {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl SelectRect {
    fn new(x_start: f64, x_end: f64, y_start: f64, y_end: f64) -> Self {
        Self {
            min_x: x_start.min(x_end),
            max_x: x_start.max(x_end),
            min_y: y_start.min(y_end),
            max_y: y_start.max(y_end),
        }
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        self.min_x < x && x < self.max_x && self.min_y < y && y < self.max_y
    }
}

impl Graph {
    pub fn select_knot_by_index(&mut self, index: usize) -> bool {
        index < self.knots.len() && self.mark_knot_selected(index, true)
    }

    pub fn deselect_knot_by_index(&mut self, index: usize) -> bool {
        index < self.knots.len() && self.mark_knot_selected(index, false)
    }

    /// Selects the top-most knot under the point. Returns its index.
    pub fn select_knot_by_point(&mut self, x: f64, y: f64) -> Option<usize> {
        let index = self.knot_index_by_point(x, y)?;
        self.mark_knot_selected(index, true);
        tracing::trace!(index, "selected knot");
        Some(index)
    }

    pub fn deselect_knot_by_point(&mut self, x: f64, y: f64) -> Option<usize> {
        let index = self.knot_index_by_point(x, y)?;
        self.mark_knot_selected(index, false);
        tracing::trace!(index, "deselected knot");
        Some(index)
    }

    pub fn toggle_select_knot_by_point(&mut self, x: f64, y: f64) -> Option<Toggled<usize>> {
        let index = self.knot_index_by_point(x, y)?;
        let select = !self.knots[index].is_selected();
        self.mark_knot_selected(index, select);
        tracing::trace!(index, select, "toggled knot");
        Some(if select {
            Toggled::Selected(index)
        } else {
            Toggled::Deselected(index)
        })
    }

    /// Selects every knot strictly inside the rectangle. Returns how many became selected.
    pub fn select_knot_by_rect(&mut self, x_start: f64, x_end: f64, y_start: f64, y_end: f64) -> usize {
        let rect = SelectRect::new(x_start, x_end, y_start, y_end);
        let mut count = 0;
        for index in 0..self.knots.len() {
            let k = &self.knots[index];
            if rect.contains(k.x, k.y) && self.mark_knot_selected(index, true) {
                count += 1;
            }
        }
        count
    }

    /// Deselects every knot strictly inside the rectangle. Returns how many were deselected.
    pub fn deselect_knot_by_rect(&mut self, x_start: f64, x_end: f64, y_start: f64, y_end: f64) -> usize {
        let rect = SelectRect::new(x_start, x_end, y_start, y_end);
        self.knot_indices_in(rect)
            .into_iter()
            .filter(|&index| self.mark_knot_selected(index, false))
            .count()
    }

    /// Flips the selection of every knot strictly inside the rectangle. Returns how many knots
    /// were flipped.
    pub fn toggle_select_knot_by_rect(&mut self, x_start: f64, x_end: f64, y_start: f64, y_end: f64) -> usize {
        let rect = SelectRect::new(x_start, x_end, y_start, y_end);
        let inside = self.knot_indices_in(rect);
        for &index in &inside {
            let select = !self.knots[index].is_selected();
            self.mark_knot_selected(index, select);
        }
        inside.len()
    }

    pub fn toggle_select_knot_by_index(&mut self, index: usize) -> Option<Toggled<usize>> {
        let select = !self.knots.get(index)?.is_selected();
        self.mark_knot_selected(index, select);
        tracing::trace!(index, select, "toggled knot");
        Some(if select {
            Toggled::Selected(index)
        } else {
            Toggled::Deselected(index)
        })
    }

    fn knot_indices_in(&self, rect: SelectRect) -> Vec<usize> {
        self.knots
            .iter()
            .enumerate()
            .filter(|(_, k)| rect.contains(k.x, k.y))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn selected_knot_indices(&self) -> Vec<usize> {
        self.knots
            .iter()
            .enumerate()
            .filter(|(_, k)| k.is_selected())
            .map(|(i, _)| i)
            .collect()
    }

    /// Top-most edge hit at the point, using the configured hit tolerance.
    pub fn edge_id_by_point(&self, x: f64, y: f64) -> Option<EdgeId> {
        let tolerance = self.options.hit_tolerance;
        self.edges
            .values()
            .rev()
            .find(|e| e.is_hit(x, y, tolerance))
            .map(|e| e.id())
    }

    pub fn select_edge_by_point(&mut self, x: f64, y: f64) -> Option<EdgeId> {
        let id = self.edge_id_by_point(x, y)?;
        self.mark_edge_selected(id, true);
        tracing::trace!(edge = %id, "selected edge");
        Some(id)
    }

    pub fn deselect_edge_by_point(&mut self, x: f64, y: f64) -> Option<EdgeId> {
        let id = self.edge_id_by_point(x, y)?;
        self.mark_edge_selected(id, false);
        tracing::trace!(edge = %id, "deselected edge");
        Some(id)
    }

    pub fn toggle_select_edge_by_point(&mut self, x: f64, y: f64) -> Option<Toggled<EdgeId>> {
        let id = self.edge_id_by_point(x, y)?;
        let select = !self.edges.get(&id).is_some_and(|e| e.is_selected());
        self.mark_edge_selected(id, select);
        Some(if select {
            Toggled::Selected(id)
        } else {
            Toggled::Deselected(id)
        })
    }

    /// Selects every edge whose two endpoints lie strictly inside the rectangle.
    pub fn select_edge_by_rect(&mut self, x_start: f64, x_end: f64, y_start: f64, y_end: f64) -> usize {
        let rect = SelectRect::new(x_start, x_end, y_start, y_end);
        let enclosed: HashSet<KnotId> = self
            .knots
            .iter()
            .filter(|k| rect.contains(k.x, k.y))
            .map(|k| k.id())
            .collect();
        let inside: Vec<EdgeId> = self
            .edges
            .values()
            .filter(|e| enclosed.contains(&e.start()) && enclosed.contains(&e.end()))
            .map(|e| e.id())
            .collect();
        inside
            .into_iter()
            .filter(|id| self.mark_edge_selected(*id, true))
            .count()
    }

    pub fn deselect_all_knots(&mut self) {
        for knot in &mut self.knots {
            knot.set_selected(false);
        }
        self.selected_knots = 0;
    }

    pub fn deselect_all_edges(&mut self) {
        for edge in self.edges.values_mut() {
            edge.set_selected(false);
        }
        self.selected_edges = 0;
    }

    pub fn deselect_all(&mut self) {
        self.deselect_all_knots();
        self.deselect_all_edges();
    }
}
