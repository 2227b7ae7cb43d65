use bitflags::bitflags;

use super::{Graph, HashSet, validate_radius};
use crate::error::{GraphError, OptionsError};
use crate::ids::KnotId;
use crate::options::GraphOptions;
use crate::utils::normalize_color;
use crate::weight::Weight;

bitflags! {
    /// Canvas borders that a translation tried to cross.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Boundary: u8 {
        const LEFT = 1 << 0;
        const TOP = 1 << 1;
        const RIGHT = 1 << 2;
        const BOTTOM = 1 << 3;
    }
}

fn clamp_axis(value: f64, max: f64, low: Boundary, high: Boundary) -> (f64, Boundary) {
    if value < 0.0 {
        (0.0, low)
    } else if value > max {
        (max, high)
    } else {
        (value, Boundary::empty())
    }
}

impl Graph {
    /// Moves every selected knot by `(dx, dy)`, clamped to the canvas.
    ///
    /// The returned set names each border a knot would have crossed; it is empty when every
    /// move fit.
    pub fn translate_knots_by_selection(&mut self, dx: f64, dy: f64) -> Boundary {
        let dx = if dx.is_finite() { dx } else { 0.0 };
        let dy = if dy.is_finite() { dy } else { 0.0 };
        let (width, height) = self.canvas_size();
        let mut hit = Boundary::empty();
        let mut moved: HashSet<KnotId> = HashSet::default();
        for knot in self.knots.iter_mut().filter(|k| k.is_selected()) {
            let (x, hx) = clamp_axis(knot.x + dx, width, Boundary::LEFT, Boundary::RIGHT);
            let (y, hy) = clamp_axis(knot.y + dy, height, Boundary::TOP, Boundary::BOTTOM);
            knot.x = x;
            knot.y = y;
            hit |= hx | hy;
            moved.insert(knot.id());
        }
        if !moved.is_empty() {
            self.refresh_edges_touching(&moved);
        }
        if !hit.is_empty() {
            tracing::trace!(?hit, "translation clamped at the canvas border");
        }
        hit
    }

    pub fn change_knot_name_by_selection(&mut self, name: &str) -> usize {
        let mut count = 0;
        for knot in self.knots.iter_mut().filter(|k| k.is_selected()) {
            knot.name = name.to_string();
            count += 1;
        }
        count
    }

    pub fn change_knot_name_by_index(&mut self, index: usize, name: &str) -> Result<(), GraphError> {
        self.check_index(index)?;
        self.knots[index].name = name.to_string();
        Ok(())
    }

    pub fn change_knot_color_by_selection(&mut self, color: &str) -> usize {
        let color = normalize_color(color);
        let mut count = 0;
        for knot in self.knots.iter_mut().filter(|k| k.is_selected()) {
            knot.fill_color.clone_from(&color);
            count += 1;
        }
        count
    }

    pub fn change_knot_radius_by_selection(&mut self, radius: f64) -> Result<usize, GraphError> {
        validate_radius(radius)?;
        let mut resized: HashSet<KnotId> = HashSet::default();
        for knot in self.knots.iter_mut().filter(|k| k.is_selected()) {
            knot.r = radius;
            resized.insert(knot.id());
        }
        self.refresh_edges_touching(&resized);
        Ok(resized.len())
    }

    pub fn change_edge_weight_by_selection(&mut self, weight: impl Into<Weight>) -> usize {
        let weight = weight.into();
        let mut count = 0;
        for edge in self.edges.values_mut().filter(|e| e.is_selected()) {
            edge.weight = weight.clone();
            count += 1;
        }
        count
    }

    pub fn change_edge_color_by_selection(&mut self, color: &str) -> usize {
        let color = normalize_color(color);
        let mut count = 0;
        for edge in self.edges.values_mut().filter(|e| e.is_selected()) {
            edge.color.clone_from(&color);
            count += 1;
        }
        count
    }

    /// Sets the graph flag and applies it to every existing edge.
    pub fn set_directed(&mut self, directed: bool) {
        self.options.directed = directed;
        for edge in self.edges.values_mut() {
            edge.set_directed(directed);
        }
    }

    pub fn set_weighted(&mut self, weighted: bool) {
        self.options.weighted = weighted;
        for edge in self.edges.values_mut() {
            edge.set_weighted(weighted);
        }
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) -> Result<(), OptionsError> {
        let options = GraphOptions {
            canvas_width: width,
            canvas_height: height,
            ..self.options.clone()
        };
        options.validate()?;
        self.options = options;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_axis_reports_the_crossed_side() {
        assert_eq!(
            clamp_axis(-1.0, 10.0, Boundary::LEFT, Boundary::RIGHT),
            (0.0, Boundary::LEFT)
        );
        assert_eq!(
            clamp_axis(11.0, 10.0, Boundary::LEFT, Boundary::RIGHT),
            (10.0, Boundary::RIGHT)
        );
        assert_eq!(
            clamp_axis(10.0, 10.0, Boundary::LEFT, Boundary::RIGHT),
            (10.0, Boundary::empty())
        );
    }
}
