use crate::geom::{Point, Vector2, VectorExt, point, vector};
use crate::ids::{EdgeId, KnotId};
use crate::knot::Knot;
use crate::surface::{Surface, TextAlign, TextBaseline, TextStyle};
use crate::weight::Weight;

pub const EDGE_TYPE: &str = "normalEdge";
pub const HALF_EDGE_TYPE: &str = "halfEdge";
pub const DEFAULT_EDGE_COLOR: &str = "rgba(0,0,0,1)";
pub const SELECTED_EDGE_COLOR: &str = "rgba(100,150,255,1)";

/// Perpendicular displacement of a half edge from the center line.
pub const HALF_EDGE_OFFSET: f64 = 5.0;

const ARROW_LENGTH: f64 = 10.0;
const ARROW_HALF_WIDTH: f64 = 4.0;
const WEIGHT_FONT_SIZE: f64 = 15.0;
const WEIGHT_LABEL_OFFSET: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Plain,
    /// One of two opposing edges between the same knots.
    Half { brother: EdgeId },
}

/// Cached line geometry of an edge.
///
/// `start`/`end` are the (possibly displaced) center points, `normal` is the unit normal
/// `(dy, -dx)` and `offset` is `normal · start`, so the signed distance of a point `p` from the
/// infinite line is `normal · p - offset`. The visible segment runs from `visible_start` along
/// `visible_direction` and is trimmed by both knot radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeGeometry {
    pub start: Point,
    pub end: Point,
    pub start_radius: f64,
    pub end_radius: f64,
    pub unit: Vector2,
    pub normal: Vector2,
    pub offset: f64,
    pub visible_start: Point,
    pub visible_direction: Vector2,
}

impl EdgeGeometry {
    pub fn compute(start: &Knot, end: &Knot, displacement: f64) -> Self {
        let direction = end.position() - start.position();
        let unit = direction.normalized();
        let normal = vector(direction.y, -direction.x).normalized();
        let shift = normal.scaled(displacement);
        let s = start.position() + shift;
        let e = end.position() + shift;
        Self {
            start: s,
            end: e,
            start_radius: start.r,
            end_radius: end.r,
            unit,
            normal,
            offset: normal.scalar_product_2c(s.x, s.y),
            visible_start: s + unit.scaled(start.r),
            visible_direction: direction - unit.scaled(start.r + end.r),
        }
    }

    pub fn visible_end(&self) -> Point {
        self.visible_start + self.visible_direction
    }

    /// Signed distance from the infinite line through `start` and `end`.
    pub fn line_distance(&self, x: f64, y: f64) -> f64 {
        self.normal.scalar_product_2c(x, y) - self.offset
    }

    pub fn is_hit(&self, x: f64, y: f64, max_distance: f64) -> bool {
        if self.line_distance(x, y).abs() > max_distance {
            return false;
        }
        let len_sq = self.visible_direction.square_length();
        if len_sq <= f64::EPSILON {
            return false;
        }
        let p = point(x, y);
        let t = (p - self.visible_start).scalar_product_1v(self.visible_direction) / len_sq;
        if !(0.0..=1.0).contains(&t) {
            return false;
        }
        (p - self.start).length() >= self.start_radius && (p - self.end).length() >= self.end_radius
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: EdgeId,
    start: KnotId,
    end: KnotId,
    pub weight: Weight,
    pub color: String,
    directed: bool,
    weighted: bool,
    selected: bool,
    kind: EdgeKind,
    geometry: EdgeGeometry,
}

impl Edge {
    pub fn new(id: EdgeId, start: &Knot, end: &Knot, weight: Weight) -> Self {
        Self::with_kind(id, start, end, weight, EdgeKind::Plain)
    }

    pub fn new_half(id: EdgeId, start: &Knot, end: &Knot, weight: Weight, brother: EdgeId) -> Self {
        Self::with_kind(id, start, end, weight, EdgeKind::Half { brother })
    }

    fn with_kind(id: EdgeId, start: &Knot, end: &Knot, weight: Weight, kind: EdgeKind) -> Self {
        Self {
            id,
            start: start.id(),
            end: end.id(),
            weight,
            color: DEFAULT_EDGE_COLOR.to_string(),
            directed: false,
            weighted: false,
            selected: false,
            kind,
            geometry: EdgeGeometry::compute(start, end, kind.displacement()),
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn start(&self) -> KnotId {
        self.start
    }

    pub fn end(&self) -> KnotId {
        self.end
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub(crate) fn set_kind(&mut self, kind: EdgeKind) {
        self.kind = kind;
    }

    pub fn brother_id(&self) -> Option<EdgeId> {
        match self.kind {
            EdgeKind::Plain => None,
            EdgeKind::Half { brother } => Some(brother),
        }
    }

    pub fn is_half(&self) -> bool {
        matches!(self.kind, EdgeKind::Half { .. })
    }

    pub fn type_name(&self) -> &'static str {
        match self.kind {
            EdgeKind::Plain => EDGE_TYPE,
            EdgeKind::Half { .. } => HALF_EDGE_TYPE,
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    pub fn set_weighted(&mut self, weighted: bool) {
        self.weighted = weighted;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) -> bool {
        let changed = self.selected != selected;
        self.selected = selected;
        changed
    }

    pub fn geometry(&self) -> &EdgeGeometry {
        &self.geometry
    }

    /// Both endpoints, in either order.
    pub fn connects(&self, a: KnotId, b: KnotId) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }

    pub fn touches(&self, knot: KnotId) -> bool {
        self.start == knot || self.end == knot
    }

    /// Recomputes the cached geometry from the current endpoint positions and radii.
    pub fn update(&mut self, start: &Knot, end: &Knot) {
        debug_assert_eq!(start.id(), self.start);
        debug_assert_eq!(end.id(), self.end);
        self.geometry = EdgeGeometry::compute(start, end, self.kind.displacement());
    }

    pub fn is_hit(&self, x: f64, y: f64, max_distance: f64) -> bool {
        self.geometry.is_hit(x, y, max_distance)
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let color = if self.selected {
            SELECTED_EDGE_COLOR
        } else {
            self.color.as_str()
        };
        let g = &self.geometry;
        let from = g.visible_start;
        let to = g.visible_end();
        surface.stroke_line(from, to, color, 1.0);

        if self.weighted {
            // Keep the label above the line regardless of the edge direction.
            let side = if g.end.x - g.start.x < 0.0 { -1.0 } else { 1.0 };
            let shift = g.normal.scaled(side * WEIGHT_LABEL_OFFSET);
            let anchor = if self.directed {
                to - g.unit.scaled(ARROW_LENGTH * 2.0) + shift
            } else {
                from.lerp(to, 0.5) + shift
            };
            let style = TextStyle {
                font_size: WEIGHT_FONT_SIZE,
                align: TextAlign::Center,
                baseline: TextBaseline::Bottom,
                fill: color.to_string(),
            };
            surface.fill_text(&self.weight.to_string(), anchor, &style);
        }

        if self.directed {
            let base = to - g.unit.scaled(ARROW_LENGTH);
            let wing = g.normal.scaled(ARROW_HALF_WIDTH);
            surface.fill_triangle(to, base + wing, base - wing, color);
        }
    }
}

impl EdgeKind {
    fn displacement(self) -> f64 {
        match self {
            Self::Plain => 0.0,
            Self::Half { .. } => HALF_EDGE_OFFSET,
        }
    }
}
