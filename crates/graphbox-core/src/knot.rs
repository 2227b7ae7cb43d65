use crate::geom::{Point, point};
use crate::ids::KnotId;
use crate::surface::{Surface, TextAlign, TextBaseline, TextStyle};

pub const KNOT_TYPE: &str = "normalKnot";
pub const DEFAULT_KNOT_COLOR: &str = "rgba(255,255,255,1)";

const OUTLINE_COLOR: &str = "rgba(0,0,0,1)";
const LABEL_COLOR: &str = "rgba(0,0,0,1)";
const HIGHLIGHT_FILL: &str = "rgba(0,120,226,0.3)";
const HIGHLIGHT_STROKE: &str = "rgba(0,130,226,0.6)";
const HIGHLIGHT_LINE_WIDTH: f64 = 3.0;
const MAX_LABEL_FONT_SIZE: f64 = 15.0;

/// A labeled circle on the canvas.
///
/// Knots are owned by a [`Graph`](crate::Graph); callers read them through shared references
/// and change them through graph operations so that edge geometry stays in sync.
#[derive(Debug, Clone, PartialEq)]
pub struct Knot {
    id: KnotId,
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub name: String,
    pub fill_color: String,
    selected: bool,
}

impl Knot {
    pub(crate) fn new(
        id: KnotId,
        x: f64,
        y: f64,
        r: f64,
        name: impl Into<String>,
        fill_color: impl Into<String>,
    ) -> Self {
        Self {
            id,
            x,
            y,
            r,
            name: name.into(),
            fill_color: fill_color.into(),
            selected: false,
        }
    }

    pub fn id(&self) -> KnotId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: KnotId) {
        self.id = id;
    }

    pub fn type_name(&self) -> &'static str {
        KNOT_TYPE
    }

    pub fn position(&self) -> Point {
        point(self.x, self.y)
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) -> bool {
        let changed = self.selected != selected;
        self.selected = selected;
        changed
    }

    /// Strictly inside the circle.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let dx = x - self.x;
        let dy = y - self.y;
        (dx * dx + dy * dy).sqrt() < self.r
    }

    /// Label font size: the label spans the diameter, capped at 15.
    pub fn label_font_size(&self) -> f64 {
        let chars = self.name.chars().count();
        if chars == 0 {
            return MAX_LABEL_FONT_SIZE;
        }
        (2.0 * self.r / chars as f64).min(MAX_LABEL_FONT_SIZE)
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let center = self.position();
        surface.fill_circle(center, self.r, &self.fill_color);
        surface.stroke_circle(center, self.r, OUTLINE_COLOR, 1.0);
        if !self.name.is_empty() {
            let style = TextStyle {
                font_size: self.label_font_size(),
                align: TextAlign::Center,
                baseline: TextBaseline::Middle,
                fill: LABEL_COLOR.to_string(),
            };
            surface.fill_text(&self.name, center, &style);
        }
        if self.selected {
            surface.fill_circle(center, self.r, HIGHLIGHT_FILL);
            surface.stroke_circle(center, self.r, HIGHLIGHT_STROKE, HIGHLIGHT_LINE_WIDTH);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    #[test]
    fn label_shrinks_with_long_names() {
        let short = Knot::new(KnotId(1), 0.0, 0.0, 20.0, "a", DEFAULT_KNOT_COLOR);
        let long = Knot::new(KnotId(2), 0.0, 0.0, 20.0, "abcdefgh", DEFAULT_KNOT_COLOR);
        assert_eq!(short.label_font_size(), 15.0);
        assert_eq!(long.label_font_size(), 5.0);
    }

    #[test]
    fn selected_knot_draws_highlight_on_top() {
        let mut knot = Knot::new(KnotId(1), 10.0, 10.0, 20.0, "0", DEFAULT_KNOT_COLOR);
        knot.set_selected(true);
        let mut surface = RecordingSurface::new();
        knot.render(&mut surface);
        assert_eq!(surface.commands.len(), 5);
        assert!(matches!(
            surface.commands.last(),
            Some(DrawCommand::StrokeCircle { line_width, .. }) if *line_width == 3.0
        ));
    }

    #[test]
    fn contains_excludes_the_rim() {
        let knot = Knot::new(KnotId(1), 0.0, 0.0, 10.0, "", DEFAULT_KNOT_COLOR);
        assert!(knot.contains(9.9, 0.0));
        assert!(!knot.contains(10.0, 0.0));
    }
}
