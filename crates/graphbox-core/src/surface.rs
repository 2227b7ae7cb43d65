//! Drawing contract between the graph model and a 2D canvas.
//!
//! Knots and edges describe themselves through [`Surface`]; they never talk to a concrete
//! toolkit. [`RecordingSurface`] captures the calls so that rendering can be asserted on.

use crate::geom::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    #[default]
    Middle,
    Bottom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size: f64,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub fill: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 15.0,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
            fill: "rgba(0,0,0,1)".to_string(),
        }
    }
}

pub trait Surface {
    fn fill_circle(&mut self, center: Point, radius: f64, fill: &str);

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &str, line_width: f64);

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &str, line_width: f64);

    fn fill_triangle(&mut self, a: Point, b: Point, c: Point, fill: &str);

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillCircle {
        center: Point,
        radius: f64,
        fill: String,
    },
    StrokeCircle {
        center: Point,
        radius: f64,
        stroke: String,
        line_width: f64,
    },
    StrokeLine {
        from: Point,
        to: Point,
        stroke: String,
        line_width: f64,
    },
    FillTriangle {
        points: [Point; 3],
        fill: String,
    },
    FillText {
        text: String,
        at: Point,
        style: TextStyle,
    },
}

/// A surface that stores every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = (Point, Point, &str)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::StrokeLine {
                from, to, stroke, ..
            } => Some((*from, *to, stroke.as_str())),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, &TextStyle)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillText { text, style, .. } => Some((text.as_str(), style)),
            _ => None,
        })
    }

    pub fn triangles(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillTriangle { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn fill_circle(&mut self, center: Point, radius: f64, fill: &str) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            fill: fill.to_string(),
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &str, line_width: f64) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            stroke: stroke.to_string(),
            line_width,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &str, line_width: f64) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            stroke: stroke.to_string(),
            line_width,
        });
    }

    fn fill_triangle(&mut self, a: Point, b: Point, c: Point, fill: &str) {
        self.commands.push(DrawCommand::FillTriangle {
            points: [a, b, c],
            fill: fill.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            at,
            style: style.clone(),
        });
    }
}
