use std::fmt::Write as _;

use graphbox_core::geom::Point;
use graphbox_core::surface::{Surface, TextAlign, TextBaseline, TextStyle};
use graphbox_core::utils::{escape_xml_into, fmt_number_into};

/// Collects drawing calls as SVG elements.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    body: String,
    font_family: String,
}

impl SvgSurface {
    pub fn new(font_family: &str) -> Self {
        Self {
            body: String::new(),
            font_family: font_family.to_string(),
        }
    }

    /// The elements emitted so far, without the enclosing `<svg>`.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn finish(self, width: f64, height: f64, background: Option<&str>) -> String {
        let mut out = String::with_capacity(self.body.len() + 256);
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" width=""#);
        fmt_into(&mut out, width);
        out.push_str(r#"" height=""#);
        fmt_into(&mut out, height);
        out.push_str(r#"" viewBox="0 0 "#);
        fmt_into(&mut out, width);
        out.push(' ');
        fmt_into(&mut out, height);
        out.push_str(r#"">"#);
        if let Some(fill) = background {
            out.push_str(r#"<rect x="0" y="0" width="100%" height="100%" fill=""#);
            escape_xml_into(&mut out, fill);
            out.push_str(r#""/>"#);
        }
        out.push_str(&self.body);
        out.push_str("</svg>");
        out
    }

    fn attr_num(&mut self, name: &str, v: f64) {
        let _ = write!(self.body, r#" {name}=""#);
        fmt_into(&mut self.body, v);
        self.body.push('"');
    }

    fn attr_str(&mut self, name: &str, v: &str) {
        let _ = write!(self.body, r#" {name}=""#);
        escape_xml_into(&mut self.body, v);
        self.body.push('"');
    }

    fn circle(&mut self, center: Point, radius: f64) {
        self.body.push_str("<circle");
        self.attr_num("cx", center.x);
        self.attr_num("cy", center.y);
        self.attr_num("r", radius);
    }
}

/// SVG coordinates keep three fractional digits at most.
fn fmt_into(out: &mut String, v: f64) {
    fmt_number_into(out, (v * 1000.0).round() / 1000.0);
}

fn text_anchor(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    }
}

fn dominant_baseline(baseline: TextBaseline) -> &'static str {
    match baseline {
        TextBaseline::Top => "hanging",
        TextBaseline::Middle => "central",
        TextBaseline::Bottom => "text-after-edge",
    }
}

impl Surface for SvgSurface {
    fn fill_circle(&mut self, center: Point, radius: f64, fill: &str) {
        self.circle(center, radius);
        self.attr_str("fill", fill);
        self.body.push_str("/>");
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, stroke: &str, line_width: f64) {
        self.circle(center, radius);
        self.body.push_str(r#" fill="none""#);
        self.attr_str("stroke", stroke);
        self.attr_num("stroke-width", line_width);
        self.body.push_str("/>");
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &str, line_width: f64) {
        self.body.push_str("<line");
        self.attr_num("x1", from.x);
        self.attr_num("y1", from.y);
        self.attr_num("x2", to.x);
        self.attr_num("y2", to.y);
        self.attr_str("stroke", stroke);
        self.attr_num("stroke-width", line_width);
        self.body.push_str("/>");
    }

    fn fill_triangle(&mut self, a: Point, b: Point, c: Point, fill: &str) {
        self.body.push_str(r#"<polygon points=""#);
        for (i, p) in [a, b, c].into_iter().enumerate() {
            if i > 0 {
                self.body.push(' ');
            }
            fmt_into(&mut self.body, p.x);
            self.body.push(',');
            fmt_into(&mut self.body, p.y);
        }
        self.body.push('"');
        self.attr_str("fill", fill);
        self.body.push_str("/>");
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.body.push_str("<text");
        self.attr_num("x", at.x);
        self.attr_num("y", at.y);
        let family = self.font_family.clone();
        self.attr_str("font-family", &family);
        self.attr_num("font-size", style.font_size);
        self.attr_str("text-anchor", text_anchor(style.align));
        self.attr_str("dominant-baseline", dominant_baseline(style.baseline));
        self.attr_str("fill", &style.fill);
        self.body.push('>');
        escape_xml_into(&mut self.body, text);
        self.body.push_str("</text>");
    }
}
