use serde::{Deserialize, Serialize};

use crate::error::OptionsError;

pub const DEFAULT_KNOT_RADIUS: f64 = 20.0;
pub const DEFAULT_HIT_TOLERANCE: f64 = 8.0;
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

/// Graph-wide settings.
///
/// Loaded from JSON with camelCase keys; missing keys keep their defaults:
///
/// ```json
/// { "directed": true, "knotRadius": 25, "canvasWidth": 1024 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphOptions {
    pub directed: bool,
    pub weighted: bool,
    pub knot_radius: f64,
    /// Maximum distance between a point and an edge line that still counts as a hit.
    pub hit_tolerance: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            directed: false,
            weighted: false,
            knot_radius: DEFAULT_KNOT_RADIUS,
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl GraphOptions {
    pub fn from_json_str(text: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        let fields = [
            ("knotRadius", self.knot_radius),
            ("hitTolerance", self.hit_tolerance),
            ("canvasWidth", self.canvas_width),
            ("canvasHeight", self.canvas_height),
        ];
        for (field, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(OptionsError::NotPositive { field, value });
            }
        }
        Ok(())
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
