use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::render::Color;

/// Serializable marker setup.
///
/// Axis lengths are the pixel spans the marker maps each axis onto, usually
/// the surface width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerConfig {
    #[serde(default = "default_radius_px")]
    pub radius_px: f64,
    #[serde(default = "default_marker_color")]
    pub color: Color,
    pub x_axis_length_px: f64,
    pub y_axis_length_px: f64,
}

impl MarkerConfig {
    #[must_use]
    pub fn new(x_axis_length_px: f64, y_axis_length_px: f64) -> Self {
        Self {
            radius_px: default_radius_px(),
            color: default_marker_color(),
            x_axis_length_px,
            y_axis_length_px,
        }
    }

    #[must_use]
    pub fn with_radius_px(mut self, radius_px: f64) -> Self {
        self.radius_px = radius_px;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the fill from a CSS hex code such as `#ff0000`.
    pub fn with_hex_color(mut self, hex: &str) -> GraphResult<Self> {
        self.color = Color::from_hex(hex)?;
        Ok(self)
    }

    pub(crate) fn validate(self) -> GraphResult<Self> {
        for (axis, length) in [("x", self.x_axis_length_px), ("y", self.y_axis_length_px)] {
            if !length.is_finite() || length < 1.0 {
                return Err(GraphError::InvalidAxisLength { axis, length });
            }
        }
        if !self.radius_px.is_finite() || self.radius_px < 0.0 {
            return Err(GraphError::InvalidData(
                "marker radius must be finite and >= 0".to_owned(),
            ));
        }
        self.color.validate()?;
        Ok(self)
    }
}

fn default_radius_px() -> f64 {
    10.0
}

fn default_marker_color() -> Color {
    Color::rgb(1.0, 0.0, 0.0)
}
