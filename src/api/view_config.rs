use serde::{Deserialize, Serialize};

use crate::core::AxisConfig;
use crate::error::{GraphError, GraphResult};
use crate::render::Color;

use super::RulerStyle;

/// Domain extents of both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl GraphBounds {
    #[must_use]
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Bounds widened about their midpoints by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        let scale = |min: f64, max: f64| {
            let midpoint = 0.5 * (min + max);
            let half = (max - midpoint) * factor;
            (midpoint - half, midpoint + half)
        };
        let (x_min, x_max) = scale(self.x_min, self.x_max);
        let (y_min, y_max) = scale(self.y_min, self.y_max);
        Self::new(x_min, x_max, y_min, y_max)
    }
}

/// Public graph view bootstrap configuration.
///
/// Serializable so hosts can keep the setup next to their own settings.
/// Axis lengths left at zero are taken from the surface viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphViewConfig {
    #[serde(default = "default_x_axis")]
    pub x_axis: AxisConfig,
    #[serde(default = "default_y_axis")]
    pub y_axis: AxisConfig,
    #[serde(default = "default_marker_radius_px")]
    pub marker_radius_px: f64,
    #[serde(default = "default_marker_color")]
    pub marker_color: Color,
    #[serde(default = "default_zoom_factor")]
    pub zoom_factor: f64,
    #[serde(default)]
    pub ruler_style: RulerStyle,
}

impl Default for GraphViewConfig {
    fn default() -> Self {
        Self {
            x_axis: default_x_axis(),
            y_axis: default_y_axis(),
            marker_radius_px: default_marker_radius_px(),
            marker_color: default_marker_color(),
            zoom_factor: default_zoom_factor(),
            ruler_style: RulerStyle::default(),
        }
    }
}

impl GraphViewConfig {
    /// Sets both axis extents, keeping lengths and tic increments.
    #[must_use]
    pub fn with_bounds(mut self, bounds: GraphBounds) -> Self {
        self.x_axis.min = bounds.x_min;
        self.x_axis.max = bounds.x_max;
        self.y_axis.min = bounds.y_min;
        self.y_axis.max = bounds.y_max;
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, axis: AxisConfig) -> Self {
        self.x_axis = axis;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, axis: AxisConfig) -> Self {
        self.y_axis = axis;
        self
    }

    #[must_use]
    pub fn with_marker_style(mut self, radius_px: f64, color: Color) -> Self {
        self.marker_radius_px = radius_px;
        self.marker_color = color;
        self
    }

    #[must_use]
    pub fn with_zoom_factor(mut self, zoom_factor: f64) -> Self {
        self.zoom_factor = zoom_factor;
        self
    }

    #[must_use]
    pub fn with_ruler_style(mut self, style: RulerStyle) -> Self {
        self.ruler_style = style;
        self
    }

    #[must_use]
    pub fn bounds(&self) -> GraphBounds {
        GraphBounds::new(
            self.x_axis.min,
            self.x_axis.max,
            self.y_axis.min,
            self.y_axis.max,
        )
    }

    pub fn validate(self) -> GraphResult<Self> {
        self.x_axis.validate()?;
        self.y_axis.validate()?;
        if !self.zoom_factor.is_finite() || self.zoom_factor < 1.0 {
            return Err(GraphError::InvalidData(
                "zoom factor must be finite and >= 1".to_owned(),
            ));
        }
        self.ruler_style.validate()?;
        Ok(self)
    }

    pub fn to_json_pretty(&self) -> GraphResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            GraphError::InvalidData(format!("failed to serialize graph view config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> GraphResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            GraphError::InvalidData(format!("failed to parse graph view config: {e}"))
        })?;
        config.validate()
    }
}

fn default_x_axis() -> AxisConfig {
    AxisConfig::new(-5.0, 5.0).with_tic_increments(1.0, 0.5)
}

fn default_y_axis() -> AxisConfig {
    AxisConfig::new(-4.0, 4.0).with_tic_increments(1.0, 0.5)
}

fn default_marker_radius_px() -> f64 {
    10.0
}

fn default_marker_color() -> Color {
    Color::rgb(1.0, 0.0, 0.0)
}

fn default_zoom_factor() -> f64 {
    2.0
}
