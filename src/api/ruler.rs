use serde::{Deserialize, Serialize};

use crate::core::{Axis, TicKind, Viewport};
use crate::error::{GraphError, GraphResult};
use crate::render::{Color, LinePrimitive, RenderFrame, TextHAlign, TextPrimitive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RulerOrientation {
    /// Along the top edge, `min` at the left.
    Horizontal,
    /// Along the left edge, `min` at the bottom.
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RulerStyle {
    pub major_tic_px: f64,
    pub minor_tic_px: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub label_font_px: f64,
    pub label_gap_px: f64,
}

impl Default for RulerStyle {
    fn default() -> Self {
        Self {
            major_tic_px: 10.0,
            minor_tic_px: 5.0,
            stroke_width: 1.0,
            color: Color::rgb(0.2, 0.2, 0.2),
            label_font_px: 11.0,
            label_gap_px: 4.0,
        }
    }
}

impl RulerStyle {
    pub(crate) fn validate(self) -> GraphResult<Self> {
        for (value, name) in [
            (self.major_tic_px, "major_tic_px"),
            (self.minor_tic_px, "minor_tic_px"),
            (self.stroke_width, "stroke_width"),
            (self.label_font_px, "label_font_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GraphError::InvalidData(format!(
                    "ruler style `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.label_gap_px.is_finite() || self.label_gap_px < 0.0 {
            return Err(GraphError::InvalidData(
                "ruler style `label_gap_px` must be finite and >= 0".to_owned(),
            ));
        }
        self.color.validate()?;
        Ok(self)
    }
}

/// Builds a ruler for `axis`: a baseline, one line per major and minor tic
/// coordinate, and a label for every major tic.
///
/// A degenerate axis, or one with equal extents, yields only the baseline.
pub fn build_ruler_frame(
    axis: &Axis,
    orientation: RulerOrientation,
    viewport: Viewport,
    style: RulerStyle,
) -> GraphResult<RenderFrame> {
    let style = style.validate()?;
    let length = f64::from(axis.length());
    let mut frame = RenderFrame::new(viewport);

    let segment = |offset: f64, depth: f64| match orientation {
        RulerOrientation::Horizontal => {
            LinePrimitive::new(offset, 0.0, offset, depth, style.stroke_width, style.color)
        }
        RulerOrientation::Vertical => {
            let y = length - offset;
            LinePrimitive::new(0.0, y, depth, y, style.stroke_width, style.color)
        }
    };

    frame.lines.push(match orientation {
        RulerOrientation::Horizontal => {
            LinePrimitive::new(0.0, 0.0, length, 0.0, style.stroke_width, style.color)
        }
        RulerOrientation::Vertical => {
            LinePrimitive::new(0.0, 0.0, 0.0, length, style.stroke_width, style.color)
        }
    });

    for offset in axis.tic_coordinates(TicKind::Minor) {
        frame.lines.push(segment(offset, style.minor_tic_px));
    }

    let major_offsets = axis.tic_coordinates(TicKind::Major);
    for &offset in &major_offsets {
        frame.lines.push(segment(offset, style.major_tic_px));
    }

    let label_depth = style.major_tic_px + style.label_gap_px;
    for (label, offset) in axis.tic_marks(TicKind::Major).into_iter().zip(major_offsets) {
        let text = match orientation {
            RulerOrientation::Horizontal => TextPrimitive::new(
                label,
                offset,
                label_depth,
                style.label_font_px,
                style.color,
                TextHAlign::Center,
            ),
            RulerOrientation::Vertical => TextPrimitive::new(
                label,
                label_depth,
                length - offset,
                style.label_font_px,
                style.color,
                TextHAlign::Left,
            ),
        };
        frame.texts.push(text);
    }

    Ok(frame)
}
