use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::primitives::{format_tic_value, format_two_decimals};
use crate::core::{SharedAxis, Viewport};
use crate::error::{GraphError, GraphResult};
use crate::interaction::PressMoveEvent;
use crate::marker::{Marker, MarkerConfig};
use crate::render::{RenderFrame, Renderer, SharedSurface, Surface, dispatch_press_move};

use super::{
    AxisSnapshot, GraphBounds, GraphViewConfig, GraphViewSnapshot, RulerOrientation, RulerStyle,
    build_ruler_frame,
};

/// Text shown next to the graph: marker position and visible bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphReadout {
    pub marker_x: String,
    pub marker_y: String,
    pub top: String,
    pub left: String,
    pub bottom: String,
    pub right: String,
}

impl GraphReadout {
    fn set_marker(&mut self, x: f64, y: f64) {
        self.marker_x = format_two_decimals(x);
        self.marker_y = format_two_decimals(y);
    }

    fn set_bounds(&mut self, bounds: GraphBounds) {
        self.top = format_tic_value(bounds.y_max);
        self.left = format_tic_value(bounds.x_min);
        self.bottom = format_tic_value(bounds.y_min);
        self.right = format_tic_value(bounds.x_max);
    }
}

/// Which way the next [`GraphView::toggle_zoom`] goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomToggle {
    /// Showing the base bounds; the next toggle widens them.
    Out,
    /// Showing widened bounds; the next toggle restores the base.
    In,
}

impl ZoomToggle {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Out => "Out",
            Self::In => "In",
        }
    }
}

/// Host-side coordinator: two axes spanning a surface and one marker on top.
///
/// Axis lengths default to the surface size, the marker starts at the center
/// of the graph and the readout follows marker drags.
pub struct GraphView<S: Surface + 'static> {
    surface: SharedSurface<S>,
    x_axis: SharedAxis,
    y_axis: SharedAxis,
    marker: Marker<S>,
    readout: Rc<RefCell<GraphReadout>>,
    base_bounds: GraphBounds,
    zoom_toggle: ZoomToggle,
    zoom_factor: f64,
    ruler_style: RulerStyle,
}

impl<S: Surface + 'static> GraphView<S> {
    pub fn new(surface: SharedSurface<S>, config: GraphViewConfig) -> GraphResult<Self> {
        let config = config.validate()?;
        let viewport = surface.borrow().viewport();
        if !viewport.is_valid() {
            return Err(GraphError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let x_len = length_or(config.x_axis.length_px, viewport.width);
        let y_len = length_or(config.y_axis.length_px, viewport.height);
        let x_axis = SharedAxis::from_config(config.x_axis.with_length_px(x_len));
        let y_axis = SharedAxis::from_config(config.y_axis.with_length_px(y_len));

        let mut marker = Marker::new();
        marker.try_create(
            Some(Rc::clone(&surface)),
            Some(x_axis.clone()),
            Some(y_axis.clone()),
            MarkerConfig::new(x_len, y_len)
                .with_radius_px(config.marker_radius_px)
                .with_color(config.marker_color),
        )?;

        let center_x = x_axis.borrow().midpoint();
        let center_y = y_axis.borrow().midpoint();
        marker.set_x(center_x);
        marker.set_y(center_y);

        let base_bounds = config.bounds();
        let mut readout = GraphReadout::default();
        readout.set_marker(center_x, center_y);
        readout.set_bounds(base_bounds);
        let readout = Rc::new(RefCell::new(readout));
        marker.add_subscriber({
            let readout = Rc::clone(&readout);
            move |x, y| readout.borrow_mut().set_marker(x, y)
        });

        debug!(
            width = viewport.width,
            height = viewport.height,
            x_len,
            y_len,
            "graph view created"
        );

        Ok(Self {
            surface,
            x_axis,
            y_axis,
            marker,
            readout,
            base_bounds,
            zoom_toggle: ZoomToggle::Out,
            zoom_factor: config.zoom_factor,
            ruler_style: config.ruler_style,
        })
    }

    #[must_use]
    pub fn surface(&self) -> &SharedSurface<S> {
        &self.surface
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.surface.borrow().viewport()
    }

    #[must_use]
    pub fn x_axis(&self) -> &SharedAxis {
        &self.x_axis
    }

    #[must_use]
    pub fn y_axis(&self) -> &SharedAxis {
        &self.y_axis
    }

    #[must_use]
    pub fn marker(&self) -> &Marker<S> {
        &self.marker
    }

    pub fn marker_mut(&mut self) -> &mut Marker<S> {
        &mut self.marker
    }

    #[must_use]
    pub fn readout(&self) -> GraphReadout {
        self.readout.borrow().clone()
    }

    #[must_use]
    pub fn zoom_toggle(&self) -> ZoomToggle {
        self.zoom_toggle
    }

    #[must_use]
    pub fn bounds(&self) -> GraphBounds {
        let x = self.x_axis.extent();
        let y = self.y_axis.extent();
        GraphBounds::new(x.min, x.max, y.min, y.max)
    }

    /// Assigns all four extents in x-min, x-max, y-min, y-max order.
    ///
    /// The marker re-syncs after each assignment and the bound readouts are refreshed.
    pub fn set_bounds(&mut self, bounds: GraphBounds) {
        self.x_axis.set_min(bounds.x_min);
        self.x_axis.set_max(bounds.x_max);
        self.y_axis.set_min(bounds.y_min);
        self.y_axis.set_max(bounds.y_max);
        let current = self.bounds();
        self.readout.borrow_mut().set_bounds(current);
    }

    /// Alternates between the base bounds and the bounds widened by the zoom factor.
    pub fn toggle_zoom(&mut self) {
        let (bounds, next) = match self.zoom_toggle {
            ZoomToggle::Out => (self.base_bounds.scaled(self.zoom_factor), ZoomToggle::In),
            ZoomToggle::In => (self.base_bounds, ZoomToggle::Out),
        };
        self.set_bounds(bounds);
        self.zoom_toggle = next;
        debug!(toggle = next.label(), "graph zoom toggled");
    }

    /// Routes a press-move event to the marker shape.
    ///
    /// Returns `false` when the marker has no shape or no listener ran.
    pub fn press_move(&self, event: PressMoveEvent) -> bool {
        match self.marker.shape_id() {
            Some(shape) => dispatch_press_move(&self.surface, shape, event) > 0,
            None => false,
        }
    }

    pub fn ruler_frame(&self, orientation: RulerOrientation) -> GraphResult<RenderFrame> {
        let axis = match orientation {
            RulerOrientation::Horizontal => &self.x_axis,
            RulerOrientation::Vertical => &self.y_axis,
        };
        build_ruler_frame(&axis.borrow(), orientation, self.viewport(), self.ruler_style)
    }

    pub fn render_ruler<R: Renderer>(
        &self,
        renderer: &mut R,
        orientation: RulerOrientation,
    ) -> GraphResult<()> {
        let frame = self.ruler_frame(orientation)?;
        renderer.render(&frame)
    }

    #[must_use]
    pub fn snapshot(&self) -> GraphViewSnapshot {
        GraphViewSnapshot {
            viewport: self.viewport(),
            x_axis: AxisSnapshot::capture(&self.x_axis.borrow()),
            y_axis: AxisSnapshot::capture(&self.y_axis.borrow()),
            marker: self.marker.position(),
            marker_pixel: self.marker.pixel_position(),
            readout: self.readout(),
            zoom_toggle: self.zoom_toggle,
        }
    }
}

fn length_or(configured_px: f64, fallback_px: u32) -> f64 {
    if configured_px > 0.0 {
        configured_px
    } else {
        f64::from(fallback_px)
    }
}
