//! Draggable circular marker kept in sync with an x and a y axis.
//!
//! The marker stores its position in domain coordinates and derives the
//! shape's pixel position from the axes:
//!
//! - `pixel_x = (x - x_min) * x_len / (x_max - x_min)`
//! - `pixel_y = (y_max - y) * y_len / (y_max - y_min)`
//!
//! Pixel rows grow downward while domain y grows upward, hence the inverted
//! y mapping. When either axis changes its extents the marker re-applies its
//! stored domain coordinate, so it stays on the same domain point and moves
//! on screen.

mod config;
mod state;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

pub use config::MarkerConfig;

use crate::core::{DomainPoint, PixelPoint, SharedAxis};
use crate::error::{GraphError, GraphResult};
use crate::render::{CirclePrimitive, ShapeId, SharedSurface, Surface};

use state::{AxisSlot, MarkerBinding, MarkerState};

/// Interactive point overlay expressed in domain coordinates.
///
/// A marker is inert until [`Marker::create`] succeeds. Dropping it detaches
/// the shape from the surface, removes the drag listener and clears its
/// registration on both axes.
pub struct Marker<S: Surface + 'static> {
    state: Rc<RefCell<MarkerState<S>>>,
}

impl<S: Surface + 'static> Default for Marker<S> {
    fn default() -> Self {
        Self {
            state: Rc::new(RefCell::new(MarkerState::default())),
        }
    }
}

impl<S: Surface + 'static> Marker<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the marker to a surface and two axes.
    ///
    /// Missing collaborators, axis lengths below one pixel or a second call
    /// leave the marker unchanged. Use [`Marker::try_create`] to get the reason.
    pub fn create(
        &mut self,
        surface: Option<SharedSurface<S>>,
        x_axis: Option<SharedAxis>,
        y_axis: Option<SharedAxis>,
        config: MarkerConfig,
    ) {
        if let Err(err) = self.try_create(surface, x_axis, y_axis, config) {
            debug!(error = %err, "marker create ignored");
        }
    }

    /// Fallible form of [`Marker::create`].
    ///
    /// On success the marker registers itself as extent observer on both axes
    /// (replacing any previous observer), adds its circle to the surface,
    /// requests a redraw and subscribes to press-move events on the circle.
    pub fn try_create(
        &mut self,
        surface: Option<SharedSurface<S>>,
        x_axis: Option<SharedAxis>,
        y_axis: Option<SharedAxis>,
        config: MarkerConfig,
    ) -> GraphResult<()> {
        if self.is_created() {
            return Err(GraphError::AlreadyCreated);
        }
        let surface = surface.ok_or(GraphError::MissingCollaborator("surface"))?;
        let x_axis = x_axis.ok_or(GraphError::MissingCollaborator("x axis"))?;
        let y_axis = y_axis.ok_or(GraphError::MissingCollaborator("y axis"))?;
        let config = config.validate()?;

        let weak = Rc::downgrade(&self.state);
        let x_observer = x_axis.set_extent_observer({
            let weak = weak.clone();
            move |_, _| MarkerState::on_axis_changed(&weak, AxisSlot::X)
        });
        let y_observer = y_axis.set_extent_observer({
            let weak = weak.clone();
            move |_, _| MarkerState::on_axis_changed(&weak, AxisSlot::Y)
        });

        let shape = {
            let mut surface = surface.borrow_mut();
            let shape = surface.add_circle(CirclePrimitive::new(config.radius_px, config.color));
            surface.update();
            shape
        };
        let listener = surface.borrow_mut().add_press_move_listener(
            shape,
            Rc::new(move |event| MarkerState::on_press_move(&weak, event)),
        );
        if listener.is_none() {
            warn!(shape = shape.0, "surface refused press-move listener; marker is not draggable");
        }

        self.state.borrow_mut().binding = Some(MarkerBinding {
            surface,
            shape,
            listener,
            x_axis,
            x_len: config.x_axis_length_px,
            x_observer,
            y_axis,
            y_len: config.y_axis_length_px,
            y_observer,
        });
        debug!(
            shape = shape.0,
            radius_px = config.radius_px,
            x_len = config.x_axis_length_px,
            y_len = config.y_axis_length_px,
            "marker created"
        );
        Ok(())
    }

    #[must_use]
    pub fn is_created(&self) -> bool {
        self.state.borrow().binding.is_some()
    }

    /// Current x in domain coordinates.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.state.borrow().x
    }

    /// Current y in domain coordinates.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.state.borrow().y
    }

    #[must_use]
    pub fn position(&self) -> DomainPoint {
        let state = self.state.borrow();
        DomainPoint::new(state.x, state.y)
    }

    /// Places the marker at domain `value` horizontally and redraws.
    ///
    /// No-op before a successful `create`.
    pub fn set_x(&mut self, value: f64) {
        self.state.borrow_mut().place_x(value);
    }

    /// Places the marker at domain `value` vertically and redraws.
    ///
    /// No-op before a successful `create`.
    pub fn set_y(&mut self, value: f64) {
        self.state.borrow_mut().place_y(value);
    }

    /// Adds a callback receiving `(x, y)` in domain coordinates after every drag update.
    ///
    /// Subscribers run in registration order. The same callback may be added twice.
    pub fn add_subscriber<F>(&mut self, subscriber: F)
    where
        F: Fn(f64, f64) + 'static,
    {
        self.state.borrow_mut().subscribers.push(Rc::new(subscriber));
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().subscribers.len()
    }

    #[must_use]
    pub fn shape_id(&self) -> Option<ShapeId> {
        self.state.borrow().binding.as_ref().map(|binding| binding.shape)
    }

    /// Pixel position of the marker shape on its surface.
    #[must_use]
    pub fn pixel_position(&self) -> Option<PixelPoint> {
        let state = self.state.borrow();
        let binding = state.binding.as_ref()?;
        binding.surface.borrow().shape_position(binding.shape)
    }

    /// Detaches the marker from its surface and axes.
    pub fn remove(self) {
        drop(self);
    }
}

impl<S: Surface + 'static> Drop for Marker<S> {
    fn drop(&mut self) {
        match self.state.try_borrow_mut() {
            Ok(mut state) => state.detach(),
            Err(_) => warn!("marker state busy during drop; skipping detach"),
        }
    }
}
