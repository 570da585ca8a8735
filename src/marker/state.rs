use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{trace, warn};

use crate::core::{ExtentChange, ObserverId, PixelPoint, SharedAxis};
use crate::interaction::{ListenerId, PositionSubscriber, PressMoveEvent};
use crate::render::{ShapeId, SharedSurface, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum AxisSlot {
    X,
    Y,
}

/// Collaborators captured by a successful `create`.
pub(super) struct MarkerBinding<S: Surface> {
    pub(super) surface: SharedSurface<S>,
    pub(super) shape: ShapeId,
    pub(super) listener: Option<ListenerId>,
    pub(super) x_axis: SharedAxis,
    pub(super) x_len: f64,
    pub(super) x_observer: ObserverId,
    pub(super) y_axis: SharedAxis,
    pub(super) y_len: f64,
    pub(super) y_observer: ObserverId,
}

pub(super) struct MarkerState<S: Surface> {
    pub(super) x: f64,
    pub(super) y: f64,
    pub(super) binding: Option<MarkerBinding<S>>,
    pub(super) subscribers: Vec<PositionSubscriber>,
}

impl<S: Surface> Default for MarkerState<S> {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            binding: None,
            subscribers: Vec::new(),
        }
    }
}

/// Pixels per domain unit for a captured length over the current extents.
///
/// `None` when the extents cannot be mapped (zero or non-finite span).
fn pixels_per_unit(length: f64, extent: ExtentChange) -> Option<f64> {
    let scale = length / (extent.max - extent.min);
    (scale.is_finite() && scale != 0.0).then_some(scale)
}

impl<S: Surface + 'static> MarkerState<S> {
    /// Moves the shape horizontally to `value` and stores it as the domain x.
    pub(super) fn place_x(&mut self, value: f64) {
        self.place(AxisSlot::X, value);
    }

    /// Moves the shape vertically to `value` and stores it as the domain y.
    pub(super) fn place_y(&mut self, value: f64) {
        self.place(AxisSlot::Y, value);
    }

    fn place(&mut self, slot: AxisSlot, value: f64) {
        let Some(binding) = self.binding.as_ref() else {
            trace!(?slot, "marker not created; ignoring coordinate assignment");
            return;
        };
        if !value.is_finite() {
            trace!(?slot, value, "ignoring non-finite marker coordinate");
            return;
        }

        let (axis, length) = match slot {
            AxisSlot::X => (&binding.x_axis, binding.x_len),
            AxisSlot::Y => (&binding.y_axis, binding.y_len),
        };
        let extent = axis.extent();

        {
            let mut surface = binding.surface.borrow_mut();
            match pixels_per_unit(length, extent) {
                Some(scale) => {
                    let current = surface
                        .shape_position(binding.shape)
                        .unwrap_or(PixelPoint::new(0.0, 0.0));
                    let position = match slot {
                        AxisSlot::X => PixelPoint::new((value - extent.min) * scale, current.y),
                        AxisSlot::Y => PixelPoint::new(current.x, (extent.max - value) * scale),
                    };
                    surface.set_shape_position(binding.shape, position);
                }
                None => trace!(
                    ?slot,
                    min = extent.min,
                    max = extent.max,
                    "axis extents cannot be mapped; keeping marker pixel position"
                ),
            }
            surface.update();
        }

        match slot {
            AxisSlot::X => self.x = value,
            AxisSlot::Y => self.y = value,
        }
    }

    pub(super) fn on_axis_changed(state: &Weak<RefCell<Self>>, slot: AxisSlot) {
        let Some(state) = state.upgrade() else {
            return;
        };
        let Ok(mut state) = state.try_borrow_mut() else {
            warn!(?slot, "marker busy during axis extent change; skipping resync");
            return;
        };
        match slot {
            AxisSlot::X => {
                let x = state.x;
                state.place_x(x);
            }
            AxisSlot::Y => {
                let y = state.y;
                state.place_y(y);
            }
        }
    }

    /// Drag update: pixel position, then domain position, then subscribers, then redraw.
    ///
    /// The pointer position is applied as-is, so the marker may leave the axis bounds.
    /// Events with a non-finite coordinate are dropped.
    pub(super) fn on_press_move(state: &Weak<RefCell<Self>>, event: PressMoveEvent) {
        if !event.stage_x.is_finite() || !event.stage_y.is_finite() {
            trace!(x = event.stage_x, y = event.stage_y, "ignoring non-finite press-move");
            return;
        }
        let Some(state) = state.upgrade() else {
            return;
        };

        let (x, y, subscribers, surface) = {
            let Ok(mut state) = state.try_borrow_mut() else {
                warn!("marker busy during press-move; dropping event");
                return;
            };
            let Some(binding) = state.binding.as_ref() else {
                return;
            };

            binding.surface.borrow_mut().set_shape_position(
                binding.shape,
                PixelPoint::new(event.stage_x, event.stage_y),
            );

            let x_extent = binding.x_axis.extent();
            let x = pixels_per_unit(binding.x_len, x_extent)
                .map_or(state.x, |scale| event.stage_x / scale + x_extent.min);
            let y_extent = binding.y_axis.extent();
            let y = pixels_per_unit(binding.y_len, y_extent)
                .map_or(state.y, |scale| y_extent.max - event.stage_y / scale);
            let surface = Rc::clone(&binding.surface);

            state.x = x;
            state.y = y;
            (x, y, state.subscribers.clone(), surface)
        };

        trace!(x, y, subscribers = subscribers.len(), "marker dragged");
        for subscriber in &subscribers {
            subscriber(x, y);
        }
        surface.borrow_mut().update();
    }

    /// Detaches the shape and listener and gives up both axis observer slots.
    pub(super) fn detach(&mut self) {
        let Some(binding) = self.binding.take() else {
            return;
        };

        {
            let mut surface = binding.surface.borrow_mut();
            if let Some(listener) = binding.listener {
                surface.remove_press_move_listener(binding.shape, listener);
            }
            surface.remove_shape(binding.shape);
        }
        binding.x_axis.clear_extent_observer(binding.x_observer);
        binding.y_axis.clear_extent_observer(binding.y_observer);
        trace!(shape = binding.shape.0, "marker detached");
    }
}
