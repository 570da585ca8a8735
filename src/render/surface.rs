use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{PixelPoint, Viewport};
use crate::interaction::{ListenerId, PressMoveEvent, PressMoveListener};
use crate::render::CirclePrimitive;

/// Identifier of a shape attached to a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeId(pub u64);

/// Surface handle shared between a host and the overlays drawn on it.
pub type SharedSurface<S> = Rc<RefCell<S>>;

/// Retained-mode drawing surface hosting interactive shapes.
///
/// Implementations wrap whatever scene graph the host uses. The crate only
/// needs circles, positions, press-move subscriptions and a redraw request.
pub trait Surface {
    /// Pixel size of the drawable area.
    fn viewport(&self) -> Viewport;

    /// Attaches a circle centered at the shape origin and returns its id.
    fn add_circle(&mut self, circle: CirclePrimitive) -> ShapeId;

    /// Detaches a shape. Returns `false` when the shape is unknown.
    fn remove_shape(&mut self, shape: ShapeId) -> bool;

    fn set_shape_position(&mut self, shape: ShapeId, position: PixelPoint);

    fn shape_position(&self, shape: ShapeId) -> Option<PixelPoint>;

    /// Subscribes `listener` to press-move events on `shape`.
    ///
    /// Returns `None` when the shape is unknown.
    fn add_press_move_listener(
        &mut self,
        shape: ShapeId,
        listener: PressMoveListener,
    ) -> Option<ListenerId>;

    fn remove_press_move_listener(&mut self, shape: ShapeId, listener: ListenerId) -> bool;

    /// Listeners currently subscribed to `shape`, in registration order.
    fn press_move_listeners(&self, shape: ShapeId) -> Vec<PressMoveListener>;

    /// Requests an immediate redraw.
    fn update(&mut self);
}

/// Delivers a press-move event to every listener on `shape`.
///
/// Listeners run after the surface borrow is released, so they may update
/// shape positions and request redraws. Returns the number of listeners invoked.
pub fn dispatch_press_move<S: Surface>(
    surface: &RefCell<S>,
    shape: ShapeId,
    event: PressMoveEvent,
) -> usize {
    let listeners = surface.borrow().press_move_listeners(shape);
    trace!(
        shape = shape.0,
        listeners = listeners.len(),
        x = event.stage_x,
        y = event.stage_y,
        "dispatch press-move"
    );
    for listener in &listeners {
        listener(event);
    }
    listeners.len()
}
