use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Pointer moved while pressed over a shape.
///
/// Coordinates are surface-relative pixels, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressMoveEvent {
    pub stage_x: f64,
    pub stage_y: f64,
}

impl PressMoveEvent {
    #[must_use]
    pub fn new(stage_x: f64, stage_y: f64) -> Self {
        Self { stage_x, stage_y }
    }
}

/// Handler subscribed to press-move events on one shape.
pub type PressMoveListener = Rc<dyn Fn(PressMoveEvent)>;

/// Token returned when a press-move listener is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

/// Subscriber notified with the marker's domain position after every drag update.
pub type PositionSubscriber = Rc<dyn Fn(f64, f64)>;
