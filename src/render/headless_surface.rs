use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::core::{PixelPoint, Viewport};
use crate::interaction::{ListenerId, PressMoveListener};
use crate::render::{CirclePrimitive, ShapeId, Surface};

struct ShapeEntry {
    circle: CirclePrimitive,
    position: PixelPoint,
    listeners: SmallVec<[(ListenerId, PressMoveListener); 1]>,
}

/// In-memory surface used by tests and headless hosts.
///
/// Shapes keep insertion order and every redraw request is counted.
pub struct HeadlessSurface {
    viewport: Viewport,
    shapes: IndexMap<ShapeId, ShapeEntry>,
    next_shape_id: u64,
    next_listener_id: u64,
    update_count: usize,
}

impl fmt::Debug for HeadlessSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessSurface")
            .field("viewport", &self.viewport)
            .field("shapes", &self.shapes.keys().collect::<Vec<_>>())
            .field("update_count", &self.update_count)
            .finish()
    }
}

impl HeadlessSurface {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            shapes: IndexMap::new(),
            next_shape_id: 1,
            next_listener_id: 1,
            update_count: 0,
        }
    }

    #[must_use]
    pub fn update_count(&self) -> usize {
        self.update_count
    }

    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn shape_ids(&self) -> Vec<ShapeId> {
        self.shapes.keys().copied().collect()
    }

    #[must_use]
    pub fn circle(&self, shape: ShapeId) -> Option<CirclePrimitive> {
        self.shapes.get(&shape).map(|entry| entry.circle)
    }

    #[must_use]
    pub fn listener_count(&self, shape: ShapeId) -> usize {
        self.shapes
            .get(&shape)
            .map_or(0, |entry| entry.listeners.len())
    }
}

impl Surface for HeadlessSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn add_circle(&mut self, circle: CirclePrimitive) -> ShapeId {
        let id = ShapeId(self.next_shape_id);
        self.next_shape_id += 1;
        self.shapes.insert(
            id,
            ShapeEntry {
                circle,
                position: PixelPoint::new(0.0, 0.0),
                listeners: SmallVec::new(),
            },
        );
        id
    }

    fn remove_shape(&mut self, shape: ShapeId) -> bool {
        self.shapes.shift_remove(&shape).is_some()
    }

    fn set_shape_position(&mut self, shape: ShapeId, position: PixelPoint) {
        if let Some(entry) = self.shapes.get_mut(&shape) {
            entry.position = position;
        }
    }

    fn shape_position(&self, shape: ShapeId) -> Option<PixelPoint> {
        self.shapes.get(&shape).map(|entry| entry.position)
    }

    fn add_press_move_listener(
        &mut self,
        shape: ShapeId,
        listener: PressMoveListener,
    ) -> Option<ListenerId> {
        let entry = self.shapes.get_mut(&shape)?;
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        entry.listeners.push((id, listener));
        Some(id)
    }

    fn remove_press_move_listener(&mut self, shape: ShapeId, listener: ListenerId) -> bool {
        let Some(entry) = self.shapes.get_mut(&shape) else {
            return false;
        };
        let before = entry.listeners.len();
        entry.listeners.retain(|(id, _)| *id != listener);
        entry.listeners.len() != before
    }

    fn press_move_listeners(&self, shape: ShapeId) -> Vec<PressMoveListener> {
        self.shapes.get(&shape).map_or_else(Vec::new, |entry| {
            entry
                .listeners
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect()
        })
    }

    fn update(&mut self) {
        self.update_count += 1;
    }
}
