use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::core::axis::{Axis, AxisConfig, ObserverId};
use crate::core::types::{ExtentChange, TicKind, ZoomDirection};

/// Shared, single-threaded handle to an [`Axis`].
///
/// Markers and hosts hold clones of the same handle. Mutators release the
/// inner borrow before the extent observer runs, so an observer is free to
/// read the axis (or any other handle to it).
#[derive(Debug, Clone, Default)]
pub struct SharedAxis {
    inner: Rc<RefCell<Axis>>,
}

impl SharedAxis {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_axis(axis: Axis) -> Self {
        Self {
            inner: Rc::new(RefCell::new(axis)),
        }
    }

    #[must_use]
    pub fn from_config(config: AxisConfig) -> Self {
        Self::from_axis(Axis::from_config(config))
    }

    /// Borrows the axis for reading.
    ///
    /// # Panics
    ///
    /// Panics if called from code that already holds a mutable borrow, which
    /// the handle itself never does while user code runs.
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, Axis> {
        self.inner.borrow()
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.inner.borrow().min()
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.inner.borrow().max()
    }

    #[must_use]
    pub fn length(&self) -> u32 {
        self.inner.borrow().length()
    }

    #[must_use]
    pub fn px_per_unit(&self) -> f64 {
        self.inner.borrow().px_per_unit()
    }

    #[must_use]
    pub fn extent(&self) -> ExtentChange {
        self.inner.borrow().extent()
    }

    pub fn set_min(&self, value: f64) {
        let notice = self.inner.borrow_mut().stage_min(value);
        if let Some(notice) = notice {
            notice.deliver();
        }
    }

    pub fn set_max(&self, value: f64) {
        let notice = self.inner.borrow_mut().stage_max(value);
        if let Some(notice) = notice {
            notice.deliver();
        }
    }

    pub fn set_length(&self, value: f64) {
        self.inner.borrow_mut().set_length(value);
    }

    pub fn set_major_inc(&self, inc: f64) {
        self.inner.borrow_mut().set_major_inc(inc);
    }

    pub fn set_minor_inc(&self, inc: f64) {
        self.inner.borrow_mut().set_minor_inc(inc);
    }

    pub fn set_extent_observer<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(f64, f64) + 'static,
    {
        self.inner.borrow_mut().set_extent_observer(observer)
    }

    pub fn clear_extent_observer(&self, id: ObserverId) -> bool {
        self.inner.borrow_mut().clear_extent_observer(id)
    }

    #[must_use]
    pub fn has_extent_observer(&self) -> bool {
        self.inner.borrow().has_extent_observer()
    }

    #[must_use]
    pub fn tic_marks(&self, kind: TicKind) -> Vec<String> {
        self.inner.borrow().tic_marks(kind)
    }

    #[must_use]
    pub fn tic_coordinates(&self, kind: TicKind) -> Vec<f64> {
        self.inner.borrow().tic_coordinates(kind)
    }

    pub fn zoom(&self, direction: ZoomDirection, factor: f64) {
        let targets = self.inner.borrow().zoom_targets(direction, factor);
        if let Some((min, max)) = targets {
            self.set_min(min);
            self.set_max(max);
        }
    }

    pub fn shift(&self, amount_px: f64) {
        self.inner.borrow_mut().shift(amount_px);
    }
}

impl From<Axis> for SharedAxis {
    fn from(axis: Axis) -> Self {
        Self::from_axis(axis)
    }
}
