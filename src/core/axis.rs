use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::primitives::{finite_value, positive_value, round_half_up};
use crate::core::tics::{self, first_tic, label_walk};
use crate::core::types::{ExtentChange, TicKind, ZoomDirection};
use crate::error::{GraphError, GraphResult};

/// Callback invoked with `(min, max)` after an extent setter runs.
pub type ExtentObserver = Rc<dyn Fn(f64, f64)>;

/// Token identifying one extent observer registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

struct ObserverSlot {
    id: ObserverId,
    callback: ExtentObserver,
}

/// Extent notification staged by a setter.
///
/// Delivery is split from mutation so a shared axis can release its borrow
/// before running observer code.
#[must_use]
pub(crate) struct ExtentNotice {
    callback: Option<ExtentObserver>,
    change: ExtentChange,
}

impl ExtentNotice {
    pub(crate) fn deliver(self) {
        if let Some(callback) = self.callback {
            callback(self.change.min, self.change.max);
        }
    }
}

/// One-dimensional linear mapping between a domain range and a pixel span.
///
/// An axis does not draw anything. It keeps the numbers needed to place a
/// marker or draw a ruler: extents, pixel length, pixels per unit and tic
/// increments.
///
/// `min > max` is accepted and makes the axis degenerate (`px_per_unit == 0`).
/// Equal extents with a non-zero length give an infinite `px_per_unit`: tic
/// labels are still produced, pixel offsets and conversions are not.
///
/// The extent observer is a single slot: registering a new observer replaces
/// the previous one.
pub struct Axis {
    min: f64,
    max: f64,
    length: u32,
    px_per_unit: f64,
    major_inc: f64,
    minor_inc: f64,
    observer: Option<ObserverSlot>,
    next_observer_id: u64,
}

impl Default for Axis {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 0.0,
            length: 0,
            px_per_unit: 0.0,
            major_inc: 0.0,
            minor_inc: 0.0,
            observer: None,
            next_observer_id: 1,
        }
    }
}

impl fmt::Debug for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Axis")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("length", &self.length)
            .field("px_per_unit", &self.px_per_unit)
            .field("major_inc", &self.major_inc)
            .field("minor_inc", &self.minor_inc)
            .field("observer", &self.observer.as_ref().map(|slot| slot.id))
            .finish()
    }
}

impl Axis {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an axis from config values, applying each through its setter.
    #[must_use]
    pub fn from_config(config: AxisConfig) -> Self {
        let mut axis = Self::new();
        axis.set_length(config.length_px);
        axis.set_min(config.min);
        axis.set_max(config.max);
        axis.set_major_inc(config.major_inc);
        axis.set_minor_inc(config.minor_inc);
        axis
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn length(&self) -> u32 {
        self.length
    }

    #[must_use]
    pub fn px_per_unit(&self) -> f64 {
        self.px_per_unit
    }

    #[must_use]
    pub fn major_inc(&self) -> f64 {
        self.major_inc
    }

    #[must_use]
    pub fn minor_inc(&self) -> f64 {
        self.minor_inc
    }

    #[must_use]
    pub fn extent(&self) -> ExtentChange {
        ExtentChange {
            min: self.min,
            max: self.max,
        }
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.max + self.min)
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.px_per_unit == 0.0
    }

    /// Assigns the minimum extent and notifies the observer.
    ///
    /// Non-finite values are ignored. The observer runs on every accepted
    /// assignment, including one that leaves the value unchanged.
    pub fn set_min(&mut self, value: f64) {
        if let Some(notice) = self.stage_min(value) {
            notice.deliver();
        }
    }

    /// Assigns the maximum extent and notifies the observer.
    ///
    /// Same acceptance and notification rules as [`Axis::set_min`].
    pub fn set_max(&mut self, value: f64) {
        if let Some(notice) = self.stage_max(value) {
            notice.deliver();
        }
    }

    pub(crate) fn stage_min(&mut self, value: f64) -> Option<ExtentNotice> {
        match finite_value(value, "axis min") {
            Ok(value) => {
                self.min = value;
                self.refresh_px_per_unit();
                Some(self.extent_notice())
            }
            Err(err) => {
                trace!(error = %err, "ignoring axis min assignment");
                None
            }
        }
    }

    pub(crate) fn stage_max(&mut self, value: f64) -> Option<ExtentNotice> {
        match finite_value(value, "axis max") {
            Ok(value) => {
                self.max = value;
                self.refresh_px_per_unit();
                Some(self.extent_notice())
            }
            Err(err) => {
                trace!(error = %err, "ignoring axis max assignment");
                None
            }
        }
    }

    /// Assigns the pixel length, rounded to an integer and made non-negative.
    ///
    /// Does not notify the extent observer.
    pub fn set_length(&mut self, value: f64) {
        match finite_value(value, "axis length") {
            Ok(value) => {
                let rounded = round_half_up(value).abs();
                self.length = if rounded >= f64::from(u32::MAX) {
                    u32::MAX
                } else {
                    rounded as u32
                };
                self.refresh_px_per_unit();
            }
            Err(err) => trace!(error = %err, "ignoring axis length assignment"),
        }
    }

    pub fn set_major_inc(&mut self, inc: f64) {
        match positive_value(inc, "major tic increment") {
            Ok(inc) => self.major_inc = inc,
            Err(err) => trace!(error = %err, "ignoring major tic increment"),
        }
    }

    pub fn set_minor_inc(&mut self, inc: f64) {
        match positive_value(inc, "minor tic increment") {
            Ok(inc) => self.minor_inc = inc,
            Err(err) => trace!(error = %err, "ignoring minor tic increment"),
        }
    }

    /// Registers the extent observer, replacing any previous registration.
    pub fn set_extent_observer<F>(&mut self, observer: F) -> ObserverId
    where
        F: Fn(f64, f64) + 'static,
    {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id = self.next_observer_id.wrapping_add(1);
        if self.observer.is_some() {
            trace!(?id, "replacing axis extent observer");
        }
        self.observer = Some(ObserverSlot {
            id,
            callback: Rc::new(observer),
        });
        id
    }

    /// Clears the extent observer if `id` still owns the slot.
    ///
    /// Returns `true` when an observer was removed.
    pub fn clear_extent_observer(&mut self, id: ObserverId) -> bool {
        if self.observer.as_ref().is_some_and(|slot| slot.id == id) {
            self.observer = None;
            return true;
        }
        false
    }

    #[must_use]
    pub fn has_extent_observer(&self) -> bool {
        self.observer.is_some()
    }

    #[must_use]
    pub fn extent_observer_id(&self) -> Option<ObserverId> {
        self.observer.as_ref().map(|slot| slot.id)
    }

    /// Tic labels for `kind`.
    ///
    /// `Major` emits the first multiple of `major_inc` at or above `min` and
    /// then every following multiple up to and including `max`.
    ///
    /// `Minor` keeps the long-standing behavior of this query: it only runs
    /// while no minor increment is set (producing a single `"NaN"` label) and
    /// steps by the major increment. Use [`Axis::tic_coordinates`] or
    /// [`tics::tic_values`] for correct minor tics.
    #[must_use]
    pub fn tic_marks(&self, kind: TicKind) -> Vec<String> {
        if self.px_per_unit == 0.0 {
            return Vec::new();
        }

        match kind {
            TicKind::Major => {
                if self.major_inc == 0.0 {
                    return Vec::new();
                }
                label_walk(
                    first_tic(self.min, self.major_inc),
                    self.major_inc,
                    self.max,
                )
            }
            TicKind::Minor => {
                if self.minor_inc != 0.0 {
                    return Vec::new();
                }
                label_walk(
                    first_tic(self.min, self.minor_inc),
                    self.major_inc,
                    self.max,
                )
            }
        }
    }

    /// Pixel offsets of the tics for `kind`, measured from the `min` end of the axis.
    #[must_use]
    pub fn tic_coordinates(&self, kind: TicKind) -> Vec<f64> {
        tics::tic_offsets(self.min, self.max, self.increment(kind), self.px_per_unit)
    }

    /// Domain values of the tics for `kind`.
    #[must_use]
    pub fn tic_values(&self, kind: TicKind) -> Vec<f64> {
        if self.px_per_unit == 0.0 {
            return Vec::new();
        }
        tics::tic_values(self.min, self.max, self.increment(kind))
    }

    #[must_use]
    pub fn increment(&self, kind: TicKind) -> f64 {
        match kind {
            TicKind::Major => self.major_inc,
            TicKind::Minor => self.minor_inc,
        }
    }

    /// Zooms about the current midpoint by an integer factor.
    ///
    /// Factors that are non-finite or below one are ignored; others are
    /// rounded. The new extents go through `set_min` and then `set_max`, so the
    /// observer hears about both and the first notification carries the new
    /// `min` with the old `max`.
    pub fn zoom(&mut self, direction: ZoomDirection, factor: f64) {
        if let Some((min, max)) = self.zoom_targets(direction, factor) {
            self.set_min(min);
            self.set_max(max);
        }
    }

    pub(crate) fn zoom_targets(&self, direction: ZoomDirection, factor: f64) -> Option<(f64, f64)> {
        if !factor.is_finite() || factor < 1.0 {
            trace!(factor, "ignoring zoom factor");
            return None;
        }

        let factor = round_half_up(factor);
        let midpoint = self.midpoint();
        let half = match direction {
            ZoomDirection::In => (self.max - midpoint) / factor,
            ZoomDirection::Out => (self.max - midpoint) * factor,
        };
        Some((midpoint - half, midpoint + half))
    }

    /// Shifts both extents by a pixel amount converted to domain units.
    ///
    /// Positive amounts decrease both extents. Length and pixels per unit stay
    /// the same and the extent observer is not notified.
    pub fn shift(&mut self, amount_px: f64) {
        if !amount_px.is_finite() {
            trace!(amount_px, "ignoring axis shift");
            return;
        }
        if self.px_per_unit == 0.0 {
            trace!("ignoring shift on degenerate axis");
            return;
        }

        let delta = amount_px / self.px_per_unit;
        self.min -= delta;
        self.max -= delta;
    }

    /// Pixel offset of `value` from the `min` end of the axis.
    #[must_use]
    pub fn domain_to_pixel(&self, value: f64) -> Option<f64> {
        if !self.has_finite_scale() || !value.is_finite() {
            return None;
        }
        Some((value - self.min) * self.px_per_unit)
    }

    /// Domain value at a pixel offset from the `min` end of the axis.
    #[must_use]
    pub fn pixel_to_domain(&self, pixel: f64) -> Option<f64> {
        if !self.has_finite_scale() || !pixel.is_finite() {
            return None;
        }
        Some(self.min + pixel / self.px_per_unit)
    }

    fn has_finite_scale(&self) -> bool {
        self.px_per_unit != 0.0 && self.px_per_unit.is_finite()
    }

    fn refresh_px_per_unit(&mut self) {
        self.px_per_unit = if self.min <= self.max && self.length > 0 {
            f64::from(self.length) / (self.max - self.min)
        } else {
            0.0
        };
    }

    fn extent_notice(&self) -> ExtentNotice {
        ExtentNotice {
            callback: self.observer.as_ref().map(|slot| Rc::clone(&slot.callback)),
            change: self.extent(),
        }
    }
}

/// Serializable axis setup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub length_px: f64,
    #[serde(default)]
    pub major_inc: f64,
    #[serde(default)]
    pub minor_inc: f64,
}

impl AxisConfig {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            length_px: 0.0,
            major_inc: 0.0,
            minor_inc: 0.0,
        }
    }

    #[must_use]
    pub fn with_length_px(mut self, length_px: f64) -> Self {
        self.length_px = length_px;
        self
    }

    #[must_use]
    pub fn with_tic_increments(mut self, major_inc: f64, minor_inc: f64) -> Self {
        self.major_inc = major_inc;
        self.minor_inc = minor_inc;
        self
    }

    /// Checks that extents and length are finite and increments are not negative.
    pub fn validate(self) -> GraphResult<Self> {
        finite_value(self.min, "axis min")?;
        finite_value(self.max, "axis max")?;
        finite_value(self.length_px, "axis length")?;
        for (value, name) in [(self.major_inc, "major_inc"), (self.minor_inc, "minor_inc")] {
            if !value.is_finite() || value < 0.0 {
                return Err(GraphError::InvalidData(format!(
                    "axis config `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}
