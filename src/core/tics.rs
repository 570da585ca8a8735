//! Tic generation as pure functions of `(min, max, increment)`.
//!
//! [`Axis`](crate::core::Axis) delegates here so tic sequences can be tested
//! without constructing axis state.

use tracing::warn;

use crate::core::primitives::{format_tic_value, round_half_up};

/// Smallest multiple of `increment` that is `>= min`.
#[must_use]
pub fn first_tic(min: f64, increment: f64) -> f64 {
    (min / increment).ceil() * increment
}

/// Tic values starting at [`first_tic`] and stepping by `increment` while `<= max`.
///
/// Returns an empty vector when the increment is not a positive finite number
/// or the extents are not finite.
#[must_use]
pub fn tic_values(min: f64, max: f64, increment: f64) -> Vec<f64> {
    if !increment.is_finite() || increment <= 0.0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }

    let mut values = Vec::new();
    let mut tic = first_tic(min, increment);
    while tic <= max {
        values.push(tic);
        let next = tic + increment;
        if next <= tic {
            warn!(tic, increment, max, "tic increment does not advance; stopping");
            break;
        }
        tic = next;
    }
    values
}

/// Pixel offsets of [`tic_values`] measured from `min`.
///
/// Empty when `px_per_unit` is zero or infinite (equal extents).
#[must_use]
pub fn tic_offsets(min: f64, max: f64, increment: f64, px_per_unit: f64) -> Vec<f64> {
    if !px_per_unit.is_finite() || px_per_unit == 0.0 {
        return Vec::new();
    }

    tic_values(min, max, increment)
        .into_iter()
        .map(|tic| round_half_up((tic - min) * px_per_unit))
        .collect()
}

/// Label sequence whose first entry is emitted before the upper bound is checked.
///
/// Later entries step by `step` while `<= max`. This is the label walk axis
/// queries have always used; it differs from [`tic_values`] when no multiple
/// of the increment falls inside `[min, max]`.
pub(crate) fn label_walk(first: f64, step: f64, max: f64) -> Vec<String> {
    let mut labels = vec![format_tic_value(first)];
    let mut tic = first;
    while tic + step <= max {
        let next = tic + step;
        if next <= tic {
            warn!(tic, step, max, "tic label step does not advance; stopping");
            break;
        }
        labels.push(format_tic_value(next));
        tic = next;
    }
    labels
}
