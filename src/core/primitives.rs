use crate::error::{GraphError, GraphResult};

/// Rounds to the nearest integer, resolving `.5` ties toward positive infinity.
///
/// `-2.5` rounds to `-2` and `2.5` rounds to `3`, unlike `f64::round` which
/// rounds ties away from zero.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Formats a tic value the way axis labels are printed.
///
/// Integral values print without a fractional part and negative zero prints as
/// `0`. Magnitudes below `1e-6` or at least `1e21` use exponent form with an
/// explicit sign (`1e+21`, `1.5e-7`).
#[must_use]
pub fn format_tic_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }

    let magnitude = value.abs();
    if !(1.0e-6..1.0e21).contains(&magnitude) && magnitude.is_finite() {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }
    format!("{value}")
}

/// Formats `value` with exactly two decimals, rounding ties away from zero.
///
/// Ties are judged on the exact binary value: `0.125` becomes `0.13`, while
/// `1.005` (stored just below) becomes `1.00`. Negative zero prints as `0.00`.
#[must_use]
pub fn format_two_decimals(value: f64) -> String {
    if !value.is_finite() || value.abs() >= 1.0e21 {
        return format_tic_value(value);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    let eighths = magnitude * 8.0;
    let is_tie = eighths.fract() == 0.0 && eighths % 2.0 == 1.0;
    if is_tie {
        let hundredths = (magnitude * 100.0 + 0.5).floor();
        let whole = (hundredths / 100.0).floor();
        let cents = hundredths - whole * 100.0;
        return format!("{sign}{whole}.{cents:02}");
    }
    format!("{sign}{magnitude:.2}")
}

pub fn finite_value(value: f64, field_name: &str) -> GraphResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GraphError::InvalidData(format!(
            "{field_name} must be finite, got {value}"
        )))
    }
}

pub fn positive_value(value: f64, field_name: &str) -> GraphResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GraphError::InvalidData(format!(
            "{field_name} must be finite and > 0, got {value}"
        )))
    }
}
