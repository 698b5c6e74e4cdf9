//! Numeric helpers for step precision, quantization and value formatting.

use crate::config::MAX_STEP_PRECISION;

/// Number of fractional digits carried by `step`.
///
/// Taken from the shortest decimal form of the step, so `0.1` gives 1,
/// `1.25` gives 2 and `2.0` gives 0. Capped at [`MAX_STEP_PRECISION`].
pub fn step_precision(step: f64) -> usize {
    let text = step.to_string();
    let digits = match text.split_once('.') {
        Some((_, fraction)) => fraction.trim_end_matches('0').len(),
        None => 0,
    };
    digits.min(MAX_STEP_PRECISION)
}

/// Round `value` to `precision` decimal digits.
///
/// Values too large to scale by the precision come back unchanged.
pub fn round_to(value: f64, precision: usize) -> f64 {
    let factor = 10f64.powi(precision.min(MAX_STEP_PRECISION) as i32);
    let rounded = (value * factor).round() / factor;
    if !rounded.is_finite() {
        return value;
    }
    // -0.0 formats as "-0", keep the sign out of labels
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Snap `value` up to the next multiple of `step`.
///
/// Always rounds toward the far end of the track, never to the nearest step.
#[inline]
pub fn quantize_up(value: f64, step: f64) -> f64 {
    (value / step).ceil() * step
}

/// Format `value` in fixed notation with `precision` fractional digits.
pub fn format_fixed(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, round_to(value, precision))
}

/// Percentage of `value` along `[min, max]` scaled to `extent`.
#[inline]
pub(crate) fn position_of(value: f64, min: f64, max: f64, extent: f64) -> f64 {
    (value - min) / (max - min) * extent
}
