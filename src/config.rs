//! Default configuration constants.

// Bounds used when the host supplies none
pub const DEFAULT_MIN: f64 = 0.0;
pub const DEFAULT_MAX: f64 = 1200.0;
pub const DEFAULT_STEP: f64 = 1.0;

// Decimal digits f64 carries reliably; finer steps round at this precision
pub const MAX_STEP_PRECISION: usize = 15;

// Presentation flags
pub const DEFAULT_TOOLTIP: bool = true;
pub const DEFAULT_SHOW_TOOLTIPS: bool = true;

// Prefix shown in front of each value on dual-handle tooltips
pub const TOOLTIP_PREFIX: &str = "$";

// Relayout rate limits for continuous host callbacks
pub const SCROLL_THROTTLE_MS: f64 = 100.0;
pub const RESIZE_THROTTLE_MS: f64 = 50.0;

// Handle slots
pub const SINGLE_HANDLES: usize = 1;
pub const DUAL_HANDLES: usize = 2;
