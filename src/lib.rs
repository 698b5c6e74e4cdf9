//! Range slider core: handle values, pointer-to-value mapping, dual-handle
//! ordering and progress geometry for a browser range control.
//!
//! The DOM side (node creation, styling, listeners) belongs to the host. It
//! feeds pointer coordinates and bounding rectangles in, and observes value
//! notifications through [`RangeObserver`].

use std::fmt;

pub mod bindings;
pub mod config;
pub mod controller;
pub mod geometry;
pub mod gesture;
pub mod hooks;
pub mod observer;
pub mod options;
pub mod throttle;
pub mod tooltip;
pub mod utils;

pub use controller::{Mode, RangeController};
pub use geometry::{tooltips_intersecting, Axis, Point, Progress, Rect};
pub use gesture::{DragState, PointerDown};
pub use observer::{Notification, RangeObserver, RangeValue};
pub use options::{InitialValue, RangeOptions, TrackSize};
pub use tooltip::TooltipLabels;

/// Errors raised by the range controller.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeError {
    /// Bounds, step or initial values rejected at setup.
    InvalidConfiguration(String),
    /// A dual-handle update did not say which handle it targets.
    MissingHandleIndex,
    /// Handle index beyond the handles the control has.
    HandleOutOfRange(usize),
    /// NaN or infinite value passed to `set_value`.
    NonFiniteValue,
    /// Pointer mapping attempted before the track was laid out.
    ZeroTrackExtent,
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::InvalidConfiguration(reason) => {
                write!(f, "Invalid range configuration: {}", reason)
            }
            RangeError::MissingHandleIndex => write!(
                f,
                "A handle index is required when the range has two handles"
            ),
            RangeError::HandleOutOfRange(index) => {
                write!(f, "Handle index {} is out of range", index)
            }
            RangeError::NonFiniteValue => write!(f, "Value must be a finite number"),
            RangeError::ZeroTrackExtent => write!(
                f,
                "Track has zero extent; refresh the layout before handling pointer input"
            ),
        }
    }
}

impl std::error::Error for RangeError {}
