//! Geometry inputs supplied by the host: axis, pointer points and element
//! bounding rectangles.

use serde::{Deserialize, Serialize};

/// Axis the track runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Axis {
    #[default]
    Horizontal,
    /// Inverted: the minimum sits at the bottom of the track.
    Vertical,
}

impl Axis {
    pub fn from_vertical(vertical: bool) -> Self {
        if vertical {
            Axis::Vertical
        } else {
            Axis::Horizontal
        }
    }
}

/// Pointer position in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Coordinate along `axis`.
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

/// Axis-aligned bounding rectangle, as reported by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Leading edge along `axis` (left or top).
    pub fn start(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Length along `axis` (width or height).
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width(),
            Axis::Vertical => self.height(),
        }
    }
}

impl From<&web_sys::DomRect> for Rect {
    fn from(rect: &web_sys::DomRect) -> Self {
        Self {
            left: rect.left(),
            top: rect.top(),
            right: rect.right(),
            bottom: rect.bottom(),
        }
    }
}

/// Filled progress region along the track, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Distance from the track origin (left, or bottom for vertical tracks).
    pub offset_px: f64,
    pub length_px: f64,
}

/// Whether two tooltip boxes overlap.
///
/// Boxes that merely touch count as overlapping.
pub fn tooltips_intersecting(a: &Rect, b: &Rect) -> bool {
    !(a.right < b.left || a.left > b.right || a.bottom < b.top || a.top > b.bottom)
}
