//! Drag gesture handling.
//!
//! One gesture at a time: pointer-down picks a handle and starts dragging,
//! pointer-move follows it, pointer-up ends it. The host delivers the events
//! however its environment allows; moves and ups while idle are ignored.

use crate::controller::{Mode, RangeController};
use crate::geometry::{Point, Rect};
use crate::observer::RangeValue;
use crate::RangeError;
use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging { handle: usize },
}

/// Everything the host knows when a press starts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointerDown {
    pub point: Point,
    /// Handle under the pointer, if the press landed on one.
    pub target_handle: Option<usize>,
    /// Fresh bounding rectangle of the track.
    pub track: Rect,
    /// Fresh bounding rectangles of the handles, in index order.
    pub handles: Vec<Rect>,
}

impl RangeController {
    pub fn drag_state(&self) -> DragState {
        match self.active_handle {
            Some(handle) => DragState::Dragging { handle },
            None => DragState::Idle,
        }
    }

    /// Start a gesture: refresh layout, pick the handle and store the value
    /// under the pointer.
    ///
    /// The machine stays idle when the track has no extent or the pointer
    /// coordinate is not a number.
    pub fn pointer_down(&mut self, down: &PointerDown) -> Result<RangeValue, RangeError> {
        self.relayout(&down.track, &down.handles);

        let coordinate = down.point.along(self.axis());
        let handle = match self.mode() {
            Mode::Single => 0,
            Mode::Dual => {
                let (a, b) = (self.handle_rect(0), self.handle_rect(1));
                self.pick_active_handle(coordinate, down.target_handle, &a, &b)
            }
        };

        let value = self
            .value_from_pointer(
                coordinate,
                self.track_origin_px(),
                self.track_extent_px(),
                Some(handle),
            )
            .map_err(|e| {
                warn!("Ignoring pointer-down: {}", e);
                e
            })?;

        self.set_value(value, Some(handle))?;
        self.active_handle = Some(handle);
        debug!("Dragging handle {} from {}", handle, coordinate);
        Ok(self.value())
    }

    /// Follow the pointer while dragging.
    ///
    /// Returns the new value when a different step was reached; repeated
    /// moves inside one step store nothing and notify nobody.
    pub fn pointer_move(&mut self, point: Point) -> Option<RangeValue> {
        let handle = self.active_handle?;
        let candidate = match self.value_from_pointer(
            point.along(self.axis()),
            self.track_origin_px(),
            self.track_extent_px(),
            Some(handle),
        ) {
            Ok(v) => v,
            Err(e) => {
                warn!("Ignoring pointer-move: {}", e);
                return None;
            }
        };

        if self.settle(candidate, handle) == self.values()[handle] {
            return None;
        }
        self.set_value(candidate, Some(handle)).ok()?;
        Some(self.value())
    }

    /// Finish the gesture and notify `on_end`.
    pub fn pointer_up(&mut self) -> Option<RangeValue> {
        let handle = self.active_handle.take()?;
        let value = self.value();
        debug!("Released handle {} at {:?}", handle, value);
        self.observer.on_end(value);
        Some(value)
    }
}
