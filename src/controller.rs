//! The range controller: stored handle values, clamping, step quantization
//! and the geometry derived from them.

use crate::config::{DUAL_HANDLES, SINGLE_HANDLES};
use crate::geometry::{Axis, Progress, Rect};
use crate::observer::{RangeObserver, RangeValue};
use crate::options::{RangeOptions, TrackSize};
use crate::utils::{position_of, quantize_up, round_to, step_precision};
use crate::RangeError;
use log::{debug, info, warn};

/// Number of handles on the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Single,
    /// Two ordered handles selecting a sub-range.
    Dual,
}

impl Mode {
    pub fn handle_count(self) -> usize {
        match self {
            Mode::Single => SINGLE_HANDLES,
            Mode::Dual => DUAL_HANDLES,
        }
    }
}

pub struct RangeController {
    min: f64,
    max: f64,
    step: f64,
    precision: usize,
    mode: Mode,
    axis: Axis,
    values: Vec<f64>,
    defaults: Vec<f64>,
    track_origin_px: f64,
    track_extent_px: f64,
    handle_rects: Vec<Rect>,
    pub(crate) active_handle: Option<usize>,
    progress: Progress,
    tooltip: bool,
    show_tooltips: bool,
    size: Option<TrackSize>,
    pub(crate) observer: Box<dyn RangeObserver>,
}

impl RangeController {
    /// Build a controller from host options without notifying anyone.
    pub fn new(options: &RangeOptions) -> Result<Self, RangeError> {
        let mut controller = Self {
            min: options.min,
            max: options.max,
            step: options.step,
            precision: 0,
            mode: options.mode(),
            axis: options.axis(),
            values: Vec::new(),
            defaults: Vec::new(),
            track_origin_px: 0.0,
            track_extent_px: 0.0,
            handle_rects: Vec::new(),
            active_handle: None,
            progress: Progress::default(),
            tooltip: options.tooltip,
            show_tooltips: options.show_tooltips,
            size: options.size.clone(),
            observer: Box::new(()),
        };
        controller.configure(
            options.min,
            options.max,
            options.step,
            options.mode(),
            &options.initial_values(),
        )?;
        Ok(controller)
    }

    /// Build a controller and announce it to `observer` via `on_init`.
    pub fn with_observer(
        options: &RangeOptions,
        observer: Box<dyn RangeObserver>,
    ) -> Result<Self, RangeError> {
        let mut controller = Self::new(options)?;
        controller.observer = observer;
        let value = controller.value();
        controller.observer.on_init(value);
        Ok(controller)
    }

    pub fn set_observer(&mut self, observer: Box<dyn RangeObserver>) {
        self.observer = observer;
    }

    /// Reset bounds, step, mode and values. Nothing is changed on error.
    pub fn configure(
        &mut self,
        min: f64,
        max: f64,
        step: f64,
        mode: Mode,
        initial_values: &[f64],
    ) -> Result<(), RangeError> {
        validate(min, max, step, mode, initial_values)?;

        self.min = min;
        self.max = max;
        self.step = step;
        self.precision = step_precision(step);
        self.mode = mode;
        self.values = initial_values.to_vec();
        self.defaults = initial_values.to_vec();
        self.active_handle = None;
        self.progress = self.compute_position();

        info!(
            "Configured {:?} range [{}, {}] step {} with values {:?}",
            mode, min, max, step, self.values
        );
        Ok(())
    }

    /// Change the step alone and re-apply the stored values at the new
    /// precision.
    pub fn set_step(&mut self, step: f64) -> Result<(), RangeError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(RangeError::InvalidConfiguration(format!(
                "step must be positive, got {}",
                step
            )));
        }
        self.step = step;
        self.precision = step_precision(step);

        let before = self.values.clone();
        for slot in 0..self.values.len() {
            let settled = round_to(self.values[slot], self.precision).clamp(self.min, self.max);
            self.values[slot] = self.order_against_other(settled, slot);
        }
        self.progress = self.compute_position();

        if self.values != before {
            let value = self.value();
            self.observer.on_change(value);
        }
        Ok(())
    }

    /// Map a pointer coordinate along the track to a quantized value.
    ///
    /// Pure: nothing is stored. In dual mode the result is held on the
    /// active handle's side of the other handle. Fails with
    /// [`RangeError::ZeroTrackExtent`] when the track is not laid out.
    pub fn value_from_pointer(
        &self,
        axis_coordinate: f64,
        track_origin_px: f64,
        track_extent_px: f64,
        active_index: Option<usize>,
    ) -> Result<f64, RangeError> {
        if !(track_extent_px.is_finite() && track_extent_px > 0.0) {
            return Err(RangeError::ZeroTrackExtent);
        }

        let pos = axis_coordinate - track_origin_px;
        let percent = match self.axis {
            Axis::Vertical => (track_extent_px - pos) / track_extent_px * 100.0,
            Axis::Horizontal => pos / track_extent_px * 100.0,
        };

        let raw = percent * (self.max - self.min) / 100.0 + self.min;
        let mut value = round_to(quantize_up(raw, self.step), self.precision);

        if self.mode == Mode::Dual {
            match active_index {
                Some(0) => value = value.min(self.values[1]),
                Some(1) => value = value.max(self.values[0]),
                _ => {}
            }
        }

        Ok(value)
    }

    /// Store a value, clamped into range and rounded to the step's
    /// precision, then notify `on_change`.
    ///
    /// `index` is ignored with one handle and required with two. In dual
    /// mode the value is held against the other handle so the pair stays
    /// ordered.
    pub fn set_value(&mut self, value: f64, index: Option<usize>) -> Result<f64, RangeError> {
        if !value.is_finite() {
            return Err(RangeError::NonFiniteValue);
        }
        let slot = self.slot(index)?;
        let stored = self.settle(value, slot);

        self.values[slot] = stored;
        self.progress = self.compute_position();
        debug!(
            "Handle {} set to {} (progress {:?})",
            slot, stored, self.progress
        );

        let value = self.value();
        self.observer.on_change(value);
        Ok(stored)
    }

    /// Restore the configured values, then notify `on_change` and `on_end`.
    pub fn reset(&mut self) {
        self.values = self.defaults.clone();
        self.active_handle = None;
        self.progress = self.compute_position();

        let value = self.value();
        debug!("Range reset to {:?}", value);
        self.observer.on_change(value);
        self.observer.on_end(value);
    }

    /// Refresh the cached layout from the host's bounding rectangles.
    pub fn relayout(&mut self, track: &Rect, handles: &[Rect]) {
        self.track_origin_px = track.start(self.axis);
        self.track_extent_px = track.extent(self.axis).max(0.0);
        self.handle_rects = handles.to_vec();
        self.progress = self.compute_position();
    }

    /// Offset and length of the filled region for the current values.
    pub fn compute_position(&self) -> Progress {
        let pos = |v: f64| position_of(v, self.min, self.max, self.track_extent_px);
        match self.values.as_slice() {
            [start, end] => {
                let offset_px = pos(*start);
                Progress {
                    offset_px,
                    length_px: pos(*end) - offset_px,
                }
            }
            [value] => Progress {
                offset_px: 0.0,
                length_px: pos(*value),
            },
            _ => Progress::default(),
        }
    }

    /// Choose the handle a pointer-down should drag.
    ///
    /// A handle under the pointer wins outright; otherwise the handle whose
    /// leading edge is nearest, with ties going to the first handle.
    pub fn pick_active_handle(
        &self,
        pointer_axis_coordinate: f64,
        target_handle: Option<usize>,
        handle_a: &Rect,
        handle_b: &Rect,
    ) -> usize {
        if self.mode == Mode::Single {
            return 0;
        }
        if let Some(index) = target_handle.filter(|i| *i < DUAL_HANDLES) {
            return index;
        }

        let dist_a = (pointer_axis_coordinate - handle_a.start(self.axis)).abs();
        let dist_b = (pointer_axis_coordinate - handle_b.start(self.axis)).abs();
        if dist_a > dist_b {
            1
        } else {
            0
        }
    }

    pub fn value(&self) -> RangeValue {
        RangeValue::from_slice(&self.values)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn defaults(&self) -> &[f64] {
        &self.defaults
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Decimal digits implied by the step.
    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn active_handle(&self) -> Option<usize> {
        self.active_handle
    }

    pub fn track_origin_px(&self) -> f64 {
        self.track_origin_px
    }

    pub fn track_extent_px(&self) -> f64 {
        self.track_extent_px
    }

    pub fn handle_rects(&self) -> &[Rect] {
        &self.handle_rects
    }

    /// Progress geometry as of the last store or relayout.
    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn tooltip_enabled(&self) -> bool {
        self.tooltip
    }

    pub fn show_tooltips(&self) -> bool {
        self.show_tooltips
    }

    pub fn size(&self) -> Option<&TrackSize> {
        self.size.as_ref()
    }

    /// Slot an update targets.
    fn slot(&self, index: Option<usize>) -> Result<usize, RangeError> {
        match (self.mode, index) {
            (Mode::Single, _) => Ok(0),
            (Mode::Dual, None) => {
                warn!("Rejected dual-handle update without a handle index");
                Err(RangeError::MissingHandleIndex)
            }
            (Mode::Dual, Some(i)) if i < DUAL_HANDLES => Ok(i),
            (Mode::Dual, Some(i)) => Err(RangeError::HandleOutOfRange(i)),
        }
    }

    /// The value `set_value` would store into `slot`.
    pub(crate) fn settle(&self, value: f64, slot: usize) -> f64 {
        let bounded = round_to(value, self.precision).clamp(self.min, self.max);
        self.order_against_other(bounded, slot)
    }

    fn order_against_other(&self, value: f64, slot: usize) -> f64 {
        match (self.mode, slot) {
            (Mode::Dual, 0) => value.min(self.values[1]),
            (Mode::Dual, _) => value.max(self.values[0]),
            (Mode::Single, _) => value,
        }
    }

    pub(crate) fn handle_rect(&self, slot: usize) -> Rect {
        if let Some(rect) = self.handle_rects.get(slot) {
            return *rect;
        }
        // No rect from the host yet: use a zero-size box at the value.
        let pos = position_of(
            self.values[slot],
            self.min,
            self.max,
            self.track_extent_px,
        );
        let edge = match self.axis {
            Axis::Horizontal => self.track_origin_px + pos,
            Axis::Vertical => self.track_origin_px + self.track_extent_px - pos,
        };
        Rect {
            left: edge,
            top: edge,
            right: edge,
            bottom: edge,
        }
    }
}

fn validate(
    min: f64,
    max: f64,
    step: f64,
    mode: Mode,
    values: &[f64],
) -> Result<(), RangeError> {
    let invalid = |reason: String| Err(RangeError::InvalidConfiguration(reason));

    if !(min.is_finite() && max.is_finite()) {
        return invalid(format!("bounds must be finite, got [{}, {}]", min, max));
    }
    if min >= max {
        return invalid(format!("min {} must be below max {}", min, max));
    }
    if !(step.is_finite() && step > 0.0) {
        return invalid(format!("step must be positive, got {}", step));
    }
    if values.len() != mode.handle_count() {
        return invalid(format!(
            "{:?} mode needs {} value(s), got {}",
            mode,
            mode.handle_count(),
            values.len()
        ));
    }
    if let Some(v) = values.iter().find(|v| !(min..=max).contains(*v)) {
        return invalid(format!("value {} is outside [{}, {}]", v, min, max));
    }
    if let [start, end] = values {
        if start > end {
            return invalid(format!("values out of order: {} > {}", start, end));
        }
    }
    Ok(())
}
