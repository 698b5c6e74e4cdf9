use crate::geometry::{Point, Progress, Rect};
use crate::gesture::PointerDown;
use crate::observer::{Notification, RangeValue};
use crate::options::RangeOptions;
use crate::tooltip::TooltipLabels;
use crate::{RangeController, RangeError};
use std::cell::RefCell;
use std::rc::Rc;
use yew::functional::UseForceUpdateHandle;
use yew::prelude::*;

/// Snapshot of a range control plus the callbacks that drive it.
#[derive(Clone)]
pub struct UseRangeHandle {
    /// Current value, absent when the options were rejected.
    pub value: Option<RangeValue>,
    /// Filled region for the current value(s).
    pub progress: Progress,
    /// Tooltip text, absent when the options were rejected.
    pub labels: Option<TooltipLabels>,
    /// Whether a drag gesture is in progress.
    pub dragging: bool,
    /// Why the options were rejected, or why the last operation failed.
    /// Cleared by the next operation that succeeds.
    pub error: Option<RangeError>,
    /// Feed to `onmousedown` / `ontouchstart` with fresh rectangles.
    pub on_pointer_down: Callback<PointerDown>,
    /// Feed to `onmousemove` / `ontouchmove`.
    pub on_pointer_move: Callback<Point>,
    /// Feed to `onmouseup` / `ontouchend` / `ontouchcancel`.
    pub on_pointer_up: Callback<()>,
    /// Programmatic store: `(value, handle index)`.
    pub set_value: Callback<(f64, Option<usize>)>,
    /// Restore the configured value(s).
    pub reset: Callback<()>,
    /// Refresh layout: `(track rect, handle rects)`.
    pub relayout: Callback<(Rect, Vec<Rect>)>,
    /// Measured boxes of the two dual-handle tips, used to merge their labels.
    pub measure_tips: Callback<Option<(Rect, Rect)>>,
}

type Pending = Rc<RefCell<Vec<Notification>>>;

/// Controller plus what the hook tracks around it.
struct RangeState {
    controller: Result<RangeController, RangeError>,
    pending: Pending,
    last_error: Option<RangeError>,
    tip_rects: Option<(Rect, Rect)>,
}

impl RangeState {
    fn new(options: &RangeOptions) -> Self {
        let pending: Pending = Rc::default();
        let mut controller = RangeController::new(options);
        if let Ok(c) = controller.as_mut() {
            c.set_observer(Box::new(pending.clone()));
        }
        RangeState {
            controller,
            pending,
            last_error: None,
            tip_rects: None,
        }
    }

    /// Run `op`, record its outcome and hand back what it notified.
    ///
    /// Returns `None` when there is no controller to run against.
    fn run(
        &mut self,
        op: impl FnOnce(&mut RangeController) -> Result<(), RangeError>,
    ) -> Option<Vec<Notification>> {
        let controller = self.controller.as_mut().ok()?;
        match op(controller) {
            Ok(()) => self.last_error = None,
            Err(e) => {
                log::warn!("range operation failed: {}", e);
                self.last_error = Some(e);
            }
        }
        Some(self.pending.borrow_mut().drain(..).collect())
    }

    fn error(&self) -> Option<RangeError> {
        match &self.controller {
            Ok(_) => self.last_error.clone(),
            Err(e) => Some(e.clone()),
        }
    }

    fn labels(&self) -> Option<TooltipLabels> {
        let controller = self.controller.as_ref().ok()?;
        let rects = self.tip_rects.as_ref().map(|(a, b)| (a, b));
        Some(controller.tooltip_labels(rects))
    }
}

/// Runs controller operations, then forwards what they notified once the
/// state borrow is released, so re-renders can read it again.
#[derive(Clone)]
struct Driver {
    state: Rc<RefCell<RangeState>>,
    on_change: Callback<RangeValue>,
    on_end: Callback<RangeValue>,
    update: UseForceUpdateHandle,
}

impl Driver {
    fn apply(&self, op: impl FnOnce(&mut RangeController) -> Result<(), RangeError>) {
        let notifications = match self.state.borrow_mut().run(op) {
            Some(n) => n,
            None => return,
        };

        for notification in notifications {
            match notification {
                Notification::Change(value) => self.on_change.emit(value),
                Notification::End(value) => self.on_end.emit(value),
                Notification::Init(_) => {}
            }
        }
        self.update.force_update();
    }

    fn callback<T: 'static>(
        &self,
        op: impl Fn(&mut RangeController, T) -> Result<(), RangeError> + 'static,
    ) -> Callback<T> {
        let driver = self.clone();
        Callback::from(move |arg: T| driver.apply(|controller| op(controller, arg)))
    }
}

/// Custom hook binding a range controller to component state.
///
/// The options are read once, on first render. `on_change` fires for every
/// stored value, `on_end` when a drag finishes or the control is reset.
#[hook]
pub fn use_range(
    options: &RangeOptions,
    on_change: Callback<RangeValue>,
    on_end: Callback<RangeValue>,
) -> UseRangeHandle {
    let state = {
        let options = options.clone();
        use_mut_ref(move || RangeState::new(&options))
    };
    let update = use_force_update();

    let driver = Driver {
        state: state.clone(),
        on_change,
        on_end,
        update: update.clone(),
    };

    let current = state.borrow();
    let (value, progress, dragging) = match &current.controller {
        Ok(c) => (Some(c.value()), c.progress(), c.active_handle().is_some()),
        Err(_) => (None, Progress::default(), false),
    };

    let measure_tips = {
        let state = state.clone();
        Callback::from(move |rects: Option<(Rect, Rect)>| {
            let changed = {
                let mut state = state.borrow_mut();
                let changed = state.tip_rects != rects;
                state.tip_rects = rects;
                changed
            };
            if changed {
                update.force_update();
            }
        })
    };

    UseRangeHandle {
        value,
        progress,
        labels: current.labels(),
        dragging,
        error: current.error(),
        on_pointer_down: driver.callback(|c, down: PointerDown| c.pointer_down(&down).map(drop)),
        on_pointer_move: driver.callback(|c, point: Point| {
            c.pointer_move(point);
            Ok(())
        }),
        on_pointer_up: driver.callback(|c, _: ()| {
            c.pointer_up();
            Ok(())
        }),
        set_value: driver.callback(|c, (value, index): (f64, Option<usize>)| {
            c.set_value(value, index).map(drop)
        }),
        reset: driver.callback(|c, _: ()| {
            c.reset();
            Ok(())
        }),
        relayout: driver.callback(|c, (track, handles): (Rect, Vec<Rect>)| {
            c.relayout(&track, &handles);
            Ok(())
        }),
        measure_tips,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InitialValue;

    fn dual_options() -> RangeOptions {
        RangeOptions {
            min: 0.0,
            max: 1200.0,
            multiple: true,
            value: Some(InitialValue::Pair([150.0, 180.0])),
            ..Default::default()
        }
    }

    #[test]
    fn failed_operation_is_recorded_then_cleared() {
        let mut state = RangeState::new(&dual_options());
        assert_eq!(state.error(), None);

        let sent = state.run(|c| c.set_value(300.0, None).map(drop)).unwrap();
        assert!(sent.is_empty());
        assert_eq!(state.error(), Some(RangeError::MissingHandleIndex));

        let sent = state.run(|c| c.set_value(300.0, Some(1)).map(drop)).unwrap();
        assert_eq!(
            sent,
            vec![Notification::Change(RangeValue::Dual(150.0, 300.0))]
        );
        assert_eq!(state.error(), None);
    }

    #[test]
    fn unlaid_out_pointer_down_reports_error() {
        let mut state = RangeState::new(&dual_options());
        let down = PointerDown {
            point: Point::new(10.0, 0.0),
            ..Default::default()
        };

        state.run(|c| c.pointer_down(&down).map(drop));
        assert_eq!(state.error(), Some(RangeError::ZeroTrackExtent));
        assert!(state.controller.as_ref().unwrap().active_handle().is_none());
    }

    #[test]
    fn rejected_options_keep_their_error() {
        let options = RangeOptions {
            min: 10.0,
            max: 0.0,
            ..Default::default()
        };
        let mut state = RangeState::new(&options);
        assert!(state.run(|_| Ok(())).is_none());
        assert!(matches!(
            state.error(),
            Some(RangeError::InvalidConfiguration(_))
        ));
        assert_eq!(state.labels(), None);
    }

    #[test]
    fn measured_tips_merge_labels() {
        let mut state = RangeState::new(&dual_options());
        assert_eq!(state.labels().unwrap().combined, None);

        state.tip_rects = Some((
            Rect::new(0.0, 0.0, 40.0, 20.0),
            Rect::new(30.0, 0.0, 40.0, 20.0),
        ));
        let labels = state.labels().unwrap();
        assert_eq!(labels.handles, vec!["$150", "$180"]);
        assert_eq!(labels.combined.as_deref(), Some("$ 150 - $ 180"));
    }
}
