//! JavaScript bindings.
//!
//! The host page owns the DOM: it renders the track, handles and tips, and
//! forwards mouse/touch events and bounding rectangles to a `Rangeable`.
//! Values come back through the `onInit`/`onChange`/`onEnd` functions passed
//! to the constructor.

use crate::config::{RESIZE_THROTTLE_MS, SCROLL_THROTTLE_MS};
use crate::geometry::{Point, Rect};
use crate::gesture::PointerDown;
use crate::observer::{RangeObserver, RangeValue};
use crate::options::RangeOptions;
use crate::throttle::ThrottleWindow;
use crate::{RangeController, RangeError};
use js_sys::Function;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{DomRect, MouseEvent, TouchEvent};

/// Forwards notifications to JS callbacks.
struct JsObserver {
    on_init: Option<Function>,
    on_change: Option<Function>,
    on_end: Option<Function>,
}

impl JsObserver {
    fn call(callback: &Option<Function>, value: RangeValue) {
        let Some(callback) = callback else {
            return;
        };
        let arg = serde_wasm_bindgen::to_value(&value).unwrap_or(JsValue::NULL);
        if let Err(e) = callback.call1(&JsValue::NULL, &arg) {
            warn!("Range callback threw: {:?}", e);
        }
    }
}

impl RangeObserver for JsObserver {
    fn on_init(&mut self, value: RangeValue) {
        Self::call(&self.on_init, value);
    }

    fn on_change(&mut self, value: RangeValue) {
        Self::call(&self.on_change, value);
    }

    fn on_end(&mut self, value: RangeValue) {
        Self::call(&self.on_end, value);
    }
}

fn to_js_error(e: RangeError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_js<T: serde::Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

fn handle_rects(handle_a: Option<DomRect>, handle_b: Option<DomRect>) -> Vec<Rect> {
    [handle_a, handle_b]
        .iter()
        .flatten()
        .map(Rect::from)
        .collect()
}

/// Log panics to the browser console instead of the opaque
/// "unreachable" trap.
#[wasm_bindgen(js_name = installPanicHook)]
pub fn install_panic_hook() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub struct Rangeable {
    controller: RangeController,
    scroll: ThrottleWindow,
    resize: ThrottleWindow,
}

#[wasm_bindgen]
impl Rangeable {
    /// Create a range from an options object (`min`, `max`, `step`, `value`,
    /// `vertical`, `multiple`, `tooltip`, `showTooltips`, `size`).
    #[wasm_bindgen(constructor)]
    pub fn new(
        options: JsValue,
        on_init: Option<Function>,
        on_change: Option<Function>,
        on_end: Option<Function>,
    ) -> Result<Rangeable, JsValue> {
        let options: RangeOptions = if options.is_undefined() || options.is_null() {
            RangeOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsValue::from_str(&format!("Failed to read options: {}", e)))?
        };

        let observer = JsObserver {
            on_init,
            on_change,
            on_end,
        };
        let controller =
            RangeController::with_observer(&options, Box::new(observer)).map_err(to_js_error)?;

        Ok(Rangeable {
            controller,
            scroll: ThrottleWindow::new(SCROLL_THROTTLE_MS),
            resize: ThrottleWindow::new(RESIZE_THROTTLE_MS),
        })
    }

    /// Store a value; `index` is required with two handles.
    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&mut self, value: f64, index: Option<u32>) -> Result<f64, JsValue> {
        self.controller
            .set_value(value, index.map(|i| i as usize))
            .map_err(to_js_error)
    }

    /// Current value: a number, or `[start, end]` with two handles.
    pub fn value(&self) -> JsValue {
        to_js(&self.controller.value())
    }

    /// Restore the configured value(s), as on a form reset.
    pub fn reset(&mut self) {
        self.controller.reset();
    }

    #[wasm_bindgen(js_name = setStep)]
    pub fn set_step(&mut self, step: f64) -> Result<(), JsValue> {
        self.controller.set_step(step).map_err(to_js_error)
    }

    /// Refresh layout from freshly measured rectangles.
    pub fn relayout(&mut self, track: &DomRect, handle_a: Option<DomRect>, handle_b: Option<DomRect>) {
        self.controller
            .relayout(&Rect::from(track), &handle_rects(handle_a, handle_b));
    }

    /// Throttled relayout for scroll events. Returns whether it ran.
    #[wasm_bindgen(js_name = requestScrollLayout)]
    pub fn request_scroll_layout(
        &mut self,
        track: &DomRect,
        handle_a: Option<DomRect>,
        handle_b: Option<DomRect>,
    ) -> bool {
        if !self.scroll.admit(js_sys::Date::now()) {
            return false;
        }
        self.relayout(track, handle_a, handle_b);
        true
    }

    /// Throttled relayout for window resizes. Returns whether it ran.
    #[wasm_bindgen(js_name = requestResizeLayout)]
    pub fn request_resize_layout(
        &mut self,
        track: &DomRect,
        handle_a: Option<DomRect>,
        handle_b: Option<DomRect>,
    ) -> bool {
        if !self.resize.admit(js_sys::Date::now()) {
            return false;
        }
        self.relayout(track, handle_a, handle_b);
        true
    }

    /// Start a mouse drag. `target_handle` is the handle under the pointer,
    /// if any.
    #[wasm_bindgen(js_name = mouseDown)]
    pub fn mouse_down(
        &mut self,
        event: &MouseEvent,
        target_handle: Option<u32>,
        track: &DomRect,
        handle_a: Option<DomRect>,
        handle_b: Option<DomRect>,
    ) -> Result<JsValue, JsValue> {
        let point = Point::new(event.client_x() as f64, event.client_y() as f64);
        self.down(point, target_handle, track, handle_a, handle_b)
    }

    /// Start a touch drag from the first touch point.
    #[wasm_bindgen(js_name = touchStart)]
    pub fn touch_start(
        &mut self,
        event: &TouchEvent,
        target_handle: Option<u32>,
        track: &DomRect,
        handle_a: Option<DomRect>,
        handle_b: Option<DomRect>,
    ) -> Result<JsValue, JsValue> {
        let point = first_touch(event).ok_or_else(|| JsValue::from_str("Touch event has no touches"))?;
        self.down(point, target_handle, track, handle_a, handle_b)
    }

    /// Follow a mouse drag. Returns whether a new value was stored.
    #[wasm_bindgen(js_name = mouseMove)]
    pub fn mouse_move(&mut self, event: &MouseEvent) -> bool {
        let point = Point::new(event.client_x() as f64, event.client_y() as f64);
        self.controller.pointer_move(point).is_some()
    }

    /// Follow a touch drag. Returns whether a new value was stored.
    #[wasm_bindgen(js_name = touchMove)]
    pub fn touch_move(&mut self, event: &TouchEvent) -> bool {
        match first_touch(event) {
            Some(point) => self.controller.pointer_move(point).is_some(),
            None => false,
        }
    }

    /// End the drag (mouseup, touchend, touchcancel). Returns the final
    /// value, or `undefined` when no drag was active.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> JsValue {
        match self.controller.pointer_up() {
            Some(value) => to_js(&value),
            None => JsValue::UNDEFINED,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn dragging(&self) -> bool {
        self.controller.active_handle().is_some()
    }

    #[wasm_bindgen(getter, js_name = activeHandle)]
    pub fn active_handle(&self) -> Option<u32> {
        self.controller.active_handle().map(|i| i as u32)
    }

    /// `{ offsetPx, lengthPx }` of the filled region.
    pub fn progress(&self) -> JsValue {
        to_js(&self.controller.progress())
    }

    /// `{ handles, combined }` tooltip text. `combined` is only set for two
    /// handles with `tooltip` on and overlapping tips.
    #[wasm_bindgen(js_name = tooltipLabels)]
    pub fn tooltip_labels(&self, tip_a: Option<DomRect>, tip_b: Option<DomRect>) -> JsValue {
        let rects = tip_a.zip(tip_b).map(|(a, b)| (Rect::from(&a), Rect::from(&b)));
        let labels = self
            .controller
            .tooltip_labels(rects.as_ref().map(|(a, b)| (a, b)));
        to_js(&labels)
    }

    /// CSS length for the track, when the options asked for one.
    #[wasm_bindgen(js_name = trackSize)]
    pub fn track_size(&self) -> Option<String> {
        self.controller.size().map(|s| s.to_css())
    }

    #[wasm_bindgen(getter, js_name = showTooltips)]
    pub fn show_tooltips(&self) -> bool {
        self.controller.show_tooltips()
    }
}

impl Rangeable {
    fn down(
        &mut self,
        point: Point,
        target_handle: Option<u32>,
        track: &DomRect,
        handle_a: Option<DomRect>,
        handle_b: Option<DomRect>,
    ) -> Result<JsValue, JsValue> {
        let down = PointerDown {
            point,
            target_handle: target_handle.map(|i| i as usize),
            track: Rect::from(track),
            handles: handle_rects(handle_a, handle_b),
        };
        let value = self.controller.pointer_down(&down).map_err(to_js_error)?;
        Ok(to_js(&value))
    }
}

fn first_touch(event: &TouchEvent) -> Option<Point> {
    let touch = event.touches().get(0)?;
    Some(Point::new(touch.client_x() as f64, touch.client_y() as f64))
}
