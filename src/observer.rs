//! Notifications delivered to the host when values change.

use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

/// Current value of the control: one number, or the ordered pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RangeValue {
    Single(f64),
    Dual(f64, f64),
}

impl RangeValue {
    pub(crate) fn from_slice(values: &[f64]) -> Self {
        match values {
            [a, b] => RangeValue::Dual(*a, *b),
            [a, ..] => RangeValue::Single(*a),
            [] => RangeValue::Single(f64::NAN),
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        match *self {
            RangeValue::Single(v) => vec![v],
            RangeValue::Dual(a, b) => vec![a, b],
        }
    }
}

/// Host-side listener for value notifications. Every method defaults to a
/// no-op, so hosts implement only what they watch.
pub trait RangeObserver {
    /// The controller was created.
    fn on_init(&mut self, _value: RangeValue) {}

    /// A value was stored; fires on every successful `set_value`.
    fn on_change(&mut self, _value: RangeValue) {}

    /// A drag gesture finished or the control was reset.
    fn on_end(&mut self, _value: RangeValue) {}
}

/// Observer that ignores everything.
impl RangeObserver for () {}

/// Which notification fired, for observers that record a stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notification {
    Init(RangeValue),
    Change(RangeValue),
    End(RangeValue),
}

/// Collects every notification in order.
impl RangeObserver for Vec<Notification> {
    fn on_init(&mut self, value: RangeValue) {
        self.push(Notification::Init(value));
    }

    fn on_change(&mut self, value: RangeValue) {
        self.push(Notification::Change(value));
    }

    fn on_end(&mut self, value: RangeValue) {
        self.push(Notification::End(value));
    }
}

/// Shared observer, so the host can keep reading what it collected.
impl<T: RangeObserver> RangeObserver for Rc<RefCell<T>> {
    fn on_init(&mut self, value: RangeValue) {
        self.borrow_mut().on_init(value);
    }

    fn on_change(&mut self, value: RangeValue) {
        self.borrow_mut().on_change(value);
    }

    fn on_end(&mut self, value: RangeValue) {
        self.borrow_mut().on_end(value);
    }
}
