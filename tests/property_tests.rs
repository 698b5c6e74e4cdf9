//! Property tests for controller invariants.
//!
//! Uses proptest to verify:
//! 1. Progress geometry stays on the track for any stored value
//! 2. Storing the same value twice is idempotent
//! 3. Dual handles stay ordered under any sequence of updates
//! 4. Out-of-range values clamp to the bounds
//! 5. Pointer mapping with a 0.1 step rounds up to one decimal
//! 6. The tooltip overlap test is symmetric

use proptest::prelude::*;
use rangeable::{
    tooltips_intersecting, InitialValue, Notification, RangeController, RangeOptions, RangeValue,
    Rect,
};
use std::cell::RefCell;
use std::rc::Rc;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_extent() -> impl Strategy<Value = f64> {
    1.0..2000.0_f64
}

fn arb_rect() -> impl Strategy<Value = Rect> {
    (-100.0..100.0_f64, -100.0..100.0_f64, 0.0..80.0_f64, 0.0..40.0_f64)
        .prop_map(|(left, top, width, height)| Rect::new(left, top, width, height))
}

fn single(min: f64, max: f64, step: f64) -> RangeController {
    let options = RangeOptions {
        min,
        max,
        step,
        ..Default::default()
    };
    RangeController::new(&options).unwrap()
}

fn dual(min: f64, max: f64) -> RangeController {
    let options = RangeOptions {
        min,
        max,
        step: 1.0,
        multiple: true,
        value: Some(InitialValue::Pair([min, max])),
        ..Default::default()
    };
    RangeController::new(&options).unwrap()
}

fn track(extent: f64) -> Rect {
    Rect::new(0.0, 0.0, extent, 10.0)
}

// ── 1. Progress geometry ─────────────────────────────────────────────

proptest! {
    #[test]
    fn single_progress_stays_on_track(value in 0.0..=1200.0_f64, extent in arb_extent()) {
        let mut c = single(0.0, 1200.0, 1.0);
        c.relayout(&track(extent), &[]);
        c.set_value(value, None).unwrap();

        let p = c.compute_position();
        prop_assert_eq!(p.offset_px, 0.0);
        prop_assert!(p.length_px >= 0.0);
        prop_assert!(p.length_px <= extent);
    }

    #[test]
    fn dual_progress_stays_on_track(
        a in 0.0..=1200.0_f64,
        b in 0.0..=1200.0_f64,
        extent in arb_extent(),
    ) {
        let mut c = dual(0.0, 1200.0);
        c.relayout(&track(extent), &[]);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        c.set_value(lo, Some(0)).unwrap();
        c.set_value(hi, Some(1)).unwrap();

        let p = c.compute_position();
        prop_assert!(p.offset_px >= 0.0 && p.offset_px <= extent);
        prop_assert!(p.length_px >= 0.0 && p.length_px <= extent);
    }
}

// ── 2. Idempotence ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn repeated_store_is_idempotent(value in -50.0..150.0_f64) {
        let mut c = single(0.0, 100.0, 0.5);
        let log = Rc::new(RefCell::new(Vec::new()));
        c.set_observer(Box::new(log.clone()));

        let first = c.set_value(value, None).unwrap();
        let second = c.set_value(value, None).unwrap();
        prop_assert_eq!(first, second);

        let log = log.borrow();
        prop_assert_eq!(log.len(), 2);
        prop_assert_eq!(log[0], log[1]);
        prop_assert_eq!(log[0], Notification::Change(RangeValue::Single(first)));
    }
}

// ── 3. Dual ordering ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn dual_handles_stay_ordered(
        ops in prop::collection::vec((-200.0..1400.0_f64, 0usize..2), 1..40),
    ) {
        let mut c = dual(0.0, 1200.0);
        for (value, index) in ops {
            c.set_value(value, Some(index)).unwrap();
            let values = c.values();
            prop_assert!(values[0] <= values[1], "unordered: {:?}", values);
            prop_assert!(values.iter().all(|v| (0.0..=1200.0).contains(v)));
        }
    }

    #[test]
    fn dragging_either_handle_keeps_order(
        start in 0.0..1024.0_f64,
        moves in prop::collection::vec(-100.0..1124.0_f64, 1..20),
    ) {
        let mut c = dual(0.0, 1200.0);
        let down = rangeable::PointerDown {
            point: rangeable::Point::new(start, 0.0),
            track: track(1024.0),
            ..Default::default()
        };
        c.pointer_down(&down).unwrap();
        for x in moves {
            c.pointer_move(rangeable::Point::new(x, 0.0));
            let values = c.values();
            prop_assert!(values[0] <= values[1], "unordered: {:?}", values);
        }
    }
}

// ── 4. Clamping ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn out_of_range_clamps_to_bounds(min in -100.0..0.0_f64, span in 1.0..500.0_f64) {
        let min = min.round();
        let max = min + span.round();
        let mut c = single(min, max, 1.0);

        prop_assert_eq!(c.set_value(min - 10.0, None).unwrap(), min);
        prop_assert_eq!(c.values()[0], min);
        prop_assert_eq!(c.set_value(max + 10.0, None).unwrap(), max);
        prop_assert_eq!(c.values()[0], max);
    }
}

// ── 5. Quantization ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn tenth_step_rounds_up_to_one_decimal(pos in 0.0..300.0_f64, extent in 10.0..300.0_f64) {
        let (min, max) = (0.0, 10.0);
        let c = single(min, max, 0.1);

        let percent = pos / extent * 100.0;
        let raw = percent * (max - min) / 100.0 + min;
        let expected = ((raw / 0.1).ceil() * 0.1 * 10.0).round() / 10.0;

        let value = c.value_from_pointer(pos, 0.0, extent, None).unwrap();
        prop_assert_eq!(value, expected);
        prop_assert!(value >= raw - 1e-9);
    }
}

#[test]
fn tenth_step_pointer_cases_near_float_boundaries() {
    let c = single(0.0, 10.0, 0.1);
    // (pointer px, track px, value)
    let cases = [
        (3.0, 100.0, 0.3),
        (30.0, 1000.0, 0.3),
        // raw lands at 0.7000000000000002, just past 0.7
        (7.0, 100.0, 0.8),
        // raw 3.3333333333333326 moves up to the next tenth
        (1.0, 3.0, 3.4),
        (2.0, 3.0, 6.7),
        (50.0, 100.0, 5.0),
    ];
    for (pos, extent, expected) in cases {
        assert_eq!(
            c.value_from_pointer(pos, 0.0, extent, None),
            Ok(expected),
            "pointer {} on {}px",
            pos,
            extent
        );
    }
}

// ── 6. Overlap symmetry ──────────────────────────────────────────────

proptest! {
    #[test]
    fn overlap_is_symmetric(a in arb_rect(), b in arb_rect()) {
        prop_assert_eq!(tooltips_intersecting(&a, &b), tooltips_intersecting(&b, &a));
    }

    #[test]
    fn rect_overlaps_itself(a in arb_rect()) {
        prop_assert!(tooltips_intersecting(&a, &a));
    }
}
