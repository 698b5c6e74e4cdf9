//! Tooltip label text, and merging the two dual-handle tips into one when
//! they collide.

use crate::config::TOOLTIP_PREFIX;
use crate::controller::{Mode, RangeController};
use crate::geometry::{tooltips_intersecting, Rect};
use crate::utils::format_fixed;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipLabels {
    /// One label per handle, in index order.
    pub handles: Vec<String>,
    /// Shared label shown instead of both handle labels when they overlap.
    pub combined: Option<String>,
}

/// Text for the combined dual-handle tip.
///
/// Equal values collapse to the bare value, otherwise both are shown as a
/// prefixed span.
pub fn combined_label(start: f64, end: f64, precision: usize) -> String {
    let (a, b) = (format_fixed(start, precision), format_fixed(end, precision));
    if a == b {
        a
    } else {
        format!("{p} {} - {p} {}", a, b, p = TOOLTIP_PREFIX)
    }
}

impl RangeController {
    /// Labels for the current values.
    ///
    /// `tip_rects` are the measured boxes of the two handle tips. With two
    /// handles, tooltips enabled and overlapping boxes, a combined label is
    /// produced as well.
    pub fn tooltip_labels(&self, tip_rects: Option<(&Rect, &Rect)>) -> TooltipLabels {
        let precision = self.precision();
        match self.mode() {
            Mode::Single => TooltipLabels {
                handles: self
                    .values()
                    .iter()
                    .map(|v| format_fixed(*v, precision))
                    .collect(),
                combined: None,
            },
            Mode::Dual => {
                let handles = self
                    .values()
                    .iter()
                    .map(|v| format!("{}{}", TOOLTIP_PREFIX, format_fixed(*v, precision)))
                    .collect();
                let combined = tip_rects
                    .filter(|_| self.tooltip_enabled())
                    .filter(|(a, b)| tooltips_intersecting(a, b))
                    .map(|_| combined_label(self.values()[0], self.values()[1], precision));
                TooltipLabels { handles, combined }
            }
        }
    }
}
