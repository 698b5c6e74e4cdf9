//! Configuration surface recognised at construction.
//!
//! Keys are camelCase to match the JS host; unknown keys are ignored.

use crate::config::{
    DEFAULT_MAX, DEFAULT_MIN, DEFAULT_SHOW_TOOLTIPS, DEFAULT_STEP, DEFAULT_TOOLTIP,
};
use crate::geometry::Axis;
use crate::{Mode, RangeError};
use serde::{Deserialize, Serialize};

/// Initial value: a number for one handle, a pair for two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InitialValue {
    Single(f64),
    Pair([f64; 2]),
}

/// Track size requested by the host: pixels or any CSS length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackSize {
    Pixels(f64),
    Css(String),
}

impl TrackSize {
    /// CSS length for the track's width (or height when vertical).
    pub fn to_css(&self) -> String {
        match self {
            TrackSize::Pixels(px) => format!("{}px", px),
            TrackSize::Css(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeOptions {
    #[serde(default = "default_min")]
    pub min: f64,
    #[serde(default = "default_max")]
    pub max: f64,
    #[serde(default = "default_step")]
    pub step: f64,
    #[serde(default)]
    pub value: Option<InitialValue>,
    #[serde(default)]
    pub vertical: bool,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default = "default_tooltip")]
    pub tooltip: bool,
    #[serde(default = "default_show_tooltips")]
    pub show_tooltips: bool,
    #[serde(default)]
    pub size: Option<TrackSize>,
}

fn default_min() -> f64 {
    DEFAULT_MIN
}

fn default_max() -> f64 {
    DEFAULT_MAX
}

fn default_step() -> f64 {
    DEFAULT_STEP
}

fn default_tooltip() -> bool {
    DEFAULT_TOOLTIP
}

fn default_show_tooltips() -> bool {
    DEFAULT_SHOW_TOOLTIPS
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            step: DEFAULT_STEP,
            value: None,
            vertical: false,
            multiple: false,
            tooltip: DEFAULT_TOOLTIP,
            show_tooltips: DEFAULT_SHOW_TOOLTIPS,
            size: None,
        }
    }
}

impl RangeOptions {
    /// Parse options from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, RangeError> {
        serde_json::from_str(json)
            .map_err(|e| RangeError::InvalidConfiguration(format!("bad options: {}", e)))
    }

    pub fn mode(&self) -> Mode {
        if self.multiple {
            Mode::Dual
        } else {
            Mode::Single
        }
    }

    pub fn axis(&self) -> Axis {
        Axis::from_vertical(self.vertical)
    }

    /// Initial handle values, filling in defaults when none were given.
    ///
    /// A single handle starts at the midpoint of the range, a pair spans
    /// the whole range.
    pub fn initial_values(&self) -> Vec<f64> {
        match (&self.value, self.mode()) {
            (Some(InitialValue::Single(v)), _) => vec![*v],
            (Some(InitialValue::Pair(pair)), _) => pair.to_vec(),
            (None, Mode::Single) => vec![self.min + (self.max - self.min) / 2.0],
            (None, Mode::Dual) => vec![self.min, self.max],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let opts = RangeOptions::from_json("{}").unwrap();
        assert_eq!(opts, RangeOptions::default());
        assert_eq!(opts.min, 0.0);
        assert_eq!(opts.max, 1200.0);
        assert_eq!(opts.step, 1.0);
        assert!(opts.tooltip);
        assert!(opts.show_tooltips);
        assert_eq!(opts.mode(), Mode::Single);
    }

    #[test]
    fn camel_case_keys_and_unknown_keys() {
        let opts = RangeOptions::from_json(
            r##"{"min": 0, "max": 1200, "multiple": true, "showTooltips": false,
               "value": [150, 1000], "color1": "#3db13d"}"##,
        )
        .unwrap();
        assert_eq!(opts.mode(), Mode::Dual);
        assert!(!opts.show_tooltips);
        assert_eq!(opts.initial_values(), vec![150.0, 1000.0]);
    }

    #[test]
    fn missing_value_defaults_by_mode() {
        let single = RangeOptions {
            min: 0.0,
            max: 100.0,
            ..Default::default()
        };
        assert_eq!(single.initial_values(), vec![50.0]);

        let dual = RangeOptions {
            multiple: true,
            ..single
        };
        assert_eq!(dual.initial_values(), vec![0.0, 100.0]);
    }

    #[test]
    fn track_size_css() {
        let opts = RangeOptions::from_json(r#"{"size": 300}"#).unwrap();
        assert_eq!(opts.size.unwrap().to_css(), "300px");
        let opts = RangeOptions::from_json(r#"{"size": "50%", "vertical": true}"#).unwrap();
        assert_eq!(opts.size.as_ref().unwrap().to_css(), "50%");
        assert_eq!(opts.axis(), Axis::Vertical);
    }

    #[test]
    fn malformed_json_is_invalid_configuration() {
        let err = RangeOptions::from_json("{\"min\": \"low\"}").unwrap_err();
        assert!(matches!(err, RangeError::InvalidConfiguration(_)));
    }
}
