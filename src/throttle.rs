//! Leading-edge rate limiting for continuous host callbacks (scroll,
//! resize) that trigger a relayout.

/// Lets the first call through, then drops calls until `limit_ms` passed.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrottleWindow {
    limit_ms: f64,
    opened_at: Option<f64>,
}

impl ThrottleWindow {
    pub fn new(limit_ms: f64) -> Self {
        Self {
            limit_ms,
            opened_at: None,
        }
    }

    /// Whether a call at `now_ms` may run. Admitting opens a new window.
    pub fn admit(&mut self, now_ms: f64) -> bool {
        if let Some(opened) = self.opened_at {
            if now_ms - opened < self.limit_ms {
                return false;
            }
        }
        self.opened_at = Some(now_ms);
        true
    }
}
