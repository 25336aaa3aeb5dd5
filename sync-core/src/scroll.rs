//! Scroll arithmetic for an infinitely scrolling list.
//!
//! Two signals are derived from scroll events:
//! - whether to show a "scroll to top" control (pure function of offset)
//! - whether the viewport is approaching the end of the content, which is
//!   the cue to request the next page
//!
//! Units are whatever the host UI reports (points, pixels, rows); only
//! ratios and comparisons are used.

/// Offset beyond which the "scroll to top" control is shown.
pub const SCROLL_TO_TOP_THRESHOLD: f64 = 300.0;

/// Fraction of one viewport length left below the viewport at which the end
/// is considered near.
pub const END_REACHED_THRESHOLD: f64 = 0.5;

/// Whether the "scroll to top" control should be visible.
pub fn show_scroll_to_top(offset_y: f64, threshold: f64) -> bool {
    offset_y > threshold
}

/// One scroll observation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top.
    pub offset_y: f64,
    /// Visible length of the list.
    pub viewport_height: f64,
    /// Total length of the rendered content.
    pub content_height: f64,
}

impl ScrollMetrics {
    /// Create a new observation.
    pub fn new(offset_y: f64, viewport_height: f64, content_height: f64) -> Self {
        Self {
            offset_y,
            viewport_height,
            content_height,
        }
    }

    /// Content length still hidden below the viewport.
    pub fn remaining(&self) -> f64 {
        (self.content_height - self.offset_y - self.viewport_height).max(0.0)
    }

    /// Whether less than `threshold` viewports of content remain below.
    pub fn is_near_end(&self, threshold: f64) -> bool {
        self.viewport_height > 0.0 && self.remaining() < threshold * self.viewport_height
    }
}

/// Edge detector for the end-of-list trigger.
///
/// Scroll events arrive continuously; the trigger should fire once when the
/// viewport enters the end zone, not on every event inside it. It re-arms
/// when the content grows (a page was appended) or when the viewport leaves
/// the zone.
#[derive(Debug, Clone)]
pub struct EndReachedTracker {
    threshold: f64,
    fired_at: Option<f64>,
}

impl EndReachedTracker {
    /// Create a tracker with the given threshold (in viewports).
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            fired_at: None,
        }
    }

    /// The configured threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Feed one observation. Returns `true` when the trigger fires.
    pub fn observe(&mut self, metrics: ScrollMetrics) -> bool {
        if !metrics.is_near_end(self.threshold) {
            self.fired_at = None;
            return false;
        }
        if self.fired_at == Some(metrics.content_height) {
            return false;
        }
        self.fired_at = Some(metrics.content_height);
        true
    }

    /// Forget the last firing, e.g. after a refresh replaced the content.
    pub fn rearm(&mut self) {
        self.fired_at = None;
    }
}

impl Default for EndReachedTracker {
    fn default() -> Self {
        Self::new(END_REACHED_THRESHOLD)
    }
}
