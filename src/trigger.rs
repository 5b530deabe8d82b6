//! Scroll-fraction tracker for an element
//!
//! A trigger spans the scroll positions between two anchors. Each anchor
//! pins a point on the element (0 = top edge, 1 = bottom edge) to a point
//! in the viewport (0 = top, 1 = bottom); `top 25%` is `Anchor::new(0.0,
//! 0.25)`.

use crate::progress::clamp01;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub element: f64,
    pub viewport: f64,
}

impl Anchor {
    pub const fn new(element: f64, viewport: f64) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which the two points line up.
    pub fn scroll_position(&self, element_top: f64, element_height: f64, viewport_height: f64) -> f64 {
        element_top + self.element * element_height - self.viewport * viewport_height
    }
}

#[derive(Clone, Debug)]
pub struct ScrollTrigger {
    start: Anchor,
    end: Anchor,
    progress: Option<f64>,
}

impl ScrollTrigger {
    pub fn new(start: Anchor, end: Anchor) -> Self {
        Self {
            start,
            end,
            progress: None,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress.unwrap_or(0.0)
    }

    /// Progress for `scroll`; degenerate ranges step at the start position.
    pub fn progress_at(
        &self,
        scroll: f64,
        element_top: f64,
        element_height: f64,
        viewport_height: f64,
    ) -> f64 {
        let start = self.start.scroll_position(element_top, element_height, viewport_height);
        let end = self.end.scroll_position(element_top, element_height, viewport_height);
        if end <= start {
            return if scroll >= start { 1.0 } else { 0.0 };
        }
        clamp01((scroll - start) / (end - start))
    }

    /// Returns the new progress if it differs from the last reported one.
    /// The first update always reports.
    pub fn update(
        &mut self,
        scroll: f64,
        element_top: f64,
        element_height: f64,
        viewport_height: f64,
    ) -> Option<f64> {
        let p = self.progress_at(scroll, element_top, element_height, viewport_height);
        if self.progress == Some(p) {
            return None;
        }
        self.progress = Some(p);
        Some(p)
    }
}
