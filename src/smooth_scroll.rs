//! Eased wheel scrolling
//!
//! Wheel input moves a target offset; every frame the current offset is
//! damped toward it. Native scrolling (touch, keyboard, scrollbar) is left
//! alone and adopted through [`SmoothScroll::sync`] while idle.

use crate::driver::ScrollTimeline;

/// Pixels per wheel line when `deltaMode` is `DOM_DELTA_LINE`.
pub const LINE_HEIGHT: f64 = 100.0 / 6.0;

/// Distance under which the animation snaps to its target.
const SETTLE_EPSILON: f64 = 0.5;

const DOM_DELTA_LINE: u32 = 1;
const DOM_DELTA_PAGE: u32 = 2;

#[derive(Clone, Debug)]
pub struct SmoothScroll {
    current: f64,
    target: f64,
    limit: f64,
    lerp: f64,
    last_time: Option<f64>,
    animating: bool,
    stopped: bool,
}

impl SmoothScroll {
    /// `lerp` is the fraction of the remaining distance covered per 60 Hz
    /// frame.
    pub fn new(lerp: f64) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            limit: 0.0,
            lerp,
            last_time: None,
            animating: false,
            stopped: false,
        }
    }

    pub fn offset(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Maximum scroll offset (document height minus viewport).
    pub fn set_limit(&mut self, limit: f64) {
        self.limit = limit.max(0.0);
        self.target = self.target.clamp(0.0, self.limit);
        self.current = self.current.clamp(0.0, self.limit);
    }

    /// Feed a wheel event. Returns false when the event should be left to
    /// the browser.
    pub fn on_wheel(&mut self, delta_y: f64, delta_mode: u32, viewport_height: f64) -> bool {
        if self.stopped {
            return false;
        }
        let delta = match delta_mode {
            DOM_DELTA_LINE => delta_y * LINE_HEIGHT,
            DOM_DELTA_PAGE => delta_y * viewport_height,
            _ => delta_y,
        };
        self.target = (self.target + delta).clamp(0.0, self.limit);
        self.animating = true;
        true
    }

    /// Adopt a native scroll position unless a wheel animation is running.
    pub fn sync(&mut self, native: f64) {
        if !self.animating {
            self.current = native;
            self.target = native;
        }
    }

    /// Freeze wheel smoothing in place.
    pub fn stop(&mut self) {
        self.stopped = true;
        self.animating = false;
        self.target = self.current;
    }

    pub fn start(&mut self) {
        self.stopped = false;
    }

    /// Step the damping to `now_ms` and return the current offset.
    pub fn step(&mut self, now_ms: f64) -> f64 {
        let dt = self
            .last_time
            .map(|last| ((now_ms - last) / 1000.0).max(0.0))
            .unwrap_or(0.0);
        self.last_time = Some(now_ms);

        if self.animating {
            let k = 1.0 - (-self.lerp * 60.0 * dt).exp();
            self.current += (self.target - self.current) * k;
            if (self.target - self.current).abs() < SETTLE_EPSILON {
                self.current = self.target;
                self.animating = false;
            }
        }
        self.current
    }
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl ScrollTimeline for SmoothScroll {
    fn advance(&mut self, now_ms: f64) -> f64 {
        self.step(now_ms)
    }
}
