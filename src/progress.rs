//! Scroll offset to local reveal progress

/// Clamp to `[0, 1]`. NaN maps to 0.
pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Layout measurements taken at the time of a scroll notification.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Geometry {
    /// Document offset of the region's top edge.
    pub region_top: f64,
    pub region_height: f64,
    pub viewport_height: f64,
}

impl Geometry {
    /// Scroll distance over which the region maps to full progress.
    pub fn max_scroll(&self) -> f64 {
        (self.region_height - self.viewport_height).max(1.0)
    }
}

/// Progress of one page region, recomputed on every scroll offset.
#[derive(Clone, Debug)]
pub struct ProgressSource {
    speed: f64,
    progress: f64,
}

impl ProgressSource {
    pub fn new(speed: f64) -> Self {
        Self {
            speed,
            progress: 0.0,
        }
    }

    /// Recompute progress from a raw scroll offset and returns it.
    pub fn update(&mut self, raw_scroll: f64, geometry: &Geometry) -> f64 {
        let local = raw_scroll - geometry.region_top;
        self.progress = clamp01(local / geometry.max_scroll() * self.speed);
        self.progress
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}

impl Default for ProgressSource {
    fn default() -> Self {
        Self::new(1.0)
    }
}
