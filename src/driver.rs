//! Per-frame reveal loop
//!
//! [`RevealDriver`] owns the hero's progress and shader uniforms. The
//! browser calls [`RevealDriver::tick`] once per animation frame; the
//! scroll simulation and the render surface are injected so the loop runs
//! the same against fakes in tests.

use crate::dissolve::ShaderParameters;
use crate::progress::{Geometry, ProgressSource};

/// Scroll simulation stepped once per frame.
pub trait ScrollTimeline {
    /// Advance to `now_ms` and return the current scroll offset.
    fn advance(&mut self, now_ms: f64) -> f64;
}

/// Something the dissolve can be drawn onto.
pub trait Surface {
    fn resize(&mut self, size: SurfaceSize);
    fn render(&mut self, params: &ShaderParameters);
}

/// Size of the render surface in CSS pixels plus the pixel ratio used for
/// its backing store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
    pub css_width: f64,
    pub css_height: f64,
    pub pixel_ratio: f64,
}

impl SurfaceSize {
    /// The device pixel ratio is clamped to `max_pixel_ratio`.
    pub fn new(css_width: f64, css_height: f64, device_pixel_ratio: f64, max_pixel_ratio: f64) -> Self {
        let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(max_pixel_ratio)
        } else {
            1.0
        };
        Self {
            css_width: css_width.max(0.0),
            css_height: css_height.max(0.0),
            pixel_ratio: ratio,
        }
    }

    pub fn backing_width(&self) -> u32 {
        (self.css_width * self.pixel_ratio).round().max(1.0) as u32
    }

    pub fn backing_height(&self) -> u32 {
        (self.css_height * self.pixel_ratio).round().max(1.0) as u32
    }
}

/// What update handlers see each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub scroll: f64,
    pub time_ms: f64,
    /// Seconds since the previous tick; 0 on the first.
    pub delta_seconds: f64,
}

type UpdateHandler = Box<dyn FnMut(&Frame)>;

pub struct RevealDriver<T, S> {
    timeline: T,
    surface: S,
    source: ProgressSource,
    params: ShaderParameters,
    handlers: Vec<UpdateHandler>,
    max_pixel_ratio: f64,
    last_time: Option<f64>,
}

impl<T: ScrollTimeline, S: Surface> RevealDriver<T, S> {
    pub fn new(
        timeline: T,
        surface: S,
        source: ProgressSource,
        params: ShaderParameters,
        max_pixel_ratio: f64,
    ) -> Self {
        Self {
            timeline,
            surface,
            source,
            params,
            handlers: Vec::new(),
            max_pixel_ratio,
            last_time: None,
        }
    }

    /// Run `handler` every frame after the scroll simulation advanced.
    pub fn register_update_handler(&mut self, handler: impl FnMut(&Frame) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// One animation frame.
    pub fn tick(&mut self, now_ms: f64, geometry: &Geometry) -> Frame {
        let scroll = self.timeline.advance(now_ms);
        let delta_seconds = self
            .last_time
            .map(|last| ((now_ms - last) / 1000.0).max(0.0))
            .unwrap_or(0.0);
        self.last_time = Some(now_ms);

        self.source.update(scroll, geometry);
        let frame = Frame {
            scroll,
            time_ms: now_ms,
            delta_seconds,
        };
        for handler in &mut self.handlers {
            handler(&frame);
        }

        self.params.progress = self.source.progress() as f32;
        self.surface.render(&self.params);
        frame
    }

    /// Match the surface to its container. Safe to call any number of times.
    pub fn resize(&mut self, css_width: f64, css_height: f64, device_pixel_ratio: f64) -> SurfaceSize {
        let size = SurfaceSize::new(css_width, css_height, device_pixel_ratio, self.max_pixel_ratio);
        self.surface.resize(size);
        self.params
            .set_resolution(size.css_width as f32, size.css_height as f32);
        log::debug!(
            "hero surface {}x{} css, {}x{} backing",
            size.css_width,
            size.css_height,
            size.backing_width(),
            size.backing_height()
        );
        size
    }

    pub fn params(&self) -> &ShaderParameters {
        &self.params
    }

    pub fn progress(&self) -> f64 {
        self.source.progress()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
