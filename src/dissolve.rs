//! Noise-perturbed dissolve wipe
//!
//! The GPU draws this with [`crate::shaders::DISSOLVE_FRAGMENT`]; the
//! functions here are the same math on the CPU, used by the software
//! fallback surface and by the tests.

use crate::color::Rgb;
use crate::noise::fractal_sum;

/// Per-frame uniforms of the dissolve program.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShaderParameters {
    /// Reveal progress in `[0, 1]`.
    pub progress: f32,
    /// Surface size in CSS pixels, each component at least 1.
    pub resolution: [f32; 2],
    pub color: Rgb,
    /// Amplitude of the noise along the wipe line.
    pub spread: f32,
}

impl ShaderParameters {
    pub fn new(color: Rgb, spread: f32) -> Self {
        Self {
            progress: 0.0,
            resolution: [1.0, 1.0],
            color,
            spread: spread.max(0.0),
        }
    }

    pub fn set_resolution(&mut self, width: f32, height: f32) {
        self.resolution = [width.max(1.0), height.max(1.0)];
    }

    pub fn aspect(&self) -> f32 {
        self.resolution[0] / self.resolution[1]
    }

    /// Height of one output pixel in uv units.
    pub fn pixel_size(&self) -> f32 {
        1.0 / self.resolution[1]
    }
}

/// Fixed shape constants of the wipe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DissolveShape {
    /// Multiplier on progress; above 1 so the wipe clears the top edge
    /// before progress reaches 1.
    pub forward_bias: f32,
    /// Noise granularity.
    pub frequency_scale: f32,
}

impl Default for DissolveShape {
    fn default() -> Self {
        Self {
            forward_bias: 1.2,
            frequency_scale: 15.0,
        }
    }
}

/// GLSL `smoothstep`.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Signed distance to the wipe line: negative is revealed.
pub fn dissolve_distance(uv: [f32; 2], params: &ShaderParameters, shape: &DissolveShape) -> f32 {
    let aspect = params.aspect();
    let centered = [(uv[0] - 0.5) * aspect, uv[1] - 0.5];
    let edge = uv[1] - params.progress * shape.forward_bias;
    let n = fractal_sum([
        centered[0] * shape.frequency_scale,
        centered[1] * shape.frequency_scale,
    ]);
    edge + n * params.spread
}

/// Opacity at `uv`, anti-aliased over one pixel either side of the line.
pub fn coverage(uv: [f32; 2], params: &ShaderParameters, shape: &DissolveShape) -> f32 {
    let d = dissolve_distance(uv, params, shape);
    let px = params.pixel_size();
    1.0 - smoothstep(-px, px, d)
}

/// Straight (non-premultiplied) RGBA at `uv`.
pub fn shade(uv: [f32; 2], params: &ShaderParameters, shape: &DissolveShape) -> [f32; 4] {
    let c = params.color;
    [c.r, c.g, c.b, coverage(uv, params, shape)]
}

/// Fill an RGBA8 buffer of `width * height` pixels, row 0 at the top.
///
/// Samples pixel centres; uv has its origin at the bottom-left like GL.
pub fn rasterize(
    pixels: &mut [u8],
    width: usize,
    height: usize,
    params: &ShaderParameters,
    shape: &DissolveShape,
) {
    if width == 0 || height == 0 {
        return;
    }
    debug_assert_eq!(pixels.len(), width * height * 4);
    let to_byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    let rgb = params.color.to_array().map(to_byte);

    for (row, line) in pixels.chunks_exact_mut(width * 4).enumerate().take(height) {
        let v = 1.0 - (row as f32 + 0.5) / height as f32;
        for (col, px) in line.chunks_exact_mut(4).enumerate() {
            let u = (col as f32 + 0.5) / width as f32;
            px[..3].copy_from_slice(&rgb);
            px[3] = to_byte(coverage([u, v], params, shape));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(progress: f32, spread: f32) -> ShaderParameters {
        let mut p = ShaderParameters::new(Rgb::new(1.0, 0.5, 0.25), spread);
        p.set_resolution(800.0, 600.0);
        p.progress = progress;
        p
    }

    #[test]
    fn nothing_revealed_at_zero_progress_without_noise() {
        let p = params(0.0, 0.0);
        let shape = DissolveShape::default();
        for y in [0.1, 0.5, 0.9] {
            assert_eq!(coverage([0.5, y], &p, &shape), 0.0);
        }
    }

    #[test]
    fn full_progress_covers_everything_without_noise() {
        let p = params(1.0, 0.0);
        let shape = DissolveShape::default();
        for y in [0.0, 0.5, 1.0] {
            assert_eq!(coverage([0.3, y], &p, &shape), 1.0);
        }
    }

    #[test]
    fn wipe_edge_is_anti_aliased_over_one_pixel() {
        let shape = DissolveShape {
            forward_bias: 1.0,
            ..DissolveShape::default()
        };
        let p = params(0.5, 0.0);
        let px = p.pixel_size();
        assert!((coverage([0.5, 0.5], &p, &shape) - 0.5).abs() < 1e-4);
        assert_eq!(coverage([0.5, 0.5 + 2.0 * px], &p, &shape), 0.0);
        assert_eq!(coverage([0.5, 0.5 - 2.0 * px], &p, &shape), 1.0);
    }

    #[test]
    fn noise_only_pushes_the_line_back() {
        // fractal_sum is non-negative, so spread can only hide pixels.
        let shape = DissolveShape::default();
        let plain = params(0.6, 0.0);
        let noisy = params(0.6, 0.5);
        for i in 0..50 {
            let uv = [i as f32 / 50.0, 0.3];
            assert!(coverage(uv, &noisy, &shape) <= coverage(uv, &plain, &shape));
        }
    }

    #[test]
    fn shade_carries_the_tint() {
        let p = params(1.0, 0.0);
        assert_eq!(shade([0.5, 0.5], &p, &DissolveShape::default()), [1.0, 0.5, 0.25, 1.0]);
    }

    #[test]
    fn rasterize_reveals_bottom_rows_first() {
        let (w, h) = (8, 8);
        let mut buf = vec![0u8; w * h * 4];
        let shape = DissolveShape {
            forward_bias: 1.0,
            ..DissolveShape::default()
        };
        let mut p = params(0.5, 0.0);
        p.set_resolution(w as f32, h as f32);
        rasterize(&mut buf, w, h, &p, &shape);

        let alpha = |row: usize| buf[row * w * 4 + 3];
        assert_eq!(alpha(0), 0);
        assert_eq!(alpha(h - 1), 255);
        assert_eq!(&buf[..3], &[255, 128, 64]);
    }

    #[test]
    fn rasterize_ignores_empty_buffers() {
        let p = params(0.5, 0.0);
        let mut empty: Vec<u8> = Vec::new();
        rasterize(&mut empty, 0, 4, &p, &DissolveShape::default());
        rasterize(&mut empty, 4, 0, &p, &DissolveShape::default());
        assert!(empty.is_empty());
    }

    #[test]
    fn resolution_is_floored_at_one_pixel() {
        let mut p = params(0.0, 0.0);
        p.set_resolution(0.0, -3.0);
        assert_eq!(p.resolution, [1.0, 1.0]);
    }
}
