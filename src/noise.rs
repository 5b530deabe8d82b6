//! Procedural value noise
//!
//! CPU mirror of the noise functions in the hero fragment shader. Everything
//! is computed in `f32` with the same constants as the GLSL so the software
//! fallback and the tests see the same field the GPU draws.

/// A point in noise space.
pub type Point = [f32; 2];

const HASH_WEIGHTS: [f32; 3] = [37.1, 61.7, 12.4];
const HASH_SCALE: f32 = 3758.5453123;

/// Octave frequencies and amplitudes for [`fractal_sum`].
const OCTAVES: [(f32, f32); 3] = [(1.0, 0.5), (2.0, 0.25), (4.0, 0.125)];

/// Upper bound of [`fractal_sum`].
pub const FRACTAL_MAX: f32 = 0.5 + 0.25 + 0.125;

/// `fract` for hashing, kept strictly below 1.0.
///
/// `x - floor(x)` rounds up to exactly 1.0 for tiny negative `x` in `f32`.
/// Interpolation weights must not be clamped this way; see [`value_noise`].
#[inline]
pub fn fract(x: f32) -> f32 {
    let f = x - x.floor();
    if f >= 1.0 {
        0.0
    } else {
        f
    }
}

#[inline]
fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Pseudo-random value in `[0, 1)` for a lattice point.
pub fn hash(p: Point) -> f32 {
    let d = p[0] * HASH_WEIGHTS[0] + p[1] * HASH_WEIGHTS[1] + HASH_WEIGHTS[2];
    fract(d.sin() * HASH_SCALE)
}

/// Value noise: hashes at the four surrounding lattice corners blended with
/// a cubic Hermite weight.
pub fn value_noise(p: Point) -> f32 {
    let i = [p[0].floor(), p[1].floor()];
    // Unclamped like GLSL: f == 1.0 picks the far corner, which is the
    // neighbouring cell's near corner.
    let f = [p[0] - i[0], p[1] - i[1]];
    let w = [f[0] * f[0] * (3.0 - 2.0 * f[0]), f[1] * f[1] * (3.0 - 2.0 * f[1])];

    let bottom = mix(hash(i), hash([i[0] + 1.0, i[1]]), w[0]);
    let top = mix(hash([i[0], i[1] + 1.0]), hash([i[0] + 1.0, i[1] + 1.0]), w[0]);
    mix(bottom, top, w[1])
}

/// Three-octave fractal sum of [`value_noise`], in `[0, FRACTAL_MAX]`.
pub fn fractal_sum(p: Point) -> f32 {
    OCTAVES
        .iter()
        .map(|&(freq, amp)| value_noise([p[0] * freq, p[1] * freq]) * amp)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> impl Iterator<Item = Point> {
        (-40..40).flat_map(|x| (-40..40).map(move |y| [x as f32 * 0.37, y as f32 * 0.53]))
    }

    #[test]
    fn hash_is_deterministic() {
        for p in grid() {
            assert_eq!(hash(p).to_bits(), hash(p).to_bits());
        }
    }

    #[test]
    fn hash_stays_in_unit_interval() {
        for p in grid() {
            let h = hash(p);
            assert!((0.0..1.0).contains(&h), "hash({:?}) = {}", p, h);
        }
    }

    #[test]
    fn fract_never_returns_one() {
        assert_eq!(fract(-1e-9), 0.0);
        assert_eq!(fract(2.0), 0.0);
        assert!((fract(1.25) - 0.25).abs() < 1e-6);
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn value_noise_matches_hash_on_lattice() {
        for x in -5..5 {
            for y in -5..5 {
                let p = [x as f32, y as f32];
                assert!((value_noise(p) - hash(p)).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn value_noise_is_continuous_across_lattice_lines() {
        for y in [0.1f32, 0.5, 0.9] {
            for x in [-1e-9f32, -1e-7] {
                let below = value_noise([x, y]);
                let at = value_noise([0.0, y]);
                assert!((below - at).abs() < 1e-4, "x={} y={}: {} vs {}", x, y, below, at);
            }
            let below = value_noise([y, -1e-9]);
            let at = value_noise([y, 0.0]);
            assert!((below - at).abs() < 1e-4, "y={}: {} vs {}", y, below, at);
        }
    }

    #[test]
    fn fractal_sum_is_bounded() {
        for p in grid() {
            let v = fractal_sum(p);
            assert!((0.0..=FRACTAL_MAX).contains(&v), "fractal_sum({:?}) = {}", p, v);
        }
    }
}
