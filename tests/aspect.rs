use magagro_wasm::color::Rgb;
use magagro_wasm::dissolve::{coverage, dissolve_distance, DissolveShape, ShaderParameters};
use magagro_wasm::noise::fractal_sum;

fn params(res: (f32, f32), progress: f32, spread: f32) -> ShaderParameters {
    let mut p = ShaderParameters::new(Rgb::FALLBACK, spread);
    p.set_resolution(res.0, res.1);
    p.progress = progress;
    p
}

/// uv whose aspect-corrected, centred position is `c`.
fn uv_from_centered(c: (f32, f32), res: (f32, f32)) -> [f32; 2] {
    let aspect = res.0 / res.1;
    [c.0 / aspect + 0.5, c.1 + 0.5]
}

#[test]
fn noise_is_sampled_in_aspect_corrected_space() {
    let wide = (1920.0, 1080.0);
    let tall = (1080.0, 1920.0);
    let shape = DissolveShape::default();

    // Zero progress and bias leave only uv.y and the noise term, so equal
    // centred positions must give equal noise.
    let shape = DissolveShape {
        forward_bias: 0.0,
        ..shape
    };
    for c in [(0.0, 0.0), (0.1, 0.0), (-0.3, 0.2), (0.25, -0.4)] {
        let a = uv_from_centered(c, wide);
        let b = uv_from_centered(c, tall);
        let da = dissolve_distance(a, &params(wide, 0.0, 1.0), &shape) - a[1];
        let db = dissolve_distance(b, &params(tall, 0.0, 1.0), &shape) - b[1];
        assert!((da - db).abs() < 1e-5, "c={:?} da={} db={}", c, da, db);

        let expected = fractal_sum([c.0 * shape.frequency_scale, c.1 * shape.frequency_scale]);
        assert!((da - expected).abs() < 1e-4);
    }
}

#[test]
fn wipe_line_is_horizontal_without_spread() {
    let shape = DissolveShape::default();
    for res in [(1920.0, 1080.0), (390.0, 844.0), (512.0, 512.0)] {
        let p = params(res, 0.5, 0.0);
        for y in [0.1, 0.4, 0.7, 0.95] {
            let left = coverage([0.0, y], &p, &shape);
            let right = coverage([1.0, y], &p, &shape);
            assert_eq!(left, right, "res={:?} y={}", res, y);
        }
    }
}

#[test]
fn transition_band_scales_with_pixel_height() {
    let shape = DissolveShape {
        forward_bias: 1.0,
        ..DissolveShape::default()
    };
    for height in [100.0f32, 1000.0] {
        let p = params((height, height), 0.5, 0.0);
        let half_px = 0.5 / height;
        let c = coverage([0.5, 0.5 + half_px], &p, &shape);
        assert!(c > 0.0 && c < 0.5, "height={} coverage={}", height, c);
    }
}
