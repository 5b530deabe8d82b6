//! GLSL ES 3.00 sources for the hero dissolve.
//!
//! The fragment stage must stay in step with [`crate::noise`] and
//! [`crate::dissolve`].

/// Full-screen triangle; no vertex buffers needed.
pub const FULLSCREEN_VERTEX: &str = r#"#version 300 es
precision highp float;
const vec2 POSITIONS[3] = vec2[](
    vec2(-1.0, -1.0),
    vec2(3.0, -1.0),
    vec2(-1.0, 3.0)
);
out vec2 vUv;

void main() {
    vec2 pos = POSITIONS[gl_VertexID];
    vUv = pos * 0.5 + 0.5;
    gl_Position = vec4(pos, 0.0, 1.0);
}
"#;

pub const DISSOLVE_FRAGMENT: &str = r#"#version 300 es
precision highp float;

uniform float uProgress;
uniform vec2 uResolution;
uniform vec3 uColor;
uniform float uSpread;
uniform float uBias;
uniform float uFrequency;

in vec2 vUv;
out vec4 fragColor;

float hash(vec2 p) {
    return fract(sin(dot(vec3(p, 1.0), vec3(37.1, 61.7, 12.4))) * 3758.5453123);
}

float valueNoise(vec2 p) {
    vec2 i = floor(p);
    vec2 f = fract(p);
    f *= f * (3.0 - 2.0 * f);
    return mix(
        mix(hash(i), hash(i + vec2(1.0, 0.0)), f.x),
        mix(hash(i + vec2(0.0, 1.0)), hash(i + vec2(1.0, 1.0)), f.x),
        f.y
    );
}

float fractalSum(vec2 p) {
    return valueNoise(p) * 0.5
         + valueNoise(p * 2.0) * 0.25
         + valueNoise(p * 4.0) * 0.125;
}

void main() {
    float aspect = uResolution.x / uResolution.y;
    vec2 centered = (vUv - 0.5) * vec2(aspect, 1.0);

    float d = (vUv.y - uProgress * uBias) + fractalSum(centered * uFrequency) * uSpread;
    float px = 1.0 / uResolution.y;
    float alpha = 1.0 - smoothstep(-px, px, d);

    // premultiplied for the canvas compositor
    fragColor = vec4(uColor * alpha, alpha);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_declares_every_uniform_the_renderer_sets() {
        for name in ["uProgress", "uResolution", "uColor", "uSpread", "uBias", "uFrequency"] {
            assert!(
                DISSOLVE_FRAGMENT.contains(&format!(" {name};")),
                "missing uniform {name}"
            );
        }
        assert!(FULLSCREEN_VERTEX.starts_with("#version 300 es"));
    }
}
