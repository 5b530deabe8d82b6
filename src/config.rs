//! Page tunables
//!
//! Defaults are compiled in. The hero canvas may override a few of them via
//! `data-color`, `data-spread` and `data-speed` attributes.

use crate::color::Rgb;
use crate::dissolve::DissolveShape;
use crate::trigger::Anchor;

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    /// Hex tint of the dissolve.
    pub color: String,
    pub spread: f32,
    /// Progress multiplier; 1.0 completes exactly at the end of the hero.
    pub speed: f64,
    pub shape: DissolveShape,
    pub max_pixel_ratio: f64,

    pub word_fade_seconds: f32,
    pub word_trigger_start: Anchor,
    pub word_trigger_end: Anchor,

    /// Catalog, about and contact sections.
    pub section_threshold: f64,
    pub usage_threshold: f64,

    pub scroll_lerp: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            color: "#ebf5df".to_string(),
            spread: 0.5,
            speed: 1.0,
            shape: DissolveShape::default(),
            max_pixel_ratio: 2.0,
            word_fade_seconds: 0.12,
            // top 25% .. bottom 100%
            word_trigger_start: Anchor::new(0.0, 0.25),
            word_trigger_end: Anchor::new(1.0, 1.0),
            section_threshold: 0.22,
            usage_threshold: 0.28,
            scroll_lerp: 0.1,
        }
    }
}

impl SiteConfig {
    /// Apply overrides from an attribute lookup such as
    /// `|name| canvas.get_attribute(name)`. Unparsable values are skipped.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(color) = lookup("data-color") {
            self.color = color;
        }
        if let Some(spread) = parse_attr::<f32>(&lookup, "data-spread") {
            self.spread = spread.max(0.0);
        }
        if let Some(speed) = parse_attr::<f64>(&lookup, "data-speed") {
            self.speed = speed;
        }
        self
    }

    /// Parsed tint, falling back to the default color.
    pub fn rgb(&self) -> Rgb {
        Rgb::from_hex_or_fallback(&self.color)
    }
}

fn parse_attr<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = lookup(name)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring {}={:?}", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shipped_page() {
        let c = SiteConfig::default();
        assert_eq!(c.rgb(), Rgb::parse_hex("#ebf5df").unwrap());
        assert_eq!(c.spread, 0.5);
        assert_eq!(c.speed, 1.0);
        assert_eq!(c.shape.forward_bias, 1.2);
        assert_eq!(c.shape.frequency_scale, 15.0);
        assert_eq!(c.word_fade_seconds, 0.12);
        assert_eq!((c.section_threshold, c.usage_threshold), (0.22, 0.28));
    }

    #[test]
    fn attribute_overrides() {
        let c = SiteConfig::default().with_overrides(|name| match name {
            "data-color" => Some("#000000".into()),
            "data-spread" => Some(" 0.8 ".into()),
            "data-speed" => Some("fast".into()),
            _ => None,
        });
        assert_eq!(c.rgb(), Rgb::new(0.0, 0.0, 0.0));
        assert_eq!(c.spread, 0.8);
        assert_eq!(c.speed, 1.0);
    }

    #[test]
    fn bad_color_override_falls_back() {
        let c = SiteConfig::default().with_overrides(|name| (name == "data-color").then(|| "green".to_string()));
        assert_eq!(c.rgb(), Rgb::FALLBACK);
    }
}
