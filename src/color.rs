//! Hex color parsing for the shader tint

/// Linear RGB triple with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Tint used when the configured color cannot be parsed.
    pub const FALLBACK: Rgb = Rgb {
        r: 0.92,
        g: 0.96,
        b: 0.87,
    };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb` (case-insensitive).
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Like [`Rgb::parse_hex`] but never fails.
    pub fn from_hex_or_fallback(hex: &str) -> Self {
        Self::parse_hex(hex).unwrap_or_else(|| {
            log::warn!("invalid color {:?}, using fallback tint", hex);
            Self::FALLBACK
        })
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::FALLBACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        let a = Rgb::parse_hex("#ebf5df").unwrap();
        let b = Rgb::parse_hex("EBF5DF").unwrap();
        assert_eq!(a, b);
        assert!((a.r - 235.0 / 255.0).abs() < 1e-6);
        assert!((a.g - 245.0 / 255.0).abs() < 1e-6);
        assert!((a.b - 223.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn malformed_input_falls_back() {
        for bad in ["", "#fff", "#ebf5dg", "ebf5df00", "#éé5df"] {
            assert_eq!(Rgb::parse_hex(bad), None, "{bad}");
            assert_eq!(Rgb::from_hex_or_fallback(bad), Rgb::FALLBACK);
        }
    }
}
