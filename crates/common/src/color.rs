//! RGBA color with CSS hex parsing.
//!
//! Tool colors arrive from the toolbar as CSS hex strings (`#rgb` or
//! `#rrggbb`). Parsing is lenient: anything unparseable falls back to opaque
//! black rather than failing the stroke.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// An 8-bit-per-channel RGBA color, straight (non-premultiplied) alpha.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };
    pub const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
    pub const RED: Self = Self {
        r: 255,
        g: 0,
        b: 0,
        a: 255,
    };

    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a CSS hex color string (`#rgb` or `#rrggbb`). Falls back to
    /// opaque black on malformed input.
    pub fn from_css(s: &str) -> Self {
        match Self::try_from_css(s) {
            Some(c) => c,
            None => {
                warn!(input = s, "Unparseable color string, using black");
                Self::BLACK
            }
        }
    }

    fn try_from_css(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                // Expand each nibble: "f" -> 0xff
                Some(Self::new(r * 17, g * 17, b * 17, 255))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b, 255))
            }
            _ => None,
        }
    }

    /// The same color with its alpha scaled by `factor` (clamped to [0, 1]).
    pub fn with_alpha_scaled(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self {
            a: (self.a as f32 * f).round() as u8,
            ..self
        }
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        let c = Rgba::from_css("#ff8000");
        assert_eq!(c, Rgba::new(255, 128, 0, 255));
    }

    #[test]
    fn parses_three_digit_hex() {
        let c = Rgba::from_css("#f00");
        assert_eq!(c, Rgba::RED);
        let c = Rgba::from_css("#abc");
        assert_eq!(c, Rgba::new(0xaa, 0xbb, 0xcc, 255));
    }

    #[test]
    fn malformed_input_falls_back_to_black() {
        assert_eq!(Rgba::from_css(""), Rgba::BLACK);
        assert_eq!(Rgba::from_css("red"), Rgba::BLACK);
        assert_eq!(Rgba::from_css("#zzzzzz"), Rgba::BLACK);
        assert_eq!(Rgba::from_css("#12345"), Rgba::BLACK);
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(Rgba::from_css("  #ffffff "), Rgba::WHITE);
    }

    #[test]
    fn alpha_scaling_clamps() {
        let c = Rgba::new(10, 20, 30, 200);
        assert_eq!(c.with_alpha_scaled(0.5).a, 100);
        assert_eq!(c.with_alpha_scaled(2.0).a, 200);
        assert_eq!(c.with_alpha_scaled(-1.0).a, 0);
        // Color channels are untouched
        assert_eq!(c.with_alpha_scaled(0.5).r, 10);
    }

    #[test]
    fn serde_roundtrip() {
        let c = Rgba::new(1, 2, 3, 4);
        let json = serde_json::to_string(&c).expect("serialize");
        let back: Rgba = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, c);
    }
}
