//! Colour type and parsing.

use std::fmt;
use std::str::FromStr;

use palette::{Hsl, IntoColor, Srgb};

use crate::error::{Result, SpriteError};

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RGBA` (4 digits, expanded to 8)
    /// - `#RRGGBB` (6 digits)
    /// - `#RRGGBBAA` (8 digits)
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        match hex.len() {
            3 | 4 => {
                let mut parts = [255u8; 4];
                for (slot, c) in parts.iter_mut().zip(hex.chars()) {
                    let d = parse_hex_digit(c)?;
                    *slot = d << 4 | d;
                }
                Ok(Self::new(parts[0], parts[1], parts[2], parts[3]))
            }
            6 | 8 => {
                let mut parts = [255u8; 4];
                for (i, slot) in parts.iter_mut().enumerate().take(hex.len() / 2) {
                    let byte = hex.get(i * 2..i * 2 + 2).ok_or_else(|| invalid_hex(s))?;
                    *slot = parse_hex_byte(byte)?;
                }
                Ok(Self::new(parts[0], parts[1], parts[2], parts[3]))
            }
            _ => Err(invalid_hex(s)),
        }
    }

    /// Convert to RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build from an RGBA array.
    pub fn from_rgba(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// Same colour with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Check if the colour is fully transparent.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Check if the colour is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Lighten by a percentage of the remaining lightness range (HSL).
    pub fn lighten(self, percent: f32) -> Self {
        adjust_lightness(self, percent.abs())
    }

    /// Darken by a percentage of the current lightness (HSL).
    pub fn darken(self, percent: f32) -> Self {
        adjust_lightness(self, -percent.abs())
    }
}

impl FromStr for Colour {
    type Err = SpriteError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

fn invalid_hex(s: &str) -> SpriteError {
    SpriteError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB, #RGBA, #RRGGBB, or #RRGGBBAA format".to_string()),
    }
}

/// Parse a single hex digit.
fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| SpriteError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

/// Parse a two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| SpriteError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}

/// Adjust lightness in HSL space. Alpha is preserved.
fn adjust_lightness(colour: Colour, percent: f32) -> Colour {
    let rgb: Srgb<f32> = Srgb::new(
        colour.r as f32 / 255.0,
        colour.g as f32 / 255.0,
        colour.b as f32 / 255.0,
    );

    let mut hsl: Hsl = rgb.into_color();

    let delta = percent / 100.0;
    if delta > 0.0 {
        hsl.lightness += (1.0 - hsl.lightness) * delta;
    } else {
        hsl.lightness += hsl.lightness * delta;
    }
    hsl.lightness = hsl.lightness.clamp(0.0, 1.0);

    let rgb_out: Srgb<f32> = hsl.into_color();
    Colour::new(
        (rgb_out.red * 255.0).round() as u8,
        (rgb_out.green * 255.0).round() as u8,
        (rgb_out.blue * 255.0).round() as u8,
        colour.a,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_6digit() {
        let c = Colour::from_hex("#FF0000").unwrap();
        assert_eq!(c, Colour::rgb(255, 0, 0));

        let c = Colour::from_hex("#6b4226").unwrap();
        assert_eq!(c, Colour::rgb(0x6b, 0x42, 0x26));
    }

    #[test]
    fn test_from_hex_3digit() {
        let c = Colour::from_hex("#F00").unwrap();
        assert_eq!(c, Colour::rgb(255, 0, 0));

        let c = Colour::from_hex("#ABC").unwrap();
        assert_eq!(c, Colour::rgb(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_from_hex_8digit() {
        let c = Colour::from_hex("#6B1F8AB4").unwrap();
        assert_eq!(c, Colour::new(0x6B, 0x1F, 0x8A, 180));
    }

    #[test]
    fn test_from_hex_4digit() {
        let c = Colour::from_hex("#F008").unwrap();
        assert_eq!(c, Colour::new(255, 0, 0, 136));
    }

    #[test]
    fn test_from_hex_no_hash() {
        let c = Colour::from_hex("FF0000").unwrap();
        assert_eq!(c, Colour::rgb(255, 0, 0));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Colour::from_hex("#GGG").is_err());
        assert!(Colour::from_hex("#12345").is_err());
        assert!(Colour::from_hex("").is_err());
        assert!(Colour::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for c in [Colour::rgb(24, 20, 37), Colour::new(107, 31, 138, 60)] {
            assert_eq!(c.to_string().parse::<Colour>().unwrap(), c);
        }
        assert_eq!(format!("{}", Colour::new(255, 0, 0, 128)), "#FF000080");
    }

    #[test]
    fn test_with_alpha() {
        let c = Colour::rgb(1, 2, 3).with_alpha(9);
        assert_eq!(c.to_rgba(), [1, 2, 3, 9]);
        assert!(Colour::TRANSPARENT.is_transparent());
        assert!(Colour::BLACK.is_opaque());
    }

    #[test]
    fn test_lighten_darken() {
        let base = Colour::rgb(0x8B, 0x6B, 0x4A);
        let light = base.lighten(20.0);
        let dark = base.darken(20.0);

        let luma = |c: Colour| c.r as u32 + c.g as u32 + c.b as u32;
        assert!(luma(light) > luma(base));
        assert!(luma(dark) < luma(base));
        assert_eq!(base.lighten(0.0), base);
        assert_eq!(Colour::new(10, 20, 30, 77).darken(50.0).a, 77);
    }
}
