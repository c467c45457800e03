use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;

use crate::error::{PaletteError, Result};

/// xterm 6x6x6 color cube channel levels
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// 24-bit RGB color parsed from a `#RRGGBB` hex string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`, `RRGGBB` or the short `#RGB` form
    pub fn parse(value: &str) -> Result<Self> {
        let hex = value.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PaletteError::InvalidColor(value.to_string()));
        }

        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| PaletteError::InvalidColor(value.to_string()))
        };

        match hex.len() {
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                // #abc -> #aabbcc
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Self::new(r * 17, g * 17, b * 17))
            }
            _ => Err(PaletteError::InvalidColor(value.to_string())),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Linear interpolation `self * (1 - t) + other * t` per channel.
    ///
    /// Channels are rounded half away from zero and clamped to 0..=255, so
    /// `t` outside [0, 1] extrapolates without wrapping. Callers that must
    /// reject such input validate `t` first.
    pub fn mix(self, other: Rgb, t: f64) -> Rgb {
        let blend = |a: u8, b: u8| -> u8 {
            let value = (a as f64) * (1.0 - t) + (b as f64) * t;
            value.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            blend(self.r, other.r),
            blend(self.g, other.g),
            blend(self.b, other.b),
        )
    }

    /// Relative brightness in 0.0..=1.0 (Rec. 601 weights)
    pub fn brightness(self) -> f64 {
        (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
    }

    /// Nearest xterm-256 palette index (color cube or grayscale ramp)
    pub fn to_ansi256(self) -> u8 {
        let nearest_level = |c: u8| -> usize {
            CUBE_LEVELS
                .iter()
                .enumerate()
                .min_by_key(|&(_, &level)| (level as i32 - c as i32).abs())
                .map(|(i, _)| i)
                .unwrap_or(0)
        };
        let (ri, gi, bi) = (nearest_level(self.r), nearest_level(self.g), nearest_level(self.b));
        let cube = Rgb::new(CUBE_LEVELS[ri], CUBE_LEVELS[gi], CUBE_LEVELS[bi]);
        let cube_index = 16 + 36 * ri + 6 * gi + bi;

        // grayscale ramp 232..=255 covers 8, 18, ..., 238
        let avg = (self.r as u32 + self.g as u32 + self.b as u32) / 3;
        let step = (avg.saturating_sub(3) / 10).min(23);
        let gray_value = (8 + step * 10) as u8;
        let gray = Rgb::new(gray_value, gray_value, gray_value);
        let gray_index = 232 + step as usize;

        if self.distance(gray) < self.distance(cube) {
            gray_index as u8
        } else {
            cube_index as u8
        }
    }

    /// Convert to a ratatui color, falling back to the 256 palette when the
    /// terminal has no 24-bit support
    pub fn to_color(self, truecolor: bool) -> Color {
        if truecolor {
            Color::Rgb(self.r, self.g, self.b)
        } else {
            Color::Indexed(self.to_ansi256())
        }
    }

    fn distance(self, other: Rgb) -> u32 {
        let d = |a: u8, b: u8| {
            let diff = a as i32 - b as i32;
            (diff * diff) as u32
        };
        d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)
    }
}

impl FromStr for Rgb {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(Rgb::parse("#141414").unwrap(), Rgb::new(0x14, 0x14, 0x14));
        assert_eq!(Rgb::parse("cda869").unwrap(), Rgb::new(0xCD, 0xA8, 0x69));
        assert_eq!(Rgb::parse(" #fff ").unwrap(), Rgb::new(255, 255, 255));
        assert_eq!(Rgb::parse("#555").unwrap(), Rgb::new(0x55, 0x55, 0x55));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(Rgb::parse("#12345"), Err(PaletteError::InvalidColor(_))));
        assert!(matches!(Rgb::parse("#GGGGGG"), Err(PaletteError::InvalidColor(_))));
        assert!(matches!(Rgb::parse(""), Err(PaletteError::InvalidColor(_))));
        assert!(matches!(Rgb::parse("#+12345"), Err(PaletteError::InvalidColor(_))));
    }

    #[test]
    fn test_to_hex_is_upper_case() {
        assert_eq!(Rgb::new(0xab, 0x01, 0xff).to_hex(), "#AB01FF");
        assert_eq!(Rgb::parse("#ab01ff").unwrap().to_string(), "#AB01FF");
    }

    #[test]
    fn test_mix_endpoints() {
        let a = Rgb::new(10, 20, 30);
        let b = Rgb::new(200, 100, 0);
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
    }

    #[test]
    fn test_mix_rounds_half_away_from_zero() {
        // 255 * 0.5 = 127.5 -> 128
        let mid = Rgb::new(0, 0, 0).mix(Rgb::new(255, 255, 255), 0.5);
        assert_eq!(mid, Rgb::new(128, 128, 128));
    }

    #[test]
    fn test_mix_extrapolation_clamps() {
        let out = Rgb::new(100, 100, 100).mix(Rgb::new(200, 200, 200), 2.0);
        assert_eq!(out, Rgb::new(255, 255, 255));
        let out = Rgb::new(100, 100, 100).mix(Rgb::new(200, 200, 200), -2.0);
        assert_eq!(out, Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_to_ansi256() {
        assert_eq!(Rgb::new(0, 0, 0).to_ansi256(), 16);
        assert_eq!(Rgb::new(255, 0, 0).to_ansi256(), 196);
        assert_eq!(Rgb::new(255, 255, 255).to_ansi256(), 231);
        assert_eq!(Rgb::new(128, 128, 128).to_ansi256(), 244);
    }

    #[test]
    fn test_to_color() {
        let c = Rgb::new(1, 2, 3);
        assert_eq!(c.to_color(true), Color::Rgb(1, 2, 3));
        assert_eq!(c.to_color(false), Color::Indexed(16));
    }

    #[test]
    fn test_brightness() {
        assert!(Rgb::new(0, 0, 0).brightness() < 0.01);
        assert!(Rgb::new(255, 255, 255).brightness() > 0.99);
    }
}
