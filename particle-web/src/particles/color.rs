//! Particle colors - two-stop gradient with a saturation/lightness boost
//!
//! The boost keeps hues vivid once additive blending piles particles on top
//! of each other.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const SATURATION_BOOST: f32 = 1.2;
const LIGHTNESS_BOOST: f32 = 1.1;
const MAX_LIGHTNESS: f32 = 0.7;

/// Linear RGB triple, each channel 0-1
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`, `rrggbb` or `#rgb`
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(hex.to_string());
        let digits = hex.trim().trim_start_matches('#');

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        let (r, g, b) = match digits.len() {
            6 if digits.is_ascii() => (
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            ),
            3 if digits.is_ascii() => {
                let short = |s: &str| channel(s).map(|v| v * 17);
                (short(&digits[0..1])?, short(&digits[1..2])?, short(&digits[2..3])?)
            }
            _ => return Err(invalid()),
        };

        Ok(Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0))
    }

    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }

    pub fn lerp(&self, other: &Rgb, t: f32) -> Rgb {
        Rgb::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// (hue 0-1, saturation 0-1, lightness 0-1)
    pub fn to_hsl(&self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let l = (max + min) / 2.0;

        if (max - min).abs() < f32::EPSILON {
            return (0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if max == self.r {
            (self.g - self.b) / d + if self.g < self.b { 6.0 } else { 0.0 }
        } else if max == self.g {
            (self.b - self.r) / d + 2.0
        } else {
            (self.r - self.g) / d + 4.0
        };

        (h / 6.0, s, l)
    }

    pub fn from_hsl(h: f32, s: f32, l: f32) -> Rgb {
        if s <= 0.0 {
            return Rgb::new(l, l, l);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Rgb::new(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Rgb {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

/// Boost saturation (x1.2, max 1.0) and lightness (x1.1, max 0.7)
pub fn vivid(color: Rgb) -> Rgb {
    let (h, s, l) = color.to_hsl();
    let s = (s * SATURATION_BOOST).min(1.0);
    let l = (l * LIGHTNESS_BOOST).min(MAX_LIGHTNESS);
    Rgb::from_hsl(h, s, l)
}

/// Color of particle `index` out of `count`: RGB lerp, then boost
pub fn gradient_color(primary: Rgb, secondary: Rgb, index: usize, count: usize) -> Rgb {
    let t = if count > 1 { index as f32 / (count - 1) as f32 } else { 0.0 };
    vivid(primary.lerp(&secondary, t))
}
