use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

/// Scales a [0,1] channel to 0..=255. A channel of exactly 1.0 (or more)
/// maps to 255; everything below is `floor(c * 256)`.
fn to_8bit(c: f32) -> u8 {
    let c = c.clamp(0.0, 1.0);
    if c >= 1.0 { 255 } else { (c * 256.0).floor() as u8 }
}

/// Lowercase hex of a byte, with a single digit doubled rather than
/// zero-padded (`3` becomes `33`, not `03`).
fn hex_shorthand(v: u8) -> String {
    let digits = format!("{:x}", v);
    if digits.len() == 1 {
        digits.repeat(2)
    } else {
        digits
    }
}

impl Color {
    pub fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Color { red, green, blue, alpha: 1.0 }
    }

    pub fn rgba(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Color { red, green, blue, alpha }
    }

    pub fn channels(&self) -> [f32; 3] {
        [self.red, self.green, self.blue]
    }

    pub fn clamped(self) -> Self {
        Color {
            red: self.red.clamp(0.0, 1.0),
            green: self.green.clamp(0.0, 1.0),
            blue: self.blue.clamp(0.0, 1.0),
            alpha: self.alpha.clamp(0.0, 1.0),
        }
    }

    /// Drops alpha back to 1.0, the way palette entries store colors.
    pub fn opaque(self) -> Self {
        Color { alpha: 1.0, ..self }
    }

    pub fn to_8bit(&self) -> [u8; 3] {
        self.channels().map(to_8bit)
    }

    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_8bit().map(hex_shorthand);
        format!("#{}{}{}", r, g, b).to_uppercase()
    }

    /// Hue, saturation and value, all in [0,1].
    pub fn to_hsv(&self) -> [f32; 3] {
        let [r, g, b] = self.clamped().channels();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let s = if max > 0.0 { delta / max } else { 0.0 };

        let h = if delta == 0.0 {
            0.0
        } else if max == r {
            ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        [h / 6.0, s, max]
    }
}

impl Default for Color {
    fn default() -> Color {
        Color::rgb(0.0, 0.0, 0.0)
    }
}

impl From<[f32; 3]> for Color {
    fn from([red, green, blue]: [f32; 3]) -> Color {
        Color::rgb(red, green, blue)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    #[default]
    #[serde(rename = "R")]
    Raw,
    #[serde(rename = "H")]
    Hsv,
    #[serde(rename = "8")]
    EightBit,
}

impl DisplayMode {
    pub fn tag(self) -> &'static str {
        match self {
            DisplayMode::Raw => "R",
            DisplayMode::Hsv => "H",
            DisplayMode::EightBit => "8",
        }
    }
}

impl FromStr for DisplayMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R" | "r" => Ok(DisplayMode::Raw),
            "H" | "h" => Ok(DisplayMode::Hsv),
            "8" => Ok(DisplayMode::EightBit),
            _ => Err(ParseError::DisplayMode(s.to_string())),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Formats the three color channels for display in the given mode.
pub fn convert_color(color: &Color, mode: DisplayMode) -> (String, String, String) {
    let color = color.clamped();
    match mode {
        DisplayMode::Raw => {
            let [r, g, b] = color.channels();
            (format!("{:.3}", r), format!("{:.3}", g), format!("{:.3}", b))
        }
        DisplayMode::Hsv => {
            let [h, s, v] = color.to_hsv();
            (format!("{:.3}", h), format!("{:.3}", s), format!("{:.3}", v))
        }
        DisplayMode::EightBit => {
            let [r, g, b] = color.to_8bit();
            (r.to_string(), g.to_string(), b.to_string())
        }
    }
}

pub fn rgb_to_hex(color: &Color) -> String {
    color.to_hex()
}
