//! Value parsing for the properties the engine itself interprets:
//! colors, integer lengths, floats, durations.
//!
//! Everything else stays raw text and is handed to the toolkit untouched.

use std::fmt;
use std::time::Duration;

/// Errors from parsing a property value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    #[error("invalid color: {0}")]
    Color(String),
    #[error("invalid length: {0}")]
    Length(String),
    #[error("invalid number: {0}")]
    Number(String),
    #[error("invalid duration: {0}")]
    Duration(String),
}

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully transparent black, the zero value for color transitions.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// A color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `rgb(r, g, b)`, `rgba(r, g, b, a)` (alpha in `0..=1`), `#rgb`,
    /// `#rrggbb`, `#rrggbbaa` or `transparent`.
    pub fn parse(src: &str) -> Result<Self, ValueError> {
        let src = src.trim();
        let err = || ValueError::Color(src.to_owned());

        if src.eq_ignore_ascii_case("transparent") {
            return Ok(Color::TRANSPARENT);
        }
        if let Some(hex) = src.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(err);
        }
        if let Some(args) = function_args(src, "rgba") {
            let parts: Vec<&str> = args.split(',').map(str::trim).collect();
            let [r, g, b, a] = parts.as_slice() else {
                return Err(err());
            };
            let alpha: f32 = a.parse().map_err(|_| err())?;
            return Ok(Color::rgba(
                channel(r).ok_or_else(err)?,
                channel(g).ok_or_else(err)?,
                channel(b).ok_or_else(err)?,
                (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ));
        }
        if let Some(args) = function_args(src, "rgb") {
            let parts: Vec<&str> = args.split(',').map(str::trim).collect();
            let [r, g, b] = parts.as_slice() else {
                return Err(err());
            };
            return Ok(Color::rgb(
                channel(r).ok_or_else(err)?,
                channel(g).ok_or_else(err)?,
                channel(b).ok_or_else(err)?,
            ));
        }
        Err(err())
    }

    /// Linearly interpolate each channel.
    pub fn blend(self, other: Color, factor: f32) -> Color {
        let mix = |a: u8, b: u8| {
            let (a, b) = (a as f32, b as f32);
            (a + (b - a) * factor).round().clamp(0.0, 255.0) as u8
        };
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            let alpha = self.a as f64 / 255.0;
            write!(f, "rgba({}, {}, {}, {alpha})", self.r, self.g, self.b)
        }
    }
}

fn function_args<'a>(src: &'a str, name: &str) -> Option<&'a str> {
    src.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn channel(src: &str) -> Option<u8> {
    let value: f32 = src.parse().ok()?;
    Some(value.round().clamp(0.0, 255.0) as u8)
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|n| n * 17);
    match hex.len() {
        3 => Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

/// Extract the signed integer from a length such as `12px`, `-4px` or `0`.
///
/// Only digits and `-` are kept, so `12px` → 12 and `150ms` → 150.
pub fn parse_length(src: &str) -> Result<i32, ValueError> {
    let digits: String = src
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    digits
        .parse()
        .map_err(|_| ValueError::Length(src.to_owned()))
}

/// Parse a bare float such as `0.5` or `-90`.
pub fn parse_float(src: &str) -> Result<f32, ValueError> {
    src.trim()
        .parse()
        .map_err(|_| ValueError::Number(src.to_owned()))
}

/// Parse a duration: `150ms`, `0.2s`, or bare milliseconds.
pub fn parse_duration(src: &str) -> Result<Duration, ValueError> {
    let src = src.trim();
    let err = || ValueError::Duration(src.to_owned());
    let (number, scale) = if let Some(ms) = src.strip_suffix("ms") {
        (ms, 1.0)
    } else if let Some(s) = src.strip_suffix('s') {
        (s, 1000.0)
    } else {
        (src, 1.0)
    };
    let value: f64 = number.parse().map_err(|_| err())?;
    if !value.is_finite() || value < 0.0 {
        return Err(err());
    }
    Ok(Duration::from_nanos((value * scale * 1_000_000.0).round() as u64))
}
