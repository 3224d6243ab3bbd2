//! CSS color value parsing.
//!
//! Supports the notations palettes actually use:
//!
//! - Hex: `#fff`, `#ffffff` (case-insensitive)
//! - RGB: `rgb(255, 0, 0)`, `rgb(100%, 0%, 0%)`, `rgba(0, 0, 0, 0.5)`
//! - HSL: `hsl(0, 100%, 50%)`, `hsl(120deg, 50%, 25%)`, `hsla(...)`
//! - Named: the common CSS color keywords listed in [`NAMED_COLORS`]
//! - `transparent`, and any `rgba()`/`hsla()` with zero alpha
//!
//! Alpha is otherwise ignored: contrast is computed on the opaque color.
//!
//! # Example
//!
//! ```rust
//! use termdoc_contrast::{parse_color, CssColor, Rgb};
//!
//! assert_eq!(parse_color("#fff").unwrap(), CssColor::Rgb(Rgb::WHITE));
//! assert_eq!(parse_color("transparent").unwrap(), CssColor::Transparent);
//! assert!(parse_color("hsl(0, 100%, 50%)").is_ok());
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::ColorError;

/// An opaque sRGB color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    /// Creates a color from unit-interval channels.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from 8-bit channels.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Returns the channels quantized to 8 bits.
    pub fn to_u8(self) -> (u8, u8, u8) {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }

    /// Formats the color as `#rrggbb`.
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_u8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// A parsed CSS color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "rgb")]
pub enum CssColor {
    /// Fully transparent; has no contrast against anything.
    Transparent,
    /// An opaque color.
    Rgb(Rgb),
}

impl CssColor {
    /// Returns the opaque color, or `None` if transparent.
    pub fn rgb(&self) -> Option<Rgb> {
        match self {
            CssColor::Transparent => None,
            CssColor::Rgb(rgb) => Some(*rgb),
        }
    }
}

/// Named colors recognized by [`parse_color`], as 8-bit RGB.
pub const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("white", [0xff, 0xff, 0xff]),
    ("black", [0x00, 0x00, 0x00]),
    ("red", [0xff, 0x00, 0x00]),
    ("green", [0x00, 0x80, 0x00]),
    ("blue", [0x00, 0x00, 0xff]),
    ("yellow", [0xff, 0xff, 0x00]),
    ("cyan", [0x00, 0xff, 0xff]),
    ("magenta", [0xff, 0x00, 0xff]),
    ("gray", [0x80, 0x80, 0x80]),
    ("grey", [0x80, 0x80, 0x80]),
    ("silver", [0xc0, 0xc0, 0xc0]),
    ("maroon", [0x80, 0x00, 0x00]),
    ("olive", [0x80, 0x80, 0x00]),
    ("lime", [0x00, 0xff, 0x00]),
    ("aqua", [0x00, 0xff, 0xff]),
    ("teal", [0x00, 0x80, 0x80]),
    ("navy", [0x00, 0x00, 0x80]),
    ("fuchsia", [0xff, 0x00, 0xff]),
    ("purple", [0x80, 0x00, 0x80]),
    ("orange", [0xff, 0xa5, 0x00]),
];

static NAMED: Lazy<HashMap<&'static str, Rgb>> = Lazy::new(|| {
    NAMED_COLORS
        .iter()
        .map(|(name, [r, g, b])| (*name, Rgb::from_u8(*r, *g, *b)))
        .collect()
});

static RGB_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^rgba?\s*\(\s*(\d+(?:\.\d+)?%?)\s*,\s*(\d+(?:\.\d+)?%?)\s*,\s*(\d+(?:\.\d+)?%?)\s*(?:,\s*(\d*\.?\d+%?)\s*)?\)$",
    )
    .expect("rgb() pattern is valid")
});

static HSL_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^hsla?\s*\(\s*(\d*\.?\d+)(?:deg)?\s*,\s*(\d*\.?\d+)%\s*,\s*(\d*\.?\d+)%\s*(?:,\s*(\d*\.?\d+%?)\s*)?\)$",
    )
    .expect("hsl() pattern is valid")
});

/// Parses a CSS color value.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
pub fn parse_color(text: &str) -> Result<CssColor, ColorError> {
    let value = text.trim().to_ascii_lowercase();
    if value.is_empty() {
        return Err(ColorError::Empty);
    }

    if value == "transparent" {
        return Ok(CssColor::Transparent);
    }

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex).map(CssColor::Rgb);
    }

    if value.starts_with("rgb") {
        return parse_rgb_function(&value);
    }

    if value.starts_with("hsl") {
        return parse_hsl_function(&value);
    }

    NAMED
        .get(value.as_str())
        .map(|rgb| CssColor::Rgb(*rgb))
        .ok_or(ColorError::UnknownName(value))
}

fn parse_hex(hex: &str) -> Result<Rgb, ColorError> {
    let invalid = || ColorError::InvalidHex(format!("#{}", hex));
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match hex.len() {
        3 => {
            let r = channel(&hex[0..1])? * 17;
            let g = channel(&hex[1..2])? * 17;
            let b = channel(&hex[2..3])? * 17;
            Ok(Rgb::from_u8(r, g, b))
        }
        6 => Ok(Rgb::from_u8(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        _ => Err(invalid()),
    }
}

fn parse_rgb_function(value: &str) -> Result<CssColor, ColorError> {
    let caps = RGB_FUNCTION
        .captures(value)
        .ok_or_else(|| ColorError::InvalidFunction(value.to_string()))?;

    if alpha_is_zero(caps.get(4).map(|m| m.as_str())) {
        return Ok(CssColor::Transparent);
    }

    let component = |i: usize| -> Result<f64, ColorError> {
        let raw = &caps[i];
        let parsed = match raw.strip_suffix('%') {
            Some(pct) => pct.parse::<f64>().map(|v| v / 100.0),
            None => raw.parse::<f64>().map(|v| v / 255.0),
        };
        parsed
            .map(|v| v.clamp(0.0, 1.0))
            .map_err(|_| ColorError::InvalidFunction(value.to_string()))
    };

    Ok(CssColor::Rgb(Rgb::new(
        component(1)?,
        component(2)?,
        component(3)?,
    )))
}

fn parse_hsl_function(value: &str) -> Result<CssColor, ColorError> {
    let caps = HSL_FUNCTION
        .captures(value)
        .ok_or_else(|| ColorError::InvalidFunction(value.to_string()))?;

    if alpha_is_zero(caps.get(4).map(|m| m.as_str())) {
        return Ok(CssColor::Transparent);
    }

    let number = |i: usize| -> Result<f64, ColorError> {
        caps[i]
            .parse::<f64>()
            .map_err(|_| ColorError::InvalidFunction(value.to_string()))
    };

    let h = (number(1)? / 360.0).rem_euclid(1.0);
    let s = (number(2)? / 100.0).clamp(0.0, 1.0);
    let l = (number(3)? / 100.0).clamp(0.0, 1.0);
    Ok(CssColor::Rgb(hsl_to_rgb(h, s, l)))
}

fn alpha_is_zero(alpha: Option<&str>) -> bool {
    let Some(alpha) = alpha else {
        return false;
    };
    let number = alpha.strip_suffix('%').unwrap_or(alpha);
    number.parse::<f64>().is_ok_and(|a| a == 0.0)
}

/// Converts HSL (all components in `0.0..=1.0`) to RGB.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    if s == 0.0 {
        return Rgb::new(l, l, l);
    }

    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    Rgb::new(
        hue_channel(m1, m2, h + 1.0 / 3.0),
        hue_channel(m1, m2, h),
        hue_channel(m1, m2, h - 1.0 / 3.0),
    )
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}
