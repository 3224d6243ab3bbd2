//! WCAG 2.1 relative luminance and contrast ratio.
//!
//! The formulas follow the W3C definition:
//!
//! ```text
//! c' = c / 12.92                      if c <= 0.03928
//!      ((c + 0.055) / 1.055) ^ 2.4    otherwise
//! L  = 0.2126 R' + 0.7152 G' + 0.0722 B'
//! CR = (L_lighter + 0.05) / (L_darker + 0.05)
//! ```
//!
//! AA requires 4.5:1 for normal text and 3:1 for large text and UI components.
//! Large text is at least 24px, or at least 18.67px when bold.

use serde::Serialize;

use crate::color::{parse_color, CssColor, Rgb};

/// Minimum AA ratio for normal-size text.
pub const AA_NORMAL_TEXT: f64 = 4.5;
/// Minimum AA ratio for large text and UI components.
pub const AA_LARGE_TEXT: f64 = 3.0;
/// Size at which regular-weight text counts as large (18pt).
pub const LARGE_TEXT_PX: f64 = 24.0;
/// Size at which bold text counts as large (14pt).
pub const LARGE_BOLD_TEXT_PX: f64 = 18.67;

/// Applies sRGB gamma expansion to one channel in `0.0..=1.0`.
pub fn linearize(c: f64) -> f64 {
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Returns the relative luminance of a color, in `0.0..=1.0`.
pub fn relative_luminance(rgb: Rgb) -> f64 {
    0.2126 * linearize(rgb.r) + 0.7152 * linearize(rgb.g) + 0.0722 * linearize(rgb.b)
}

/// Returns the contrast ratio between two opaque colors, in `1.0..=21.0`.
pub fn rgb_contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Returns the contrast ratio between two colors.
///
/// Undefined (`None`) when either color is transparent.
pub fn contrast_ratio(a: &CssColor, b: &CssColor) -> Option<f64> {
    Some(rgb_contrast_ratio(a.rgb()?, b.rgb()?))
}

/// Parses two CSS color values and returns their contrast ratio.
///
/// `None` if either value is unparseable or transparent.
pub fn contrast_ratio_str(a: &str, b: &str) -> Option<f64> {
    let a = parse_color(a).ok()?;
    let b = parse_color(b).ok()?;
    contrast_ratio(&a, &b)
}

/// Rendered text size, used to pick the AA threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextSize {
    pub px: f64,
    pub bold: bool,
}

impl Default for TextSize {
    fn default() -> Self {
        Self::normal(14.0)
    }
}

impl TextSize {
    pub fn normal(px: f64) -> Self {
        Self { px, bold: false }
    }

    pub fn bold(px: f64) -> Self {
        Self { px, bold: true }
    }

    /// Returns true if WCAG treats this as large text.
    pub fn is_large(&self) -> bool {
        self.px >= LARGE_TEXT_PX || (self.bold && self.px >= LARGE_BOLD_TEXT_PX)
    }

    /// Returns the minimum AA contrast ratio for this size.
    pub fn required_ratio(&self) -> f64 {
        if self.is_large() {
            AA_LARGE_TEXT
        } else {
            AA_NORMAL_TEXT
        }
    }
}

/// Returns true if `ratio` meets WCAG AA for text of the given size.
///
/// A missing ratio never passes.
pub fn meets_aa(ratio: Option<f64>, size: TextSize) -> bool {
    ratio.is_some_and(|r| r >= size.required_ratio())
}
