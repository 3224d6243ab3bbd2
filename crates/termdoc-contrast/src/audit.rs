//! Contrast audit of a palette's resolved variables.
//!
//! Every palette must define `--font-color` and `--background-color`. The other
//! pairs are checked only when both of their variables are present:
//!
//! | Check | Foreground | Background | Threshold |
//! |-------|------------|------------|-----------|
//! | body text | `font-color` | `background-color` | text |
//! | primary | `primary-color` | `background-color` | text |
//! | secondary | `secondary-color` | `background-color` | text |
//! | error | `error-color` | `background-color` | text |
//! | code | `code-font-color` | `code-bg-color` | text |
//! | inverted button | `invert-font-color` | `primary-color` | 3:1 |
//!
//! "text" uses the AA threshold for `--global-font-size` (14px when absent or
//! not a pixel value).

use serde::Serialize;

use crate::color::parse_color;
use crate::error::AuditError;
use crate::variables::Variables;
use crate::wcag::{contrast_ratio, TextSize, AA_LARGE_TEXT};

/// Variables every palette must define.
pub const REQUIRED_TOKENS: &[&str] = &["font-color", "background-color"];

/// Body font size used when the palette does not set one.
pub const DEFAULT_FONT_SIZE_PX: f64 = 14.0;

#[derive(Debug, Clone, Copy)]
enum Threshold {
    Text,
    Ui,
}

struct Pair {
    name: &'static str,
    foreground: &'static str,
    background: &'static str,
    threshold: Threshold,
}

const PAIRS: &[Pair] = &[
    Pair {
        name: "body text",
        foreground: "font-color",
        background: "background-color",
        threshold: Threshold::Text,
    },
    Pair {
        name: "primary",
        foreground: "primary-color",
        background: "background-color",
        threshold: Threshold::Text,
    },
    Pair {
        name: "secondary",
        foreground: "secondary-color",
        background: "background-color",
        threshold: Threshold::Text,
    },
    Pair {
        name: "error",
        foreground: "error-color",
        background: "background-color",
        threshold: Threshold::Text,
    },
    Pair {
        name: "code",
        foreground: "code-font-color",
        background: "code-bg-color",
        threshold: Threshold::Text,
    },
    Pair {
        name: "inverted button",
        foreground: "invert-font-color",
        background: "primary-color",
        threshold: Threshold::Ui,
    },
];

/// Result of one foreground/background comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastCheck {
    /// What the pair is used for.
    pub name: &'static str,
    /// Variable holding the foreground color.
    pub foreground_token: &'static str,
    /// Variable holding the background color.
    pub background_token: &'static str,
    /// Resolved foreground value.
    pub foreground: String,
    /// Resolved background value.
    pub background: String,
    /// Contrast ratio, or `None` if a color could not be used.
    pub ratio: Option<f64>,
    /// Minimum ratio for this pair.
    pub required: f64,
    pub passed: bool,
}

/// All contrast checks for one palette.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteAudit {
    pub palette: String,
    pub font_size_px: f64,
    pub checks: Vec<ContrastCheck>,
}

impl PaletteAudit {
    /// Audits a palette's resolved variables.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::MissingToken`] if a [required](REQUIRED_TOKENS)
    /// variable is absent.
    pub fn run(palette: &str, vars: &Variables) -> Result<Self, AuditError> {
        for token in REQUIRED_TOKENS {
            if !vars.contains_key(*token) {
                return Err(AuditError::MissingToken {
                    palette: palette.to_string(),
                    token: token.to_string(),
                });
            }
        }

        let font_size_px = vars
            .get("global-font-size")
            .and_then(|size| parse_px(size))
            .unwrap_or(DEFAULT_FONT_SIZE_PX);
        let text = TextSize::normal(font_size_px);

        let checks = PAIRS
            .iter()
            .filter_map(|pair| {
                let foreground = vars.get(pair.foreground)?;
                let background = vars.get(pair.background)?;
                let required = match pair.threshold {
                    Threshold::Text => text.required_ratio(),
                    Threshold::Ui => AA_LARGE_TEXT,
                };
                Some(check(pair, foreground, background, required))
            })
            .collect();

        let audit = Self {
            palette: palette.to_string(),
            font_size_px,
            checks,
        };
        tracing::debug!(
            palette,
            checks = audit.checks.len(),
            failures = audit.failures().count(),
            "audited palette"
        );
        Ok(audit)
    }

    /// Returns true if every check passed.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Returns the checks that failed.
    pub fn failures(&self) -> impl Iterator<Item = &ContrastCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

fn check(pair: &Pair, foreground: &str, background: &str, required: f64) -> ContrastCheck {
    let ratio = match (parse_color(foreground), parse_color(background)) {
        (Ok(fg), Ok(bg)) => contrast_ratio(&fg, &bg),
        _ => None,
    };
    ContrastCheck {
        name: pair.name,
        foreground_token: pair.foreground,
        background_token: pair.background,
        foreground: foreground.to_string(),
        background: background.to_string(),
        ratio,
        required,
        passed: ratio.is_some_and(|r| r >= required),
    }
}

/// Parses `"<n>px"`.
fn parse_px(value: &str) -> Option<f64> {
    value
        .trim()
        .strip_suffix("px")
        .and_then(|n| n.trim().parse::<f64>().ok())
        .filter(|n| *n > 0.0)
}
