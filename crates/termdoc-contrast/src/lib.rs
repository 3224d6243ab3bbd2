//! WCAG contrast checks for termdoc palettes.
//!
//! `termdoc-contrast` answers one question: do a palette's colors meet WCAG 2.1
//! AA? Getting there takes three steps, each usable on its own:
//!
//! - [`parse_color`] turns a CSS color value into an sRGB [`Rgb`].
//! - [`Cascade`] layers stylesheets the way a browser would for an element with
//!   `data-palette="<name>"` and resolves `var()` references.
//! - [`PaletteAudit`] checks the resolved foreground/background pairs against
//!   the AA thresholds.
//!
//! # Example
//!
//! ```rust
//! use termdoc_contrast::{Cascade, PaletteAudit, Stylesheet};
//!
//! let base = Stylesheet::parse(":root { --background-color: #fff; }").unwrap();
//! let palette = Stylesheet::parse(r#"
//!     :root { --ink: #1a1a1a; }
//!     [data-palette="ink"] { --font-color: var(--ink); }
//! "#).unwrap();
//!
//! let vars = Cascade::new().with(base).with(palette).resolve("ink");
//! let audit = PaletteAudit::run("ink", &vars).unwrap();
//! assert!(audit.passed());
//! ```

mod audit;
mod color;
mod error;
mod variables;
mod wcag;

pub use audit::{ContrastCheck, PaletteAudit, DEFAULT_FONT_SIZE_PX, REQUIRED_TOKENS};
pub use color::{parse_color, CssColor, Rgb, NAMED_COLORS};
pub use error::{AuditError, ColorError, StylesheetError};
pub use variables::{resolve_var, Cascade, Stylesheet, Variables, MAX_VAR_DEPTH};
pub use wcag::{
    contrast_ratio, contrast_ratio_str, linearize, meets_aa, relative_luminance,
    rgb_contrast_ratio, TextSize, AA_LARGE_TEXT, AA_NORMAL_TEXT, LARGE_BOLD_TEXT_PX,
    LARGE_TEXT_PX,
};
