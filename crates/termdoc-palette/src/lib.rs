//! Palette configuration for the termdoc documentation theme.
//!
//! `termdoc-palette` turns the `palette` entry of a site's theme configuration
//! into a validated [`PaletteConfig`]: which palette to apply on load, whether
//! readers get a selector, and which palettes that selector offers.
//!
//! # Quick Start
//!
//! ```ignore
//! use termdoc_palette::{resolve, PaletteContext};
//!
//! let raw: serde_yaml::Value = serde_yaml::from_str(r#"
//! default: dark
//! selector:
//!   enabled: true
//!   options: [default, dark, {name: ocean, css: assets/ocean.css}]
//! "#)?;
//!
//! let config = resolve(Some(&raw), "theme/css/palettes", &["assets/ocean.css"])?;
//! config.log_warnings();
//!
//! let context = PaletteContext::from(&config);
//! ```
//!
//! # Architecture
//!
//! Resolution happens in two passes over a plain data record:
//!
//! ```text
//! raw value ──parse──▶ PaletteConfig ──validate──▶ PaletteConfig ──▶ PaletteContext
//!     │                  (options)                  (valid_options)     (templates)
//!     └── palette dir scan: BundledPalettes
//! ```
//!
//! - [`parse`] normalizes the shape of the input. Wrong types and unknown
//!   values fall back to defaults.
//! - [`validate`] checks options against the bundled palettes and the site's
//!   extra stylesheets, drops duplicates, and repairs the default and selector.
//!
//! # Diagnostics
//!
//! Neither pass fails on bad configuration. Every correction is recorded as a
//! [`PaletteWarning`] in [`PaletteConfig::warnings`], in the order it was made.
//! The only error is a palette directory that exists but cannot be read.

mod config;
mod context;
mod error;
mod option;
mod parse;
mod registry;
mod validate;
mod warning;

use std::path::Path;

pub use config::{PaletteConfig, SelectorUi, DEFAULT_PALETTE};
pub use context::{ContextOption, PaletteContext};
pub use error::{PaletteError, Result};
pub use option::{derive_label, PaletteKind, PaletteOption, BUNDLED_PALETTE_DIR};
pub use parse::{parse, parse_with_bundled, parse_yaml};
pub use registry::{BundledPalettes, PALETTE_EXTENSIONS};
pub use validate::validate;
pub use warning::PaletteWarning;

/// Parses and validates raw palette configuration in one step.
///
/// # Errors
///
/// Returns [`PaletteError::Io`] if `palette_dir` exists but cannot be read.
pub fn resolve<P, S>(
    raw: Option<&serde_yaml::Value>,
    palette_dir: P,
    extra_stylesheets: &[S],
) -> Result<PaletteConfig>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let config = parse(raw, palette_dir)?;
    Ok(validate(config, extra_stylesheets))
}
