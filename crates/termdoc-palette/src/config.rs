//! The normalized palette configuration record.

use serde::Serialize;

use crate::option::PaletteOption;
use crate::registry::BundledPalettes;
use crate::warning::PaletteWarning;

/// Palette applied when nothing else is configured or the configured one is invalid.
pub const DEFAULT_PALETTE: &str = "default";

/// How the palette choice is presented to readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorUi {
    /// Let the theme pick a control based on the number of options.
    #[default]
    Auto,
    /// Two-way switch; only meaningful with exactly two options.
    Toggle,
    /// Drop-down list.
    Select,
}

impl SelectorUi {
    /// All recognized values, in documentation order.
    pub const ALL: [SelectorUi; 3] = [SelectorUi::Auto, SelectorUi::Toggle, SelectorUi::Select];

    /// Parses a configuration value. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ui| ui.as_str() == name)
    }

    /// Returns the configuration spelling of this value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectorUi::Auto => "auto",
            SelectorUi::Toggle => "toggle",
            SelectorUi::Select => "select",
        }
    }
}

impl std::fmt::Display for SelectorUi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized palette configuration.
///
/// Produced by [`parse`](crate::parse) (with `valid_options` empty) and
/// completed by [`validate`](crate::validate). After validation the record is
/// treated as read-only for the rest of the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteConfig {
    /// Palette applied when no selector choice is active.
    pub default: String,
    /// Whether the selector UI is offered.
    pub selector_enabled: bool,
    /// Selector control type.
    pub selector_ui: SelectorUi,
    /// Options as declared, before validation.
    pub options: Vec<PaletteOption>,
    /// Options that passed validation, in declaration order.
    pub valid_options: Vec<PaletteOption>,
    /// Palettes discovered in the palette directory.
    pub bundled_palettes: BundledPalettes,
    /// Diagnostics recorded during parsing and validation, in order.
    pub warnings: Vec<PaletteWarning>,
}

impl PaletteConfig {
    /// Creates the default configuration for the given bundled palettes.
    pub fn with_defaults(bundled_palettes: BundledPalettes) -> Self {
        Self {
            default: DEFAULT_PALETTE.to_string(),
            selector_enabled: false,
            selector_ui: SelectorUi::Auto,
            options: Vec::new(),
            valid_options: Vec::new(),
            bundled_palettes,
            warnings: Vec::new(),
        }
    }

    /// Looks up a validated option by name.
    pub fn valid_option(&self, name: &str) -> Option<&PaletteOption> {
        self.valid_options.iter().find(|opt| opt.name == name)
    }

    /// Returns true if any warning was recorded.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Emits every recorded warning as a `tracing` warning event.
    ///
    /// The resolver itself never logs its warnings; hosts call this (or iterate
    /// [`warnings`](Self::warnings) themselves) once resolution is complete.
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            tracing::warn!(target: "termdoc::palette", "{}", warning);
        }
    }
}
