//! Palette options and label derivation.

use serde::{Deserialize, Serialize};

/// Directory, relative to the theme's stylesheet root, holding bundled palettes.
pub const BUNDLED_PALETTE_DIR: &str = "palettes";

/// Whether an option refers to a shipped palette or a site-provided stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteKind {
    /// Shipped with the theme, resolved by name in the palette directory.
    Bundled,
    /// Declared by the site through an explicit stylesheet path.
    Custom,
}

/// One selectable color scheme.
///
/// Options are a closed record: only `name`, `label` and `css` exist. An option
/// without `css` is bundled and must match a discovered palette name; an option
/// with `css` is custom and must be listed among the site's extra stylesheets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaletteOption {
    /// Identifier, unique within a validated option list.
    pub name: String,
    /// Display name shown by the selector UI.
    pub label: String,
    /// Explicit stylesheet path for custom palettes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
}

impl PaletteOption {
    /// Creates a bundled option with a label derived from its name.
    pub fn bundled(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: derive_label(&name),
            name,
            css: None,
        }
    }

    /// Creates a custom option backed by the given stylesheet path.
    pub fn custom(name: impl Into<String>, css: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: derive_label(&name),
            name,
            css: Some(css.into()),
        }
    }

    /// Replaces the derived label, returning `self` for chaining.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Returns whether this option is bundled or custom.
    pub fn kind(&self) -> PaletteKind {
        if self.css.is_some() {
            PaletteKind::Custom
        } else {
            PaletteKind::Bundled
        }
    }

    /// Returns the stylesheet href templates should link for this option.
    ///
    /// Bundled palettes live at `palettes/<name>.css`; custom palettes use their
    /// declared path verbatim.
    pub fn stylesheet_href(&self) -> String {
        match &self.css {
            Some(css) => css.clone(),
            None => format!("{}/{}.css", BUNDLED_PALETTE_DIR, self.name),
        }
    }
}

/// Derives a display label from a palette name.
///
/// Underscores and hyphens become spaces, then each word is title-cased: the
/// first letter of a word is uppercased and the rest lowercased.
///
/// ```rust
/// use termdoc_palette::derive_label;
///
/// assert_eq!(derive_label("gruvbox_dark"), "Gruvbox Dark");
/// assert_eq!(derive_label("custom-theme"), "Custom Theme");
/// ```
pub fn derive_label(name: &str) -> String {
    let mut label = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars() {
        let c = if c == '_' || c == '-' { ' ' } else { c };
        if c.is_alphabetic() {
            if at_word_start {
                label.extend(c.to_uppercase());
            } else {
                label.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            label.push(c);
            at_word_start = true;
        }
    }
    label
}

/// Returns the filename stem of a stylesheet path (`"assets/ocean.css"` -> `"ocean"`).
pub(crate) fn css_stem(css: &str) -> Option<String> {
    std::path::Path::new(css)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}
