//! Template-facing view of a validated palette configuration.
//!
//! Templates need far less than the full [`PaletteConfig`]: the palette to put
//! in the `data-palette` attribute, whether and how to draw the selector, and
//! the stylesheets to link. [`PaletteContext`] carries exactly that, with each
//! option's href already resolved, and serializes to JSON or YAML for whatever
//! template engine the host uses.
//!
//! ```rust
//! use termdoc_palette::{parse_with_bundled, validate, BundledPalettes, PaletteContext};
//!
//! let bundled: BundledPalettes = ["default", "dark"].into_iter().collect();
//! let raw = serde_yaml::from_str("selector: {enabled: true, options: [default, dark]}").unwrap();
//! let config = validate(parse_with_bundled(Some(&raw), bundled), &[] as &[&str]);
//!
//! let context = PaletteContext::from(&config);
//! assert_eq!(context.data_palette, "default");
//! assert_eq!(context.options[1].href, "palettes/dark.css");
//! ```

use serde::Serialize;

use crate::config::{PaletteConfig, SelectorUi};
use crate::option::{PaletteKind, PaletteOption};

/// A selectable palette as templates see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextOption {
    /// Value written to `data-palette` when this option is chosen.
    pub name: String,
    /// Display name for the selector.
    pub label: String,
    /// Stylesheet to link for this palette.
    pub href: String,
    /// Bundled or custom.
    pub kind: PaletteKind,
}

impl From<&PaletteOption> for ContextOption {
    fn from(option: &PaletteOption) -> Self {
        Self {
            name: option.name.clone(),
            label: option.label.clone(),
            href: option.stylesheet_href(),
            kind: option.kind(),
        }
    }
}

/// Read-only palette data handed to templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteContext {
    /// Palette applied on page load.
    pub data_palette: String,
    /// Stylesheet for the palette applied on page load.
    pub default_href: String,
    /// Whether to render the selector.
    pub selector_enabled: bool,
    /// Which selector control to render.
    pub selector_ui: SelectorUi,
    /// Validated options, in declaration order.
    pub options: Vec<ContextOption>,
}

impl PaletteContext {
    /// Returns the stylesheet hrefs to link, without repeats.
    ///
    /// The default palette's stylesheet comes first, followed by the option
    /// stylesheets in declaration order.
    pub fn stylesheet_hrefs(&self) -> Vec<&str> {
        let mut hrefs = vec![self.default_href.as_str()];
        for opt in &self.options {
            if !hrefs.contains(&opt.href.as_str()) {
                hrefs.push(opt.href.as_str());
            }
        }
        hrefs
    }
}

impl From<&PaletteConfig> for PaletteContext {
    fn from(config: &PaletteConfig) -> Self {
        let default_href = match config.valid_option(&config.default) {
            Some(option) => option.stylesheet_href(),
            None => PaletteOption::bundled(config.default.as_str()).stylesheet_href(),
        };
        Self {
            data_palette: config.default.clone(),
            default_href,
            selector_enabled: config.selector_enabled,
            selector_ui: config.selector_ui,
            options: config.valid_options.iter().map(ContextOption::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::BundledPalettes;

    fn config_with(options: Vec<PaletteOption>, default: &str) -> PaletteConfig {
        let mut config = PaletteConfig::with_defaults(
            ["default", "dark"].into_iter().collect::<BundledPalettes>(),
        );
        config.default = default.to_string();
        config.selector_enabled = true;
        config.valid_options = options.clone();
        config.options = options;
        config
    }

    #[test]
    fn test_context_resolves_hrefs() {
        let config = config_with(
            vec![
                PaletteOption::bundled("dark"),
                PaletteOption::custom("ocean", "assets/ocean.css"),
            ],
            "dark",
        );
        let context = PaletteContext::from(&config);

        assert_eq!(context.data_palette, "dark");
        assert_eq!(context.default_href, "palettes/dark.css");
        assert_eq!(context.options[0].href, "palettes/dark.css");
        assert_eq!(context.options[0].kind, PaletteKind::Bundled);
        assert_eq!(context.options[1].href, "assets/ocean.css");
        assert_eq!(context.options[1].kind, PaletteKind::Custom);
        assert_eq!(
            context.stylesheet_hrefs(),
            vec!["palettes/dark.css", "assets/ocean.css"]
        );
    }

    #[test]
    fn test_custom_default_uses_declared_css() {
        let config = config_with(
            vec![PaletteOption::custom("dark", "my-dark.css")],
            "dark",
        );
        let context = PaletteContext::from(&config);
        assert_eq!(context.default_href, "my-dark.css");
    }

    #[test]
    fn test_default_outside_options_linked_first() {
        let config = config_with(vec![PaletteOption::bundled("dark")], "default");
        let context = PaletteContext::from(&config);
        assert_eq!(
            context.stylesheet_hrefs(),
            vec!["palettes/default.css", "palettes/dark.css"]
        );
    }

    #[test]
    fn test_serialized_shape() {
        let config = config_with(vec![PaletteOption::bundled("dark")], "dark");
        let json = serde_json::to_value(PaletteContext::from(&config)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "data_palette": "dark",
                "default_href": "palettes/dark.css",
                "selector_enabled": true,
                "selector_ui": "auto",
                "options": [
                    {"name": "dark", "label": "Dark", "href": "palettes/dark.css", "kind": "bundled"}
                ]
            })
        );
    }
}
