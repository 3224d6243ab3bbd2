//! Parsing raw palette configuration into a [`PaletteConfig`].
//!
//! The raw value comes straight from the theme section of the site
//! configuration and may take three shapes:
//!
//! ```yaml
//! # absent: all defaults
//!
//! # legacy shorthand
//! palette: dark
//!
//! # structured
//! palette:
//!   default: dark
//!   selector:
//!     enabled: true
//!     ui: toggle          # auto | toggle | select
//!     options:
//!       - dark            # shorthand for {name: dark}
//!       - name: gruvbox_dark
//!         label: Gruvbox
//!       - css: assets/ocean.css   # name derived: "ocean"
//! ```
//!
//! Parsing never fails on the shape of the value. Anything unexpected is
//! replaced with its documented default and recorded as a
//! [`PaletteWarning`]. Cross-checks against the filesystem and the site's extra
//! stylesheets happen later, in [`validate`](crate::validate).

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::config::{PaletteConfig, SelectorUi, DEFAULT_PALETTE};
use crate::error::Result;
use crate::option::{css_stem, derive_label, PaletteOption};
use crate::registry::BundledPalettes;
use crate::warning::PaletteWarning;

/// Keys recognized in an option mapping.
const OPTION_KEYS: &[&str] = &["name", "css", "label"];

/// Parses raw palette configuration, discovering bundled palettes in `palette_dir`.
///
/// `raw` is `None` when the site configuration has no palette entry at all.
///
/// # Errors
///
/// Returns an error only if `palette_dir` exists but cannot be read. A missing
/// directory is treated as having no bundled palettes.
pub fn parse<P: AsRef<Path>>(raw: Option<&Value>, palette_dir: P) -> Result<PaletteConfig> {
    let bundled = BundledPalettes::discover(palette_dir)?;
    Ok(parse_with_bundled(raw, bundled))
}

/// Parses raw palette configuration given in YAML text.
///
/// Empty text is treated as an absent configuration.
///
/// # Errors
///
/// Returns an error if the text is not valid YAML or the palette directory
/// cannot be read.
pub fn parse_yaml<P: AsRef<Path>>(yaml: &str, palette_dir: P) -> Result<PaletteConfig> {
    let value: Value = if yaml.trim().is_empty() {
        Value::Null
    } else {
        serde_yaml::from_str(yaml)?
    };
    parse(Some(&value), palette_dir)
}

/// Parses raw palette configuration against an already discovered palette set.
///
/// This is the pure core of [`parse`]: it never touches the filesystem and
/// never fails.
pub fn parse_with_bundled(raw: Option<&Value>, bundled: BundledPalettes) -> PaletteConfig {
    let mut config = PaletteConfig::with_defaults(bundled);

    let map = match raw {
        None | Some(Value::Null) => return config,
        Some(Value::String(name)) => {
            config.default = name.clone();
            return config;
        }
        Some(Value::Mapping(map)) => map,
        Some(other) => {
            config.warnings.push(PaletteWarning::InvalidConfigType {
                found: type_name(other),
            });
            return config;
        }
    };

    match map.get("default") {
        None | Some(Value::Null) => {}
        Some(Value::String(name)) => config.default = name.clone(),
        Some(other) => config.warnings.push(PaletteWarning::InvalidDefaultType {
            found: type_name(other),
        }),
    }

    let empty = Mapping::new();
    let selector = match map.get("selector") {
        None | Some(Value::Null) => &empty,
        Some(Value::Mapping(selector)) => selector,
        Some(other) => {
            config.warnings.push(PaletteWarning::InvalidSelectorType {
                found: type_name(other),
            });
            &empty
        }
    };

    parse_selector(selector, &mut config);
    config
}

fn parse_selector(selector: &Mapping, config: &mut PaletteConfig) {
    match selector.get("enabled") {
        None | Some(Value::Null) => {}
        Some(Value::Bool(enabled)) => config.selector_enabled = *enabled,
        Some(other) => config.warnings.push(PaletteWarning::InvalidEnabledType {
            found: type_name(other),
        }),
    }

    match selector.get("ui") {
        None | Some(Value::Null) => {}
        Some(Value::String(ui)) => match SelectorUi::from_name(ui) {
            Some(ui) => config.selector_ui = ui,
            None => config
                .warnings
                .push(PaletteWarning::InvalidSelectorUi { value: ui.clone() }),
        },
        Some(other) => config.warnings.push(PaletteWarning::InvalidSelectorUi {
            value: describe(other),
        }),
    }

    let entries = match selector.get("options") {
        None | Some(Value::Null) => return,
        Some(Value::Sequence(entries)) => entries,
        Some(other) => {
            config.warnings.push(PaletteWarning::InvalidOptionsType {
                found: type_name(other),
            });
            return;
        }
    };

    for entry in entries {
        if let Some(option) = parse_option(entry, &mut config.warnings) {
            config.options.push(option);
        }
    }
}

/// Normalizes one `selector.options` entry.
///
/// Returns `None` (after recording a warning) for entries that cannot name a
/// palette.
fn parse_option(entry: &Value, warnings: &mut Vec<PaletteWarning>) -> Option<PaletteOption> {
    let map = match entry {
        Value::String(name) if !name.is_empty() => {
            return Some(PaletteOption::bundled(name.as_str()))
        }
        Value::String(_) => {
            warnings.push(PaletteWarning::OptionMissingName {
                value: describe(entry),
            });
            return None;
        }
        Value::Mapping(map) => map,
        other => {
            warnings.push(PaletteWarning::InvalidOptionType {
                found: type_name(other),
                value: describe(other),
            });
            return None;
        }
    };

    let name = match option_str(map, "name") {
        Ok(name) => name,
        Err(found) => {
            warnings.push(PaletteWarning::InvalidOptionFieldType {
                option: describe(entry),
                key: "name",
                found,
            });
            return None;
        }
    };
    let css = match option_str(map, "css") {
        Ok(css) => css,
        Err(found) => {
            warnings.push(PaletteWarning::InvalidOptionFieldType {
                option: name.map_or_else(|| describe(entry), |n| format!("'{}'", n)),
                key: "css",
                found,
            });
            return None;
        }
    };

    let name = match name {
        Some(name) => name.to_string(),
        None => match css.and_then(css_stem) {
            Some(derived) => {
                tracing::debug!(name = %derived, css = css.unwrap_or_default(), "derived palette name from stylesheet path");
                derived
            }
            None => {
                warnings.push(PaletteWarning::OptionMissingName {
                    value: describe(entry),
                });
                return None;
            }
        },
    };

    for key in map.keys() {
        let known = key.as_str().is_some_and(|k| OPTION_KEYS.contains(&k));
        if !known {
            warnings.push(PaletteWarning::UnknownOptionKey {
                option: name.clone(),
                key: key.as_str().map(str::to_string).unwrap_or_else(|| describe(key)),
            });
        }
    }

    let label = match option_str(map, "label") {
        Ok(Some(label)) => label.to_string(),
        Ok(None) => derive_label(&name),
        Err(found) => {
            warnings.push(PaletteWarning::InvalidOptionFieldType {
                option: format!("'{}'", name),
                key: "label",
                found,
            });
            derive_label(&name)
        }
    };

    Some(PaletteOption {
        name,
        label,
        css: css.map(str::to_string),
    })
}

/// Reads a string field of an option mapping.
///
/// Absent, null and empty values are `Ok(None)`; any other non-string value is
/// `Err` with its type name.
fn option_str<'a>(
    map: &'a Mapping,
    key: &str,
) -> std::result::Result<Option<&'a str>, &'static str> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str()).filter(|s| !s.is_empty())),
        Some(other) => Err(type_name(other)),
    }
}

/// Names a YAML value's type for warning messages.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Renders a YAML value compactly for warning messages.
fn describe(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{:?}", value))
}
