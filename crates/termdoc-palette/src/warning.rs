//! Diagnostics produced while parsing and validating palette configuration.
//!
//! Every corrective action the resolver takes is recorded as exactly one
//! [`PaletteWarning`]. Warnings are returned as data on the
//! [`PaletteConfig`](crate::PaletteConfig); the caller decides where to log them.
//!
//! At serialization boundaries a warning is its display string, so templates and
//! JSON consumers see an ordered list of human-readable messages.

use serde::{Serialize, Serializer};

use crate::config::SelectorUi;

/// A single configuration problem and the correction that was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteWarning {
    /// The top-level palette value was neither a string nor a mapping.
    InvalidConfigType { found: &'static str },
    /// `default` was present but not a string.
    InvalidDefaultType { found: &'static str },
    /// `selector` was present but not a mapping.
    InvalidSelectorType { found: &'static str },
    /// `selector.enabled` was present but not a boolean.
    InvalidEnabledType { found: &'static str },
    /// `selector.ui` was not one of the recognized values.
    InvalidSelectorUi { value: String },
    /// `selector.options` was present but not a sequence.
    InvalidOptionsType { found: &'static str },
    /// An option entry was neither a string nor a mapping.
    InvalidOptionType { found: &'static str, value: String },
    /// An option mapping had neither `name` nor `css`.
    OptionMissingName { value: String },
    /// An option mapping carried a key outside `name`, `css`, `label`.
    UnknownOptionKey { option: String, key: String },
    /// An option field was present but not a string. A bad `label` falls back
    /// to the derived label; a bad `name` or `css` skips the option.
    InvalidOptionFieldType {
        option: String,
        key: &'static str,
        found: &'static str,
    },
    /// A custom palette's stylesheet is not declared as an extra stylesheet.
    CustomCssNotFound { name: String, css: String },
    /// A bundled palette name has no stylesheet in the palette directory.
    BundledNotFound {
        name: String,
        available: Vec<String>,
    },
    /// A later option reused the name of an already accepted option.
    DuplicateName { name: String },
    /// The default palette is neither bundled nor a valid option.
    InvalidDefault { name: String },
    /// The selector was enabled but no option survived validation.
    NoValidOptions,
    /// Toggle UI was requested without exactly two valid options.
    ToggleRequiresTwo { found: usize },
}

impl std::fmt::Display for PaletteWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaletteWarning::InvalidConfigType { found } => write!(
                f,
                "Invalid palette config type: {}. Expected string or mapping. Using defaults.",
                found
            ),
            PaletteWarning::InvalidDefaultType { found } => write!(
                f,
                "Invalid palette default type: {}. Expected string. Using 'default'.",
                found
            ),
            PaletteWarning::InvalidSelectorType { found } => write!(
                f,
                "Invalid selector config type: {}. Expected mapping. Using defaults.",
                found
            ),
            PaletteWarning::InvalidEnabledType { found } => write!(
                f,
                "Invalid selector.enabled type: {}. Expected boolean. Disabling selector.",
                found
            ),
            PaletteWarning::InvalidSelectorUi { value } => write!(
                f,
                "Invalid selector.ui value '{}'. Must be one of: {}. Using '{}'.",
                value,
                SelectorUi::ALL
                    .iter()
                    .map(SelectorUi::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
                SelectorUi::Auto
            ),
            PaletteWarning::InvalidOptionsType { found } => write!(
                f,
                "Invalid selector.options type: {}. Expected a list. Ignoring options.",
                found
            ),
            PaletteWarning::InvalidOptionType { found, value } => write!(
                f,
                "Invalid palette option type: {}, skipping: {}",
                found, value
            ),
            PaletteWarning::OptionMissingName { value } => write!(
                f,
                "Palette option missing 'name' field and 'css' field, skipping: {}",
                value
            ),
            PaletteWarning::UnknownOptionKey { option, key } => write!(
                f,
                "Palette option '{}' has unrecognized key '{}'. Only name, css and label are supported; ignoring it.",
                option, key
            ),
            PaletteWarning::InvalidOptionFieldType { option, key, found } => write!(
                f,
                "Palette option {} has invalid '{}' type: {}. Expected string. {}",
                option,
                key,
                found,
                if *key == "label" {
                    "Using derived label."
                } else {
                    "Skipping option."
                }
            ),
            PaletteWarning::CustomCssNotFound { name, css } => write!(
                f,
                "Custom palette '{}' CSS file '{}' not found in extra_css. Add to mkdocs.yml: extra_css: ['{}']",
                name, css, css
            ),
            PaletteWarning::BundledNotFound { name, available } => write!(
                f,
                "Bundled palette '{}' not found. Available palettes: {}",
                name,
                available.join(", ")
            ),
            PaletteWarning::DuplicateName { name } => write!(
                f,
                "Duplicate palette name '{}'. Keeping the first valid occurrence.",
                name
            ),
            PaletteWarning::InvalidDefault { name } => write!(
                f,
                "Default palette '{}' is not a valid bundled palette and not in selector options. Using 'default'.",
                name
            ),
            PaletteWarning::NoValidOptions => write!(
                f,
                "Selector enabled but no valid palette options found. Disabling selector."
            ),
            PaletteWarning::ToggleRequiresTwo { found } => write!(
                f,
                "Toggle UI requires exactly 2 options, found {}. Using 'select' UI instead.",
                found
            ),
        }
    }
}

impl Serialize for PaletteWarning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_css_warning_has_remediation_hint() {
        let w = PaletteWarning::CustomCssNotFound {
            name: "ocean".into(),
            css: "assets/ocean.css".into(),
        };
        let msg = w.to_string();
        assert!(msg.contains("'ocean'"));
        assert!(msg.contains("extra_css: ['assets/ocean.css']"));
    }

    #[test]
    fn test_bundled_warning_lists_available() {
        let w = PaletteWarning::BundledNotFound {
            name: "missing".into(),
            available: vec!["dark".into(), "default".into()],
        };
        assert_eq!(
            w.to_string(),
            "Bundled palette 'missing' not found. Available palettes: dark, default"
        );
    }

    #[test]
    fn test_invalid_ui_lists_choices() {
        let w = PaletteWarning::InvalidSelectorUi {
            value: "dropdown".into(),
        };
        let msg = w.to_string();
        assert!(msg.contains("'dropdown'"));
        assert!(msg.contains("auto, toggle, select"));
        assert!(msg.ends_with("Using 'auto'."));
    }

    #[test]
    fn test_invalid_option_field_names_action() {
        let label = PaletteWarning::InvalidOptionFieldType {
            option: "'dark'".into(),
            key: "label",
            found: "int",
        };
        assert_eq!(
            label.to_string(),
            "Palette option 'dark' has invalid 'label' type: int. Expected string. Using derived label."
        );

        let css = PaletteWarning::InvalidOptionFieldType {
            option: "'dark'".into(),
            key: "css",
            found: "int",
        };
        assert!(css.to_string().ends_with("Skipping option."));
    }

    #[test]
    fn test_serializes_as_message() {
        let w = PaletteWarning::DuplicateName { name: "dark".into() };
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, format!("\"{}\"", w));
    }
}
