//! Cross-validation of parsed options against the build environment.
//!
//! Validation applies these checks in order, recording one warning per
//! correction:
//!
//! 1. Each declared option, in declaration order:
//!    - a name already accepted is a duplicate and is dropped, whatever its own
//!      validity;
//!    - a custom option is kept only if its `css` is an extra stylesheet;
//!    - a bundled option is kept only if its name was discovered on disk.
//! 2. The default palette must be bundled or a valid option, else it becomes
//!    `"default"`.
//! 3. An enabled selector with no valid options is disabled.
//! 4. A toggle selector without exactly two valid options becomes a select.
//!
//! An invalid occurrence is never accepted, so it neither blocks a later valid
//! option with the same name nor triggers a duplicate warning. When a custom
//! option shares a name with a bundled palette, whichever is declared first
//! (and is valid) wins.

use std::collections::HashSet;

use crate::config::{PaletteConfig, SelectorUi, DEFAULT_PALETTE};
use crate::option::PaletteOption;
use crate::warning::PaletteWarning;

/// Validates a parsed configuration against the site's extra stylesheets.
///
/// `valid_options` is rebuilt from `options`; warnings are appended after any
/// recorded during parsing.
pub fn validate<S: AsRef<str>>(mut config: PaletteConfig, extra_stylesheets: &[S]) -> PaletteConfig {
    let extra: HashSet<&str> = extra_stylesheets.iter().map(AsRef::as_ref).collect();

    let mut accepted: HashSet<String> = HashSet::new();
    let mut valid_options = Vec::with_capacity(config.options.len());

    for option in &config.options {
        if accepted.contains(&option.name) {
            config.warnings.push(PaletteWarning::DuplicateName {
                name: option.name.clone(),
            });
            continue;
        }

        if let Some(warning) = check_option(option, &config, &extra) {
            config.warnings.push(warning);
            continue;
        }

        accepted.insert(option.name.clone());
        valid_options.push(option.clone());
    }
    config.valid_options = valid_options;

    let default_is_bundled = config.bundled_palettes.contains(&config.default);
    if !default_is_bundled && config.valid_option(&config.default).is_none() {
        config.warnings.push(PaletteWarning::InvalidDefault {
            name: config.default.clone(),
        });
        config.default = DEFAULT_PALETTE.to_string();
    }

    if config.selector_enabled && config.valid_options.is_empty() {
        config.warnings.push(PaletteWarning::NoValidOptions);
        config.selector_enabled = false;
    }

    if config.selector_enabled
        && config.selector_ui == SelectorUi::Toggle
        && config.valid_options.len() != 2
    {
        config.warnings.push(PaletteWarning::ToggleRequiresTwo {
            found: config.valid_options.len(),
        });
        config.selector_ui = SelectorUi::Select;
    }

    tracing::debug!(
        default = %config.default,
        selector_enabled = config.selector_enabled,
        selector_ui = %config.selector_ui,
        valid_options = config.valid_options.len(),
        warnings = config.warnings.len(),
        "validated palette config"
    );
    config
}

/// Checks a single option, returning the warning that rejects it.
fn check_option(
    option: &PaletteOption,
    config: &PaletteConfig,
    extra: &HashSet<&str>,
) -> Option<PaletteWarning> {
    match &option.css {
        Some(css) if !extra.contains(css.as_str()) => Some(PaletteWarning::CustomCssNotFound {
            name: option.name.clone(),
            css: css.clone(),
        }),
        Some(_) => None,
        None if !config.bundled_palettes.contains(&option.name) => {
            Some(PaletteWarning::BundledNotFound {
                name: option.name.clone(),
                available: config.bundled_palettes.names().map(str::to_string).collect(),
            })
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_with_bundled;
    use crate::registry::BundledPalettes;

    const NO_EXTRA: &[&str] = &[];

    fn bundled() -> BundledPalettes {
        ["default", "dark", "gruvbox_dark", "pink", "sans", "sans_dark"]
            .into_iter()
            .collect()
    }

    fn parsed(text: &str) -> PaletteConfig {
        let value: serde_yaml::Value = serde_yaml::from_str(text).unwrap();
        parse_with_bundled(Some(&value), bundled())
    }

    fn names(options: &[PaletteOption]) -> Vec<&str> {
        options.iter().map(|o| o.name.as_str()).collect()
    }

    #[test]
    fn test_accepts_bundled_palettes() {
        let result = validate(parsed("selector:\n  options: [dark, pink, sans]"), NO_EXTRA);
        assert_eq!(names(&result.valid_options), vec!["dark", "pink", "sans"]);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_drops_unknown_bundled_palette() {
        let result = validate(parsed("selector:\n  options: [dark, nope]"), NO_EXTRA);
        assert_eq!(names(&result.valid_options), vec!["dark"]);
        assert_eq!(result.warnings.len(), 1);
        let msg = result.warnings[0].to_string();
        assert!(msg.contains("'nope'"));
        assert!(msg.contains("Available palettes: dark, default, gruvbox_dark"));
    }

    #[test]
    fn test_custom_palette_in_extra_css() {
        let config = parsed("selector:\n  options:\n    - {name: ocean, css: assets/ocean.css}");
        let result = validate(config, &["assets/ocean.css"]);
        assert_eq!(
            result.valid_options,
            vec![PaletteOption::custom("ocean", "assets/ocean.css")]
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_custom_palette_missing_from_extra_css() {
        let config = parsed(
            "selector:\n  options:\n    - {name: ocean, css: assets/ocean.css}\n    - dark",
        );
        let result = validate(config, NO_EXTRA);
        assert_eq!(names(&result.valid_options), vec!["dark"]);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].to_string().contains("ocean.css"));
    }

    #[test]
    fn test_custom_palette_may_reuse_bundled_name() {
        let config = parsed(
            "selector:\n  options:\n    - {name: dark, css: my-custom-dark.css}\n    - default",
        );
        let result = validate(config, &["my-custom-dark.css".to_string()]);
        assert_eq!(
            result.valid_options,
            vec![
                PaletteOption::custom("dark", "my-custom-dark.css"),
                PaletteOption::bundled("default"),
            ]
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_invalid_default_resets() {
        let config = parsed("default: nonexistent\nselector:\n  options: [dark]");
        let result = validate(config, NO_EXTRA);
        assert_eq!(result.default, "default");
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].to_string().contains("nonexistent"));
    }

    #[test]
    fn test_default_may_be_custom_option() {
        let config = parsed(
            "default: ocean\nselector:\n  options:\n    - {css: assets/ocean.css}",
        );
        let result = validate(config, &["assets/ocean.css"]);
        assert_eq!(result.default, "ocean");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_default_of_rejected_custom_option_resets() {
        let config = parsed(
            "default: ocean\nselector:\n  options:\n    - {css: assets/ocean.css}",
        );
        let result = validate(config, NO_EXTRA);
        assert_eq!(result.default, "default");
        assert_eq!(result.warnings.len(), 2);
    }

    #[test]
    fn test_duplicate_keeps_first_valid() {
        let config = parsed("selector:\n  options: [dark, default, dark]");
        let result = validate(config, NO_EXTRA);
        assert_eq!(names(&result.valid_options), vec!["dark", "default"]);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0]
            .to_string()
            .contains("Duplicate palette name 'dark'"));
    }

    #[test]
    fn test_invalid_first_occurrence_does_not_block_later_valid() {
        let config = parsed(
            r#"
selector:
  options:
    - {name: custom, css: missing.css}
    - {name: custom, css: valid.css}
    - default
"#,
        );
        let result = validate(config, &["valid.css"]);
        assert_eq!(
            result.valid_options,
            vec![
                PaletteOption::custom("custom", "valid.css"),
                PaletteOption::bundled("default"),
            ]
        );
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].to_string().contains("missing.css"));
    }

    #[test]
    fn test_duplicate_of_bundled_by_custom_warns_once() {
        let config = parsed(
            "selector:\n  options:\n    - dark\n    - {name: dark, css: my-dark.css}\n    - default",
        );
        let result = validate(config, &["my-dark.css"]);
        assert_eq!(
            result.valid_options,
            vec![PaletteOption::bundled("dark"), PaletteOption::bundled("default")]
        );
        assert_eq!(
            result.warnings,
            vec![PaletteWarning::DuplicateName { name: "dark".into() }]
        );
    }

    #[test]
    fn test_invalid_duplicate_gets_only_duplicate_warning() {
        let config = parsed(
            "selector:\n  options:\n    - dark\n    - {name: dark, css: missing.css}",
        );
        let result = validate(config, NO_EXTRA);
        assert_eq!(
            result.warnings,
            vec![PaletteWarning::DuplicateName { name: "dark".into() }]
        );
    }

    #[test]
    fn test_selector_disabled_without_valid_options() {
        let config = parsed("selector:\n  enabled: true\n  options: [invalid1, invalid2]");
        let result = validate(config, NO_EXTRA);
        assert!(!result.selector_enabled);
        assert!(result.valid_options.is_empty());
        assert_eq!(result.warnings.len(), 3);
        assert_eq!(result.warnings[2], PaletteWarning::NoValidOptions);
        assert!(result.warnings[2].to_string().contains("Disabling selector"));
    }

    #[test]
    fn test_disabled_selector_without_options_is_fine() {
        let result = validate(parsed("selector:\n  enabled: false"), NO_EXTRA);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_toggle_with_three_options_becomes_select() {
        let config = parsed(
            "selector:\n  enabled: true\n  ui: toggle\n  options: [dark, sans, pink]",
        );
        let result = validate(config, NO_EXTRA);
        assert_eq!(result.selector_ui, SelectorUi::Select);
        assert_eq!(
            result.warnings,
            vec![PaletteWarning::ToggleRequiresTwo { found: 3 }]
        );
        assert!(result.warnings[0]
            .to_string()
            .contains("Toggle UI requires exactly 2"));
    }

    #[test]
    fn test_toggle_with_two_options_kept() {
        let config = parsed("selector:\n  enabled: true\n  ui: toggle\n  options: [dark, sans]");
        let result = validate(config, NO_EXTRA);
        assert_eq!(result.selector_ui, SelectorUi::Toggle);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_toggle_ignored_when_selector_disabled() {
        let config = parsed("selector:\n  ui: toggle\n  options: [dark, sans, pink]");
        let result = validate(config, NO_EXTRA);
        assert_eq!(result.selector_ui, SelectorUi::Toggle);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_select_with_two_options_kept() {
        let config = parsed(
            "selector:\n  enabled: true\n  ui: select\n  options: [sans_dark, sans]",
        );
        let result = validate(config, NO_EXTRA);
        assert_eq!(result.selector_ui, SelectorUi::Select);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_parse_warnings_precede_validation_warnings() {
        let config = parsed("selector:\n  ui: dropdown\n  options: [nope]");
        let result = validate(config, NO_EXTRA);
        assert_eq!(result.warnings.len(), 2);
        assert!(matches!(
            result.warnings[0],
            PaletteWarning::InvalidSelectorUi { .. }
        ));
        assert!(matches!(
            result.warnings[1],
            PaletteWarning::BundledNotFound { .. }
        ));
    }

    #[test]
    fn test_options_left_untouched() {
        let config = parsed("selector:\n  options: [dark, nope]");
        let result = validate(config, NO_EXTRA);
        assert_eq!(names(&result.options), vec!["dark", "nope"]);
    }
}
