//! Property-based tests for palette resolution using proptest.

use proptest::prelude::*;
use termdoc_palette::{
    derive_label, parse_with_bundled, validate, BundledPalettes, PaletteConfig, SelectorUi,
};

// ============================================================================
// Test helpers
// ============================================================================

const BUNDLED: &[&str] = &["default", "dark", "gruvbox_dark", "pink", "sans", "sans_dark"];
const UI_VALUES: &[&str] = &["auto", "toggle", "select", "bogus"];
const DEFAULTS: &[&str] = &["default", "dark", "ocean", "nonexistent"];

fn bundled() -> BundledPalettes {
    BUNDLED.iter().copied().collect()
}

// Bundled names, unknown names, and custom entries in any order.
fn option_entry_strategy() -> impl Strategy<Value = serde_yaml::Value> {
    prop_oneof![
        prop::sample::select(BUNDLED).prop_map(|n| serde_yaml::Value::String(n.to_string())),
        "[a-z]{1,8}".prop_map(serde_yaml::Value::String),
        ("[a-z]{1,8}", prop::bool::ANY).prop_map(|(stem, declared)| {
            let dir = if declared { "assets" } else { "missing" };
            serde_yaml::from_str(&format!("{{css: {}/{}.css}}", dir, stem)).unwrap()
        }),
    ]
}

fn raw_config_strategy() -> impl Strategy<Value = serde_yaml::Value> {
    (
        prop::collection::vec(option_entry_strategy(), 0..8),
        prop::sample::select(UI_VALUES),
        prop::bool::ANY,
        prop::sample::select(DEFAULTS),
    )
        .prop_map(|(options, ui, enabled, default)| {
            let mut selector = serde_yaml::Mapping::new();
            selector.insert("enabled".into(), enabled.into());
            selector.insert("ui".into(), ui.into());
            selector.insert("options".into(), serde_yaml::Value::Sequence(options));
            let mut root = serde_yaml::Mapping::new();
            root.insert("default".into(), default.into());
            root.insert("selector".into(), serde_yaml::Value::Mapping(selector));
            serde_yaml::Value::Mapping(root)
        })
}

fn extra_for(config: &PaletteConfig) -> Vec<String> {
    config
        .options
        .iter()
        .filter_map(|o| o.css.clone())
        .filter(|css| css.starts_with("assets/"))
        .collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Labels never contain separators and keep the word count.
    #[test]
    fn derived_label_replaces_separators(name in "[a-z]{1,6}([_-][a-z]{1,6}){0,3}") {
        let label = derive_label(&name);
        prop_assert!(!label.contains('_'));
        prop_assert!(!label.contains('-'));
        prop_assert_eq!(label.split(' ').count(), name.split(['_', '-']).count());
        for word in label.split(' ') {
            prop_assert!(word.chars().next().unwrap().is_uppercase());
        }
    }

    /// Validated option names are unique and a subset of the declared options.
    #[test]
    fn valid_options_unique_subset(raw in raw_config_strategy()) {
        let parsed = parse_with_bundled(Some(&raw), bundled());
        let extra = extra_for(&parsed);
        let config = validate(parsed, &extra);

        let mut seen = std::collections::HashSet::new();
        for option in &config.valid_options {
            prop_assert!(seen.insert(option.name.clone()));
            prop_assert!(config.options.contains(option));
        }
    }

    /// The resolved default is always bundled or a valid option.
    #[test]
    fn default_always_resolvable(raw in raw_config_strategy()) {
        let parsed = parse_with_bundled(Some(&raw), bundled());
        let extra = extra_for(&parsed);
        let config = validate(parsed, &extra);

        prop_assert!(
            config.bundled_palettes.contains(&config.default)
                || config.valid_option(&config.default).is_some()
        );
    }

    /// An enabled toggle selector always has exactly two options.
    #[test]
    fn selector_state_consistent(raw in raw_config_strategy()) {
        let parsed = parse_with_bundled(Some(&raw), bundled());
        let extra = extra_for(&parsed);
        let config = validate(parsed, &extra);

        if config.selector_enabled {
            prop_assert!(!config.valid_options.is_empty());
            if config.selector_ui == SelectorUi::Toggle {
                prop_assert_eq!(config.valid_options.len(), 2);
            }
        }
    }

    /// Feeding valid options back through validation changes nothing.
    #[test]
    fn revalidation_is_idempotent(raw in raw_config_strategy()) {
        let parsed = parse_with_bundled(Some(&raw), bundled());
        let extra = extra_for(&parsed);
        let first = validate(parsed, &extra);

        let mut again = first.clone();
        again.options = first.valid_options.clone();
        let second = validate(again, &extra);

        prop_assert_eq!(&second.valid_options, &first.valid_options);
        prop_assert_eq!(&second.default, &first.default);
        prop_assert_eq!(second.selector_enabled, first.selector_enabled);
        prop_assert_eq!(second.selector_ui, first.selector_ui);
    }
}
