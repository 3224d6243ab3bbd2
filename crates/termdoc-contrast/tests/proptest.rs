//! Property-based tests for contrast math using proptest.

use proptest::prelude::*;
use termdoc_contrast::{
    parse_color, relative_luminance, resolve_var, rgb_contrast_ratio, CssColor, Rgb, Variables,
};

// ============================================================================
// Test helpers
// ============================================================================

fn rgb_strategy() -> impl Strategy<Value = Rgb> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb::from_u8(r, g, b))
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Contrast ratio is symmetric and bounded by [1, 21].
    #[test]
    fn ratio_symmetric_and_bounded(a in rgb_strategy(), b in rgb_strategy()) {
        let ab = rgb_contrast_ratio(a, b);
        let ba = rgb_contrast_ratio(b, a);
        prop_assert_eq!(ab, ba);
        prop_assert!(ab >= 1.0);
        prop_assert!(ab <= 21.0 + 1e-9);
    }

    /// A color against itself has ratio 1.
    #[test]
    fn ratio_with_self_is_one(a in rgb_strategy()) {
        prop_assert!((rgb_contrast_ratio(a, a) - 1.0).abs() < 1e-12);
    }

    /// Luminance stays in the unit interval.
    #[test]
    fn luminance_in_unit_interval(a in rgb_strategy()) {
        let l = relative_luminance(a);
        prop_assert!((0.0..=1.0 + 1e-9).contains(&l));
    }

    /// Six-digit hex parses back to the same 8-bit channels.
    #[test]
    fn hex_parses_to_channels(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let text = format!("#{:02X}{:02x}{:02X}", r, g, b);
        let parsed = parse_color(&text).unwrap();
        prop_assert_eq!(parsed, CssColor::Rgb(Rgb::from_u8(r, g, b)));
    }

    /// Arbitrary text never panics the color parser.
    #[test]
    fn parse_color_never_panics(text in ".{0,40}") {
        let _ = parse_color(&text);
    }

    /// Resolution terminates on arbitrary reference graphs.
    #[test]
    fn resolve_var_terminates(edges in prop::collection::vec((0u8..8, 0u8..8), 0..16)) {
        let mut vars = Variables::new();
        for (from, to) in edges {
            vars.insert(format!("v{from}"), format!("var(--v{to})"));
        }
        for i in 0..8 {
            let _ = resolve_var(&format!("var(--v{i})"), &vars);
        }
    }
}
