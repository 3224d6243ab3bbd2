//! Output mode control.
//!
//! [`OutputMode`] is the user-facing `--output` flag. Text modes render a
//! report for people; structured modes serialize the same report with serde.

use std::io::IsTerminal;

use clap::ValueEnum;
use console::Style;
use serde::Serialize;

/// Controls how command output is rendered.
///
/// - `Auto` - TTY gets `Term`, anything else gets `Text`
/// - `Term` - Always apply terminal styling
/// - `Text` - Never apply styling
/// - `Json`, `Yaml` - Serialize the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// Auto-detect: TTY gets Term, pipe gets Text
    #[default]
    Auto,
    /// Always use terminal styling
    Term,
    /// Never use styling (plain text)
    Text,
    /// Serialize the report as JSON
    Json,
    /// Serialize the report as YAML
    Yaml,
}

impl OutputMode {
    /// Returns true for JSON and YAML.
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputMode::Json | OutputMode::Yaml)
    }

    /// Resolves Auto mode to concrete Term or Text based on TTY detection.
    ///
    /// For non-Auto modes, returns self unchanged.
    pub fn resolve_auto(&self) -> OutputMode {
        match self {
            OutputMode::Auto => {
                if std::io::stdout().is_terminal() {
                    OutputMode::Term
                } else {
                    OutputMode::Text
                }
            }
            other => *other,
        }
    }
}

/// A command result that can be shown as text or serialized.
pub trait Report: Serialize {
    fn render_text(&self, styles: &Styles) -> String;
}

/// Text styles for report rendering; no-ops when styling is off.
#[derive(Debug, Clone)]
pub struct Styles {
    heading: Style,
    good: Style,
    bad: Style,
    warn: Style,
    muted: Style,
}

impl Styles {
    pub fn new(styled: bool) -> Self {
        Self {
            heading: Style::new().bold().force_styling(styled),
            good: Style::new().green().force_styling(styled),
            bad: Style::new().red().bold().force_styling(styled),
            warn: Style::new().yellow().force_styling(styled),
            muted: Style::new().dim().force_styling(styled),
        }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn heading(&self, text: &str) -> String {
        self.heading.apply_to(text).to_string()
    }

    pub fn good(&self, text: &str) -> String {
        self.good.apply_to(text).to_string()
    }

    pub fn bad(&self, text: &str) -> String {
        self.bad.apply_to(text).to_string()
    }

    pub fn warn(&self, text: &str) -> String {
        self.warn.apply_to(text).to_string()
    }

    pub fn muted(&self, text: &str) -> String {
        self.muted.apply_to(text).to_string()
    }
}

/// Renders a report in the given mode.
pub fn render<R: Report>(report: &R, mode: OutputMode) -> anyhow::Result<String> {
    let rendered = match mode.resolve_auto() {
        OutputMode::Json => serde_json::to_string_pretty(report)?,
        OutputMode::Yaml => serde_yaml::to_string(report)?,
        OutputMode::Term => report.render_text(&Styles::new(true)),
        OutputMode::Text | OutputMode::Auto => report.render_text(&Styles::plain()),
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        name: &'static str,
        count: u32,
    }

    impl Report for Sample {
        fn render_text(&self, styles: &Styles) -> String {
            format!("{} {}", styles.heading(self.name), self.count)
        }
    }

    #[test]
    fn test_is_structured() {
        assert!(OutputMode::Json.is_structured());
        assert!(OutputMode::Yaml.is_structured());
        assert!(!OutputMode::Term.is_structured());
        assert!(!OutputMode::Auto.is_structured());
    }

    #[test]
    fn test_resolve_auto_keeps_explicit_modes() {
        assert_eq!(OutputMode::Json.resolve_auto(), OutputMode::Json);
        assert_eq!(OutputMode::Text.resolve_auto(), OutputMode::Text);
        assert_ne!(OutputMode::Auto.resolve_auto(), OutputMode::Auto);
    }

    #[test]
    fn test_render_modes() {
        let sample = Sample {
            name: "dark",
            count: 2,
        };
        assert_eq!(render(&sample, OutputMode::Text).unwrap(), "dark 2");
        assert!(render(&sample, OutputMode::Term).unwrap().contains("\x1b[1m"));

        let json: serde_json::Value =
            serde_json::from_str(&render(&sample, OutputMode::Json).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"name": "dark", "count": 2}));

        assert_eq!(
            render(&sample, OutputMode::Yaml).unwrap(),
            "name: dark\ncount: 2\n"
        );
    }

    #[test]
    fn test_plain_styles_are_noops() {
        let styles = Styles::plain();
        assert_eq!(styles.bad("FAIL"), "FAIL");
        assert_eq!(styles.muted("x"), "x");
    }
}
