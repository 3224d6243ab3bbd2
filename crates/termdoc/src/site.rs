//! The parts of a site configuration file the palette tooling reads.
//!
//! ```yaml
//! theme:
//!   name: terminal
//!   custom_dir: theme/
//!   palette:
//!     default: dark
//!     selector: {enabled: true, options: [default, dark]}
//! extra_css:
//!   - assets/ocean.css
//! ```
//!
//! Every other key is ignored. `theme` may also be a bare theme name.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Palette directory relative to the theme directory.
pub const THEME_PALETTES_DIR: &str = "css/palettes";

#[derive(Debug, Default, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub theme: Option<Theme>,
    #[serde(default)]
    pub extra_css: Vec<String>,
}

/// `theme:` as a bare name or as a mapping of options.
#[derive(Debug, Deserialize)]
#[serde(try_from = "serde_yaml::Value")]
pub enum Theme {
    Name(String),
    Options(ThemeOptions),
}

impl TryFrom<serde_yaml::Value> for Theme {
    type Error = String;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        use serde_yaml::Value;

        match value {
            Value::String(name) => Ok(Theme::Name(name)),
            Value::Mapping(map) => serde_yaml::from_value(Value::Mapping(map))
                .map(Theme::Options)
                .map_err(|e| format!("invalid theme options: {}", e)),
            other => {
                let found = match other {
                    Value::Null => "null",
                    Value::Bool(_) => "bool",
                    Value::Number(_) => "number",
                    Value::Sequence(_) => "list",
                    _ => "tagged value",
                };
                Err(format!(
                    "theme must be a name or a mapping, found {}",
                    found
                ))
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ThemeOptions {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub custom_dir: Option<PathBuf>,
    #[serde(default)]
    pub palette: Option<serde_yaml::Value>,
}

impl SiteConfig {
    /// Reads and parses a site configuration file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read site configuration {}", path.display()))?;
        Self::from_yaml(&text)
            .with_context(|| format!("Failed to parse site configuration {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    fn options(&self) -> Option<&ThemeOptions> {
        match &self.theme {
            Some(Theme::Options(options)) => Some(options),
            _ => None,
        }
    }

    /// The configured theme name, in either form.
    pub fn theme_name(&self) -> Option<&str> {
        match &self.theme {
            Some(Theme::Name(name)) => Some(name.as_str()),
            Some(Theme::Options(options)) => options.name.as_deref(),
            None => None,
        }
    }

    /// The raw `theme.palette` value, if any.
    pub fn palette(&self) -> Option<&serde_yaml::Value> {
        self.options().and_then(|o| o.palette.as_ref())
    }

    /// The palette directory under `theme.custom_dir`, relative to the
    /// directory holding the configuration file.
    pub fn palettes_dir(&self, config_path: &Path) -> Option<PathBuf> {
        let custom_dir = self.options()?.custom_dir.as_ref()?;
        let base = config_path.parent().unwrap_or_else(|| Path::new(""));
        Some(base.join(custom_dir).join(THEME_PALETTES_DIR))
    }
}
