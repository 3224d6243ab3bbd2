//! Discovery of bundled palettes on disk.
//!
//! A bundled palette is a stylesheet shipped in the theme's palette directory.
//! Its name is the filename without extension: `palettes/gruvbox_dark.css`
//! registers `"gruvbox_dark"`.
//!
//! # Scanning Rules
//!
//! - Only files directly under the directory are considered (no recursion).
//! - Files are recognized by extension, see [`PALETTE_EXTENSIONS`].
//! - A missing directory is not an error; it yields an empty set.
//! - Any other I/O failure (permission denied, the path is a file) is returned
//!   as [`PaletteError::Io`].
//!
//! Names are kept sorted so warnings listing the available palettes are
//! deterministic across platforms.
//!
//! # Example
//!
//! ```rust,ignore
//! use termdoc_palette::BundledPalettes;
//!
//! let bundled = BundledPalettes::discover("theme/css/palettes")?;
//! assert!(bundled.contains("dark"));
//! ```

use std::collections::BTreeSet;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::error::{PaletteError, Result};

/// Recognized palette stylesheet extensions.
pub const PALETTE_EXTENSIONS: &[&str] = &[".css"];

/// The set of palette names discovered in the palette directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BundledPalettes {
    names: BTreeSet<String>,
}

impl BundledPalettes {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `dir` for palette stylesheets.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Io`] if the directory exists but cannot be read.
    /// A directory that does not exist yields an empty set.
    pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(dir = %dir.display(), "palette directory not found");
                return Ok(Self::new());
            }
            Err(e) => return Err(PaletteError::io(dir, e)),
        };

        let mut names = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|e| PaletteError::io(dir, e))?;
            let file_type = entry.file_type().map_err(|e| PaletteError::io(dir, e))?;
            if file_type.is_dir() {
                continue;
            }

            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(name) = strip_extension(file_name) {
                names.insert(name.to_string());
            }
        }

        tracing::debug!(dir = %dir.display(), count = names.len(), "discovered bundled palettes");
        Ok(Self { names })
    }

    /// Returns true if a palette with this name was discovered.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns an iterator over the palette names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_str())
    }

    /// Returns the number of discovered palettes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no palettes were discovered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for BundledPalettes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Strips a recognized palette extension, returning the base name.
///
/// Returns `None` for files without a recognized extension or with an empty
/// base name (such as `.css`).
fn strip_extension(file_name: &str) -> Option<&str> {
    PALETTE_EXTENSIONS
        .iter()
        .find_map(|ext| file_name.strip_suffix(ext))
        .filter(|base| !base.is_empty())
}
