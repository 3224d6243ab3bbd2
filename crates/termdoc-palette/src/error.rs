//! Error types for palette resolution.
//!
//! Malformed configuration never produces an error: it degrades to defaults and
//! a [`PaletteWarning`](crate::PaletteWarning). The variants here cover the
//! environment failures the resolver cannot correct on its own.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while resolving palette configuration.
#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    /// The palette directory exists but could not be read.
    #[error("Failed to read palette directory {path:?}: {source}")]
    Io {
        /// Directory that was being scanned.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Raw configuration text was not valid YAML.
    #[error("Failed to parse palette configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl PaletteError {
    /// Create an I/O error for the given directory.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for palette operations.
pub type Result<T> = std::result::Result<T, PaletteError>;
