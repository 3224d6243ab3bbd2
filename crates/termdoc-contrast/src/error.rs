//! Error types for color parsing, stylesheet loading and palette audits.

use std::io;
use std::path::PathBuf;

/// Error returned when a CSS color value cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// The value was empty or only whitespace.
    #[error("Empty color value")]
    Empty,

    /// A `#` value that is not 3 or 6 hex digits.
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),

    /// An `rgb()`/`rgba()`/`hsl()`/`hsla()` value with bad arguments.
    #[error("Invalid color function: {0}")]
    InvalidFunction(String),

    /// Not a recognized named color or notation.
    #[error("Unknown color: {0}")]
    UnknownName(String),
}

/// Error returned when a stylesheet cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum StylesheetError {
    /// The stylesheet file could not be read.
    #[error("Failed to read stylesheet {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A palette selector was malformed.
    #[error("{}:{line}:{column}: {message}", display_path(.path))]
    Parse {
        /// Source file, if the stylesheet was loaded from disk.
        path: Option<PathBuf>,
        /// 1-based line of the offending rule.
        line: u32,
        /// 1-based column of the offending rule.
        column: u32,
        /// What was wrong.
        message: String,
    },
}

impl StylesheetError {
    /// Attaches a source path to a parse error.
    pub fn with_path(self, new_path: impl Into<PathBuf>) -> Self {
        match self {
            StylesheetError::Parse {
                line,
                column,
                message,
                ..
            } => StylesheetError::Parse {
                path: Some(new_path.into()),
                line,
                column,
                message,
            },
            other => other,
        }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "<inline>".to_string(),
    }
}

/// Error returned when a palette cannot be audited at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuditError {
    /// A token every palette must define is missing or unresolvable.
    #[error("Palette '{palette}' does not define required variable --{token}")]
    MissingToken { palette: String, token: String },
}
