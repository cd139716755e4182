//! Global error handling for proj2prompt
//!
//! Traversal failures and disposal failures are kept apart so the caller can
//! tell whether output was computed but not delivered.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::clipboard::ClipboardError;

/// Global error type for proj2prompt operations
#[derive(Error, Debug)]
pub enum Proj2PromptError {
    /// Filesystem error on a specific path while exploring
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Error raised by the directory walker itself
    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The output file could not be written
    #[error("{}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The clipboard could not be reached
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

impl Proj2PromptError {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error happened after the output was already produced
    pub fn is_disposal(&self) -> bool {
        matches!(self, Self::Write { .. } | Self::Clipboard(_))
    }

    /// Prefix shown to the user in front of the error message
    pub fn context(&self) -> &'static str {
        match self {
            Self::Config(_) => "Error",
            Self::Clipboard(_) => "Error copying to clipboard",
            _ if self.is_disposal() => "Error writing to file",
            _ => "Error exploring directories",
        }
    }
}

/// Specialized Result type for proj2prompt operations
pub type Result<T> = std::result::Result<T, Proj2PromptError>;

/// Returns a configuration error with a formatted message
#[macro_export]
macro_rules! bail_config {
    ($($arg:tt)*) => {
        return Err($crate::error::Proj2PromptError::Config(format!($($arg)*)))
    };
}
