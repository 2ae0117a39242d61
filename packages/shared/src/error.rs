//! Error types for wikipack.
//!
//! Library crates use [`WikipackError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all wikipack operations.
#[derive(Debug, thiserror::Error)]
pub enum WikipackError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Corpus enumeration or article loading error.
    #[error("corpus error: {message}")]
    Corpus { message: String },

    /// A configured extraction pattern failed to compile.
    #[error("invalid pattern {name}: {message}")]
    Pattern { name: String, message: String },

    /// An article's markup deviates from the expected page template.
    ///
    /// This is fatal for the whole pass: it signals upstream template
    /// drift, not a per-article defect.
    #[error("article {url} does not match the expected page template")]
    UnknownFormat { url: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Snapshot assembly or manifest validation error.
    #[error("snapshot error: {message}")]
    Snapshot { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, WikipackError>;

impl WikipackError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a corpus error from any displayable message.
    pub fn corpus(msg: impl Into<String>) -> Self {
        Self::Corpus {
            message: msg.into(),
        }
    }

    /// Create a snapshot error from any displayable message.
    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self::Snapshot {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = WikipackError::config("missing dump directory");
        assert_eq!(err.to_string(), "config error: missing dump directory");

        let err = WikipackError::UnknownFormat {
            url: "Sun.html".into(),
        };
        assert!(err.to_string().contains("Sun.html"));
        assert!(err.to_string().contains("expected page template"));
    }
}
