//! Error types for sidenav.
//!
//! Library crates use [`SidenavError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all sidenav operations.
#[derive(Debug, thiserror::Error)]
pub enum SidenavError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON serialization of a navigation or redirect document failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SidenavError>;

impl SidenavError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
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
        let err = SidenavError::config("leaf_class must not be empty");
        assert_eq!(err.to_string(), "config error: leaf_class must not be empty");
    }

    #[test]
    fn io_error_carries_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = SidenavError::io("/tmp/index.html", source);
        assert!(err.to_string().contains("/tmp/index.html"));
    }

    #[test]
    fn serde_error_converts() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SidenavError = source.into();
        assert!(matches!(err, SidenavError::Serialize(_)));
    }
}
