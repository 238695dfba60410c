//! Error conversion helpers
//!
//! Attaches a path to I/O and parse failures.

use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// fs.read_to_string(&roster)
    ///     .with_path_context("read roster", &roster)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::Io {
            context: format!("{}: {}", action, path.display()),
            source: e,
        })
    }
}

/// Same for YAML parse results; the error carries the offending file.
pub trait ParseResultExt<T> {
    fn with_parse_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> ParseResultExt<T> for Result<T, serde_yaml::Error> {
    fn with_parse_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::Parse {
            context: format!("{}: {}", action, path.display()),
            source: e,
        })
    }
}
