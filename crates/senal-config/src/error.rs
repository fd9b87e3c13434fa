//! Error types for configuration operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A setting is out of its valid range
    #[error("invalid setting '{field}': {reason}")]
    Invalid {
        /// Dotted name of the setting, e.g. `analysis.filter_order`.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid setting error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn read_file_factory_produces_correct_variant() {
        let err = ConfigError::read_file("/some/path", mock_io_err());
        assert!(
            matches!(err, ConfigError::ReadFile { ref path, .. } if path == std::path::Path::new("/some/path"))
        );
    }

    #[test]
    fn read_file_display_and_source() {
        let err = ConfigError::read_file("/a/b.toml", mock_io_err());
        let msg = err.to_string();
        assert!(msg.contains("failed to read file"), "got: {msg}");
        assert!(msg.contains("/a/b.toml"), "got: {msg}");
        assert!(err.source().is_some(), "ReadFile must expose I/O source");
    }

    #[test]
    fn write_file_display() {
        let err = ConfigError::write_file("/a/b.toml", mock_io_err());
        assert!(err.to_string().contains("failed to write file"));
        assert!(err.source().is_some());
    }

    #[test]
    fn invalid_display() {
        let err = ConfigError::invalid("analysis.filter_order", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid setting 'analysis.filter_order': must be at least 1"
        );
        assert!(err.source().is_none());
    }
}
