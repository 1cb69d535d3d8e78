//! Errors raised while reading, writing or checking the config file.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("cannot read config '{path}': {source}")]
    ReadFile {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be written.
    #[error("cannot write config '{path}': {source}")]
    WriteFile {
        /// File that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Parent directory of the config file could not be created.
    #[error("cannot create config directory '{path}': {source}")]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Text is not TOML or does not match the settings layout.
    #[error("malformed config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Settings could not be rendered as TOML.
    #[error("cannot encode config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Parsed configuration has out-of-range or inconsistent values
    #[error("invalid configuration: {0}")]
    Validation(#[from] crate::validation::ValidationError),
}

impl ConfigError {
    /// [`ConfigError::ReadFile`] for `path`.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// [`ConfigError::WriteFile`] for `path`.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// [`ConfigError::CreateDir`] for `path`.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;
    use std::error::Error;

    fn denied() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")
    }

    #[test]
    fn read_file_display_names_path() {
        let err = ConfigError::read_file("/a/polykey.toml", denied());
        let msg = err.to_string();
        assert!(msg.starts_with("cannot read config"), "got: {msg}");
        assert!(msg.contains("/a/polykey.toml"), "got: {msg}");
    }

    #[test]
    fn create_dir_keeps_path() {
        let err = ConfigError::create_dir("/home/u/.config/polykey", denied());
        assert!(
            matches!(err, ConfigError::CreateDir { ref path, .. } if path == std::path::Path::new("/home/u/.config/polykey"))
        );
    }

    #[test]
    fn io_variants_expose_source() {
        assert!(ConfigError::read_file("/x", denied()).source().is_some());
        assert!(ConfigError::write_file("/x", denied()).source().is_some());
        assert!(ConfigError::create_dir("/x", denied()).source().is_some());
    }

    #[test]
    fn validation_converts_and_displays() {
        let err: ConfigError = ValidationError::InvalidKeyLayout {
            reason: "duplicate key 'z'".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "invalid configuration: invalid keyboard layout: duplicate key 'z'"
        );
    }
}
