//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Error raised while loading a flat client config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required key was absent after parsing.
    #[error("missing required key '{key}' in {}", .path.display())]
    MissingKey { key: &'static str, path: PathBuf },
}

impl ConfigError {
    /// Create an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a missing-key error for `path`.
    pub fn missing_key(key: &'static str, path: impl Into<PathBuf>) -> Self {
        ConfigError::MissingKey {
            key,
            path: path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::missing_key("uri", "/etc/ldap.conf");
        assert_eq!(
            err.to_string(),
            "missing required key 'uri' in /etc/ldap.conf"
        );
    }

    #[test]
    fn test_io_error_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ConfigError::io("/root/.my.cnf", source);

        assert_eq!(err.to_string(), "failed to read config file /root/.my.cnf");
        assert!(std::error::Error::source(&err).is_some());
    }
}
