//! Account store error types.

use thiserror::Error;

/// Result type for account store operations.
pub type AccountResult<T> = Result<T, AccountError>;

/// Error raised by the account store.
///
/// Everything except `ConnectionFailed` is treated by the reconciler as a
/// per-member skip rather than a run failure.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Failed to establish the database connection.
    #[error("database connection failed: {message}")]
    ConnectionFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The existence lookup against the account table failed.
    #[error("account lookup failed for '{username}'")]
    LookupFailed {
        username: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The create-account statement failed.
    #[error("failed to create account '{username}'")]
    CreateFailed {
        username: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The privilege grant failed.
    #[error("failed to grant privileges to '{username}'")]
    GrantFailed {
        username: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AccountError {
    /// Create a connection failed error with source.
    pub fn connection_failed_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AccountError::ConnectionFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a lookup failed error with source.
    pub fn lookup_failed(
        username: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AccountError::LookupFailed {
            username: username.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a create failed error with source.
    pub fn create_failed(
        username: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AccountError::CreateFailed {
            username: username.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a grant failed error with source.
    pub fn grant_failed(
        username: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AccountError::GrantFailed {
            username: username.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AccountError::CreateFailed {
            username: "alicebot".to_string(),
            source: None,
        };
        assert_eq!(err.to_string(), "failed to create account 'alicebot'");
    }

    #[test]
    fn test_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        let err = AccountError::lookup_failed("alicebot", source);

        assert!(std::error::Error::source(&err).is_some());
    }
}
