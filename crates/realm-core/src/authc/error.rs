use crate::BoxError;
use thiserror::Error;

/// The error returned when a realm could not authenticate a subject.
///
/// Realms do not tell apart a rejected secret from a failing back-end: both surface as this error.
/// The underlying cause is kept as the error source for diagnostics.
#[derive(Debug, Error)]
#[error("authentication failed: {message}")]
pub struct AuthenticationError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl AuthenticationError {
    /// Creates a new authentication error without an underlying cause.
    pub fn new<S: Into<String>>(message: S) -> Self {
        AuthenticationError {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new authentication error that wraps the given cause.
    pub fn with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: Into<BoxError>,
    {
        AuthenticationError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The short description given when the error was created.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn exposes_underlying_cause() {
        let cause = std::io::Error::other("conversation aborted");
        let err = AuthenticationError::with_source("pam error", cause);

        assert_eq!(err.to_string(), "authentication failed: pam error");
        assert_eq!(err.source().map(|s| s.to_string()), Some("conversation aborted".to_string()));
    }

    #[test]
    fn without_cause() {
        let err = AuthenticationError::new("empty username");
        assert_eq!(err.message(), "empty username");
        assert!(err.source().is_none());
    }
}
