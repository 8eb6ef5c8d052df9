//! Transport error taxonomy
//!
//! Every failure of an exchange is classified into one of three kinds. None of
//! them is fatal to the session: the controller stores the display text and
//! carries on.

use std::time::Duration;

use thiserror::Error;

/// Failure of one request/response exchange
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The URL could not be parsed (this includes an empty URL)
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Connection, DNS or timeout failure before a response arrived
    #[error(transparent)]
    Network(#[from] NetworkFailure),

    /// Headers arrived but reading the body failed
    #[error("incomplete response: {0}")]
    Incomplete(String),
}

/// Sub-classification of [`TransportError::Network`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkFailure {
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Other(String),
}

impl TransportError {
    pub fn timeout(after: Duration) -> Self {
        TransportError::Network(NetworkFailure::Timeout(after))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Network(NetworkFailure::Timeout(_)))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            NetworkFailure::Connect(e.to_string()).into()
        } else {
            NetworkFailure::Other(e.to_string()).into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text() {
        let err = TransportError::timeout(Duration::from_secs(30));
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "request timed out after 30s");

        let err = TransportError::InvalidUrl("relative URL without a base".into());
        assert!(!err.is_timeout());
        assert_eq!(err.to_string(), "invalid URL: relative URL without a base");
    }
}
