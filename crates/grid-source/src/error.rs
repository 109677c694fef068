//! Error types for data sources.

use thiserror::Error;

/// Errors that can occur while fetching a page of people.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// The HTTP client could not be built.
    #[error("failed to create HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request URL could not be built from the base URL.
    #[error("invalid source URL {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The request did not complete (connection, TLS, timeout).
    #[error("request to {url} failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("failed to decode response")]
    Decode(#[source] serde_json::Error),
}

impl FetchError {
    /// Returns a user-friendly error message suitable for the grid's error
    /// state.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network { .. } => {
                "Could not reach the people service. Please check your connection."
            }
            Self::Status { status, .. } if *status == 429 => {
                "Too many requests. Please wait a moment and retry."
            }
            Self::Status { status, .. } if *status >= 500 => {
                "The people service is having trouble. Please retry."
            }
            Self::Status { .. } | Self::Decode(_) => {
                "The people service sent an unexpected response."
            }
            Self::Client(_) | Self::InvalidUrl { .. } => "The people source is misconfigured.",
        }
    }

    /// Returns whether retrying the same request might succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Client(_) | Self::InvalidUrl { .. } | Self::Decode(_) => false,
        }
    }
}

/// Result type alias for data source operations.
pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16) -> FetchError {
        FetchError::Status {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn server_errors_are_retryable() {
        assert!(status(503).is_retryable());
        assert!(status(429).is_retryable());
        assert!(!status(404).is_retryable());
    }

    #[test]
    fn decode_errors_are_not_retryable() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = FetchError::Decode(err);
        assert!(!err.is_retryable());
        assert_eq!(
            err.user_message(),
            "The people service sent an unexpected response."
        );
    }

    #[test]
    fn status_message_includes_body() {
        let err = FetchError::Status {
            status: 400,
            body: "bad limit".to_string(),
        };
        assert_eq!(err.to_string(), "server returned 400: bad limit");
    }
}
