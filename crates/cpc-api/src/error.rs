//! Error types for the API client.

use thiserror::Error;

/// Errors that can occur while talking to the portal API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Network request failed (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// Endpoint answered with a non-success status and no structured body.
    #[error("server returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, when readable.
        message: String,
    },

    /// Endpoint rejected the request with a structured `{ message }` body.
    #[error("{message}")]
    Server {
        /// Server-supplied reason, shown to the user verbatim.
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A multipart payload could not be assembled.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl ApiError {
    /// User-facing message for the form banner or counter status line.
    ///
    /// Structured server errors pass through verbatim; everything else
    /// collapses to a generic message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message } => message.clone(),
            Self::Network(_) => "Could not reach the server. Please try again.".to_string(),
            Self::Status { .. } | Self::MalformedResponse(_) | Self::InvalidPayload(_) => {
                "An error occurred".to_string()
            }
        }
    }

    /// Whether retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Status { status: 500..=599, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_passes_through() {
        let err = ApiError::Server {
            message: "duplicate entry".to_string(),
        };
        assert_eq!(err.user_message(), "duplicate entry");
    }

    #[test]
    fn transport_errors_are_generic_and_retryable() {
        let err = ApiError::Network("connection refused".to_string());
        assert!(err.user_message().contains("try again"));
        assert!(err.is_retryable());

        let err = ApiError::Status {
            status: 404,
            message: "not found".to_string(),
        };
        assert!(!err.is_retryable());

        let err = ApiError::Status {
            status: 503,
            message: String::new(),
        };
        assert!(err.is_retryable());
    }
}
