//! Inference errors

use thiserror::Error;

/// Errors that can occur during generation
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Failed to connect to the generation server
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the generation server failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response parsing failed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout during generation
    #[error("Inference timeout after {0}ms")]
    Timeout(u64),

    /// Server answered with a non-success status
    #[error("Server error: {0}")]
    ServerError(String),
}

impl InferenceError {
    /// Classify a transport error, reporting timeouts with the given budget
    pub fn from_reqwest(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }

    /// Whether the server could not be reached at all
    ///
    /// Only this kind of failure is worth restarting the server for.
    pub const fn is_connection_failure(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_failed_error_message() {
        let err = InferenceError::ConnectionFailed("refused".to_string());
        assert_eq!(err.to_string(), "Connection failed: refused");
        assert!(err.is_connection_failure());
    }

    #[test]
    fn timeout_error_message() {
        let err = InferenceError::Timeout(30000);
        assert_eq!(err.to_string(), "Inference timeout after 30000ms");
        assert!(!err.is_connection_failure());
    }

    #[test]
    fn other_errors_are_not_connection_failures() {
        assert!(!InferenceError::InvalidResponse("bad".to_string()).is_connection_failure());
        assert!(!InferenceError::ServerError("500".to_string()).is_connection_failure());
        assert!(!InferenceError::RequestFailed("x".to_string()).is_connection_failure());
    }
}
