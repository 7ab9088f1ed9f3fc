//! Error types for alert dispatch.
//!
//! Only transport-level failures are errors here: a 4xx or 5xx answer from
//! the alerting API is a passed-through response, not a `DispatchError`.

use thiserror::Error;

/// Result type alias for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Failure to complete the outbound alert call.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// Network-level connectivity failure (connection refused, DNS).
    #[error("network connection failed: {message}")]
    Network {
        /// Error message describing the network failure.
        message: String,
    },

    /// HTTP request timeout exceeded.
    #[error("request timeout after {timeout_seconds}s")]
    Timeout {
        /// Number of seconds before the request timed out.
        timeout_seconds: u64,
    },

    /// Invalid client configuration.
    #[error("invalid client configuration: {message}")]
    Configuration {
        /// Configuration error message.
        message: String,
    },
}

impl DispatchError {
    /// Creates a network error from a message.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    /// Creates a timeout error.
    pub fn timeout(timeout_seconds: u64) -> Self {
        Self::Timeout { timeout_seconds }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Returns whether the failure happened on the wire.
    ///
    /// Transport failures surface after the request was attempted;
    /// configuration failures mean no request was ever made.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_identified() {
        assert!(DispatchError::network("connection refused").is_transport());
        assert!(DispatchError::timeout(30).is_transport());
        assert!(!DispatchError::configuration("bad URL").is_transport());
    }

    #[test]
    fn error_display_format() {
        let error = DispatchError::timeout(30);
        assert_eq!(error.to_string(), "request timeout after 30s");

        let error = DispatchError::network("connection refused");
        assert_eq!(error.to_string(), "network connection failed: connection refused");
    }
}
