use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    // Provider errors
    #[error("Fetch failed for address {address}: {reason}")]
    FetchFailed { address: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Connection timeout")]
    ConnectionTimeout,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    // Validation errors
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    // Session errors
    #[error("Session has no root graph loaded")]
    NoRootGraph,

    #[error("Expansion pivot not present in graph: {0}")]
    UnknownPivot(String),

    #[error("Result arrived for a discarded session")]
    SessionStale,
}

impl GraphError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            GraphError::FetchFailed { .. }
            | GraphError::Http(_)
            | GraphError::ConnectionTimeout
            | GraphError::RateLimitExceeded => true,
            _ => false,
        }
    }

    /// Get error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            GraphError::FetchFailed { .. }
            | GraphError::Http(_)
            | GraphError::ConnectionTimeout
            | GraphError::RateLimitExceeded => "network",

            GraphError::InvalidAddress(_) => "validation",

            GraphError::NoRootGraph
            | GraphError::UnknownPivot(_)
            | GraphError::SessionStale => "session",
        }
    }
}

// Result type alias for convenience
pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        let err = GraphError::FetchFailed {
            address: "bc1qtest".to_string(),
            reason: "status 502".to_string(),
        };
        assert!(err.is_retryable());
        assert_eq!(err.category(), "network");

        let err = GraphError::InvalidAddress("".to_string());
        assert!(!err.is_retryable());
        assert_eq!(err.category(), "validation");

        assert!(!GraphError::SessionStale.is_retryable());
    }
}
