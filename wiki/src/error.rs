use thiserror::Error;

/// Errors from the knowledge-source boundary.
#[derive(Debug, Clone, Error)]
pub enum RetrievalError {
    /// The request exceeded the configured timeout.
    #[error("wikipedia request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The provider signaled throttling (HTTP 429). Surfaced to the caller
    /// instead of being retried here; backoff policy belongs to the caller.
    #[error("wikipedia rate limit exceeded")]
    RateLimited,

    /// Connection or transport failure, including unexpected HTTP statuses.
    #[error("wikipedia unavailable: {0}")]
    Unavailable(String),

    /// The payload could not be parsed into the expected shape.
    #[error("malformed wikipedia response: {0}")]
    MalformedResponse(String),
}
