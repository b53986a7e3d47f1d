use thiserror::Error;

/// Errors from the reasoning-service boundary.
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    /// Network, timeout, or authentication failure reaching the service.
    #[error("reasoning service unavailable: {0}")]
    Unavailable(String),

    /// The service replied, but not in the shape the adapter expects.
    /// The adapter fails rather than guessing at a verdict.
    #[error("malformed reasoning response: {0}")]
    MalformedResponse(String),
}
