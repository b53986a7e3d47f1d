use thiserror::Error;
use verity_providers::AnalysisError;
use verity_types::FailureKind;
use verity_wiki::RetrievalError;

/// A pipeline run failed at one of its two external boundaries.
///
/// The keyword analyzer and the verdict resolver are pure and total, so no
/// error kind exists for them.
#[derive(Debug, Clone, Error)]
pub enum FactCheckError {
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),
    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
}

impl FactCheckError {
    /// Stable classification for failure markers and logs.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Retrieval(RetrievalError::Timeout { .. }) => FailureKind::RetrievalTimeout,
            Self::Retrieval(RetrievalError::RateLimited) => FailureKind::RetrievalRateLimited,
            Self::Retrieval(RetrievalError::Unavailable(_)) => FailureKind::RetrievalUnavailable,
            Self::Retrieval(RetrievalError::MalformedResponse(_)) => {
                FailureKind::RetrievalMalformedResponse
            }
            Self::Analysis(AnalysisError::Unavailable(_)) => FailureKind::AnalysisUnavailable,
            Self::Analysis(AnalysisError::MalformedResponse(_)) => {
                FailureKind::AnalysisMalformedResponse
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FactCheckError;
    use verity_types::FailureKind;
    use verity_wiki::RetrievalError;

    #[test]
    fn kinds_mirror_the_error_taxonomy() {
        let err = FactCheckError::from(RetrievalError::Timeout { timeout_secs: 10 });
        assert_eq!(err.kind(), FailureKind::RetrievalTimeout);

        let err = FactCheckError::from(RetrievalError::RateLimited);
        assert_eq!(err.kind(), FailureKind::RetrievalRateLimited);
    }
}
