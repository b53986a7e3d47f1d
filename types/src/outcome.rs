use crate::{ArticleRef, Claim, EvidenceSet, Verdict};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The one record that crosses the core's output boundary.
///
/// Created once per claim and never mutated after construction. `sources`
/// is always derived from `evidence`, never supplied independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactCheckResult {
    pub claim: Claim,
    pub verdict: Verdict,
    pub evidence: EvidenceSet,
    pub sources: Vec<ArticleRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    pub checked_at: DateTime<Utc>,
}

impl FactCheckResult {
    #[must_use]
    pub fn new(
        claim: Claim,
        verdict: Verdict,
        evidence: EvidenceSet,
        explanation: Option<String>,
        confidence: Option<u8>,
    ) -> Self {
        let sources = evidence.sources();
        Self {
            claim,
            verdict,
            evidence,
            sources,
            explanation,
            confidence,
            checked_at: Utc::now(),
        }
    }
}

/// Stable classification for a per-claim failure marker.
///
/// Mirrors the retrieval and analysis error taxonomies so callers can tell
/// "Wikipedia had nothing" (an `INSUFFICIENT_EVIDENCE` verdict) apart from
/// "we could not reach Wikipedia" (a failure, no verdict at all).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    RetrievalTimeout,
    RetrievalRateLimited,
    RetrievalUnavailable,
    RetrievalMalformedResponse,
    AnalysisUnavailable,
    AnalysisMalformedResponse,
}

impl FailureKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RetrievalTimeout => "retrieval_timeout",
            Self::RetrievalRateLimited => "retrieval_rate_limited",
            Self::RetrievalUnavailable => "retrieval_unavailable",
            Self::RetrievalMalformedResponse => "retrieval_malformed_response",
            Self::AnalysisUnavailable => "analysis_unavailable",
            Self::AnalysisMalformedResponse => "analysis_malformed_response",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A claim that could not be checked, with the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ClaimFailure {
    pub claim: Claim,
    pub kind: FailureKind,
    pub message: String,
}

/// Tagged per-claim outcome used by the batch coordinator.
///
/// A failing claim becomes `Failed` rather than aborting the batch; callers
/// match on the variant instead of catching a propagated error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClaimOutcome {
    Completed(FactCheckResult),
    Failed(ClaimFailure),
}

impl ClaimOutcome {
    #[must_use]
    pub fn claim(&self) -> &Claim {
        match self {
            Self::Completed(result) => &result.claim,
            Self::Failed(failure) => &failure.claim,
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<&FactCheckResult> {
        match self {
            Self::Completed(result) => Some(result),
            Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&ClaimFailure> {
        match self {
            Self::Completed(_) => None,
            Self::Failed(failure) => Some(failure),
        }
    }
}
