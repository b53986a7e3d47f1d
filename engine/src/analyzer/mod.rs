//! The pluggable analysis capability: keyword and semantic variants behind
//! one contract, selected at runtime through [`ClaimAnalyzer`].

mod keyword;
mod semantic;

pub use keyword::KeywordAnalyzer;
pub use semantic::SemanticAnalyzer;

use verity_providers::AnalysisError;
use verity_types::{AnalysisSignal, Claim, EvidenceSet};

/// Judges support and contradiction of a claim from extracted evidence.
///
/// Both variants return the same signal shape, so the verdict resolver and
/// the pipeline never learn which one ran.
#[allow(async_fn_in_trait)]
pub trait EvidenceAnalyzer {
    async fn analyze(
        &self,
        claim: &Claim,
        evidence: &EvidenceSet,
    ) -> Result<AnalysisSignal, AnalysisError>;

    fn name(&self) -> &'static str;
}

/// Runtime analyzer selection.
///
/// Dispatch is an enum match rather than trait objects: the variant set is
/// closed and the pipeline stays generic-free at this seam.
#[derive(Debug, Clone)]
pub enum ClaimAnalyzer {
    Keyword(KeywordAnalyzer),
    Semantic(SemanticAnalyzer),
}

impl EvidenceAnalyzer for ClaimAnalyzer {
    async fn analyze(
        &self,
        claim: &Claim,
        evidence: &EvidenceSet,
    ) -> Result<AnalysisSignal, AnalysisError> {
        match self {
            Self::Keyword(analyzer) => analyzer.analyze(claim, evidence).await,
            Self::Semantic(analyzer) => analyzer.analyze(claim, evidence).await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Keyword(analyzer) => analyzer.name(),
            Self::Semantic(analyzer) => analyzer.name(),
        }
    }
}
