use super::EvidenceAnalyzer;
use crate::extract::significant_terms;
use verity_providers::AnalysisError;
use verity_types::{AnalysisSignal, Claim, EvidenceSet};

/// Rule-based analyzer: contradiction flags from the extractor count
/// against the claim, shared significant terms count for it.
///
/// Deterministic and side-effect-free; it never fails and reports no
/// confidence.
#[derive(Debug, Clone)]
pub struct KeywordAnalyzer {
    min_keyword_length: usize,
}

impl KeywordAnalyzer {
    #[must_use]
    pub fn new(min_keyword_length: usize) -> Self {
        Self { min_keyword_length }
    }
}

impl Default for KeywordAnalyzer {
    fn default() -> Self {
        Self::new(crate::extract::ExtractorConfig::DEFAULT_MIN_KEYWORD_LENGTH)
    }
}

impl EvidenceAnalyzer for KeywordAnalyzer {
    async fn analyze(
        &self,
        claim: &Claim,
        evidence: &EvidenceSet,
    ) -> Result<AnalysisSignal, AnalysisError> {
        let terms = significant_terms(claim.as_str(), self.min_keyword_length);

        let mut support_count = 0;
        let mut contradict_count = 0;
        let mut citations = Vec::new();
        for sentence in evidence {
            if sentence.flags.contradicts() {
                contradict_count += 1;
                citations.push(sentence.clone());
            } else {
                let sentence_tokens = crate::extract::tokenize(&sentence.text);
                if terms.iter().any(|term| sentence_tokens.contains(term)) {
                    support_count += 1;
                    citations.push(sentence.clone());
                }
            }
        }

        Ok(AnalysisSignal {
            support_count,
            contradict_count,
            raw_explanation: format!(
                "supported by {support_count} sentence(s), contradicted by {contradict_count}"
            ),
            citations,
            confidence: None,
        })
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}
