//! Batch coordination: per-claim failure isolation and cross-references.

use crate::analyzer::ClaimAnalyzer;
use crate::pipeline::FactChecker;
use std::collections::HashSet;
use verity_types::{Claim, ClaimFailure, ClaimOutcome};
use verity_wiki::KnowledgeSource;

/// Two shared significant terms make a pair of claims "related" for
/// cross-reference purposes.
const CROSS_REFERENCE_MIN_SHARED_TERMS: usize = 2;

impl<K: KnowledgeSource> FactChecker<K> {
    /// Verify a batch of claims, preserving input order in the output.
    ///
    /// Each claim runs the full pipeline independently; a failing claim
    /// becomes a [`ClaimOutcome::Failed`] marker and never aborts the rest
    /// of the batch. With `cross_reference` set, a completed claim's
    /// explanation gains references to related claims resolved earlier in
    /// the same batch. References point backwards only, so no claim ever
    /// depends on one that has not been resolved yet.
    pub async fn run_batch(
        &self,
        claims: &[Claim],
        analyzer: &ClaimAnalyzer,
        cross_reference: bool,
    ) -> Vec<ClaimOutcome> {
        let mut outcomes: Vec<ClaimOutcome> = Vec::with_capacity(claims.len());
        for claim in claims {
            let outcome = match self.check(claim, analyzer).await {
                Ok(mut result) => {
                    if cross_reference
                        && let Some(note) = self.related_note(claim, &outcomes)
                    {
                        result.explanation = Some(match result.explanation.take() {
                            Some(existing) => format!("{existing} {note}"),
                            None => note,
                        });
                    }
                    ClaimOutcome::Completed(result)
                }
                Err(err) => {
                    tracing::warn!(claim = %claim, error = %err, "claim failed, continuing batch");
                    ClaimOutcome::Failed(ClaimFailure {
                        claim: claim.clone(),
                        kind: err.kind(),
                        message: err.to_string(),
                    })
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Cross-reference note for `claim` against earlier completed outcomes.
    fn related_note(&self, claim: &Claim, earlier: &[ClaimOutcome]) -> Option<String> {
        let terms: HashSet<String> = self
            .extractor()
            .significant_terms(claim.as_str())
            .into_iter()
            .collect();

        let mut notes = Vec::new();
        for (i, outcome) in earlier.iter().enumerate() {
            let Some(result) = outcome.result() else {
                continue;
            };
            let shared = self
                .extractor()
                .significant_terms(result.claim.as_str())
                .into_iter()
                .filter(|term| terms.contains(term))
                .count();
            if shared >= CROSS_REFERENCE_MIN_SHARED_TERMS {
                notes.push(format!(
                    "See also claim {} (\"{}\"), judged {}.",
                    i + 1,
                    truncated(result.claim.as_str(), 60),
                    result.verdict
                ));
            }
        }
        if notes.is_empty() {
            None
        } else {
            Some(notes.join(" "))
        }
    }
}

fn truncated(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_owned()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::truncated;

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncated("short", 60), "short");
        assert_eq!(truncated("abcdef", 3), "abc...");
        assert_eq!(truncated("ééééé", 2), "éé...");
    }
}
