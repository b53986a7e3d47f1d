//! The single-claim pipeline: search, fetch, extract, analyze, resolve.

use crate::analyzer::{ClaimAnalyzer, EvidenceAnalyzer};
use crate::error::FactCheckError;
use crate::extract::EvidenceExtractor;
use crate::verdict::resolve;
use verity_types::{Claim, FactCheckResult, Verdict};
use verity_wiki::{KnowledgeSource, RetrievalError};

/// Pipeline tunables beyond the extractor's own configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// How many search hits to fetch content for.
    pub max_articles: u32,
    /// When false, analyzer confidence is dropped from results.
    pub confidence_enabled: bool,
}

impl PipelineConfig {
    pub const DEFAULT_MAX_ARTICLES: u32 = 5;
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_articles: Self::DEFAULT_MAX_ARTICLES,
            confidence_enabled: true,
        }
    }
}

/// Drives one claim through the full verification pipeline.
///
/// Holds the knowledge source and extractor; the analyzer is passed per
/// call so one checker can serve both variants. Steps within a claim are
/// strictly sequential and nothing here retries: resilience policy
/// composes around the two external boundaries.
#[derive(Debug)]
pub struct FactChecker<K> {
    source: K,
    extractor: EvidenceExtractor,
    config: PipelineConfig,
}

impl<K: KnowledgeSource> FactChecker<K> {
    pub fn new(source: K, extractor: EvidenceExtractor, config: PipelineConfig) -> Self {
        Self {
            source,
            extractor,
            config,
        }
    }

    #[must_use]
    pub fn extractor(&self) -> &EvidenceExtractor {
        &self.extractor
    }

    /// Verify one claim. Zero search hits or zero relevant sentences yield
    /// an `INSUFFICIENT_EVIDENCE` result; a hard failure at either external
    /// boundary is an error, never a verdict.
    pub async fn check(
        &self,
        claim: &Claim,
        analyzer: &ClaimAnalyzer,
    ) -> Result<FactCheckResult, FactCheckError> {
        tracing::info!(claim = %claim, analyzer = analyzer.name(), "checking claim");

        let articles = self
            .source
            .search(claim.as_str(), self.config.max_articles)
            .await?;
        tracing::debug!(candidates = articles.len(), "search complete");

        let mut scored = Vec::new();
        for article in &articles {
            match self.source.fetch_content(article).await {
                Ok(text) => scored.extend(self.extractor.extract(claim.as_str(), &text, article)),
                // Throttling is surfaced, not swallowed as a skipped source.
                Err(RetrievalError::RateLimited) => return Err(RetrievalError::RateLimited.into()),
                Err(err) => {
                    tracing::warn!(article = %article.title, error = %err, "skipping article");
                }
            }
        }

        let evidence = self.extractor.select(scored);
        if evidence.is_empty() {
            tracing::info!(claim = %claim, "no relevant evidence found");
            return Ok(FactCheckResult::new(
                claim.clone(),
                Verdict::InsufficientEvidence,
                evidence,
                Some("no relevant evidence found".to_owned()),
                None,
            ));
        }

        let signal = analyzer.analyze(claim, &evidence).await?;
        let verdict = resolve(&signal, false);
        tracing::info!(
            claim = %claim,
            verdict = verdict.as_str(),
            support = signal.support_count,
            contradict = signal.contradict_count,
            "claim resolved"
        );

        let confidence = if self.config.confidence_enabled {
            signal.confidence
        } else {
            None
        };
        Ok(FactCheckResult::new(
            claim.clone(),
            verdict,
            evidence,
            Some(signal.raw_explanation),
            confidence,
        ))
    }
}
