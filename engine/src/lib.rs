//! The claim-verification pipeline.
//!
//! # Architecture
//!
//! Data flows strictly forward through five stages:
//!
//! 1. **Retrieval** - a [`verity_wiki::KnowledgeSource`] turns a claim into
//!    candidate articles and their text.
//! 2. **Extraction** - [`EvidenceExtractor`] selects a bounded set of
//!    claim-relevant sentences and flags likely contradictions.
//! 3. **Analysis** - a [`ClaimAnalyzer`] variant (rule-based
//!    [`KeywordAnalyzer`] or reasoning-service-backed [`SemanticAnalyzer`])
//!    turns evidence into a support/contradiction signal.
//! 4. **Resolution** - [`resolve`] maps the signal onto one of four
//!    verdicts through a fixed decision table.
//! 5. **Assembly** - [`FactChecker::check`] folds everything into a
//!    [`verity_types::FactCheckResult`].
//!
//! [`FactChecker::run_batch`] wraps one pipeline invocation per claim,
//! isolating failures so one bad claim never sinks a batch.
//!
//! Configuration arrives as plain structs ([`ExtractorConfig`],
//! [`PipelineConfig`]); this crate never reads settings storage, files, or
//! the environment.

mod analyzer;
mod batch;
mod error;
mod extract;
mod pipeline;
mod verdict;

pub use analyzer::{ClaimAnalyzer, EvidenceAnalyzer, KeywordAnalyzer, SemanticAnalyzer};
pub use error::FactCheckError;
pub use extract::{EvidenceExtractor, ExtractorConfig, ScoredSentence};
pub use pipeline::{FactChecker, PipelineConfig};
pub use verdict::resolve;
