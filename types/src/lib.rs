//! Core domain types for Verity.
//!
//! This crate contains pure domain types with no IO and no async. Everything
//! here can be used from any layer of the pipeline: the knowledge-source and
//! reasoning-service collaborators, the analysis engine, and the CLI all
//! speak these types.
//!
//! The central record is [`FactCheckResult`], the only entity that crosses
//! the core's output boundary. Batch processing wraps it in [`ClaimOutcome`]
//! so that a per-claim failure is a value, not a fault that aborts the run.

mod article;
mod claim;
mod evidence;
mod outcome;
mod signal;
mod verdict;

pub use article::ArticleRef;
pub use claim::{Claim, EmptyClaimError};
pub use evidence::{EvidenceFlags, EvidenceSentence, EvidenceSet};
pub use outcome::{ClaimFailure, ClaimOutcome, FactCheckResult, FailureKind};
pub use signal::AnalysisSignal;
pub use verdict::Verdict;
