//! Verdict resolution: the analyzer-agnostic decision table.

use verity_types::{AnalysisSignal, Verdict};

/// Resolve an analysis signal into a verdict.
///
/// Evaluated in order:
/// 1. empty evidence, or zero counts on both sides: `INSUFFICIENT_EVIDENCE`
/// 2. support only: `TRUE`
/// 3. contradiction only: `FALSE`
/// 4. both sides non-zero: `MIXED`
///
/// Pure function of the two counts and the emptiness flag; both analyzer
/// variants feed it, so verdict semantics never depend on the analysis
/// method.
#[must_use]
pub fn resolve(signal: &AnalysisSignal, evidence_empty: bool) -> Verdict {
    if evidence_empty || (signal.support_count == 0 && signal.contradict_count == 0) {
        Verdict::InsufficientEvidence
    } else if signal.contradict_count == 0 {
        Verdict::True
    } else if signal.support_count == 0 {
        Verdict::False
    } else {
        Verdict::Mixed
    }
}
