use crate::EvidenceSentence;

/// Raw support/contradiction tally produced by an analyzer.
///
/// Internal intermediate: the verdict resolver consumes it and the pipeline
/// folds the rest into a [`crate::FactCheckResult`]. It never crosses the
/// pipeline boundary itself, so it carries no serde derives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisSignal {
    pub support_count: usize,
    pub contradict_count: usize,
    /// Analyzer-produced explanation text; deterministic for the keyword
    /// analyzer, model prose for the semantic one.
    pub raw_explanation: String,
    /// Evidence sentences the analyzer actually leaned on.
    pub citations: Vec<EvidenceSentence>,
    /// Analyzer certainty in [0, 100], when the analyzer reports one.
    pub confidence: Option<u8>,
}
