use crate::ArticleRef;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Heuristic flags attached to a sentence by the evidence extractor.
///
/// Both flags are computed relative to the claim the sentence was extracted
/// for; a flagged sentence counts as contradicting in keyword analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceFlags {
    /// A negation marker appeared near a matched claim term.
    #[serde(default)]
    pub negated: bool,
    /// The sentence names a known location different from the one the claim
    /// states, and the claim's location is absent from the sentence.
    #[serde(default)]
    pub location_conflict: bool,
}

impl EvidenceFlags {
    /// True when either heuristic marked the sentence as contradicting.
    #[must_use]
    pub const fn contradicts(self) -> bool {
        self.negated || self.location_conflict
    }
}

/// One sentence of source text judged relevant to a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceSentence {
    pub text: String,
    pub source: ArticleRef,
    /// Sentence index within the source article's extract.
    pub position: usize,
    #[serde(default)]
    pub flags: EvidenceFlags,
}

/// An ordered, bounded collection of evidence sentences.
///
/// Insertion order is extraction order: relevance-descending where the
/// extractor could determine it, stable on original position for ties.
/// Owned exclusively by the pipeline run that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceSet(Vec<EvidenceSentence>);

impl EvidenceSet {
    #[must_use]
    pub fn new(sentences: Vec<EvidenceSentence>) -> Self {
        Self(sentences)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn push(&mut self, sentence: EvidenceSentence) {
        self.0.push(sentence);
    }

    /// Drop everything past `max`, keeping the head of the ordering.
    pub fn truncate(&mut self, max: usize) {
        self.0.truncate(max);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EvidenceSentence> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[EvidenceSentence] {
        &self.0
    }

    /// Distinct source articles in first-seen order.
    ///
    /// This is the canonical derivation of a result's `sources` field:
    /// rebuilding it from the evidence always reproduces the stored set.
    #[must_use]
    pub fn sources(&self) -> Vec<ArticleRef> {
        let mut seen = HashSet::new();
        self.0
            .iter()
            .filter(|s| seen.insert(s.source.page_id))
            .map(|s| s.source.clone())
            .collect()
    }
}

impl IntoIterator for EvidenceSet {
    type Item = EvidenceSentence;
    type IntoIter = std::vec::IntoIter<EvidenceSentence>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a EvidenceSet {
    type Item = &'a EvidenceSentence;
    type IntoIter = std::slice::Iter<'a, EvidenceSentence>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<EvidenceSentence> for EvidenceSet {
    fn from_iter<I: IntoIterator<Item = EvidenceSentence>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
