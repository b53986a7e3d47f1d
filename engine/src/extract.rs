//! Evidence extraction: selecting claim-relevant sentences from page text.

use verity_types::{ArticleRef, EvidenceFlags, EvidenceSentence, EvidenceSet};

/// Common English words excluded from significant-term matching.
const STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "all", "also", "and", "any", "are", "because", "been",
    "before", "being", "between", "both", "but", "can", "could", "did", "does", "doing", "down",
    "during", "each", "few", "for", "from", "further", "had", "has", "have", "having", "her",
    "here", "him", "his", "how", "into", "its", "itself", "just", "more", "most", "now", "off",
    "once", "only", "other", "our", "out", "over", "own", "same", "she", "should", "some", "such",
    "than", "that", "the", "their", "theirs", "them", "then", "there", "these", "they", "this",
    "those", "through", "too", "under", "until", "very", "was", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your",
];

/// Tunables for the extraction heuristics. The negation and location term
/// tables are data, not code, so deployments can adjust them without a
/// rebuild.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Cap on the evidence set, post-merge across articles.
    pub max_sentences: usize,
    /// Claim tokens shorter than this are not significant terms.
    pub min_keyword_length: usize,
    /// Markers that flag a sentence as negating a matched claim term.
    pub negation_terms: Vec<String>,
    /// Token distance within which a negation marker must sit next to a
    /// matched term to count. `0` means anywhere in the sentence.
    pub negation_window: usize,
    /// Known location names for the location-conflict heuristic.
    pub location_terms: Vec<String>,
}

impl ExtractorConfig {
    pub const DEFAULT_MAX_SENTENCES: usize = 10;
    pub const DEFAULT_MIN_KEYWORD_LENGTH: usize = 3;
    pub const DEFAULT_NEGATION_WINDOW: usize = 0;

    pub const DEFAULT_NEGATION_TERMS: &'static [&'static str] = &[
        "not",
        "no",
        "never",
        "didn't",
        "doesn't",
        "wasn't",
        "weren't",
        "false",
        "incorrect",
        "neither",
        "none",
        "no longer",
    ];

    pub const DEFAULT_LOCATION_TERMS: &'static [&'static str] = &[
        "china", "india", "japan", "france", "germany", "italy", "spain", "egypt", "greece",
        "brazil", "mexico", "canada", "australia", "russia", "england", "scotland", "peru",
        "turkey", "iran", "iraq",
    ];
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_sentences: Self::DEFAULT_MAX_SENTENCES,
            min_keyword_length: Self::DEFAULT_MIN_KEYWORD_LENGTH,
            negation_terms: Self::DEFAULT_NEGATION_TERMS
                .iter()
                .map(|&t| t.to_owned())
                .collect(),
            negation_window: Self::DEFAULT_NEGATION_WINDOW,
            location_terms: Self::DEFAULT_LOCATION_TERMS
                .iter()
                .map(|&t| t.to_owned())
                .collect(),
        }
    }
}

/// An extracted sentence with its relevance score, kept until the pipeline
/// has merged extractions across articles.
#[derive(Debug, Clone)]
pub struct ScoredSentence {
    pub sentence: EvidenceSentence,
    /// Count of distinct significant claim terms the sentence contains.
    pub score: usize,
}

/// Selects a bounded set of claim-relevant sentences from page text and
/// flags likely contradictions.
#[derive(Debug, Clone, Default)]
pub struct EvidenceExtractor {
    config: ExtractorConfig,
}

impl EvidenceExtractor {
    #[must_use]
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Significant terms of `text`: lowercased tokens, stopwords and short
    /// tokens dropped, first-seen order, no duplicates.
    #[must_use]
    pub fn significant_terms(&self, text: &str) -> Vec<String> {
        significant_terms(text, self.config.min_keyword_length)
    }

    /// Extract scored evidence sentences for `claim` from one article's
    /// text. Sentences that match no significant term are dropped; the rest
    /// come back sorted by score descending, stable on original position,
    /// already truncated to the configured maximum.
    #[must_use]
    pub fn extract(
        &self,
        claim: &str,
        page_text: &str,
        article: &ArticleRef,
    ) -> Vec<ScoredSentence> {
        let terms = self.significant_terms(claim);
        if terms.is_empty() {
            return Vec::new();
        }
        let claim_location = self.claim_location(claim);

        let mut scored = Vec::new();
        for (position, sentence_text) in split_sentences(page_text).into_iter().enumerate() {
            let tokens = tokenize(&sentence_text);
            let matched: Vec<usize> = tokens
                .iter()
                .enumerate()
                .filter(|(_, token)| terms.iter().any(|term| term == *token))
                .map(|(i, _)| i)
                .collect();
            let score = terms
                .iter()
                .filter(|term| tokens.iter().any(|token| token == *term))
                .count();
            if score == 0 {
                continue;
            }

            let flags = EvidenceFlags {
                negated: self.is_negated(&tokens, &matched),
                location_conflict: self.conflicts_on_location(&tokens, claim_location.as_deref()),
            };
            scored.push(ScoredSentence {
                sentence: EvidenceSentence {
                    text: sentence_text,
                    source: article.clone(),
                    position,
                    flags,
                },
                score,
            });
        }

        sort_by_score(&mut scored);
        scored.truncate(self.config.max_sentences);
        scored
    }

    /// Merge extractions from several articles into the final evidence set:
    /// stable re-sort by score, truncate to the cap, drop the scores.
    #[must_use]
    pub fn select(&self, mut scored: Vec<ScoredSentence>) -> EvidenceSet {
        sort_by_score(&mut scored);
        scored.truncate(self.config.max_sentences);
        scored.into_iter().map(|s| s.sentence).collect()
    }

    #[must_use]
    pub fn max_sentences(&self) -> usize {
        self.config.max_sentences
    }

    /// The location the claim asserts: the last known location named in the
    /// claim. Locations named earlier usually belong to the entity itself
    /// ("the Great Wall of China is in India" asserts India, not China).
    fn claim_location(&self, claim: &str) -> Option<String> {
        let tokens = tokenize(claim);
        let mut found = None;
        for location in &self.config.location_terms {
            for start in phrase_positions(&tokens, location) {
                match found {
                    Some((at, _)) if at >= start => {}
                    _ => found = Some((start, location.clone())),
                }
            }
        }
        found.map(|(_, location)| location)
    }

    /// True when a negation marker appears within the configured window of a
    /// matched claim term (window 0: anywhere in the sentence).
    fn is_negated(&self, tokens: &[String], matched: &[usize]) -> bool {
        if matched.is_empty() {
            return false;
        }
        for marker in &self.config.negation_terms {
            for at in phrase_positions(tokens, marker) {
                if self.config.negation_window == 0 {
                    return true;
                }
                if matched
                    .iter()
                    .any(|&m| m.abs_diff(at) <= self.config.negation_window)
                {
                    return true;
                }
            }
        }
        false
    }

    /// True when the claim states a location, the sentence lacks it, and the
    /// sentence names a different known location instead.
    fn conflicts_on_location(&self, tokens: &[String], claim_location: Option<&str>) -> bool {
        let Some(claimed) = claim_location else {
            return false;
        };
        if !phrase_positions(tokens, claimed).is_empty() {
            return false;
        }
        self.config
            .location_terms
            .iter()
            .any(|location| location != claimed && !phrase_positions(tokens, location).is_empty())
    }
}

fn sort_by_score(scored: &mut [ScoredSentence]) {
    scored.sort_by(|a, b| b.score.cmp(&a.score));
}

/// Lowercased word tokens; internal apostrophes survive ("didn't").
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|token| token.trim_matches('\'').to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

pub(crate) fn significant_terms(text: &str, min_keyword_length: usize) -> Vec<String> {
    let mut terms = Vec::new();
    for token in tokenize(text) {
        if token.chars().count() < min_keyword_length
            || STOPWORDS.contains(&token.as_str())
            || terms.contains(&token)
        {
            continue;
        }
        terms.push(token);
    }
    terms
}

/// Split page text into sentences on terminal punctuation and line breaks.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if matches!(c, '.' | '!' | '?' | '\n') {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_owned());
            }
            current.clear();
        } else {
            current.push(c);
        }
    }
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_owned());
    }
    sentences
}

/// Start indices where the (possibly multi-token) phrase occurs in `tokens`.
fn phrase_positions(tokens: &[String], phrase: &str) -> Vec<usize> {
    let phrase_tokens = tokenize(phrase);
    if phrase_tokens.is_empty() || phrase_tokens.len() > tokens.len() {
        return Vec::new();
    }
    (0..=tokens.len() - phrase_tokens.len())
        .filter(|&start| {
            phrase_tokens
                .iter()
                .zip(&tokens[start..])
                .all(|(p, t)| p == t)
        })
        .collect()
}
