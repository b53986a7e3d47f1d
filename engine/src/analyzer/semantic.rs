use super::EvidenceAnalyzer;
use serde::Deserialize;
use verity_providers::{AnalysisError, ReasoningClient};
use verity_types::{AnalysisSignal, Claim, EvidenceSet};

const SYSTEM_PROMPT: &str = "You are a fact-checking assistant. Judge whether each evidence \
item supports or contradicts the claim. Respond with JSON only, in exactly this shape: \
{\"judgments\":[{\"index\":1,\"stance\":\"support\"}],\"explanation\":\"...\",\"confidence\":85}. \
Valid stances are \"support\", \"contradict\", and \"neutral\". Use the 1-based index of each \
evidence item. Confidence is an integer from 0 to 100.";

/// Analyzer backed by an external reasoning service.
///
/// The service judges each evidence item's stance toward the claim; this
/// adapter maps its JSON reply into the shared signal shape. A reply that
/// does not fit the expected shape is a hard [`AnalysisError::MalformedResponse`],
/// never a guessed verdict. There is no fallback to the keyword variant
/// here; that is a caller policy.
#[derive(Debug, Clone)]
pub struct SemanticAnalyzer {
    client: ReasoningClient,
}

#[derive(Debug, Deserialize)]
struct SemanticReply {
    judgments: Vec<Judgment>,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    confidence: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Judgment {
    /// 1-based position within the evidence list sent in the prompt.
    index: usize,
    stance: Stance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Stance {
    Support,
    Contradict,
    Neutral,
}

impl SemanticAnalyzer {
    #[must_use]
    pub fn new(client: ReasoningClient) -> Self {
        Self { client }
    }
}

impl EvidenceAnalyzer for SemanticAnalyzer {
    async fn analyze(
        &self,
        claim: &Claim,
        evidence: &EvidenceSet,
    ) -> Result<AnalysisSignal, AnalysisError> {
        if evidence.is_empty() {
            return Ok(AnalysisSignal {
                raw_explanation: "no evidence to analyze".to_owned(),
                ..AnalysisSignal::default()
            });
        }

        let reply = self
            .client
            .complete(SYSTEM_PROMPT, &build_user_message(claim, evidence))
            .await?;
        tracing::debug!(reply_len = reply.len(), "mapping reasoning reply");
        map_reply(&reply, evidence)
    }

    fn name(&self) -> &'static str {
        "semantic"
    }
}

fn build_user_message(claim: &Claim, evidence: &EvidenceSet) -> String {
    let mut message = format!("CLAIM: {claim}\n\nEVIDENCE:\n");
    for (i, sentence) in evidence.iter().enumerate() {
        message.push_str(&format!(
            "{}. \"{}\" (source: {})\n",
            i + 1,
            sentence.text,
            sentence.source.title
        ));
    }
    message
}

/// Map the service reply into an [`AnalysisSignal`].
///
/// The reply may wrap its JSON in prose; the outermost brace-delimited slice
/// is taken as the payload. Judgment indices are 1-based and must point at
/// an evidence item that exists.
fn map_reply(reply: &str, evidence: &EvidenceSet) -> Result<AnalysisSignal, AnalysisError> {
    let payload = extract_json(reply)?;
    let parsed: SemanticReply = serde_json::from_str(payload)
        .map_err(|e| AnalysisError::MalformedResponse(format!("bad judgment payload: {e}")))?;

    let mut support_count = 0;
    let mut contradict_count = 0;
    let mut citations = Vec::new();
    for judgment in parsed.judgments {
        let sentence = judgment
            .index
            .checked_sub(1)
            .and_then(|i| evidence.as_slice().get(i))
            .ok_or_else(|| {
                AnalysisError::MalformedResponse(format!(
                    "judgment index {} out of range (1..={})",
                    judgment.index,
                    evidence.len()
                ))
            })?;
        match judgment.stance {
            Stance::Support => {
                support_count += 1;
                citations.push(sentence.clone());
            }
            Stance::Contradict => {
                contradict_count += 1;
                citations.push(sentence.clone());
            }
            Stance::Neutral => {}
        }
    }

    Ok(AnalysisSignal {
        support_count,
        contradict_count,
        raw_explanation: parsed.explanation.unwrap_or_default(),
        citations,
        confidence: parsed.confidence.map(|c| c.min(100) as u8),
    })
}

fn extract_json(reply: &str) -> Result<&str, AnalysisError> {
    let start = reply.find('{');
    let end = reply.rfind('}');
    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(&reply[start..=end]),
        _ => Err(AnalysisError::MalformedResponse(
            "reply contains no JSON object".to_owned(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::map_reply;
    use verity_providers::AnalysisError;
    use verity_types::{ArticleRef, EvidenceFlags, EvidenceSentence, EvidenceSet};

    fn evidence(count: usize) -> EvidenceSet {
        (0..count)
            .map(|i| EvidenceSentence {
                text: format!("sentence {i}"),
                source: ArticleRef::new("Test", 1),
                position: i,
                flags: EvidenceFlags::default(),
            })
            .collect()
    }

    #[test]
    fn maps_a_well_formed_reply() {
        let reply = r#"{"judgments":[{"index":1,"stance":"support"},{"index":2,"stance":"contradict"},{"index":3,"stance":"neutral"}],"explanation":"one each","confidence":80}"#;
        let signal = map_reply(reply, &evidence(3)).unwrap();
        assert_eq!(signal.support_count, 1);
        assert_eq!(signal.contradict_count, 1);
        assert_eq!(signal.citations.len(), 2);
        assert_eq!(signal.raw_explanation, "one each");
        assert_eq!(signal.confidence, Some(80));
    }

    #[test]
    fn tolerates_prose_around_the_json() {
        let reply = r#"Here is my judgment: {"judgments":[{"index":1,"stance":"support"}],"explanation":"ok"} Hope that helps."#;
        let signal = map_reply(reply, &evidence(1)).unwrap();
        assert_eq!(signal.support_count, 1);
        assert_eq!(signal.confidence, None);
    }

    #[test]
    fn rejects_a_reply_without_json() {
        let err = map_reply("I think the claim is probably true.", &evidence(1)).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn rejects_missing_judgments_field() {
        let err = map_reply(r#"{"explanation":"no judgments"}"#, &evidence(1)).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn rejects_out_of_range_indices() {
        let reply = r#"{"judgments":[{"index":5,"stance":"support"}]}"#;
        let err = map_reply(reply, &evidence(2)).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));

        let zero = r#"{"judgments":[{"index":0,"stance":"support"}]}"#;
        assert!(map_reply(zero, &evidence(2)).is_err());
    }

    #[test]
    fn clamps_confidence_to_the_valid_range() {
        let reply = r#"{"judgments":[{"index":1,"stance":"support"}],"confidence":250}"#;
        let signal = map_reply(reply, &evidence(1)).unwrap();
        assert_eq!(signal.confidence, Some(100));
    }
}
