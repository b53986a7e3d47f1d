//! End-to-end pipeline scenarios with the semantic analyzer against a mock
//! reasoning service.

mod common;

use common::FakeSource;
use url::Url;
use verity_engine::{
    ClaimAnalyzer, EvidenceExtractor, FactChecker, PipelineConfig, SemanticAnalyzer,
};
use verity_providers::{Provider, ReasoningClient, ReasoningConfig};
use verity_types::{ArticleRef, Claim, FailureKind, Verdict};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn semantic_analyzer(server: &MockServer) -> ClaimAnalyzer {
    let config = ReasoningConfig::new(Provider::Ollama, "llama3.2", None)
        .unwrap()
        .with_endpoint(Url::parse(&format!("{}/api/chat", server.uri())).unwrap());
    ClaimAnalyzer::Semantic(SemanticAnalyzer::new(ReasoningClient::new(config).unwrap()))
}

fn marathon_source(claim: &Claim) -> FakeSource {
    let article = ArticleRef::new("Pheidippides", 500);
    FakeSource::new()
        .on_search(claim.as_str(), Ok(vec![article.clone()]))
        .with_page(
            &article,
            Ok("Pheidippides collapsed and died after his marathon run to Athens."),
        )
}

fn mock_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "message": {"role": "assistant", "content": content}
    }))
}

#[tokio::test]
async fn semantic_judgments_drive_the_verdict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(mock_reply(
            r#"{"judgments":[{"index":1,"stance":"support"}],"explanation":"The account matches.","confidence":85}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let claim = Claim::new("The first marathon runner died").unwrap();
    let checker = FactChecker::new(
        marathon_source(&claim),
        EvidenceExtractor::default(),
        PipelineConfig::default(),
    );

    let result = checker
        .check(&claim, &semantic_analyzer(&server))
        .await
        .unwrap();
    assert_eq!(result.verdict, Verdict::True);
    assert_eq!(result.confidence, Some(85));
    assert_eq!(result.explanation.as_deref(), Some("The account matches."));
}

#[tokio::test]
async fn disabled_confidence_is_dropped_from_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(mock_reply(
            r#"{"judgments":[{"index":1,"stance":"support"}],"confidence":90}"#,
        ))
        .mount(&server)
        .await;

    let claim = Claim::new("The first marathon runner died").unwrap();
    let checker = FactChecker::new(
        marathon_source(&claim),
        EvidenceExtractor::default(),
        PipelineConfig {
            confidence_enabled: false,
            ..PipelineConfig::default()
        },
    );

    let result = checker
        .check(&claim, &semantic_analyzer(&server))
        .await
        .unwrap();
    assert_eq!(result.verdict, Verdict::True);
    assert!(result.confidence.is_none());
}

#[tokio::test]
async fn unparseable_reply_fails_the_claim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(mock_reply("The claim seems plausible to me."))
        .mount(&server)
        .await;

    let claim = Claim::new("The first marathon runner died").unwrap();
    let checker = FactChecker::new(
        marathon_source(&claim),
        EvidenceExtractor::default(),
        PipelineConfig::default(),
    );

    let outcomes = checker
        .run_batch(std::slice::from_ref(&claim), &semantic_analyzer(&server), false)
        .await;
    assert_eq!(
        outcomes[0].failure().unwrap().kind,
        FailureKind::AnalysisMalformedResponse
    );
}

#[tokio::test]
async fn unreachable_service_fails_the_claim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let claim = Claim::new("The first marathon runner died").unwrap();
    let checker = FactChecker::new(
        marathon_source(&claim),
        EvidenceExtractor::default(),
        PipelineConfig::default(),
    );

    let err = checker
        .check(&claim, &semantic_analyzer(&server))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::AnalysisUnavailable);
}
