//! Integration tests for the reasoning clients against mock provider APIs.

use url::Url;
use verity_providers::{AnalysisError, Provider, ReasoningClient, ReasoningConfig};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn openai_client(server: &MockServer) -> ReasoningClient {
    let config = ReasoningConfig::new(Provider::OpenAi, "gpt-4o-mini", Some("sk-test".to_owned()))
        .unwrap()
        .with_endpoint(Url::parse(&format!("{}/v1/chat/completions", server.uri())).unwrap());
    ReasoningClient::new(config).unwrap()
}

fn ollama_client(server: &MockServer) -> ReasoningClient {
    let config = ReasoningConfig::new(Provider::Ollama, "llama3.2", None)
        .unwrap()
        .with_endpoint(Url::parse(&format!("{}/api/chat", server.uri())).unwrap());
    ReasoningClient::new(config).unwrap()
}

#[tokio::test]
async fn openai_returns_assistant_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({"model": "gpt-4o-mini"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [
                {"message": {"role": "assistant", "content": " {\"verdict\": \"TRUE\"} "}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = openai_client(&server)
        .complete("You are a fact-checking assistant.", "CLAIM: ...")
        .await
        .unwrap();
    assert_eq!(reply, "{\"verdict\": \"TRUE\"}");
}

#[tokio::test]
async fn openai_sends_system_and_user_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(|req: &Request| {
            let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
            let messages = body["messages"].as_array().unwrap();
            assert_eq!(messages[0]["role"], "system");
            assert_eq!(messages[1]["role"], "user");
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": "ok"}}]
            }))
        })
        .expect(1)
        .mount(&server)
        .await;

    openai_client(&server).complete("system", "user").await.unwrap();
}

#[tokio::test]
async fn ollama_returns_assistant_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(
            serde_json::json!({"model": "llama3.2", "stream": false}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": {"role": "assistant", "content": "local reply"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = ollama_client(&server).complete("system", "user").await.unwrap();
    assert_eq!(reply, "local reply");
}

#[tokio::test]
async fn auth_failure_maps_to_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let err = openai_client(&server).complete("s", "u").await.unwrap_err();
    assert!(matches!(err, AnalysisError::Unavailable(_)));
}

#[tokio::test]
async fn undecodable_body_maps_to_malformed_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = openai_client(&server).complete("s", "u").await.unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedResponse(_)));
}

#[tokio::test]
async fn missing_message_content_maps_to_malformed_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant"}}]
        })))
        .mount(&server)
        .await;

    let err = openai_client(&server).complete("s", "u").await.unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedResponse(_)));
}
