//! Integration tests for the Wikipedia client against a mock MediaWiki API.

use std::time::Duration;
use url::Url;
use verity_types::ArticleRef;
use verity_wiki::{KnowledgeSource, RetrievalError, WikipediaClient, WikipediaConfig};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> WikipediaClient {
    client_with_timeout(server, Duration::from_secs(5))
}

fn client_with_timeout(server: &MockServer, timeout: Duration) -> WikipediaClient {
    WikipediaClient::new(WikipediaConfig {
        base_url: Url::parse(&server.uri()).unwrap(),
        timeout,
        user_agent: "verity-tests/0.1".to_owned(),
    })
    .unwrap()
}

#[tokio::test]
async fn search_returns_article_refs() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("list", "search"))
        .and(query_param("srsearch", "marathon runner"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query": {
                "search": [
                    {"pageid": 100, "title": "Marathon"},
                    {"pageid": 200, "title": "Pheidippides"},
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server).search("marathon runner", 5).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Marathon");
    assert_eq!(results[0].page_id, 100);
    assert_eq!(results[0].url, "https://en.wikipedia.org/?curid=100");
}

#[tokio::test]
async fn search_with_no_hits_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query": { "search": [] }
        })))
        .mount(&server)
        .await;

    let results = client_for(&server).search("gibberish", 5).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn rate_limit_maps_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = client_for(&server).search("anything", 5).await.unwrap_err();
    assert!(matches!(err, RetrievalError::RateLimited));
}

#[tokio::test]
async fn server_error_maps_to_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).search("anything", 5).await.unwrap_err();
    assert!(matches!(err, RetrievalError::Unavailable(_)));
}

#[tokio::test]
async fn undecodable_payload_maps_to_malformed_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).search("anything", 5).await.unwrap_err();
    assert!(matches!(err, RetrievalError::MalformedResponse(_)));
}

#[tokio::test]
async fn slow_response_maps_to_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"query": {"search": []}}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = client_with_timeout(&server, Duration::from_millis(50));
    let err = client.search("anything", 5).await.unwrap_err();
    assert!(matches!(err, RetrievalError::Timeout { .. }));
}

#[tokio::test]
async fn fetch_content_returns_plaintext_extract() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("prop", "extracts"))
        .and(query_param("pageids", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query": {
                "pages": {
                    "100": {
                        "pageid": 100,
                        "extract": "Pheidippides ran the first marathon. He died after finishing."
                    }
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let article = ArticleRef::new("Marathon", 100);
    let content = client_for(&server).fetch_content(&article).await.unwrap();
    assert!(content.contains("Pheidippides"));
}

#[tokio::test]
async fn fetch_content_without_extract_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query": { "pages": { "100": { "pageid": 100 } } }
        })))
        .mount(&server)
        .await;

    let article = ArticleRef::new("Marathon", 100);
    let content = client_for(&server).fetch_content(&article).await.unwrap();
    assert!(content.is_empty());
}
