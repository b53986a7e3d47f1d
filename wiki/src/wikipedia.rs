use crate::{KnowledgeSource, RetrievalError};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;
use verity_types::ArticleRef;

/// Canonical MediaWiki API endpoint for English Wikipedia.
pub const WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_USER_AGENT: &str = "verity-fact-checker/0.1";

/// Connection settings for [`WikipediaClient`].
#[derive(Debug, Clone)]
pub struct WikipediaConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(WIKIPEDIA_API_URL).expect("canonical endpoint parses"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

/// MediaWiki API client: full-text search plus plain-text page extracts.
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    http: reqwest::Client,
    config: WikipediaConfig,
}

#[derive(Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    pageid: u64,
    title: String,
}

#[derive(Deserialize)]
struct ExtractResponse {
    query: Option<ExtractQuery>,
}

#[derive(Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: HashMap<String, ExtractPage>,
}

#[derive(Deserialize)]
struct ExtractPage {
    extract: Option<String>,
}

impl WikipediaClient {
    pub fn new(config: WikipediaConfig) -> Result<Self, RetrievalError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| RetrievalError::Unavailable(e.to_string()))?;
        Ok(Self { http, config })
    }

    fn map_transport(&self, error: &reqwest::Error) -> RetrievalError {
        if error.is_timeout() {
            RetrievalError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else {
            RetrievalError::Unavailable(error.to_string())
        }
    }

    fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RetrievalError> {
        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("wikipedia rate limit (429)");
            return Err(RetrievalError::RateLimited);
        }
        if !status.is_success() {
            return Err(RetrievalError::Unavailable(format!("HTTP {status}")));
        }
        Ok(response)
    }

    async fn get(&self, params: &[(&str, &str)]) -> Result<reqwest::Response, RetrievalError> {
        let response = self
            .http
            .get(self.config.base_url.clone())
            .query(params)
            .send()
            .await
            .map_err(|e| self.map_transport(&e))?;
        Self::check_status(response)
    }
}

impl KnowledgeSource for WikipediaClient {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<ArticleRef>, RetrievalError> {
        tracing::info!(%query, limit, "searching wikipedia");
        let limit = limit.to_string();
        let response = self
            .get(&[
                ("action", "query"),
                ("format", "json"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", &limit),
            ])
            .await?;

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| RetrievalError::MalformedResponse(e.to_string()))?;

        let hits = body.query.map(|q| q.search).unwrap_or_default();
        tracing::info!(results = hits.len(), "wikipedia search complete");
        Ok(hits
            .into_iter()
            .map(|hit| ArticleRef::new(hit.title, hit.pageid))
            .collect())
    }

    async fn fetch_content(&self, article: &ArticleRef) -> Result<String, RetrievalError> {
        tracing::info!(title = %article.title, page_id = article.page_id, "fetching article extract");
        let page_id = article.page_id.to_string();
        let response = self
            .get(&[
                ("action", "query"),
                ("format", "json"),
                ("pageids", &page_id),
                ("prop", "extracts"),
                ("explaintext", "1"),
                ("exsectionformat", "plain"),
            ])
            .await?;

        let body: ExtractResponse = response
            .json()
            .await
            .map_err(|e| RetrievalError::MalformedResponse(e.to_string()))?;

        let extract = body
            .query
            .and_then(|mut q| q.pages.remove(&page_id))
            .and_then(|page| page.extract)
            .unwrap_or_default();
        Ok(extract)
    }
}
