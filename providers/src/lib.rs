//! Reasoning-service clients for Verity's semantic analyzer.
//!
//! # Architecture
//!
//! The crate is organized around a provider dispatch pattern:
//!
//! - [`ReasoningClient::complete`] - Unified entry point that dispatches to
//!   provider-specific implementations
//! - [`Provider::OpenAi`] - OpenAI Chat Completions API client
//! - [`Provider::Ollama`] - Locally-run Ollama chat client
//!
//! Both providers take a system prompt plus one user message and return the
//! assistant's reply as plain text. Interpreting that reply (JSON verdict
//! payloads, stance judgments) is the semantic analyzer's job, not this
//! crate's: the pipeline stays oblivious to which provider answered.
//!
//! # Error Handling
//!
//! Network, timeout, and authentication failures surface as
//! [`AnalysisError::Unavailable`]; a reply body that cannot be decoded
//! surfaces as [`AnalysisError::MalformedResponse`]. No retries are
//! performed here - retry policy composes around this boundary.

mod error;

pub use error::AnalysisError;

use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

/// Canonical OpenAI Chat Completions endpoint.
pub const OPENAI_CHAT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Default endpoint of a locally-run Ollama server.
pub const OLLAMA_CHAT_API_URL: &str = "http://localhost:11434/api/chat";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const TEMPERATURE: f64 = 0.2;
const MAX_COMPLETION_TOKENS: u32 = 500;

/// Which reasoning backend answers completion requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Ollama,
}

impl Provider {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Ollama => "ollama",
        }
    }

    /// Canonical endpoint for the provider, used when no override is given.
    fn default_endpoint(self) -> Url {
        let raw = match self {
            Self::OpenAi => OPENAI_CHAT_API_URL,
            Self::Ollama => OLLAMA_CHAT_API_URL,
        };
        Url::parse(raw).expect("canonical endpoints parse")
    }
}

/// Provider + model configuration for the reasoning service.
///
/// The constructor enforces that an OpenAI configuration carries an API key,
/// making a credential-less hosted call impossible at runtime.
#[derive(Clone)]
pub struct ReasoningConfig {
    provider: Provider,
    model: String,
    api_key: Option<String>,
    endpoint: Url,
    timeout: Duration,
}

// Manual Debug impl to prevent leaking the API key in logs.
impl std::fmt::Debug for ReasoningConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReasoningConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field(
                "api_key",
                &if self.api_key.is_some() { "[REDACTED]" } else { "None" },
            )
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReasoningConfigError {
    #[error("openai provider requires an api key")]
    MissingApiKey,
}

impl ReasoningConfig {
    pub fn new(
        provider: Provider,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, ReasoningConfigError> {
        if provider == Provider::OpenAi && api_key.is_none() {
            return Err(ReasoningConfigError::MissingApiKey);
        }
        Ok(Self {
            provider,
            model: model.into(),
            api_key,
            endpoint: provider.default_endpoint(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn provider(&self) -> Provider {
        self.provider
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// HTTP client for the configured reasoning provider.
#[derive(Debug, Clone)]
pub struct ReasoningClient {
    http: reqwest::Client,
    config: ReasoningConfig,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct OllamaResponse {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl ReasoningClient {
    pub fn new(config: ReasoningConfig) -> Result<Self, AnalysisError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AnalysisError::Unavailable(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Send one system + user exchange and return the assistant reply text.
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, AnalysisError> {
        tracing::debug!(
            provider = self.config.provider.as_str(),
            model = %self.config.model,
            "sending reasoning request"
        );
        match self.config.provider {
            Provider::OpenAi => self.complete_openai(system_prompt, user_message).await,
            Provider::Ollama => self.complete_ollama(system_prompt, user_message).await,
        }
    }

    async fn complete_openai(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, AnalysisError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AnalysisError::Unavailable("openai api key missing".to_owned()))?;

        let body = json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_message},
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_COMPLETION_TOKENS,
        });

        let response = self
            .http
            .post(self.config.endpoint.clone())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport)?;
        let response = check_status(response)?;

        let parsed: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_owned())
            .ok_or_else(|| {
                AnalysisError::MalformedResponse("openai reply has no message content".to_owned())
            })
    }

    async fn complete_ollama(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, AnalysisError> {
        let body = json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_message},
            ],
            "stream": false,
        });

        let response = self
            .http
            .post(self.config.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(map_transport)?;
        let response = check_status(response)?;

        let parsed: OllamaResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;
        parsed
            .message
            .content
            .map(|content| content.trim().to_owned())
            .ok_or_else(|| {
                AnalysisError::MalformedResponse("ollama reply has no message content".to_owned())
            })
    }
}

fn map_transport(error: reqwest::Error) -> AnalysisError {
    if error.is_timeout() {
        AnalysisError::Unavailable("reasoning request timed out".to_owned())
    } else {
        AnalysisError::Unavailable(error.to_string())
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AnalysisError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(AnalysisError::Unavailable(format!("HTTP {status}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{Provider, ReasoningConfig};

    #[test]
    fn openai_config_requires_api_key() {
        assert!(ReasoningConfig::new(Provider::OpenAi, "gpt-4o-mini", None).is_err());
        assert!(
            ReasoningConfig::new(Provider::OpenAi, "gpt-4o-mini", Some("sk-test".to_owned()))
                .is_ok()
        );
    }

    #[test]
    fn ollama_config_needs_no_credential() {
        let config = ReasoningConfig::new(Provider::Ollama, "llama3.2", None).unwrap();
        assert_eq!(config.provider(), Provider::Ollama);
        assert_eq!(config.model(), "llama3.2");
    }

    #[test]
    fn debug_never_prints_the_key() {
        let config =
            ReasoningConfig::new(Provider::OpenAi, "gpt-4o-mini", Some("sk-secret".to_owned()))
                .unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
