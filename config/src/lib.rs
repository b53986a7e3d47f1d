//! Configuration loading and defaults for Verity.
//!
//! Settings come from a TOML file; every section and field is optional and
//! falls back to a typed default, so a missing file simply means "run with
//! defaults". The engine never reads this storage itself: the CLI loads a
//! [`Settings`] value, resolves the API credential from the environment, and
//! hands fully-validated values to the pipeline.
//!
//! ```toml
//! [wikipedia]
//! timeout_seconds = 10
//! max_articles = 5
//!
//! [evidence]
//! max_sentences = 10
//! min_keyword_length = 3
//!
//! [analyzer]
//! mode = "keyword"          # or "semantic"
//! confidence_enabled = true
//!
//! [reasoning]
//! provider = "openai"       # or "ollama"
//! openai_model = "gpt-4o-mini"
//! api_key_env = "OPENAI_API_KEY"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fs};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "verity.toml";
pub const CONFIG_ENV_VAR: &str = "VERITY_CONFIG";

// Default value function for serde (bool::default() is false, so only true needs a fn)
const fn default_true() -> bool {
    true
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Root settings object handed to the CLI.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub wikipedia: WikipediaSettings,
    #[serde(default)]
    pub evidence: EvidenceSettings,
    #[serde(default)]
    pub analyzer: AnalyzerSettings,
    #[serde(default)]
    pub reasoning: ReasoningSettings,
    #[serde(default)]
    pub export: ExportSettings,
    #[serde(default)]
    pub history: HistorySettings,
}

impl Settings {
    /// Load settings from `path`, or from the first of `$VERITY_CONFIG`,
    /// `./verity.toml`, and the user config directory when `path` is `None`.
    /// A missing file yields defaults; an unreadable or unparseable file is
    /// an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let candidate = match path {
            Some(explicit) => Some(explicit.to_path_buf()),
            None => Self::default_locations().into_iter().find(|p| p.exists()),
        };

        let Some(candidate) = candidate else {
            tracing::warn!("no config file found, using defaults");
            return Ok(Self::default());
        };

        let raw = fs::read_to_string(&candidate).map_err(|source| ConfigError::Read {
            path: candidate.clone(),
            source,
        })?;
        let settings = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: candidate.clone(),
            source,
        })?;
        tracing::info!(path = %candidate.display(), "loaded config");
        Ok(settings)
    }

    fn default_locations() -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Ok(from_env) = env::var(CONFIG_ENV_VAR) {
            candidates.push(PathBuf::from(from_env));
        }
        candidates.push(PathBuf::from(CONFIG_FILE_NAME));
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("verity").join("config.toml"));
        }
        candidates
    }
}

/// `[wikipedia]` - knowledge-source connection settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WikipediaSettings {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub max_articles: Option<u32>,
    pub user_agent: Option<String>,
}

impl WikipediaSettings {
    pub const DEFAULT_BASE_URL: &'static str = "https://en.wikipedia.org/w/api.php";
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
    pub const DEFAULT_MAX_ARTICLES: u32 = 5;
    pub const DEFAULT_USER_AGENT: &'static str = "verity-fact-checker/0.1";

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(Self::DEFAULT_BASE_URL)
    }

    #[must_use]
    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
            .unwrap_or(Self::DEFAULT_TIMEOUT_SECONDS)
    }

    #[must_use]
    pub fn max_articles(&self) -> u32 {
        self.max_articles.unwrap_or(Self::DEFAULT_MAX_ARTICLES)
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        self.user_agent
            .as_deref()
            .unwrap_or(Self::DEFAULT_USER_AGENT)
    }
}

/// `[evidence]` - extraction tunables, including the contradiction
/// heuristics' term tables (kept configurable rather than hard-coded).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvidenceSettings {
    pub max_sentences: Option<usize>,
    pub min_keyword_length: Option<usize>,
    /// Markers that flag a sentence as negating a matched claim term.
    pub negation_terms: Option<Vec<String>>,
    /// Token distance within which a negation marker must appear to count.
    /// `0` means anywhere in the sentence.
    pub negation_window: Option<usize>,
    /// Known location names used by the location-conflict heuristic.
    pub location_terms: Option<Vec<String>>,
}

impl EvidenceSettings {
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

    #[must_use]
    pub fn max_sentences(&self) -> usize {
        self.max_sentences.unwrap_or(Self::DEFAULT_MAX_SENTENCES)
    }

    #[must_use]
    pub fn min_keyword_length(&self) -> usize {
        self.min_keyword_length
            .unwrap_or(Self::DEFAULT_MIN_KEYWORD_LENGTH)
    }

    #[must_use]
    pub fn negation_window(&self) -> usize {
        self.negation_window
            .unwrap_or(Self::DEFAULT_NEGATION_WINDOW)
    }

    #[must_use]
    pub fn negation_terms(&self) -> Vec<String> {
        self.negation_terms.clone().unwrap_or_else(|| {
            Self::DEFAULT_NEGATION_TERMS
                .iter()
                .map(|&t| t.to_owned())
                .collect()
        })
    }

    #[must_use]
    pub fn location_terms(&self) -> Vec<String> {
        self.location_terms.clone().unwrap_or_else(|| {
            Self::DEFAULT_LOCATION_TERMS
                .iter()
                .map(|&t| t.to_owned())
                .collect()
        })
    }
}

/// Which analyzer variant the pipeline runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerMode {
    #[default]
    Keyword,
    Semantic,
}

impl AnalyzerMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Semantic => "semantic",
        }
    }
}

impl std::str::FromStr for AnalyzerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keyword" => Ok(Self::Keyword),
            "semantic" | "llm" => Ok(Self::Semantic),
            other => Err(format!("unknown analyzer mode: {other}")),
        }
    }
}

/// `[analyzer]` - analyzer selection and confidence reporting.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerSettings {
    #[serde(default)]
    pub mode: AnalyzerMode,
    #[serde(default = "default_true")]
    pub confidence_enabled: bool,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            mode: AnalyzerMode::default(),
            confidence_enabled: true,
        }
    }
}

/// Which reasoning backend serves the semantic analyzer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningProvider {
    #[default]
    OpenAi,
    Ollama,
}

/// `[reasoning]` - reasoning-service selection. The credential itself is
/// never stored here, only the name of the environment variable that holds
/// it; the CLI resolves it at startup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReasoningSettings {
    #[serde(default)]
    pub provider: ReasoningProvider,
    pub openai_model: Option<String>,
    pub ollama_model: Option<String>,
    pub openai_endpoint: Option<String>,
    pub ollama_endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub api_key_env: Option<String>,
}

impl ReasoningSettings {
    pub const DEFAULT_OPENAI_MODEL: &'static str = "gpt-4o-mini";
    pub const DEFAULT_OLLAMA_MODEL: &'static str = "llama3.2";
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
    pub const DEFAULT_API_KEY_ENV: &'static str = "OPENAI_API_KEY";

    #[must_use]
    pub fn model(&self) -> &str {
        match self.provider {
            ReasoningProvider::OpenAi => self
                .openai_model
                .as_deref()
                .unwrap_or(Self::DEFAULT_OPENAI_MODEL),
            ReasoningProvider::Ollama => self
                .ollama_model
                .as_deref()
                .unwrap_or(Self::DEFAULT_OLLAMA_MODEL),
        }
    }

    #[must_use]
    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
            .unwrap_or(Self::DEFAULT_TIMEOUT_SECONDS)
    }

    #[must_use]
    pub fn api_key_env(&self) -> &str {
        self.api_key_env
            .as_deref()
            .unwrap_or(Self::DEFAULT_API_KEY_ENV)
    }
}

/// Export file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// `[export]` - result export destination and format.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportSettings {
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub default_format: ExportFormat,
}

impl ExportSettings {
    pub const DEFAULT_DIRECTORY: &'static str = "exports";

    #[must_use]
    pub fn directory(&self) -> PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_DIRECTORY))
    }
}

/// `[history]` - past-result persistence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistorySettings {
    pub path: Option<PathBuf>,
    pub max_entries: Option<usize>,
}

impl HistorySettings {
    pub const DEFAULT_PATH: &'static str = "history.json";
    pub const DEFAULT_MAX_ENTRIES: usize = 100;

    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_PATH))
    }

    #[must_use]
    pub fn max_entries(&self) -> usize {
        self.max_entries.unwrap_or(Self::DEFAULT_MAX_ENTRIES)
    }
}
