//! Wikipedia knowledge-source client for Verity.
//!
//! The pipeline talks to this crate through [`KnowledgeSource`], a two-call
//! contract: `search` a claim for candidate articles, then `fetch_content`
//! the plain-text extract of each candidate. [`WikipediaClient`] implements
//! it against the MediaWiki API.
//!
//! # Error Handling
//!
//! Every network call honors the caller-supplied timeout and maps transport
//! outcomes onto [`RetrievalError`]. The client never retries: a throttling
//! signal (HTTP 429) surfaces as [`RetrievalError::RateLimited`] for the
//! caller to handle, and resilience policy composes around this boundary.

mod error;
mod wikipedia;

pub use error::RetrievalError;
pub use wikipedia::{WIKIPEDIA_API_URL, WikipediaClient, WikipediaConfig};

use verity_types::ArticleRef;

/// External knowledge source the pipeline retrieves evidence text from.
///
/// Implementations apply a configured timeout to each call and perform no
/// automatic retries. A search with zero hits is `Ok(vec![])`, not an error.
#[allow(async_fn_in_trait)]
pub trait KnowledgeSource {
    /// Search for candidate articles related to `query`, bounded by `limit`.
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<ArticleRef>, RetrievalError>;

    /// Fetch the plain-text content of one article. Returns an empty string
    /// when the provider has no extract for the page.
    async fn fetch_content(&self, article: &ArticleRef) -> Result<String, RetrievalError>;
}
