//! Shared test fixtures: an in-memory knowledge source.

use std::collections::HashMap;
use verity_types::ArticleRef;
use verity_wiki::{KnowledgeSource, RetrievalError};

/// Programmable in-memory knowledge source.
#[derive(Debug, Default)]
pub struct FakeSource {
    searches: HashMap<String, Result<Vec<ArticleRef>, RetrievalError>>,
    pages: HashMap<u64, Result<String, RetrievalError>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_search(mut self, query: &str, result: Result<Vec<ArticleRef>, RetrievalError>) -> Self {
        self.searches.insert(query.to_owned(), result);
        self
    }

    pub fn with_page(mut self, article: &ArticleRef, result: Result<&str, RetrievalError>) -> Self {
        self.pages
            .insert(article.page_id, result.map(ToOwned::to_owned));
        self
    }
}

impl KnowledgeSource for FakeSource {
    async fn search(&self, query: &str, _limit: u32) -> Result<Vec<ArticleRef>, RetrievalError> {
        self.searches
            .get(query)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn fetch_content(&self, article: &ArticleRef) -> Result<String, RetrievalError> {
        self.pages
            .get(&article.page_id)
            .cloned()
            .unwrap_or_else(|| Ok(String::new()))
    }
}
