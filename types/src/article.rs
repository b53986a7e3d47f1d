use serde::{Deserialize, Serialize};

/// A reference to a Wikipedia article that supplied evidence.
///
/// Produced by the retriever and held only for the duration of one claim's
/// pipeline run. Identity is the page id; `url` is derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticleRef {
    pub title: String,
    pub page_id: u64,
    pub url: String,
}

impl ArticleRef {
    #[must_use]
    pub fn new(title: impl Into<String>, page_id: u64) -> Self {
        Self {
            title: title.into(),
            page_id,
            url: format!("https://en.wikipedia.org/?curid={page_id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ArticleRef;

    #[test]
    fn derives_curid_url() {
        let article = ArticleRef::new("Marathon", 19175);
        assert_eq!(article.url, "https://en.wikipedia.org/?curid=19175");
    }
}
