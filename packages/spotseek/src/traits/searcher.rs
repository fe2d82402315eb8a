//! Web search capability used for news enrichment.

use async_trait::async_trait;

/// One hit from a web search, with whatever structured metadata the
/// engine surfaced for the page.
#[derive(Debug, Clone, Default)]
pub struct SearchHit {
    /// Title of the page, if the engine provided one.
    pub title: Option<String>,

    /// Link to the page.
    pub link: Option<String>,

    /// Structured metadata blocks (OpenGraph tags and friends) in the
    /// order the engine listed them.
    pub metatags: Vec<serde_json::Value>,
}

impl SearchHit {
    /// Create an empty hit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Append a metadata block.
    pub fn with_metatags(mut self, meta: serde_json::Value) -> Self {
        self.metatags.push(meta);
        self
    }
}

/// Web search capability for open-world enrichment.
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Search the web, returning up to `limit` hits in engine order.
    async fn search(&self, query: &str, limit: usize) -> crate::error::Result<Vec<SearchHit>>;
}
