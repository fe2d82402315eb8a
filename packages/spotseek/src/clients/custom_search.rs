//! Google Custom Search implementation of the `WebSearcher` trait.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{Result, SeekError};
use crate::security::ApiKey;
use crate::traits::searcher::{SearchHit, WebSearcher};

const CUSTOM_SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Custom Search-backed web searcher.
///
/// Surfaces each hit's `pagemap.metatags` blocks so callers can mine
/// OpenGraph metadata out of them.
#[derive(Clone)]
pub struct GoogleCustomSearch {
    client: Client,
    api_key: ApiKey,
    /// Programmable Search Engine id.
    cx: String,
}

impl GoogleCustomSearch {
    /// Create a new searcher for the given engine.
    pub fn new(api_key: impl Into<ApiKey>, cx: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            cx: cx.into(),
        }
    }

    /// Create from `CUSTOM_SEARCH_API_KEY` and `CUSTOM_SEARCH_CX`.
    pub fn from_env() -> Result<Self> {
        let api_key = ApiKey::from_env("CUSTOM_SEARCH_API_KEY")?;
        let cx = std::env::var("CUSTOM_SEARCH_CX")
            .map_err(|_| SeekError::Config("CUSTOM_SEARCH_CX not set".into()))?;
        Ok(Self::new(api_key, cx))
    }
}

#[async_trait]
impl WebSearcher for GoogleCustomSearch {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        #[derive(serde::Deserialize)]
        struct Response {
            #[serde(default)]
            items: Vec<Item>,
        }

        #[derive(serde::Deserialize)]
        struct Item {
            title: Option<String>,
            link: Option<String>,
            #[serde(default)]
            pagemap: PageMap,
        }

        #[derive(serde::Deserialize, Default)]
        struct PageMap {
            #[serde(default)]
            metatags: Vec<serde_json::Value>,
        }

        let num = limit.to_string();
        let response = self
            .client
            .get(CUSTOM_SEARCH_ENDPOINT)
            .query(&[
                ("key", self.api_key.expose()),
                ("cx", self.cx.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SeekError::Http(Box::new(e)))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SeekError::upstream(body));
        }

        let result: Response = response
            .json()
            .await
            .map_err(|e| SeekError::Http(Box::new(e)))?;

        let hits = result
            .items
            .into_iter()
            .map(|item| SearchHit {
                title: item.title,
                link: item.link,
                metatags: item.pagemap.metatags,
            })
            .collect();

        Ok(hits)
    }
}
