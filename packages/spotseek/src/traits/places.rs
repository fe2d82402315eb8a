//! Place search and detail capability.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::place::PlaceRecord;
use crate::types::query::SearchQuery;

/// Place text-search and detail-lookup capability.
///
/// Both calls are request-scoped; the pipeline issues one `search_text`
/// per request and one `details` per candidate identifier.
#[async_trait]
pub trait PlaceDirectory: Send + Sync {
    /// Resolve a structured query to an ordered list of place identifiers.
    ///
    /// Order is the service's relevance order and must be preserved.
    /// A non-success reply fails with
    /// [`SeekError::Upstream`](crate::SeekError::Upstream) carrying the
    /// raw response body.
    async fn search_text(&self, query: &SearchQuery) -> Result<Vec<String>>;

    /// Resolve one identifier into a full place record.
    async fn details(&self, place_id: &str) -> Result<PlaceRecord>;
}
