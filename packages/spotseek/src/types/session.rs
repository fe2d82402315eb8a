//! Per-request pipeline state and the shapes derived from it.

use serde::{Deserialize, Serialize};

use crate::types::news::NewsArticle;
use crate::types::place::PlaceRecord;
use crate::types::query::SearchQuery;

/// A place with its secondary data and ranking fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedPlace {
    pub place: PlaceRecord,

    /// Related news articles, in search-result order. May be empty.
    #[serde(default)]
    pub news_articles: Vec<NewsArticle>,

    /// Relevance score assigned by the ranking stage; unset before it runs.
    pub relevance_score: Option<f64>,

    /// Per-place generated note. Part of the shape, not populated by any
    /// current stage.
    pub ai_note: Option<String>,
}

impl EnrichedPlace {
    /// Wrap a place record with no secondary data yet.
    pub fn new(place: PlaceRecord) -> Self {
        Self {
            place,
            news_articles: Vec::new(),
            relevance_score: None,
            ai_note: None,
        }
    }

    /// Attach news articles.
    pub fn with_articles(mut self, articles: Vec<NewsArticle>) -> Self {
        self.news_articles = articles;
        self
    }

    /// Score used for ordering; unranked places sort last.
    pub fn score(&self) -> f64 {
        self.relevance_score.unwrap_or(0.0)
    }
}

/// The single unit of mutable per-request state, threaded through the
/// pipeline stages by ownership transfer.
///
/// Each stage reads the fields written before it and writes only its
/// own; nothing outlives the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeekState {
    /// The raw user request, verbatim.
    pub user_request: String,

    /// Structured query synthesized from the request.
    pub query: SearchQuery,

    /// Candidate identifiers in search-result order.
    pub candidate_place_ids: Vec<String>,

    /// Successfully resolved details, a subsequence of the candidates.
    pub candidate_places: Vec<PlaceRecord>,

    /// One entry per resolved place, ranked once the ranking stage ran.
    pub enriched_places: Vec<EnrichedPlace>,

    /// Final recommendation narrative; empty until summarization.
    pub summary: String,
}

impl SeekState {
    /// Fresh state for one request.
    pub fn new(user_request: impl Into<String>) -> Self {
        Self {
            user_request: user_request.into(),
            query: SearchQuery::default(),
            candidate_place_ids: Vec::new(),
            candidate_places: Vec::new(),
            enriched_places: Vec::new(),
            summary: String::new(),
        }
    }

    /// Map the final state into the response returned to the caller.
    pub fn into_response(self) -> SeekResponse {
        SeekResponse {
            places: self.enriched_places,
            summary: self.summary,
        }
    }
}

/// The batch-mode response shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeekResponse {
    /// Enriched places in ranked order.
    pub places: Vec<EnrichedPlace>,
    pub summary: String,
}

/// One event on the incremental response stream.
///
/// Exactly one `Places` event comes first, then zero or more `Summary`
/// fragments; an `Error` event, if any, terminates the stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum StreamEvent {
    Places { places: Vec<EnrichedPlace> },
    Summary(String),
    Error(String),
}

impl StreamEvent {
    /// The place-list event opening a stream.
    pub fn places(places: Vec<EnrichedPlace>) -> Self {
        Self::Places { places }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_event_wire_shapes() {
        let summary = StreamEvent::Summary("おすすめは".to_string());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["type"], "summary");
        assert_eq!(json["content"], "おすすめは");

        let places = StreamEvent::places(Vec::new());
        let json = serde_json::to_value(&places).unwrap();
        assert_eq!(json["type"], "places");
        assert!(json["content"]["places"].as_array().unwrap().is_empty());

        let error = StreamEvent::Error("boom".to_string());
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["content"], "boom");
    }

    #[test]
    fn test_into_response_keeps_ranked_order() {
        let mut state = SeekState::new("静かなカフェ");
        state.summary = "まとめ".to_string();

        let response = state.into_response();
        assert!(response.places.is_empty());
        assert_eq!(response.summary, "まとめ");
    }
}
