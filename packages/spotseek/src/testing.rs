//! Testing utilities including mock capability implementations.
//!
//! These let applications exercise the pipeline without real model or
//! network calls. Mocks return deterministic, configurable responses.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use chrono::DateTime;

use crate::error::{Result, SeekError};
use crate::traits::generator::{TextGenerator, TokenStream};
use crate::traits::places::PlaceDirectory;
use crate::traits::searcher::{SearchHit, WebSearcher};
use crate::types::place::{Geometry, LatLng, PlaceRecord, Review, Viewport};
use crate::types::query::SearchQuery;

/// A mock text generator with scripted replies.
///
/// Clones share the call log, so a test can keep a clone to assert on
/// the prompts the pipeline actually sent.
#[derive(Default, Clone)]
pub struct MockGenerator {
    /// Structured replies keyed by the user message.
    structured: HashMap<String, serde_json::Value>,

    /// Reply for batch generation.
    completion: Option<String>,

    /// Fragments replayed by the streaming variant.
    fragments: Vec<String>,

    /// If set, the stream ends with this error after the fragments.
    stream_error: Option<String>,

    /// Fail every call outright.
    fail: bool,

    /// Call tracking for assertions.
    calls: Arc<RwLock<Vec<GeneratorCall>>>,
}

/// Record of a call made to the mock generator.
#[derive(Debug, Clone)]
pub enum GeneratorCall {
    Structured { user: String },
    Generate { prompt: String },
    Stream { prompt: String },
}

impl MockGenerator {
    /// Create a mock with no scripted replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a structured reply for a user message.
    pub fn with_structured(mut self, user: impl Into<String>, value: serde_json::Value) -> Self {
        self.structured.insert(user.into(), value);
        self
    }

    /// Script the batch-generation reply.
    pub fn with_completion(mut self, text: impl Into<String>) -> Self {
        self.completion = Some(text.into());
        self
    }

    /// Script the streaming fragments.
    pub fn with_fragments<I, S>(mut self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fragments = fragments.into_iter().map(Into::into).collect();
        self
    }

    /// End the stream with an error after the scripted fragments.
    pub fn with_stream_error(mut self, message: impl Into<String>) -> Self {
        self.stream_error = Some(message.into());
        self
    }

    /// Make every call fail.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> Vec<GeneratorCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.write().unwrap().push(GeneratorCall::Generate {
            prompt: prompt.to_string(),
        });

        if self.fail {
            return Err(SeekError::Generation("mock generation failure".into()));
        }

        self.completion
            .clone()
            .ok_or_else(|| SeekError::Generation("no completion scripted".into()))
    }

    async fn generate_structured(
        &self,
        _system: &str,
        user: &str,
        _schema: serde_json::Value,
    ) -> Result<serde_json::Value> {
        self.calls.write().unwrap().push(GeneratorCall::Structured {
            user: user.to_string(),
        });

        if self.fail {
            return Err(SeekError::Generation("mock generation failure".into()));
        }

        self.structured
            .get(user)
            .cloned()
            .ok_or_else(|| SeekError::Generation(format!("no structured reply for: {user}").into()))
    }

    fn generate_stream<'a>(&'a self, prompt: &str) -> TokenStream<'a> {
        self.calls.write().unwrap().push(GeneratorCall::Stream {
            prompt: prompt.to_string(),
        });

        let mut items: Vec<Result<String>> = if self.fail {
            vec![Err(SeekError::Generation("mock generation failure".into()))]
        } else {
            self.fragments.iter().cloned().map(Ok).collect()
        };

        if let Some(message) = &self.stream_error {
            items.push(Err(SeekError::Generation(message.clone().into())));
        }

        Box::pin(futures::stream::iter(items))
    }
}

/// A mock place directory with scripted candidates and details.
#[derive(Default)]
pub struct MockPlaceDirectory {
    /// Candidate identifiers keyed by the query text.
    candidates: HashMap<String, Vec<String>>,

    /// Place records keyed by identifier; identifiers without a record
    /// fail their detail lookup.
    records: HashMap<String, PlaceRecord>,

    /// Fail the text search outright.
    fail_search: bool,
}

impl MockPlaceDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script candidate identifiers for a query text.
    pub fn with_candidates<I, S>(mut self, text_query: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidates
            .insert(text_query.into(), ids.into_iter().map(Into::into).collect());
        self
    }

    /// Script a place record, keyed by its identifier.
    pub fn with_place(mut self, place: PlaceRecord) -> Self {
        self.records.insert(place.place_id.clone(), place);
        self
    }

    /// Make the text search fail.
    pub fn failing_search(mut self) -> Self {
        self.fail_search = true;
        self
    }
}

#[async_trait]
impl PlaceDirectory for MockPlaceDirectory {
    async fn search_text(&self, query: &SearchQuery) -> Result<Vec<String>> {
        if self.fail_search {
            return Err(SeekError::upstream("mock search failure"));
        }

        Ok(self
            .candidates
            .get(&query.text_query)
            .cloned()
            .unwrap_or_default())
    }

    async fn details(&self, place_id: &str) -> Result<PlaceRecord> {
        self.records
            .get(place_id)
            .cloned()
            .ok_or_else(|| SeekError::upstream(format!("no details for {place_id}")))
    }
}

/// A mock web searcher with scripted hits per query.
#[derive(Default)]
pub struct MockWebSearcher {
    hits: HashMap<String, Vec<SearchHit>>,
    failing: HashSet<String>,
}

impl MockWebSearcher {
    /// Create an empty searcher; unknown queries return no hits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script hits for a query.
    pub fn with_hits(mut self, query: impl Into<String>, hits: Vec<SearchHit>) -> Self {
        self.hits.insert(query.into(), hits);
        self
    }

    /// Make a specific query fail.
    pub fn with_failure(mut self, query: impl Into<String>) -> Self {
        self.failing.insert(query.into());
        self
    }
}

#[async_trait]
impl WebSearcher for MockWebSearcher {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        if self.failing.contains(query) {
            return Err(SeekError::upstream("mock web search failure"));
        }

        let mut hits = self.hits.get(query).cloned().unwrap_or_default();
        hits.truncate(limit);
        Ok(hits)
    }
}

/// A minimal but complete place record for tests.
pub fn sample_place(place_id: impl Into<String>, name: impl Into<String>) -> PlaceRecord {
    let place_id = place_id.into();
    let name = name.into();

    PlaceRecord {
        url: format!("https://maps.example/?q={place_id}"),
        place_id,
        formatted_address: "東京都千代田区神田1-1-1".to_string(),
        geometry: Geometry {
            location: LatLng {
                lat: 35.6917,
                lng: 139.7708,
            },
            viewport: Viewport {
                northeast: LatLng {
                    lat: 35.6927,
                    lng: 139.7718,
                },
                southwest: LatLng {
                    lat: 35.6907,
                    lng: 139.7698,
                },
            },
        },
        rating: Some(4.2),
        user_ratings_total: Some(120),
        reviews: Some(vec![Review {
            author_name: "田中".to_string(),
            author_url: None,
            language: "ja".to_string(),
            original_language: None,
            profile_photo_url: None,
            rating: 5.0,
            relative_time_description: "1 か月前".to_string(),
            text: format!("{name}は期待以上でした。"),
            time: DateTime::from_timestamp(1_717_000_000, 0).unwrap(),
            translated: false,
        }]),
        photos: None,
        opening_hours: None,
        types: vec!["restaurant".to_string(), "point_of_interest".to_string()],
        website: None,
        name,
    }
}
