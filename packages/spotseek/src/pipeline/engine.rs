//! The pipeline engine.
//!
//! Six stages run in a fixed order with no branching:
//! query → search → details → news → rank → summary.
//! Each stage takes the session state by value, writes its own fields,
//! and hands it on. The batch and streaming entry points share the
//! first five stages and diverge only in how the summary is produced.

use async_stream::stream;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::clients::{GeminiGenerator, GoogleCustomSearch, GooglePlaces};
use crate::error::{Result, SeekError};
use crate::pipeline::news::{articles_from_hits, news_query, NEWS_RESULT_LIMIT};
use crate::pipeline::prompts::{format_summary_prompt, SYNTHESIZE_QUERY_INSTRUCTION};
use crate::pipeline::rank::rank_places;
use crate::traits::generator::TextGenerator;
use crate::traits::places::PlaceDirectory;
use crate::traits::searcher::WebSearcher;
use crate::types::query::SearchQuery;
use crate::types::session::{EnrichedPlace, SeekResponse, SeekState, StreamEvent};

/// The spot seeking pipeline.
///
/// Owns one client per consumed capability and no other state; every
/// request gets its own [`SeekState`], so a seeker can serve concurrent
/// requests.
///
/// # Example
///
/// ```rust,ignore
/// let seeker = SpotSeeker::from_env()?;
///
/// // Batch: one call, full response.
/// let response = seeker.run_to_completion("神田でラーメン食べたい").await?;
///
/// // Incremental: places first, then summary fragments.
/// let state = seeker.run_to_ranked("神田でラーメン食べたい").await?;
/// let mut events = seeker.stream_summary(state, cancel);
/// while let Some(event) = events.next().await { /* forward */ }
/// ```
pub struct SpotSeeker<G: TextGenerator, P: PlaceDirectory, W: WebSearcher> {
    generator: G,
    places: P,
    news: W,
}

impl SpotSeeker<GeminiGenerator, GooglePlaces, GoogleCustomSearch> {
    /// Build the reference-client combination from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            GeminiGenerator::from_env()?,
            GooglePlaces::from_env()?,
            GoogleCustomSearch::from_env()?,
        ))
    }
}

impl<G, P, W> SpotSeeker<G, P, W>
where
    G: TextGenerator,
    P: PlaceDirectory,
    W: WebSearcher,
{
    /// Create a seeker over the given capability clients.
    pub fn new(generator: G, places: P, news: W) -> Self {
        Self {
            generator,
            places,
            news,
        }
    }

    /// Run all six stages and return the assembled response.
    ///
    /// Any stage failure propagates; there is no partial response.
    pub async fn run_to_completion(&self, user_request: impl Into<String>) -> Result<SeekResponse> {
        let state = self.run_to_ranked(user_request).await?;
        let state = self.summarize(state).await?;
        Ok(state.into_response())
    }

    /// Run the pipeline through ranking, leaving the summary empty.
    ///
    /// The returned state feeds [`stream_summary`](Self::stream_summary);
    /// the split lets a caller deliver the place list before any summary
    /// text exists.
    pub async fn run_to_ranked(&self, user_request: impl Into<String>) -> Result<SeekState> {
        let state = SeekState::new(user_request);
        let state = self.synthesize_query(state).await?;
        let state = self.find_candidates(state).await?;
        let state = self.fetch_details(state).await?;
        let state = self.attach_news(state).await?;
        Ok(self.rank(state))
    }

    /// Produce the incremental event stream for a ranked state.
    ///
    /// Exactly one `Places` event is emitted first, then summary
    /// fragments as the model produces them. The cancellation token is
    /// checked before each fragment: a cancelled receiver ends the
    /// stream quietly. A mid-stream failure becomes one terminal
    /// `Error` event; nothing escapes as a panic or an `Err` item.
    pub fn stream_summary(
        &self,
        state: SeekState,
        cancel: CancellationToken,
    ) -> Pin<Box<dyn Stream<Item = StreamEvent> + Send + '_>> {
        Box::pin(stream! {
            yield StreamEvent::places(state.enriched_places.clone());

            let prompt = format_summary_prompt(&state);
            let mut fragments = self.generator.generate_stream(&prompt);

            while let Some(fragment) = fragments.next().await {
                if cancel.is_cancelled() {
                    debug!("receiver disconnected, ending summary stream");
                    break;
                }

                match fragment {
                    Ok(text) => yield StreamEvent::Summary(text),
                    Err(e) => {
                        warn!(error = %e, "summary stream failed");
                        yield StreamEvent::Error(e.to_string());
                        break;
                    }
                }
            }
        })
    }

    /// Stage 1: turn the free-text request into a structured query.
    async fn synthesize_query(&self, mut state: SeekState) -> Result<SeekState> {
        let value = self
            .generator
            .generate_structured(
                SYNTHESIZE_QUERY_INSTRUCTION,
                &state.user_request,
                SearchQuery::response_schema(),
            )
            .await?;

        let query: SearchQuery = serde_json::from_value(value)
            .map_err(|e| SeekError::Generation(format!("non-conformant query: {e}").into()))?;

        info!(text_query = %query.text_query, "synthesized search query");
        state.query = query;
        Ok(state)
    }

    /// Stage 2: resolve the query to candidate identifiers.
    async fn find_candidates(&self, mut state: SeekState) -> Result<SeekState> {
        let ids = self.places.search_text(&state.query).await?;
        info!(candidates = ids.len(), "found candidate places");
        state.candidate_place_ids = ids;
        Ok(state)
    }

    /// Stage 3: resolve each candidate into a full record.
    ///
    /// Per-item best effort: a failed lookup drops that identifier and
    /// the stage continues. Output order follows input order.
    async fn fetch_details(&self, mut state: SeekState) -> Result<SeekState> {
        let mut places = Vec::with_capacity(state.candidate_place_ids.len());
        for place_id in &state.candidate_place_ids {
            match self.places.details(place_id).await {
                Ok(place) => places.push(place),
                Err(e) => {
                    warn!(place_id = %place_id, error = %e, "skipping candidate, detail lookup failed");
                }
            }
        }

        debug!(
            resolved = places.len(),
            requested = state.candidate_place_ids.len(),
            "resolved place details"
        );
        state.candidate_places = places;
        Ok(state)
    }

    /// Stage 4: attach news coverage to every resolved place.
    ///
    /// Always 1:1 with the resolved places; a failed or empty search
    /// yields an empty article list for that place.
    async fn attach_news(&self, mut state: SeekState) -> Result<SeekState> {
        let mut enriched = Vec::with_capacity(state.candidate_places.len());
        for place in &state.candidate_places {
            let query = news_query(&place.name);
            let articles = match self.news.search(&query, NEWS_RESULT_LIMIT).await {
                Ok(hits) => articles_from_hits(&hits),
                Err(e) => {
                    warn!(place = %place.name, error = %e, "news search failed, attaching no articles");
                    Vec::new()
                }
            };

            debug!(place = %place.name, articles = articles.len(), "attached news");
            enriched.push(EnrichedPlace::new(place.clone()).with_articles(articles));
        }

        state.enriched_places = enriched;
        Ok(state)
    }

    /// Stage 5: positional scoring.
    fn rank(&self, mut state: SeekState) -> SeekState {
        state.enriched_places = rank_places(std::mem::take(&mut state.enriched_places));
        state
    }

    /// Stage 6 (batch): one generation call over the full prompt.
    async fn summarize(&self, mut state: SeekState) -> Result<SeekState> {
        let prompt = format_summary_prompt(&state);
        state.summary = self.generator.generate(&prompt).await?;
        info!(chars = state.summary.len(), "generated summary");
        Ok(state)
    }
}
