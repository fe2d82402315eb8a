//! AI-Assisted Spot Discovery and Recommendation Pipeline
//!
//! Turns a free-text "find me a place" request into ranked, enriched
//! place candidates plus a generated recommendation narrative.
//!
//! # Design
//!
//! Six stages run in a fixed linear order over one per-request state:
//! query synthesis, candidate search, detail resolution, news
//! enrichment, positional ranking, and summarization. The external
//! services are capability traits; the library ships reference clients
//! and mocks for all of them.
//!
//! Two execution modes share the first five stages:
//! - **Batch** returns the full response from one call.
//! - **Streaming** hands back the ranked places immediately, then
//!   emits the summary as text fragments while the model produces it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use spotseek::SpotSeeker;
//! use tokio_util::sync::CancellationToken;
//!
//! let seeker = SpotSeeker::from_env()?;
//!
//! // Batch mode
//! let response = seeker.run_to_completion("神田でラーメン食べたい").await?;
//! println!("{}", response.summary);
//!
//! // Streaming mode
//! let state = seeker.run_to_ranked("神田でラーメン食べたい").await?;
//! let mut events = seeker.stream_summary(state, CancellationToken::new());
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Capability seams (TextGenerator, PlaceDirectory, WebSearcher)
//! - [`types`] - Domain types threaded through the pipeline
//! - [`pipeline`] - The six stages and the engine
//! - [`clients`] - Reference clients for the hosted services
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod clients;
pub mod error;
pub mod pipeline;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{Result, SeekError};
pub use traits::{
    generator::{TextGenerator, TokenStream},
    places::PlaceDirectory,
    searcher::{SearchHit, WebSearcher},
};
pub use types::{
    news::NewsArticle,
    place::{Geometry, LatLng, OpeningHours, PlaceRecord, Review},
    query::SearchQuery,
    session::{EnrichedPlace, SeekResponse, SeekState, StreamEvent},
};

// Re-export the engine and the pure stage helpers
pub use pipeline::{
    articles_from_hits, format_summary_prompt, news_query, rank_places, SpotSeeker,
};

// Re-export reference clients
pub use clients::{GeminiGenerator, GoogleCustomSearch, GooglePlaces};
