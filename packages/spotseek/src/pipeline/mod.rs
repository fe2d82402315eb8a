//! The seeking pipeline - the core of the library.
//!
//! The pipeline sequences six stages over one per-request state:
//! - Query synthesis (free text → structured query)
//! - Candidate search (query → place identifiers)
//! - Detail resolution (identifier → place record, per-item best effort)
//! - News enrichment (place → zero or more articles)
//! - Positional ranking
//! - Summary generation (batch or streaming)

pub mod engine;
pub mod news;
pub mod prompts;
pub mod rank;

pub use engine::SpotSeeker;
pub use news::{articles_from_hits, news_query, NEWS_RESULT_LIMIT};
pub use prompts::{format_summary_prompt, SYNTHESIZE_QUERY_INSTRUCTION};
pub use rank::rank_places;
