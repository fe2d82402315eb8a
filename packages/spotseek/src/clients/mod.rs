//! Reference clients for the consumed capabilities.
//!
//! Each implements one of the [`traits`](crate::traits) seams against
//! the real hosted service. Applications can swap any of them for their
//! own implementation; tests use the mocks in
//! [`testing`](crate::testing) instead.

pub mod custom_search;
pub mod gemini;
pub mod google_places;
pub mod sse;

pub use custom_search::GoogleCustomSearch;
pub use gemini::GeminiGenerator;
pub use google_places::GooglePlaces;
pub use sse::GeneratedTextStream;
