//! Text-generation capability.

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

use crate::error::Result;

/// A lazy, finite, non-restartable sequence of generated text fragments.
pub type TokenStream<'a> = Pin<Box<dyn Stream<Item = Result<String>> + Send + 'a>>;

/// Text-generation capability behind the query and summary stages.
///
/// Implementations wrap a specific model provider and own the details of
/// prompting, schema enforcement, and response parsing.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a complete text response for the prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate output conforming to the given JSON schema.
    ///
    /// Returns the parsed JSON value; implementations fail with
    /// [`SeekError::Generation`](crate::SeekError::Generation) when the
    /// model cannot produce schema-conformant output.
    async fn generate_structured(
        &self,
        system: &str,
        user: &str,
        schema: serde_json::Value,
    ) -> Result<serde_json::Value>;

    /// Generate a response as a stream of text fragments.
    ///
    /// The request is issued lazily, on first poll. Errors surface as
    /// stream items; after an `Err` the stream is exhausted.
    fn generate_stream<'a>(&'a self, prompt: &str) -> TokenStream<'a>;
}
