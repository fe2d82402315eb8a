//! Generative Language API implementation of the `TextGenerator` trait.
//!
//! A reference implementation against the hosted Gemini endpoints, with
//! deterministic output (temperature 0) for both batch and streaming
//! generation.

use async_stream::stream;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::clients::sse::GeneratedTextStream;
use crate::error::{Result, SeekError};
use crate::security::ApiKey;
use crate::traits::generator::{TextGenerator, TokenStream};

const DEFAULT_MODEL: &str = "gemini-1.5-flash-002";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini-backed text generator.
#[derive(Clone)]
pub struct GeminiGenerator {
    client: Client,
    api_key: ApiKey,
    model: String,
    base_url: String,
}

impl GeminiGenerator {
    /// Create a new generator with the given API key.
    pub fn new(api_key: impl Into<ApiKey>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from the `GOOGLE_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ApiKey::from_env("GOOGLE_API_KEY")?))
    }

    /// Set the model (default: gemini-1.5-flash-002).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for proxies or regional endpoints).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, self.model, method)
    }

    async fn post_generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let response = self
            .client
            .post(self.endpoint("generateContent"))
            .header("x-goog-api-key", self.api_key.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| SeekError::Http(Box::new(e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SeekError::Generation(
                format!("generation endpoint error {status}: {body}").into(),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| SeekError::Generation(e.to_string().into()))
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest::for_prompt(prompt);
        let response = self.post_generate(&request).await?;
        response
            .first_candidate_text()
            .ok_or_else(|| SeekError::Generation("no candidates in response".into()))
    }

    async fn generate_structured(
        &self,
        system: &str,
        user: &str,
        schema: serde_json::Value,
    ) -> Result<serde_json::Value> {
        let request = GenerateRequest::for_prompt(user)
            .with_system(system)
            .with_response_schema(schema);
        let response = self.post_generate(&request).await?;

        let text = response
            .first_candidate_text()
            .ok_or_else(|| SeekError::Generation("no candidates in response".into()))?;

        serde_json::from_str(&text)
            .map_err(|e| SeekError::Generation(format!("non-conformant output: {e}").into()))
    }

    fn generate_stream<'a>(&'a self, prompt: &str) -> TokenStream<'a> {
        let request = GenerateRequest::for_prompt(prompt);

        Box::pin(stream! {
            let response = match self
                .client
                .post(self.endpoint("streamGenerateContent"))
                .query(&[("alt", "sse")])
                .header("x-goog-api-key", self.api_key.expose())
                .json(&request)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    yield Err(SeekError::Http(Box::new(e)));
                    return;
                }
            };

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                yield Err(SeekError::Generation(
                    format!("streaming endpoint error {status}: {body}").into(),
                ));
                return;
            }

            let mut fragments = GeneratedTextStream::new(response.bytes_stream());
            while let Some(fragment) = fragments.next().await {
                match fragment {
                    Ok(text) if text.is_empty() => continue,
                    Ok(text) => yield Ok(text),
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                }
            }
        })
    }
}

// Wire shapes for the generation endpoints.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<ContentPayload>,

    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<ContentPayload>,

    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct ContentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<TextPartPayload>,
}

#[derive(Debug, Serialize)]
struct TextPartPayload {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,

    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

impl GenerateRequest {
    fn for_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![ContentPayload {
                role: Some("user"),
                parts: vec![TextPartPayload {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: None,
            generation_config: GenerationConfig {
                temperature: 0.0,
                response_mime_type: None,
                response_schema: None,
            },
        }
    }

    fn with_system(mut self, system: &str) -> Self {
        self.system_instruction = Some(ContentPayload {
            role: None,
            parts: vec![TextPartPayload {
                text: system.to_string(),
            }],
        });
        self
    }

    fn with_response_schema(mut self, schema: serde_json::Value) -> Self {
        self.generation_config.response_mime_type = Some("application/json".to_string());
        self.generation_config.response_schema = Some(schema);
        self
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    fn first_candidate_text(&self) -> Option<String> {
        self.candidates.first().and_then(|candidate| {
            candidate.content.as_ref().map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
        })
    }
}
