//! Google Places implementation of the `PlaceDirectory` trait.
//!
//! Text search goes against the v1 `places:searchText` endpoint with a
//! field mask limited to identifiers; details come from the legacy
//! details endpoint whose payload matches [`PlaceRecord`].

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{Result, SeekError};
use crate::security::ApiKey;
use crate::traits::places::PlaceDirectory;
use crate::types::place::PlaceRecord;
use crate::types::query::SearchQuery;

const TEXT_SEARCH_ENDPOINT: &str = "https://places.googleapis.com/v1/places:searchText";
const DETAILS_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/place/details/json";

/// Google Places-backed place directory.
#[derive(Clone)]
pub struct GooglePlaces {
    client: Client,
    api_key: ApiKey,
    /// Language for detail lookups.
    language: String,
}

impl GooglePlaces {
    /// Create a new directory client with the given API key.
    pub fn new(api_key: impl Into<ApiKey>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            language: "ja".to_string(),
        }
    }

    /// Create from the `GOOGLE_MAPS_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ApiKey::from_env("GOOGLE_MAPS_API_KEY")?))
    }

    /// Set the detail-lookup language (default: ja).
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

#[async_trait]
impl PlaceDirectory for GooglePlaces {
    async fn search_text(&self, query: &SearchQuery) -> Result<Vec<String>> {
        #[derive(serde::Deserialize)]
        struct Response {
            #[serde(default)]
            places: Vec<PlaceId>,
        }

        #[derive(serde::Deserialize)]
        struct PlaceId {
            id: String,
        }

        let response = self
            .client
            .post(TEXT_SEARCH_ENDPOINT)
            .header("Content-Type", "application/json")
            .header("X-Goog-Api-Key", self.api_key.expose())
            .header("X-Goog-FieldMask", "places.id")
            .json(query)
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

        Ok(result.places.into_iter().map(|place| place.id).collect())
    }

    async fn details(&self, place_id: &str) -> Result<PlaceRecord> {
        #[derive(serde::Deserialize)]
        struct Response {
            status: String,
            result: Option<PlaceRecord>,
        }

        let response = self
            .client
            .get(DETAILS_ENDPOINT)
            .query(&[
                ("place_id", place_id),
                ("key", self.api_key.expose()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SeekError::Http(Box::new(e)))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SeekError::upstream(body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SeekError::Http(Box::new(e)))?;
        let result: Response = serde_json::from_str(&body)?;

        match (result.status.as_str(), result.result) {
            ("OK", Some(place)) => Ok(place),
            (status, _) => Err(SeekError::upstream(format!("details status {status}"))),
        }
    }
}
