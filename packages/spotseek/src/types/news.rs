//! News article metadata lifted from OpenGraph tags in web-search hits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One news article attached to a place.
///
/// Deserializes straight from an OpenGraph `metatags` block; everything
/// except the title is optional because publishers are inconsistent
/// about the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    #[serde(rename(deserialize = "og:title"))]
    pub title: String,

    #[serde(rename(deserialize = "og:image"), default)]
    pub image: Option<String>,

    #[serde(rename(serialize = "type", deserialize = "og:type"), default)]
    pub kind: Option<String>,

    #[serde(rename(deserialize = "og:site_name"), default)]
    pub site_name: Option<String>,

    #[serde(rename(deserialize = "og:description"), default)]
    pub description: Option<String>,

    #[serde(rename(deserialize = "og:url"), default)]
    pub url: Option<String>,

    #[serde(rename(deserialize = "pubdate"), default)]
    pub published_at: Option<DateTime<Utc>>,
}
