//! The structured text-search query synthesized from a user request.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A structured query for the place text-search service.
///
/// Synthesized once per request by the query stage and immutable
/// afterwards. Serializes to the camelCase wire shape the search
/// service expects; unset optional fields are omitted entirely.
///
/// The field descriptions double as the output schema handed to the
/// text-generation service, so they are written for the model.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchQuery {
    #[schemars(description = "検索するテキスト文字列。例: '渋谷 ラーメン'。")]
    pub text_query: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "検索対象の単一のタイプ。例: 'restaurant'。")]
    pub included_type: Option<String>,

    #[schemars(description = "結果を返す言語コード。")]
    pub language_code: String,

    #[schemars(range(min = 1, max = 5))]
    #[schemars(description = "1ページに返す結果の件数（1～5）。")]
    pub page_size: u8,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            text_query: String::new(),
            included_type: None,
            language_code: "ja".to_string(),
            page_size: 5,
        }
    }
}

impl SearchQuery {
    /// Create a query with the given search text and defaults elsewhere.
    pub fn new(text_query: impl Into<String>) -> Self {
        Self {
            text_query: text_query.into(),
            ..Default::default()
        }
    }

    /// Restrict the search to a single place type.
    pub fn with_included_type(mut self, included_type: impl Into<String>) -> Self {
        self.included_type = Some(included_type.into());
        self
    }

    /// JSON schema for schema-constrained query generation.
    pub fn response_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(SearchQuery);
        serde_json::to_value(schema.schema).unwrap_or_default()
    }
}
