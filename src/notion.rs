//! Notion page creation.
//!
//! [`RecordStore`] is the seam between the recorder and the document store;
//! [`NotionClient`] implements it against the Notion REST API.

use crate::config::NotionSettings;
use crate::types::CreatedRecord;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::debug;

/// Failure of a record creation call.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid Notion client configuration: {0}")]
    Client(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the API. Displays as the API's own message.
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("failed to parse Notion response: {0}")]
    Decode(String),
}

/// A store that can create a record from a property map.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create_record(&self, properties: Map<String, Value>)
    -> Result<CreatedRecord, StoreError>;
}

#[derive(Debug, Deserialize)]
struct PageResponse {
    id: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    message: String,
}

/// HTTP client for the Notion pages endpoint.
#[derive(Debug, Clone)]
pub struct NotionClient {
    client: reqwest::Client,
    base_url: String,
    database_id: String,
}

impl NotionClient {
    pub fn new(settings: &NotionSettings) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", settings.api_key))
            .map_err(|e| StoreError::Client(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            "notion-version",
            HeaderValue::from_str(&settings.api_version).map_err(|e| {
                StoreError::Client(format!("invalid Notion-Version header value: {e}"))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| StoreError::Client(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            database_id: settings.database_id.clone(),
        })
    }

    fn pages_url(&self) -> String {
        format!("{}/v1/pages", self.base_url)
    }
}

#[async_trait]
impl RecordStore for NotionClient {
    async fn create_record(
        &self,
        properties: Map<String, Value>,
    ) -> Result<CreatedRecord, StoreError> {
        let body = json!({
            "parent": { "database_id": self.database_id },
            "properties": properties,
        });

        let response = self.client.post(self.pages_url()).json(&body).send().await?;
        let status = response.status();
        debug!(status = %status, "Notion create page response received");
        let text = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ApiErrorBody>(&text) {
                Ok(err) => StoreError::Api {
                    status: status.as_u16(),
                    code: err.code,
                    message: err.message,
                },
                Err(_) => StoreError::Api {
                    status: status.as_u16(),
                    code: None,
                    message: format!("HTTP {}: {}", status.as_u16(), text),
                },
            });
        }

        let page: PageResponse =
            serde_json::from_str(&text).map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(CreatedRecord {
            id: page.id,
            url: page.url,
        })
    }
}
