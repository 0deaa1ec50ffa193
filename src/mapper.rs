//! Mapping of a session request onto Notion page properties.
//!
//! Optional request fields only produce a property when present. Notion
//! distinguishes an absent property from an empty one, so absent fields must
//! leave no key behind.

use crate::config::PropertyNames;
use crate::types::SessionLogRequest;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value, json};

/// Maximum length of a single Notion rich text segment, in characters.
pub const RICH_TEXT_LIMIT: usize = 2000;

/// Everything that ends up on the page.
#[derive(Debug, Clone, Copy)]
pub struct RecordFields<'a> {
    pub request: &'a SessionLogRequest,
    pub title: &'a str,
    pub commentary: &'a str,
    pub recorded_at: DateTime<Utc>,
}

/// Build the Notion `properties` object for a session page.
pub fn map_record(names: &PropertyNames, fields: &RecordFields<'_>) -> Map<String, Value> {
    let request = fields.request;
    PropertyMapBuilder::new()
        .title(&names.title, fields.title)
        .date(&names.date, fields.recorded_at)
        .select(&names.category, &names.category_value)
        .rich_text(&names.purpose, &request.purpose)
        .rich_text(&names.changes, &request.changes)
        .optional_rich_text(&names.errors, request.errors.as_deref())
        .optional_rich_text(&names.learnings, request.learnings.as_deref())
        .optional_rich_text(&names.next_actions, request.next_actions.as_deref())
        .rich_text(&names.commentary, fields.commentary)
        .optional_select(
            &names.code_quality,
            request.code_quality.map(|q| q.as_str()),
        )
        .build()
}

/// Incremental builder for a Notion property map.
#[derive(Debug, Default)]
pub struct PropertyMapBuilder {
    properties: Map<String, Value>,
}

impl PropertyMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, name: &str, content: &str) -> Self {
        self.properties
            .insert(name.to_string(), json!({ "title": text_segments(content) }));
        self
    }

    pub fn date(mut self, name: &str, at: DateTime<Utc>) -> Self {
        self.properties.insert(
            name.to_string(),
            json!({ "date": { "start": at.to_rfc3339_opts(SecondsFormat::Millis, true) } }),
        );
        self
    }

    pub fn select(mut self, name: &str, option: &str) -> Self {
        self.properties
            .insert(name.to_string(), json!({ "select": { "name": option } }));
        self
    }

    pub fn optional_select(self, name: &str, option: Option<&str>) -> Self {
        match option {
            Some(option) => self.select(name, option),
            None => self,
        }
    }

    pub fn rich_text(mut self, name: &str, content: &str) -> Self {
        self.properties
            .insert(name.to_string(), json!({ "rich_text": text_segments(content) }));
        self
    }

    pub fn optional_rich_text(self, name: &str, content: Option<&str>) -> Self {
        match content {
            Some(content) => self.rich_text(name, content),
            None => self,
        }
    }

    pub fn build(self) -> Map<String, Value> {
        self.properties
    }
}

/// Split text into rich text segments no longer than [`RICH_TEXT_LIMIT`] chars.
fn text_segments(content: &str) -> Vec<Value> {
    if content.is_empty() {
        return vec![text_segment("")];
    }
    let chars: Vec<char> = content.chars().collect();
    chars
        .chunks(RICH_TEXT_LIMIT)
        .map(|chunk| text_segment(&chunk.iter().collect::<String>()))
        .collect()
}

fn text_segment(content: &str) -> Value {
    json!({ "text": { "content": content } })
}
