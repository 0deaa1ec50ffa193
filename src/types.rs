//! Core types for the session logger.

use serde_json::{Value, json};

/// Message returned to the caller after a session has been recorded.
pub const SUCCESS_MESSAGE: &str = "Development session recorded in Notion!";

/// Self-assessed code quality grade attached to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeQuality {
    A,
    B,
    C,
    NeedsImprovement,
}

impl CodeQuality {
    pub const ALL: [CodeQuality; 4] = [
        CodeQuality::A,
        CodeQuality::B,
        CodeQuality::C,
        CodeQuality::NeedsImprovement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CodeQuality::A => "A",
            CodeQuality::B => "B",
            CodeQuality::C => "C",
            CodeQuality::NeedsImprovement => "needs-improvement",
        }
    }

    /// Parse a grade. Matching is exact, as the values come from a schema enum.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.as_str() == s)
    }

    /// All accepted values, in schema order.
    pub fn values() -> Vec<&'static str> {
        Self::ALL.iter().map(|q| q.as_str()).collect()
    }
}

/// A validated `log_session` request.
///
/// Optional fields are `None` when the caller omitted them or sent an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionLogRequest {
    pub purpose: String,
    pub changes: String,
    pub errors: Option<String>,
    pub learnings: Option<String>,
    pub next_actions: Option<String>,
    pub claude_comment: Option<String>,
    pub code_quality: Option<CodeQuality>,
}

impl SessionLogRequest {
    pub fn new(purpose: impl Into<String>, changes: impl Into<String>) -> Self {
        Self {
            purpose: purpose.into(),
            changes: changes.into(),
            ..Default::default()
        }
    }

    pub fn with_errors(mut self, errors: impl Into<String>) -> Self {
        self.errors = Some(errors.into());
        self
    }

    pub fn with_learnings(mut self, learnings: impl Into<String>) -> Self {
        self.learnings = Some(learnings.into());
        self
    }

    pub fn with_next_actions(mut self, next_actions: impl Into<String>) -> Self {
        self.next_actions = Some(next_actions.into());
        self
    }

    pub fn with_claude_comment(mut self, comment: impl Into<String>) -> Self {
        self.claude_comment = Some(comment.into());
        self
    }

    pub fn with_code_quality(mut self, quality: CodeQuality) -> Self {
        self.code_quality = Some(quality);
        self
    }
}

/// A page created by the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRecord {
    pub id: String,
    pub url: Option<String>,
}

/// Result of a successful `log_session` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub record: CreatedRecord,
    pub title: String,
    pub session_number: u64,
    /// Human-readable elapsed time since the previous successful record.
    pub time_since_last_log: String,
}

impl RecordOutcome {
    /// Render the response payload sent back to the MCP client.
    pub fn to_json(&self) -> Value {
        let mut out = json!({
            "message": SUCCESS_MESSAGE,
            "success": true,
            "notionPageId": self.record.id,
            "title": self.title,
            "sessionNumber": self.session_number,
            "timeSinceLastLog": self.time_since_last_log,
        });
        if let Some(ref url) = self.record.url {
            out["notionUrl"] = json!(url);
        }
        out
    }
}
