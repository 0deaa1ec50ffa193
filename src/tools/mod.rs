//! MCP tool implementations.

pub mod session;

use crate::error::{ToolError, ToolResult};
use crate::recorder::SessionRecorder;
use crate::session::SessionState;
use rmcp::model::Tool;
use serde_json::Value;
use tokio::sync::Mutex;

/// Tool handler that processes MCP tool calls.
///
/// Calls are handled one at a time: the recorder lock is held for the whole
/// call, including the Notion request.
pub struct ToolHandler {
    recorder: Mutex<SessionRecorder>,
}

impl ToolHandler {
    pub fn new(recorder: SessionRecorder) -> Self {
        Self {
            recorder: Mutex::new(recorder),
        }
    }

    /// Get all available tools.
    pub fn get_tools(&self) -> Vec<Tool> {
        session::get_tools()
    }

    /// Call a tool by name.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> ToolResult<Value> {
        match name {
            session::LOG_SESSION => {
                let request = session::parse_request(&arguments)?;
                let mut recorder = self.recorder.lock().await;
                session::log_session(&mut recorder, &request).await
            }
            _ => Err(ToolError::unknown_tool(name)),
        }
    }

    /// Snapshot of the current session state.
    pub async fn session_state(&self) -> SessionState {
        self.recorder.lock().await.state().clone()
    }
}

/// Helper to create a tool definition.
pub fn make_tool(name: &str, description: &str, properties: Value, required: Vec<&str>) -> Tool {
    let input_schema = rmcp::model::JsonObject::from_iter([
        ("type".to_string(), serde_json::json!("object")),
        ("properties".to_string(), properties),
        ("required".to_string(), serde_json::json!(required)),
    ]);

    Tool::new(name.to_string(), description.to_string(), input_schema)
}

/// Helper to get a required string from arguments.
///
/// Only an absent key, `null` or a non-string value fails; the content itself,
/// empty or not, is passed through.
pub fn require_string(args: &Value, key: &str) -> ToolResult<String> {
    match args.get(key) {
        None | Some(Value::Null) => Err(ToolError::missing_field(key)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ToolError::invalid_value(
            key,
            &format!("{} must be a string", key),
        )),
    }
}

/// Helper to get an optional string from arguments.
///
/// Absent, `null` and empty strings all read as `None`; any other non-string
/// value is a validation error.
pub fn get_string(args: &Value, key: &str) -> ToolResult<Option<String>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ToolError::invalid_value(
            key,
            &format!("{} must be a string", key),
        )),
    }
}
