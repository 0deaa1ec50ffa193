//! The `log_session` tool.

use super::{get_string, make_tool, require_string};
use crate::error::{ToolError, ToolResult};
use crate::recorder::SessionRecorder;
use crate::types::{CodeQuality, SessionLogRequest};
use rmcp::model::Tool;
use serde_json::{Value, json};

pub const LOG_SESSION: &str = "log_session";

/// Get the session logging tool definition.
pub fn get_tools() -> Vec<Tool> {
    vec![make_tool(
        LOG_SESSION,
        "Record a development session in Notion. Captures what changed since the previous log, \
         why it changed, problems hit along the way, and what was learned.",
        json!({
            "purpose": {
                "type": "string",
                "description": "Purpose and background of the change (e.g. what was decided while talking it through)"
            },
            "changes": {
                "type": "string",
                "description": "Summary of the changes (files touched, features added). An outline is enough, no need to paste code"
            },
            "errors": {
                "type": "string",
                "description": "Errors or problems encountered and how they were resolved (optional)"
            },
            "learnings": {
                "type": "string",
                "description": "Things learned or noticed during this session (optional)"
            },
            "nextActions": {
                "type": "string",
                "description": "What to do next, TODOs (optional)"
            },
            "claudeComment": {
                "type": "string",
                "description": "Specific commentary on the session (generated automatically when omitted)"
            },
            "codeQuality": {
                "type": "string",
                "enum": CodeQuality::values(),
                "description": "Code quality assessment (optional)"
            }
        }),
        vec!["purpose", "changes"],
    )]
}

/// Validate `log_session` arguments into a request.
pub fn parse_request(args: &Value) -> ToolResult<SessionLogRequest> {
    if !args.is_object() {
        return Err(ToolError::invalid_value(
            "arguments",
            "arguments must be an object",
        ));
    }

    let purpose = require_string(args, "purpose")?;
    let changes = require_string(args, "changes")?;

    let code_quality = match get_string(args, "codeQuality")? {
        Some(value) => Some(CodeQuality::parse(&value).ok_or_else(|| {
            ToolError::invalid_value(
                "codeQuality",
                &format!(
                    "Invalid codeQuality '{}'. Must be one of: {}",
                    value,
                    CodeQuality::values().join(", ")
                ),
            )
        })?),
        None => None,
    };

    Ok(SessionLogRequest {
        purpose,
        changes,
        errors: get_string(args, "errors")?,
        learnings: get_string(args, "learnings")?,
        next_actions: get_string(args, "nextActions")?,
        claude_comment: get_string(args, "claudeComment")?,
        code_quality,
    })
}

/// Handle the log_session tool call.
pub async fn log_session(
    recorder: &mut SessionRecorder,
    request: &SessionLogRequest,
) -> ToolResult<Value> {
    let outcome = recorder.record(request).await?;
    Ok(outcome.to_json())
}
