//! Structured error types for tool responses.
//!
//! Errors carry a [`ErrorKind`] tag and are only translated into JSON-RPC
//! error codes at the server boundary via [`ToolError::into_error_data`].

use rmcp::ErrorData;
use rmcp::model::ErrorCode;
use serde::Serialize;
use serde_json::json;
use std::fmt;

/// Error kinds for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Required field missing or field holding an unrecognized value.
    ValidationError,
    /// Invocation named a tool this server does not provide.
    UnknownTool,
    /// The Notion page creation call failed.
    ExternalCallError,
    /// Required configuration absent.
    ConfigurationError,
}

impl ErrorKind {
    /// JSON-RPC error code used when surfacing this kind to the client.
    pub fn rpc_code(self) -> ErrorCode {
        match self {
            ErrorKind::ValidationError => ErrorCode::INVALID_PARAMS,
            ErrorKind::UnknownTool => ErrorCode::METHOD_NOT_FOUND,
            ErrorKind::ExternalCallError | ErrorKind::ConfigurationError => {
                ErrorCode::INTERNAL_ERROR
            }
        }
    }
}

/// Structured error for tool responses.
#[derive(Debug, Serialize)]
pub struct ToolError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ToolError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    // Convenience constructors

    pub fn missing_field(field: &str) -> Self {
        Self::new(ErrorKind::ValidationError, format!("{} is required", field)).with_field(field)
    }

    pub fn invalid_value(field: &str, reason: &str) -> Self {
        Self::new(ErrorKind::ValidationError, reason).with_field(field)
    }

    pub fn unknown_tool(name: &str) -> Self {
        Self::new(ErrorKind::UnknownTool, format!("Unknown tool: {}", name))
    }

    pub fn external_call(err: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::ExternalCallError,
            format!("Failed to record session in Notion: {}", err),
        )
    }

    pub fn configuration(err: impl fmt::Display) -> Self {
        Self::new(ErrorKind::ConfigurationError, err.to_string())
    }

    /// Convert into the protocol-level error returned to the MCP client.
    pub fn into_error_data(self) -> ErrorData {
        let mut data = json!({ "kind": self.kind });
        if let Some(field) = self.field {
            data["field"] = json!(field);
        }
        ErrorData::new(self.kind.rpc_code(), self.message, Some(data))
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ToolError {}

impl From<ToolError> for ErrorData {
    fn from(err: ToolError) -> Self {
        err.into_error_data()
    }
}

/// Result type for tool operations.
pub type ToolResult<T> = std::result::Result<T, ToolError>;
