//! Notion Dev Logger MCP Server
//!
//! An MCP server exposing a single `log_session` tool that records
//! development sessions as pages in a Notion database.

use anyhow::Result;
use clap::Parser;
use notion_dev_logger::cli::Cli;
use notion_dev_logger::config::Config;
use notion_dev_logger::error::ToolError;
use notion_dev_logger::logging::{self, LogTarget};
use notion_dev_logger::notion::NotionClient;
use notion_dev_logger::recorder::SessionRecorder;
use notion_dev_logger::tools::ToolHandler;
use rmcp::{
    ErrorData, RoleServer, ServerHandler, ServiceExt,
    model::{
        CallToolRequestParams, CallToolResult, Content, InitializeResult, ListToolsResult,
        PaginatedRequestParams, ServerCapabilities,
    },
    service::RequestContext,
    transport::io::stdio,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const INSTRUCTIONS: &str = "\
Records development sessions in Notion. Call log_session once per logical session \
with at least `purpose` and `changes`.";

/// MCP server handler.
#[derive(Clone)]
struct DevLoggerServer {
    tool_handler: Arc<ToolHandler>,
}

impl ServerHandler for DevLoggerServer {
    fn get_info(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: Default::default(),
            server_info: rmcp::model::Implementation {
                name: "notion-dev-logger".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            capabilities: ServerCapabilities {
                tools: Some(rmcp::model::ToolsCapability::default()),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            tools: self.tool_handler.get_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        let tool_name = request.name.clone();
        let start = std::time::Instant::now();

        let args = Value::Object(request.arguments.unwrap_or_default());
        match self.tool_handler.call_tool(&tool_name, args).await {
            Ok(result) => {
                let elapsed = start.elapsed();
                debug!(tool = %tool_name, duration_ms = elapsed.as_millis() as u64, "Tool call succeeded");

                let text = serde_json::to_string_pretty(&result)
                    .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;
                Ok(CallToolResult {
                    content: vec![Content::text(text)],
                    is_error: None,
                    meta: None,
                    structured_content: None,
                })
            }
            Err(e) => {
                warn!(
                    tool = %tool_name,
                    error_kind = ?e.kind,
                    error_message = %e.message,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Tool call failed"
                );
                Err(e.into_error_data())
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log, cli.verbose)?;

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with_config_error(ToolError::configuration(e), &cli.log),
    };
    let settings = match config.notion.resolve() {
        Ok(settings) => settings,
        Err(e) => exit_with_config_error(ToolError::configuration(e), &cli.log),
    };

    info!(
        "Starting Notion Dev Logger MCP Server v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("Notion API: {}", settings.base_url);
    info!("Database: {}", settings.database_id);

    let store = Arc::new(NotionClient::new(&settings)?);
    let recorder = SessionRecorder::new(store, config.properties);
    let server = DevLoggerServer {
        tool_handler: Arc::new(ToolHandler::new(recorder)),
    };

    // Run the stdio server
    info!("Server ready, listening on stdio");
    let transport = stdio();
    let service = server.serve(transport).await?;
    service.waiting().await?;

    Ok(())
}

/// Report a configuration problem once on stderr and terminate before serving anything.
fn exit_with_config_error(err: ToolError, log: &LogTarget) -> ! {
    // stderr logging would print the same line twice
    if matches!(log, LogTarget::File(_)) {
        error!(error_kind = ?err.kind, "{}", err.message);
    }
    eprintln!(
        "Error: {}. Set NOTION_API_KEY and NOTION_DATABASE_ID in the environment or in the config file.",
        err
    );
    std::process::exit(1);
}
