//! MCP server
//!
//! [`CloudRuServer`] is an `rmcp` handler backed by [`Tools`]: `tools/list`
//! is built from the tool catalogue and `tools/call` goes through
//! [`Tools::call`]. Framing, the initialize handshake, pings and
//! notifications are handled by rmcp's stdio service.
//!
//! rmcp dispatches requests concurrently; tool calls still run one at a
//! time, each to completion before the next starts.

use std::future::Future;
use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, ErrorData as McpError, Implementation,
    ListToolsResult, PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
    Tool,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::tools::{ToolDescriptor, ToolOutput, Tools};

pub const SERVER_NAME: &str = "Cloud.ru Container Apps MCP";

const INSTRUCTIONS: &str = "Manage Cloud.ru Container Apps and Artifact Registry, and build and \
push Docker images. Call cloudru_containerapps_description for usage details.";

/// Convert a catalogue descriptor into an rmcp tool
pub fn to_tool(descriptor: ToolDescriptor) -> Tool {
    let schema = match descriptor.input_schema {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    Tool::new(descriptor.name, descriptor.description, Arc::new(schema))
}

/// Tool failures stay inside the result with `isError` set
pub fn to_result(output: ToolOutput) -> CallToolResult {
    let content = vec![Content::text(output.text)];
    if output.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

#[derive(Clone)]
pub struct CloudRuServer {
    tools: Arc<Tools>,
    calls: Arc<Mutex<()>>,
}

impl CloudRuServer {
    pub fn new(tools: Tools) -> Self {
        Self {
            tools: Arc::new(tools),
            calls: Arc::new(Mutex::new(())),
        }
    }
}

impl ServerHandler for CloudRuServer {
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        let tools = self.tools.list().into_iter().map(to_tool).collect();
        std::future::ready(Ok(ListToolsResult::with_all_items(tools)))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            tracing::debug!("<- tools/call {}", request.name);
            let arguments = request.arguments.unwrap_or_default();
            let _turn = self.calls.lock().await;
            let output = self.tools.call(&request.name, &arguments).await;
            Ok(to_result(output))
        }
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_tool_list_changed()
                .build(),
            protocol_version: ProtocolVersion::LATEST,
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: crate::VERSION.to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}
