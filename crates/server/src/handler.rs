//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.

use crate::tools::add::{AddJokeParams, add_impl};
use crate::tools::categories::categories_impl;
use crate::tools::category::{CategoryParams, category_impl};
use crate::tools::random::random_impl;

use jokebook_client::{CategoryResolver, JokeApiClient};
use jokebook_core::JokeDb;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for mcp-jokebook.
#[derive(Clone)]
pub struct JokebookServer {
    db: JokeDb,
    resolver: CategoryResolver<JokeApiClient>,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl JokebookServer {
    /// Create a new server handler.
    pub fn new(db: JokeDb, resolver: CategoryResolver<JokeApiClient>) -> Self {
        Self { db, resolver, tool_router: Self::tool_router() }
    }

    /// List all stored joke categories.
    #[tool(description = "List all joke categories currently stored in the jokebook, sorted by name.")]
    async fn jokebook_categories(&self) -> Result<CallToolResult, McpError> {
        categories_impl(&self.db).await
    }

    /// Look up jokes for a category, importing on first request.
    ///
    /// Served from the store when the category holds any joke; otherwise
    /// fetched from the external provider, filtered, persisted once, and
    /// re-served from the store.
    #[tool(
        description = "Get jokes for a category. Unknown categories are imported once from the external joke provider."
    )]
    async fn jokebook_category(&self, params: Parameters<CategoryParams>) -> Result<CallToolResult, McpError> {
        category_impl(&self.resolver, params.0).await
    }

    /// Pick one random joke across all categories.
    #[tool(description = "Get one joke selected uniformly at random across the whole jokebook.")]
    async fn jokebook_random(&self) -> Result<CallToolResult, McpError> {
        random_impl(&self.db).await
    }

    /// Add a two-part joke to a category.
    #[tool(description = "Add a two-part joke (setup and delivery) to a category, creating the category if needed.")]
    async fn jokebook_add(&self, params: Parameters<AddJokeParams>) -> Result<CallToolResult, McpError> {
        add_impl(&self.db, params.0).await
    }
}

impl ServerHandler for JokebookServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "mcp-jokebook".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
