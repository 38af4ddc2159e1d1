use std::sync::Arc;
use rmcp::model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo};
use serde::Deserialize;

use rmcp::{Error as McpError, ServerHandler, schemars, tool};

use super::render::{render_icons, render_list, render_search};
use crate::docs::{CorpusStore, QueryError};

#[derive(Clone)]
pub struct DocsServer {
    pub store: Arc<CorpusStore>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchDocsRequest {
    #[schemars(description = "Search query to find in component names, descriptions, and documentation content")]
    pub query: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetComponentDocsRequest {
    #[schemars(description = "Exact component name (e.g. Button, Modal, DatePicker)")]
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListComponentsRequest {
    #[schemars(
        description = "Optional filter by category: form, data-display, feedback, layout, navigation, utility, overview, lib, guide",
        default
    )]
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchIconsRequest {
    #[schemars(description = "Search query to find icons by name, description, or category (e.g. 'arrow', 'close', 'chart')")]
    pub query: String,
}

fn invalid_query(e: QueryError) -> McpError {
    McpError::invalid_params(e.to_string(), None)
}

#[tool(tool_box)]
impl DocsServer {

    pub fn new(store: Arc<CorpusStore>) -> Self {
        Self {
            store,
        }
    }

    #[tool(description = "Search across all vacano-ui documentation by keyword. Searches in component names, descriptions, and full content.")]
    pub async fn search_docs(
        &self,
        #[tool(aggr)] SearchDocsRequest { query }: SearchDocsRequest,
    ) -> Result<CallToolResult, McpError> {
        let results = self.store.search(&query).map_err(invalid_query)?;
        tracing::debug!("search_docs {:?}: {} result(s)", query, results.len());

        Ok(CallToolResult::success(vec![Content::text(render_search(&query, &results))]))
    }

    #[tool(description = "Get full documentation for a specific vacano-ui component by exact name (e.g. Button, Modal, DatePicker).")]
    pub async fn get_component_docs(
        &self,
        #[tool(aggr)] GetComponentDocsRequest { name }: GetComponentDocsRequest,
    ) -> Result<CallToolResult, McpError> {
        if name.trim().is_empty() {
            return Err(McpError::invalid_params("name parameter is required", None));
        }

        let text = match self.store.get_by_name(&name) {
            Some(entry) => entry.content,
            None => format!("Component not found: {name}"),
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "List all available vacano-ui components. Optionally filter by category: form, data-display, feedback, layout, navigation, utility, overview, lib, guide.")]
    pub async fn list_components(
        &self,
        #[tool(aggr)] ListComponentsRequest { category }: ListComponentsRequest,
    ) -> Result<CallToolResult, McpError> {
        let results = self.store.list(&category);

        Ok(CallToolResult::success(vec![Content::text(render_list(&category, &results))]))
    }

    #[tool(description = "Search vacano-ui icons by name, description, or category. Icons are imported from '@vacano/ui/icons'. Use this to find the right icon for a UI element.")]
    pub async fn search_icons(
        &self,
        #[tool(aggr)] SearchIconsRequest { query }: SearchIconsRequest,
    ) -> Result<CallToolResult, McpError> {
        let results = self.store.search_icons(&query).map_err(invalid_query)?;
        tracing::debug!("search_icons {:?}: {} result(s)", query, results.len());

        Ok(CallToolResult::success(vec![Content::text(render_icons(&query, &results))]))
    }
}

#[tool(tool_box)]
impl ServerHandler for DocsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some("This server provides the vacano-ui documentation. Use 'search_docs' to search by keyword, 'get_component_docs' to fetch one component's full documentation by name, 'list_components' to browse components by category, or 'search_icons' to find an icon.".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::{Category, DocEntry};

    fn server() -> DocsServer {
        let store = Arc::new(CorpusStore::new());
        store.reload(vec![DocEntry {
            name: "Button".to_string(),
            category: Category::Form,
            description: "A clickable button.".to_string(),
            content: "# Button\n\nA clickable button.".to_string(),
        }]);
        DocsServer::new(store)
    }

    #[tokio::test]
    async fn test_empty_parameters_are_invalid() {
        let server = server();

        assert!(server.search_docs(SearchDocsRequest { query: String::new() }).await.is_err());
        assert!(server.search_icons(SearchIconsRequest { query: " ".to_string() }).await.is_err());
        assert!(server.get_component_docs(GetComponentDocsRequest { name: String::new() }).await.is_err());
    }

    #[tokio::test]
    async fn test_not_found_is_a_successful_result() {
        let server = server();

        let result = server
            .get_component_docs(GetComponentDocsRequest { name: "Missing".to_string() })
            .await
            .unwrap();
        assert_ne!(result.is_error, Some(true));

        let result = server
            .search_docs(SearchDocsRequest { query: "nothing-matches".to_string() })
            .await
            .unwrap();
        assert_ne!(result.is_error, Some(true));
    }

    #[test]
    fn test_server_info_lists_tools_capability() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("search_icons"));
    }
}
