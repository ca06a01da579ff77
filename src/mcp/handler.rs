//! Request dispatcher: routes tool invocations to storage operations
//!
//! Every invocation is independent. Failures of any kind are converted to an
//! error-flagged [`ToolCallResult`] here; nothing thrown inside a tool call
//! crosses the protocol boundary.

use serde_json::{json, Value};

use super::protocol::{
    methods, InitializeResult, McpHandler, McpRequest, McpResponse, ToolCallResult,
};
use super::tools::tool_definitions;
use crate::error::{Result, TrackerError};
use crate::storage::queries::{insert_idea, list_ideas, list_ideas_prioritized, portfolio_summary};
use crate::storage::Storage;
use crate::types::{AddIdeaParams, ArtifactParams, IdeaFilter};

/// The closed set of operations this server exposes. Dispatch is an
/// exhaustive match over this enum, not a string comparison chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    AddIdea,
    GetIdeas,
    Artifact,
}

impl Tool {
    pub const fn name(&self) -> &'static str {
        match self {
            Tool::AddIdea => "add_project_idea",
            Tool::GetIdeas => "get_project_ideas",
            Tool::Artifact => "generate_project_artifact",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "add_project_idea" => Some(Tool::AddIdea),
            "get_project_ideas" => Some(Tool::GetIdeas),
            "generate_project_artifact" => Some(Tool::Artifact),
            _ => None,
        }
    }
}

/// MCP request handler backed by the idea store
pub struct TrackerHandler {
    storage: Storage,
}

impl TrackerHandler {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Dispatch a tool call by name. Unknown names and failed operations
    /// both come back as error-flagged results; the process keeps running.
    pub fn handle_tool_call(&self, name: &str, params: Value) -> ToolCallResult {
        let tool = match Tool::from_name(name) {
            Some(tool) => tool,
            None => {
                tracing::warn!(tool = name, "unknown tool requested");
                return ToolCallResult::error(
                    TrackerError::UnknownTool(name.to_string()).display_message(),
                );
            }
        };

        let outcome = match tool {
            Tool::AddIdea => self.add_idea(params),
            Tool::GetIdeas => self.get_ideas(params),
            Tool::Artifact => self.generate_artifact(params),
        };

        outcome.unwrap_or_else(|e| {
            tracing::warn!(tool = tool.name(), error = %e, "tool call failed");
            ToolCallResult::error(e.display_message())
        })
    }

    fn add_idea(&self, params: Value) -> Result<ToolCallResult> {
        let params: AddIdeaParams = serde_json::from_value(params)
            .map_err(|e| TrackerError::Validation(e.to_string()))?;
        let idea = params.validate()?;

        let stored = self
            .storage
            .with_transaction(|conn| insert_idea(conn, &idea))?;

        tracing::info!(id = stored.id, name = %stored.project_name, "idea recorded");
        Ok(ToolCallResult::text(format!(
            "Project idea '{}' added successfully (total score {}, tier {})",
            stored.project_name, stored.total_score, stored.project_tier
        )))
    }

    fn get_ideas(&self, params: Value) -> Result<ToolCallResult> {
        let filter: IdeaFilter = serde_json::from_value(params)
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        let ideas = self
            .storage
            .with_connection(|conn| list_ideas(conn, &filter))?;

        Ok(ToolCallResult::json(&ideas))
    }

    fn generate_artifact(&self, params: Value) -> Result<ToolCallResult> {
        let params: ArtifactParams = serde_json::from_value(params)
            .map_err(|e| TrackerError::Validation(e.to_string()))?;
        let view_type = params.view_type()?;

        let (ideas, summary) = self.storage.with_connection(|conn| {
            Ok((list_ideas_prioritized(conn)?, portfolio_summary(conn)?))
        })?;

        // view_type is forwarded metadata for the renderer; the data set is
        // the same for every view. The element names match the dashboard's
        // chart set and are opaque tokens on this side.
        let artifact = json!({
            "data": ideas,
            "summary": summary,
            "visualization_instructions": {
                "view_type": view_type.as_str(),
                "style": "portfolio_dashboard",
                "elements": [
                    "category_treemap",
                    "phase_pipeline",
                    "risk_impact_matrix",
                    "resource_distribution",
                ],
            },
        });

        Ok(ToolCallResult::json(&artifact))
    }
}

impl McpHandler for TrackerHandler {
    fn handle_request(&self, request: McpRequest) -> McpResponse {
        match request.method.as_str() {
            methods::INITIALIZE => {
                let result = InitializeResult::default();
                McpResponse::success(request.id, json!(result))
            }
            methods::INITIALIZED => McpResponse::success(request.id, json!({})),
            methods::LIST_TOOLS => {
                let tools = tool_definitions();
                McpResponse::success(request.id, json!({"tools": tools}))
            }
            methods::CALL_TOOL => {
                let name = request
                    .params
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or("");
                let arguments = request
                    .params
                    .get("arguments")
                    .cloned()
                    .unwrap_or(json!({}));

                let result = self.handle_tool_call(name, arguments);
                McpResponse::success(request.id, json!(result))
            }
            _ => McpResponse::error(
                request.id,
                -32601,
                format!("Method not found: {}", request.method),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::tools::TOOL_DEFINITIONS;

    fn handler() -> TrackerHandler {
        TrackerHandler::new(Storage::open_in_memory().unwrap())
    }

    #[test]
    fn test_tool_names_match_catalog() {
        for (name, _, _) in TOOL_DEFINITIONS {
            let tool = Tool::from_name(name).expect("catalog name resolves");
            assert_eq!(tool.name(), *name);
        }
        assert!(Tool::from_name("memory_create").is_none());
    }

    #[test]
    fn test_unknown_tool_is_error_flagged_with_name() {
        let handler = handler();
        let result = handler.handle_tool_call("drop_all_tables", json!({}));
        assert!(result.is_error());
        assert_eq!(result.text_payload(), "Unknown tool: drop_all_tables");
    }

    #[test]
    fn test_add_idea_confirmation_references_name() {
        let handler = handler();
        let result = handler.handle_tool_call(
            "add_project_idea",
            json!({"project_name": "CRM migration", "category": "Sales"}),
        );
        assert!(!result.is_error());
        assert!(result.text_payload().contains("CRM migration"));
    }

    #[test]
    fn test_add_idea_missing_category_is_error_not_panic() {
        let handler = handler();
        let result = handler.handle_tool_call("add_project_idea", json!({"project_name": "x"}));
        assert!(result.is_error());
        assert!(result.text_payload().contains("category"));
    }

    #[test]
    fn test_failed_add_leaves_store_unchanged() {
        let handler = handler();
        let result = handler.handle_tool_call(
            "add_project_idea",
            json!({"project_name": "x", "category": "y", "priority_level": 5}),
        );
        assert!(result.is_error());

        let listed = handler.handle_tool_call("get_project_ideas", json!({}));
        let ideas: Vec<serde_json::Value> =
            serde_json::from_str(&listed.text_payload()).unwrap();
        assert!(ideas.is_empty());
    }

    #[test]
    fn test_artifact_rejects_unknown_view_type() {
        let handler = handler();
        let result =
            handler.handle_tool_call("generate_project_artifact", json!({"view_type": "pie"}));
        assert!(result.is_error());
        assert!(result.text_payload().contains("pie"));
    }

    #[test]
    fn test_initialize_and_list_tools() {
        let handler = handler();

        let response = handler.handle_request(McpRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: methods::INITIALIZE.to_string(),
            params: json!({}),
        });
        let result = response.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "ideabank");

        let response = handler.handle_request(McpRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(2)),
            method: methods::LIST_TOOLS.to_string(),
            params: json!({}),
        });
        let tools = response.result.unwrap();
        assert_eq!(tools["tools"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_unknown_method_is_protocol_error() {
        let handler = handler();
        let response = handler.handle_request(McpRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(3)),
            method: "resources/list".to_string(),
            params: json!({}),
        });
        assert_eq!(response.error.unwrap().code, -32601);
    }
}
